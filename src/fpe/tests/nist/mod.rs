mod test_nist_ff1;
