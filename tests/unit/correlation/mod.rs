mod pearson;
