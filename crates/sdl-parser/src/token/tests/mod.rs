mod string_literal_tests;
