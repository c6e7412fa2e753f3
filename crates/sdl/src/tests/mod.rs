mod schema_args_tests;
