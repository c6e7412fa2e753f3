mod sdl_parser_definition_tests;
mod sdl_parser_value_tests;
mod utils;
