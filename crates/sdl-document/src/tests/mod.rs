mod round_trip_tests;
mod serializer_tests;
mod utils;
