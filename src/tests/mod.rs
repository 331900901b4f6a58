mod builder_tests;
mod request_tests;
mod response_tests;
