mod builder_tests;
mod concurrent_tests;
