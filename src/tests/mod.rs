mod cli_context_tests;
mod error_tests;
mod logging_tests;
mod storage_tests;
