mod helpers;

mod error_tests;
mod io_tests;
mod operator_tests;
mod switch_tests;
