mod statements_tests;
mod tables_tests;
mod trivia_tests;
