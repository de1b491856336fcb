mod config_tests;
mod sweeper_tests;
