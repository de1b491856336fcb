mod create_notifier_tests;
mod smtp_tests;
