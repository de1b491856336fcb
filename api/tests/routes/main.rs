//! HTTP route tests driving the real handlers

mod common;
mod app_test;
mod send_otp_test;
mod verify_otp_test;
