mod connection_tests;
mod otp_repository_tests;
