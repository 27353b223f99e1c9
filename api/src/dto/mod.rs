pub mod otp;

pub use otp::{ApiResponse, ErrorResponse, SendOtpRequest, VerifyOtpRequest};
