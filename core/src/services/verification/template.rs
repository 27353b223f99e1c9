//! Verification email content

/// Subject line of the verification email
pub const OTP_EMAIL_SUBJECT: &str = "Email Verification Code";

/// Render the HTML body carrying the code
pub fn render_otp_email(code: &str, expiry_minutes: i64) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h2>Email Verification</h2>
    <p>Your verification code is:</p>
    <h1 style="font-size: 32px; letter-spacing: 8px; text-align: center; padding: 20px; background: #f5f5f5; border-radius: 4px;">
        {code}
    </h1>
    <p>This code will expire in {expiry_minutes} minutes.</p>
    <p>If you didn't request this code, please ignore this email.</p>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_code_and_expiry() {
        let body = render_otp_email("042917", 10);
        assert!(body.contains("042917"));
        assert!(body.contains("expire in 10 minutes"));
    }
}
