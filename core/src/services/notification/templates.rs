//! Email content templates

use super::EmailMessage;
use crate::domain::entities::account::{RESET_TOKEN_TTL_MINUTES, VERIFICATION_CODE_TTL_MINUTES};

/// Builds the verification-code email.
pub fn verification_email(to: &str, code: &str) -> EmailMessage {
    let body = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #ddd; border-radius: 8px; background-color: #f9f9f9;">
  <h2 style="color: #4CAF50; text-align: center;">Verification Code</h2>
  <p style="font-size: 16px; color: #333;">Your verification code is:</p>
  <div style="text-align: center; margin: 20px 0;">
    <span style="display: inline-block; font-size: 24px; font-weight: bold; color: #4CAF50; padding: 10px 20px; border: 1px solid #4CAF50; border-radius: 5px; background-color: #e8f5e9;">{code}</span>
  </div>
  <p style="font-size: 16px; color: #333;">Please use this code to verify your account. The code will expire in {ttl} minutes.</p>
  <p style="font-size: 16px; color: #333;">If you did not request this, please ignore this email.</p>
  <footer style="margin-top: 20px; text-align: center; font-size: 12px; color: #aaa;">
    <p>This is an automated message. Please do not reply to this email.</p>
  </footer>
</div>"#,
        code = code,
        ttl = VERIFICATION_CODE_TTL_MINUTES,
    );

    EmailMessage {
        to: to.to_string(),
        subject: "Your Verification Code".to_string(),
        body,
    }
}

/// Builds the password-reset email carrying the reset link.
pub fn reset_password_email(to: &str, reset_url: &str) -> EmailMessage {
    let body = format!(
        r#"<p>Your password reset link is:</p>
<p><a href="{reset_url}">{reset_url}</a></p>
<p>The link expires in {ttl} minutes. If you have not requested this email then please ignore it.</p>"#,
        reset_url = reset_url,
        ttl = RESET_TOKEN_TTL_MINUTES,
    );

    EmailMessage {
        to: to.to_string(),
        subject: "Reset Your Password".to_string(),
        body,
    }
}
