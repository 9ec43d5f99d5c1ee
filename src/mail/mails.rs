use super::sendmail::send_email;
use crate::config::Config;

type MailResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub async fn send_otp_email(
    config: &Config,
    to_email: &str,
    username: &str,
    otp_code: &str,
    verify_link: &str,
) -> MailResult {
    let subject = "Your Anything Cars verification code";
    let html_body = format!(
        r#"<div style="font-family: sans-serif; max-width: 480px; margin: 0 auto;">
            <h2>Hello {username},</h2>
            <p>Use the code below to verify your account. It expires in 10 minutes.</p>
            <p style="font-size: 32px; font-weight: bold; letter-spacing: 8px;">{otp_code}</p>
            <p>Or verify directly: <a href="{verify_link}">confirm your email</a></p>
            <p>If you did not request this code you can ignore this email.</p>
        </div>"#
    );

    send_email(config, to_email, subject, &html_body).await
}

pub async fn send_welcome_email(config: &Config, to_email: &str, username: &str) -> MailResult {
    let subject = "Welcome to Anything Cars";
    let html_body = format!(
        r#"<div style="font-family: sans-serif; max-width: 480px; margin: 0 auto;">
            <h2>Welcome, {username}!</h2>
            <p>Your account is verified. You can now hire vehicles, add security
            escorts to your trips, and browse the marketplace.</p>
            <p><a href="{}/dashboard">Go to your dashboard</a></p>
        </div>"#,
        config.frontend_url
    );

    send_email(config, to_email, subject, &html_body).await
}

pub async fn send_forgot_password_email(
    config: &Config,
    to_email: &str,
    username: &str,
    reset_token: &str,
) -> MailResult {
    let subject = "Reset your password";
    let reset_link = format!("{}/reset-password?token={}", config.frontend_url, reset_token);
    let html_body = format!(
        r#"<div style="font-family: sans-serif; max-width: 480px; margin: 0 auto;">
            <h2>Hello {username},</h2>
            <p>We received a request to reset your password. The link below is
            valid for one hour.</p>
            <p><a href="{reset_link}">Reset password</a></p>
            <p>If you did not request this, you can ignore this email.</p>
        </div>"#
    );

    send_email(config, to_email, subject, &html_body).await
}

pub async fn send_notification_email(
    config: &Config,
    to_email: &str,
    subject: &str,
    message: &str,
) -> MailResult {
    let html_body = format!(
        r#"<div style="font-family: sans-serif; max-width: 480px; margin: 0 auto;">
            <h2>{subject}</h2>
            <p>{message}</p>
        </div>"#
    );

    send_email(config, to_email, subject, &html_body).await
}
