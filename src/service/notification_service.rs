use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    config::Config,
    db::{db::DBClient, userdb::UserExt},
    mail::mails,
    models::usermodel::{NotificationPreference, OtpCheck, User},
    service::{error::ServiceError, sms::SmsService},
    utils::{otp_generator::generate_otp, token},
};

pub const OTP_VALIDITY_MINUTES: i64 = 10;

/// Routes messages to users over email or SMS according to each account's
/// notification preference, and owns the OTP issue/verify flow.
#[derive(Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
    config: Config,
    sms_service: SmsService,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>, config: Config) -> Self {
        let sms_service = SmsService::new(&config);
        Self {
            db_client,
            config,
            sms_service,
        }
    }

    /// Issues a fresh 6-digit OTP, persists it with a 10-minute expiry, and
    /// delivers it over the user's preferred channel.
    pub async fn send_otp(&self, user: &User) -> Result<(), ServiceError> {
        let otp = generate_otp();
        let expires_at = Utc::now() + Duration::minutes(OTP_VALIDITY_MINUTES);

        self.db_client
            .set_verification_otp(user.id, &otp, expires_at)
            .await?;

        match user.notification_preference {
            NotificationPreference::Email => {
                // The email also carries a signed link for one-click
                // verification.
                let verify_token = token::create_token(
                    &user.id.to_string(),
                    self.config.jwt_secret.as_bytes(),
                    self.config.jwt_maxage,
                )
                .map_err(|e| ServiceError::Notification(e.to_string()))?;
                let verify_link = format!(
                    "{}/verify-email?token={}",
                    self.config.frontend_url, verify_token
                );

                mails::send_otp_email(&self.config, &user.email, &user.username, &otp, &verify_link)
                    .await
                    .map_err(|e| ServiceError::Notification(e.to_string()))?;
            }
            NotificationPreference::Sms => {
                let phone = user.phone_number.as_deref().ok_or_else(|| {
                    ServiceError::Notification(
                        "Account prefers SMS but has no phone number".to_string(),
                    )
                })?;
                self.sms_service
                    .send_sms(
                        phone,
                        &format!(
                            "Your Anything Cars verification code is {}. It expires in {} minutes.",
                            otp, OTP_VALIDITY_MINUTES
                        ),
                    )
                    .await?;
            }
        }

        info!(user_id = %user.id, "verification otp sent");
        Ok(())
    }

    /// Checks a submitted OTP and, when valid, marks the account verified and
    /// clears the stored code so it cannot be replayed.
    pub async fn verify_otp(&self, user_id: Uuid, submitted: &str) -> Result<User, ServiceError> {
        let user = self
            .db_client
            .get_user(Some(user_id), None, None, None)
            .await?
            .ok_or_else(|| ServiceError::Validation("Account not found".to_string()))?;

        match user.check_otp(submitted, Utc::now()) {
            OtpCheck::NoneIssued => Err(ServiceError::OtpNotIssued),
            OtpCheck::Mismatch => Err(ServiceError::OtpMismatch),
            OtpCheck::Expired => Err(ServiceError::OtpExpired),
            OtpCheck::Valid => {
                let user = self.db_client.clear_otp_and_verify(user_id).await?;

                if let Err(err) =
                    mails::send_welcome_email(&self.config, &user.email, &user.username).await
                {
                    error!(user_id = %user.id, "failed to send welcome email: {}", err);
                }

                Ok(user)
            }
        }
    }

    pub async fn send_notification(
        &self,
        user: &User,
        subject: &str,
        message: &str,
    ) -> Result<(), ServiceError> {
        match user.notification_preference {
            NotificationPreference::Email => {
                mails::send_notification_email(&self.config, &user.email, subject, message)
                    .await
                    .map_err(|e| ServiceError::Notification(e.to_string()))?;
            }
            NotificationPreference::Sms => {
                let phone = user.phone_number.as_deref().ok_or_else(|| {
                    ServiceError::Notification(
                        "Account prefers SMS but has no phone number".to_string(),
                    )
                })?;
                self.sms_service
                    .send_sms(phone, &format!("{}: {}", subject, message))
                    .await?;
            }
        }

        Ok(())
    }

    /// Best-effort fan-out to the operations contacts. Failures are logged
    /// and swallowed so admin alerting never blocks a user-facing flow.
    pub async fn notify_admin(&self, subject: &str, message: &str) {
        if !self.config.admin_email.is_empty() {
            if let Err(err) = mails::send_notification_email(
                &self.config,
                &self.config.admin_email,
                subject,
                message,
            )
            .await
            {
                error!("failed to email admin: {}", err);
            }
        }

        if !self.config.admin_phone.is_empty() {
            if let Err(err) = self
                .sms_service
                .send_sms(&self.config.admin_phone, &format!("{}: {}", subject, message))
                .await
            {
                error!("failed to sms admin: {}", err);
            }
        }
    }
}
