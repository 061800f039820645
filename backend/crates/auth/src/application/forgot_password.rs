//! Forgot Password Use Case
//!
//! Always succeeds from the caller's point of view so the endpoint cannot be
//! used to discover registered emails. Delivery problems are only logged.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::random_token;
use platform::mail::{Mailer, OutgoingMail};

use crate::application::config::AuthConfig;
use crate::domain::entity::{issued_token::IssuedToken, user::User};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, token_type::TokenType};
use crate::error::AuthResult;

/// Random bytes in a reset token before base64url encoding
const RESET_TOKEN_BYTES: usize = 32;

pub struct ForgotPasswordUseCase<U, T, M>
where
    U: UserRepository,
    T: TokenRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, T, M> ForgotPasswordUseCase<U, T, M>
where
    U: UserRepository,
    T: TokenRepository,
    M: Mailer + Sync,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<T>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, email: &str) -> AuthResult<()> {
        let Ok(email) = Email::new(email) else {
            return Ok(());
        };
        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = random_token(RESET_TOKEN_BYTES);
        let record = IssuedToken::issue(
            user.id,
            &token,
            TokenType::PasswordReset,
            Utc::now(),
            self.config.reset_token_ttl,
        );
        self.token_repo.create(&record).await?;

        let mail = reset_mail(&user, &self.config.reset_link(&token));
        if let Err(e) = self.mailer.send(mail).await {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to send password reset mail");
        } else {
            tracing::info!(user_id = %user.id, "Password reset mail sent");
        }

        Ok(())
    }
}

fn reset_mail(user: &User, link: &str) -> OutgoingMail {
    OutgoingMail {
        to: user.email.as_str().to_string(),
        subject: "Reset your password".to_string(),
        html: format!(
            "<p>Hi {name},</p>\
             <p>Use the link below to choose a new password. It expires in one hour.</p>\
             <p><a href=\"{link}\">{link}</a></p>\
             <p>If you did not ask for this, you can ignore this email.</p>",
            name = user.name,
        ),
    }
}
