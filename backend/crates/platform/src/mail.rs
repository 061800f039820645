//! Transactional Mail
//!
//! [`Mailer`] is implemented by [`ResendMailer`] (Resend HTTP API) and by
//! [`LogMailer`], which only logs and is used when no API key is configured.

use serde::Serialize;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// A single outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Sends mail through the Resend API.
#[derive(Clone)]
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let payload = ResendPayload {
            from: &self.from,
            to: [&mail.to],
            subject: &mail.subject,
            html: &mail.html,
        };

        let response = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(to = %mail.to, subject = %mail.subject, "Mail accepted by provider");
        Ok(())
    }
}

/// Development mailer: writes the message to the log instead of sending it.
#[derive(Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.html,
            "Mail delivery disabled, logging message instead"
        );
        Ok(())
    }
}

/// Either provider, chosen once at startup.
#[derive(Clone)]
pub enum AnyMailer {
    Resend(ResendMailer),
    Log(LogMailer),
}

impl AnyMailer {
    /// Resend when an API key is present, otherwise log only
    pub fn from_api_key(api_key: Option<String>, from: impl Into<String>) -> Self {
        match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => AnyMailer::Resend(ResendMailer::new(key, from)),
            None => AnyMailer::Log(LogMailer),
        }
    }
}

impl Mailer for AnyMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        match self {
            AnyMailer::Resend(m) => Mailer::send(m, mail).await,
            AnyMailer::Log(m) => Mailer::send(m, mail).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = ResendPayload {
            from: "Courses <noreply@example.com>",
            to: ["ann@example.com"],
            subject: "Reset",
            html: "<p>hi</p>",
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["to"][0], "ann@example.com");
        assert_eq!(json["from"], "Courses <noreply@example.com>");
    }

    #[test]
    fn test_blank_api_key_means_log_only() {
        assert!(matches!(
            AnyMailer::from_api_key(Some("  ".into()), "a@b.c"),
            AnyMailer::Log(_)
        ));
        assert!(matches!(
            AnyMailer::from_api_key(Some("re_123".into()), "a@b.c"),
            AnyMailer::Resend(_)
        ));
    }

    #[test]
    fn test_log_mailer_never_fails() {
        let mail = OutgoingMail {
            to: "ann@example.com".into(),
            subject: "Reset your password".into(),
            html: "<a href=\"#\">reset</a>".into(),
        };
        tokio_test::block_on(async {
            assert!(Mailer::send(&LogMailer, mail).await.is_ok());
        });
    }
}
