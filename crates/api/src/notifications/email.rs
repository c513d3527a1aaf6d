//! Email notifications via SMTP.
//!
//! [`EmailNotifier`] wraps the `lettre` async SMTP transport to send
//! plain-text mails for the submission workflow: a heads-up to the
//! moderation inbox when a new tournament is staged, and an approval note
//! to the submitter when it goes live. Configuration is loaded from
//! environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no notifier should be
//! constructed.

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@hemamap.local";

/// Configuration for the SMTP email notifier.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Moderation inbox notified of new submissions, when set.
    pub submission_inbox: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable           | Required | Default                  |
    /// |--------------------|----------|--------------------------|
    /// | `SMTP_HOST`        | yes      | --                       |
    /// | `SMTP_PORT`        | no       | `587`                    |
    /// | `SMTP_FROM`        | no       | `noreply@hemamap.local`  |
    /// | `SMTP_USER`        | no       | --                       |
    /// | `SMTP_PASSWORD`    | no       | --                       |
    /// | `SUBMISSION_INBOX` | no       | --                       |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            submission_inbox: std::env::var("SUBMISSION_INBOX").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailNotifier
// ---------------------------------------------------------------------------

/// Sends workflow notification emails via SMTP.
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    /// Create a notifier with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Create a notifier from the environment, or `None` when SMTP is not
    /// configured.
    pub fn from_env() -> Option<Self> {
        EmailConfig::from_env().map(Self::new)
    }

    /// Notify the moderation inbox that a new submission was staged.
    ///
    /// No-op when `SUBMISSION_INBOX` is unset.
    pub async fn submission_received(
        &self,
        tournament_name: &str,
        submitted_by: Option<&str>,
    ) -> Result<(), EmailError> {
        let Some(inbox) = self.config.submission_inbox.clone() else {
            return Ok(());
        };

        let subject = format!("New tournament submission: {tournament_name}");
        let body = format!(
            "A new tournament was submitted for review.\n\n\
             Name: {tournament_name}\n\
             Submitted by: {}\n\n\
             It is waiting in the staging area until an administrator approves it.",
            submitted_by.unwrap_or("unknown"),
        );

        self.send(&inbox, &subject, body).await
    }

    /// Notify the submitter that their tournament was approved.
    pub async fn submission_approved(
        &self,
        to_email: &str,
        tournament_name: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("Your tournament \"{tournament_name}\" is live");
        let body = format!(
            "Good news -- your submission \"{tournament_name}\" was approved \
             and is now listed publicly.\n\n\
             You can post updates for it from your account page.",
        );

        self.send(to_email, &subject, body).await
    }

    async fn send(&self, to_email: &str, subject: &str, body: String) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = to_email, subject, "Notification email sent");
        Ok(())
    }
}
