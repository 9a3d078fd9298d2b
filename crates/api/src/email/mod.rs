//! Transactional email delivery via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport to send plain-text
//! notifications for new leads and meeting bookings. Configuration is loaded
//! from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer is constructed.
//!
//! Delivery is at-most-once: handlers spawn sends with the `notify_*`
//! helpers and a failure is logged, never surfaced to the client.

use vitrine_db::models::lead::Lead;
use vitrine_db::models::meeting::Meeting;

use crate::state::AppState;

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

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@vitrine.local";

/// Configuration for the SMTP mailer.
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
    /// Recipient for internal notifications (new leads, bookings).
    pub admin_email: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                   |
    /// |-----------------|----------|---------------------------|
    /// | `SMTP_HOST`     | yes      | --                        |
    /// | `SMTP_PORT`     | no       | `587`                     |
    /// | `SMTP_FROM`     | no       | `noreply@vitrine.local`   |
    /// | `SMTP_USER`     | no       | --                        |
    /// | `SMTP_PASSWORD` | no       | --                        |
    /// | `ADMIN_EMAIL`   | no       | --                        |
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
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
        })
    }
}

/// Sends transactional emails via SMTP.
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    /// Build a mailer from the environment; `None` when `SMTP_HOST` is unset.
    pub fn from_env() -> Option<Self> {
        EmailConfig::from_env().map(|config| Self { config })
    }

    async fn send(&self, to: &str, subject: String, body: String) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to.parse()?)
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

        tracing::info!(to, "Email sent");
        Ok(())
    }

    /// Notify the admin address about a new contact-form lead.
    pub async fn send_lead_notification(&self, lead: &Lead) -> Result<(), EmailError> {
        let Some(admin_email) = &self.config.admin_email else {
            return Ok(());
        };
        let subject = format!("New lead: {}", lead.name);
        let body = format!(
            "A new lead was submitted.\n\nName: {}\nEmail: {}\nPhone: {}\nSource: {}\n\nMessage:\n{}\n",
            lead.name,
            lead.email,
            lead.phone.as_deref().unwrap_or("-"),
            lead.source,
            lead.message,
        );
        self.send(admin_email, subject, body).await
    }

    /// Send the booking confirmation to the visitor.
    pub async fn send_meeting_confirmation(&self, meeting: &Meeting) -> Result<(), EmailError> {
        let subject = "Your meeting is confirmed".to_string();
        let body = format!(
            "Hello {},\n\nYour meeting is confirmed.\n\nDate: {}\nDuration: {} minutes\nTimezone: {}\nConfirmation code: {}\n",
            meeting.name,
            meeting.scheduled_at.format("%Y-%m-%d %H:%M UTC"),
            meeting.duration_mins,
            meeting.timezone,
            meeting.confirmation_token,
        );
        self.send(&meeting.email, subject, body).await
    }

    /// Notify the admin address about a new booking.
    pub async fn send_meeting_admin_notification(
        &self,
        meeting: &Meeting,
    ) -> Result<(), EmailError> {
        let Some(admin_email) = &self.config.admin_email else {
            return Ok(());
        };
        let subject = format!("New meeting booked by {}", meeting.name);
        let body = format!(
            "A meeting was booked.\n\nName: {}\nEmail: {}\nDate: {}\nDuration: {} minutes\n",
            meeting.name,
            meeting.email,
            meeting.scheduled_at.format("%Y-%m-%d %H:%M UTC"),
            meeting.duration_mins,
        );
        self.send(admin_email, subject, body).await
    }
}

/// Fire-and-forget admin notification for a new lead.
pub fn notify_lead(state: &AppState, lead: Lead) {
    let Some(mailer) = state.mailer.clone() else {
        return;
    };
    tokio::spawn(async move {
        if let Err(e) = mailer.send_lead_notification(&lead).await {
            tracing::warn!(error = %e, lead_id = lead.id, "Lead notification email failed");
        }
    });
}

/// Fire-and-forget confirmation + admin notification for a new booking.
pub fn notify_meeting(state: &AppState, meeting: Meeting) {
    let Some(mailer) = state.mailer.clone() else {
        return;
    };
    tokio::spawn(async move {
        if let Err(e) = mailer.send_meeting_confirmation(&meeting).await {
            tracing::warn!(error = %e, meeting_id = meeting.id, "Confirmation email failed");
        }
        if let Err(e) = mailer.send_meeting_admin_notification(&meeting).await {
            tracing::warn!(error = %e, meeting_id = meeting.id, "Admin notification email failed");
        }
    });
}
