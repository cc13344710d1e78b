//! Transactional email for the matching lifecycle.
//!
//! [`EmailMessage`] builds the four messages the service sends (signup
//! confirmation, match found, rematch, out of credits). A [`Notifier`] delivers
//! them: [`SmtpMailer`] over implicit-TLS SMTP with `lettre`, or [`LogMailer`]
//! when email is switched off.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::EmailSettings;
use crate::models::{Designer, Role};

/// Errors raised while delivering an email
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

/// A rendered HTML email
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    /// Sent after a signup form is submitted
    pub fn confirmation(to: &str, role: Role) -> Self {
        let (subject, body) = match role {
            Role::Designer => (
                "You're In! Welcome Designer 🎨",
                "<p>Thanks for joining as a <b>designer</b>. We'll send your first match soon.</p>",
            ),
            Role::Founder => (
                "You're In! Welcome Founder 🚀",
                "<p>Thanks for joining as a <b>founder</b>. We're searching for great designers for you.</p>",
            ),
        };

        Self {
            to: to.to_string(),
            subject: subject.to_string(),
            html: format!("<h2>Welcome to CreativePlay!</h2>\n{}", body),
        }
    }

    /// Sent to each side of a new match, naming the other side
    pub fn match_found(to: &str, matched_name: &str, matched_email: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "You've Got a Match! 🔥".to_string(),
            html: format!(
                "<h2>Your Match Is Ready!</h2>\n\
                 <p>You've been matched with <b>{}</b>.</p>\n\
                 <p>Email: {}</p>\n\
                 <p>Say hey and start building together!</p>",
                escape_html(matched_name),
                escape_html(matched_email)
            ),
        }
    }

    /// Sent to the founder with every designer a rematch returned
    pub fn rematch(to: &str, designers: &[Designer]) -> Self {
        let items: String = designers
            .iter()
            .map(|d| {
                format!(
                    "<p><b>{}</b><br>\nEmail: {}<br>\nSkills/Experience: {}</p>\n<hr>\n",
                    escape_html(&d.name),
                    escape_html(&d.email),
                    escape_html(d.summary())
                )
            })
            .collect();

        Self {
            to: to.to_string(),
            subject: "Your New Matches Are Ready 🔄".to_string(),
            html: format!(
                "<h2>Your New Matches Are Here!</h2>\n\
                 <p>You requested a rematch and we found new designers for you.</p>\n\
                 {}\
                 <p>Use your matches wisely. You got this!</p>",
                items
            ),
        }
    }

    /// Sent to a designer whose credit deduction was refused
    pub fn out_of_credits(to: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "You're Out of Credits 😭".to_string(),
            html: "<h2>Oh no!</h2>\n\
                   <p>You've used all your rematch credits.</p>\n\
                   <p>You can buy more anytime to keep finding better matches.</p>"
                .to_string(),
        }
    }
}

/// Escape user-supplied text for an HTML body
fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Delivers rendered emails
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// SMTP delivery with implicit TLS
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    pub fn new(settings: &EmailSettings) -> Result<Self, MailerError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)?
            .port(settings.smtp_port);

        if let (Some(user), Some(pass)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from_address = settings
            .from_address
            .clone()
            .or_else(|| settings.username.clone())
            .ok_or_else(|| MailerError::Build("no sender address configured".to_string()))?;

        Ok(Self {
            transport: builder.build(),
            from_address,
        })
    }
}

#[async_trait]
impl Notifier for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let email = Message::builder()
            .from(self.from_address.parse()?)
            .to(message.to.parse()?)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|e| MailerError::Build(e.to_string()))?;

        self.transport.send(email).await?;

        tracing::info!(to = %message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}

/// Logs emails instead of sending them
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Notifier for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        tracing::info!(to = %message.to, subject = %message.subject, "Email delivery disabled, skipping");
        Ok(())
    }
}
