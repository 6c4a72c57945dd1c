use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{MailAccount, SmtpConfig, SmtpSecurity};
use crate::digest::Digest;

pub struct SmtpClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
    to_email: String,
}

impl SmtpClient {
    pub fn new(config: &SmtpConfig, account: &MailAccount) -> Result<Self> {
        let creds = Credentials::new(account.address.clone(), account.app_password.clone());

        let builder = match config.security {
            SmtpSecurity::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server),
            SmtpSecurity::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
            }
        }
        .context("Failed to create SMTP transport")?;

        let transport = builder
            .port(config.port)
            .credentials(creds)
            .authentication(vec![Mechanism::Plain, Mechanism::Login])
            .build();

        tracing::debug!(
            server = %config.server,
            port = config.port,
            security = ?config.security,
            "SMTP transport ready"
        );

        Ok(Self {
            transport,
            from_email: account.address.clone(),
            to_email: account.recipient.clone(),
        })
    }

    pub fn recipient(&self) -> &str {
        &self.to_email
    }

    pub async fn send(&self, digest: &Digest) -> Result<()> {
        let message = build_message(&self.from_email, &self.to_email, digest)?;

        self.transport
            .send(message)
            .await
            .context("Failed to send email")?;

        tracing::info!(to = %self.to_email, subject = %digest.subject(), "Email sent");
        Ok(())
    }
}

/// Build the `multipart/alternative` digest message: plain text first, then HTML.
pub fn build_message(from: &str, to: &str, digest: &Digest) -> Result<Message> {
    let from_mailbox = from
        .parse::<Mailbox>()
        .with_context(|| format!("Invalid from address: {}", from))?;
    let to_mailbox = to
        .parse::<Mailbox>()
        .with_context(|| format!("Invalid recipient address: {}", to))?;

    Message::builder()
        .from(from_mailbox)
        .to(to_mailbox)
        .subject(digest.subject())
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(digest.plain_text().to_string()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(digest.html()),
                ),
        )
        .context("Failed to build email message")
}
