//! SMTP notifier

use async_trait::async_trait;
use folio_db::ContactMessage;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, info};

use crate::error::MailError;
use crate::notifier::{Notifier, render_contact_email};

/// SMTP notifier configuration
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub server: String,
    /// SMTP port (STARTTLS)
    pub port: u16,
    /// Login for the relay
    pub username: String,
    /// Password or app password for the relay
    pub password: String,
    /// Sender address; defaults to `username`
    pub from: Option<String>,
    /// Recipient address; defaults to the sender
    pub to: Option<String>,
}

/// Sends contact notifications through an authenticated SMTP relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier
    ///
    /// Addresses are parsed up front so misconfiguration fails at startup.
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        if config.server.is_empty() || config.username.is_empty() {
            return Err(MailError::Config(
                "SMTP server and username are required".to_string(),
            ));
        }

        let from: Mailbox = config
            .from
            .as_deref()
            .unwrap_or(&config.username)
            .parse()?;
        let to: Mailbox = match config.to.as_deref() {
            Some(to) => to.parse()?,
            None => from.clone(),
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .build();

        info!(
            "Created SMTP notifier via {}:{} for {}",
            config.server, config.port, to
        );

        Ok(Self { transport, from, to })
    }

    fn build_message(&self, contact: &ContactMessage) -> Result<Message, MailError> {
        let (subject, body) = render_contact_email(contact);

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML);

        // Replies go to the visitor when their address is usable
        if let Ok(reply_to) = contact.email.parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }

        Ok(builder.body(body)?)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify_contact(&self, contact: &ContactMessage) -> Result<(), MailError> {
        let message = self.build_message(contact)?;
        debug!("Sending contact notification {}", contact.id);
        self.transport.send(message).await?;
        info!("Sent contact notification {}", contact.id);
        Ok(())
    }
}
