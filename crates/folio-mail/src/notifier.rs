//! Notifier trait

use async_trait::async_trait;
use folio_db::ContactMessage;
use html_escape::encode_text;
use tracing::info;

use crate::error::MailError;

/// Notifier trait
///
/// Implementations deliver a notification for each stored contact message.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notify the site owner about a new contact message
    async fn notify_contact(&self, contact: &ContactMessage) -> Result<(), MailError>;
}

/// Notifier used when mail delivery is not configured
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify_contact(&self, contact: &ContactMessage) -> Result<(), MailError> {
        info!(
            "Mail disabled, not sending notification for contact message {}",
            contact.id
        );
        Ok(())
    }
}

/// Render the notification subject and HTML body for a contact message
///
/// All submitted fields are HTML-escaped.
pub fn render_contact_email(contact: &ContactMessage) -> (String, String) {
    let subject = format!("Portfolio Contact: {}", contact.subject);
    let body = format!(
        "<h2>New Contact Form Submission</h2>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Subject:</strong> {}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{}</p>\n",
        encode_text(&contact.name),
        encode_text(&contact.email),
        encode_text(&contact.subject),
        encode_text(&contact.message),
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn contact(message: &str) -> ContactMessage {
        ContactMessage {
            id: "c1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: message.to_string(),
            subject: "Hiring".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_contact_email() {
        let (subject, body) = render_contact_email(&contact("Let's talk"));
        assert_eq!(subject, "Portfolio Contact: Hiring");
        assert!(body.contains("<strong>Name:</strong> Ada"));
        assert!(body.contains("ada@example.com"));
        assert!(body.contains("Let's talk"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let (_, body) = render_contact_email(&contact("<script>alert(1)</script>"));
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_disabled_notifier_succeeds() {
        assert!(DisabledNotifier.notify_contact(&contact("hi")).await.is_ok());
    }
}
