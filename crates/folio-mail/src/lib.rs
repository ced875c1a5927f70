//! Folio Mail Notifications
//!
//! This crate delivers contact form notifications to the site owner.
//! The [`Notifier`] trait is the seam used by the API; [`SmtpNotifier`]
//! sends real mail and [`DisabledNotifier`] only logs.

pub mod error;
pub mod notifier;
pub mod smtp;

pub use error::MailError;
pub use notifier::{DisabledNotifier, Notifier, render_contact_email};
pub use smtp::{SmtpConfig, SmtpNotifier};
