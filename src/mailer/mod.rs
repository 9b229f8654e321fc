pub mod api;
pub mod smtp;

pub use api::ApiMailer;
pub use smtp::SmtpMailer;

use crate::config::Settings;
use crate::domain::submission::Submission;

/// Notification transport, picked once at startup by configuration presence.
/// SMTP wins when both blocks are configured.
pub enum MailDispatcher {
    Smtp(SmtpMailer),
    Api(ApiMailer),
}

#[derive(Debug)]
pub struct DispatchReceipt {
    pub message_id: String,
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("The email provider rejected our credentials.")]
    Auth(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Failed to reach the email provider.")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("The email provider returned an unexpected error.")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl MailDispatcher {
    pub fn from_config(config: &Settings) -> Result<MailDispatcher, String> {
        let recipient = config.get_email_recipient()?;
        let sender = config.get_email_sender()?;

        if let Some(smtp_config) = config.get_smtp_settings() {
            let mailer = SmtpMailer::new(smtp_config, sender, recipient)?;

            return Ok(MailDispatcher::Smtp(mailer));
        }

        if let Some(api_config) = config.get_email_api_settings() {
            let mailer = ApiMailer::new(
                api_config.get_base_url(),
                api_config.get_api_key(),
                sender,
                recipient,
                None,
            );

            return Ok(MailDispatcher::Api(mailer));
        }

        Err(String::from(
            "No mail transport configured. Set either the smtp or the email_api section.",
        ))
    }

    pub async fn dispatch(&self, submission: &Submission) -> Result<DispatchReceipt, DispatchError> {
        match self {
            MailDispatcher::Smtp(mailer) => mailer.send(submission).await,
            MailDispatcher::Api(mailer) => mailer.send(submission).await,
        }
    }
}

pub fn notification_subject(submission: &Submission) -> String {
    format!(
        "New Contact Form Submission from {}",
        submission.name.as_ref()
    )
}

pub fn notification_body(submission: &Submission) -> String {
    format!(
        "New Contact Form Submission from Portfolio Website\n\
        \n\
        From: {}\n\
        Email: {}\n\
        Date: {}\n\
        \n\
        Message:\n\
        {}\n",
        submission.name.as_ref(),
        submission.email.as_ref(),
        submission.received_at.to_rfc2822(),
        submission.message.as_ref(),
    )
}
