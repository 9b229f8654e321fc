use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use std::time;
use uuid::Uuid;

use crate::config::SmtpSettings;
use crate::domain::contact_email::ContactEmail;
use crate::domain::submission::Submission;
use crate::mailer::{notification_body, notification_subject, DispatchError, DispatchReceipt};

const SEND_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// SMTP transport. `secure: true` means implicit TLS (port 465 style),
/// otherwise STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        config: &SmtpSettings,
        sender: ContactEmail,
        recipient: ContactEmail,
    ) -> Result<SmtpMailer, String> {
        let builder = if config.is_secure() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.get_host())
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.get_host())
        }
        .map_err(|err| format!("Invalid SMTP host: {}", err))?;

        let credentials = Credentials::new(
            config.get_username(),
            config.get_password().expose_secret().to_string(),
        );
        let transport = builder
            .port(config.get_port())
            .credentials(credentials)
            .timeout(Some(SEND_TIMEOUT))
            .build();

        let sender = format!("Portfolio Contact Form <{}>", sender.as_ref())
            .parse::<Mailbox>()
            .map_err(|err| format!("Invalid sender address: {}", err))?;
        let recipient = recipient
            .as_ref()
            .parse::<Mailbox>()
            .map_err(|err| format!("Invalid recipient address: {}", err))?;

        Ok(SmtpMailer {
            transport,
            sender,
            recipient,
        })
    }

    pub async fn send(&self, submission: &Submission) -> Result<DispatchReceipt, DispatchError> {
        let reply_to = submission
            .email
            .as_ref()
            .parse::<Mailbox>()
            .map_err(|err| DispatchError::Provider(Box::new(err)))?;
        let message_id = format!("<{}@portfolio-backend>", Uuid::new_v4());

        let email = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .reply_to(reply_to)
            .subject(notification_subject(submission))
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_PLAIN)
            .body(notification_body(submission))
            .map_err(|err| DispatchError::Provider(Box::new(err)))?;

        self.transport
            .send(email)
            .await
            .map_err(map_smtp_error)
            .map(|_| DispatchReceipt { message_id })
    }
}

fn map_smtp_error(err: lettre::transport::smtp::Error) -> DispatchError {
    // Permanent rejections during submission are almost always credential
    // failures (535); transient codes come back from the provider itself.
    if err.is_timeout() {
        DispatchError::Network(Box::new(err))
    } else if err.is_permanent() {
        DispatchError::Auth(Box::new(err))
    } else if err.is_transient() {
        DispatchError::Provider(Box::new(err))
    } else {
        DispatchError::Network(Box::new(err))
    }
}
