use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::contact_email::ContactEmail;
use crate::domain::submission::Submission;
use crate::mailer::{notification_body, notification_subject, DispatchError, DispatchReceipt};

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// Hosted transactional-email transport over HTTP.
pub struct ApiMailer {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    sender: ContactEmail,
    recipient: ContactEmail,
}

#[derive(serde::Serialize)]
struct SendEmailBody {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
    reply_to: String,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    id: String,
}

impl ApiMailer {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        sender: ContactEmail,
        recipient: ContactEmail,
        timeout: Option<time::Duration>,
    ) -> ApiMailer {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()
            .unwrap();

        ApiMailer {
            http_client,
            base_url,
            api_key,
            sender,
            recipient,
        }
    }

    pub async fn send(&self, submission: &Submission) -> Result<DispatchReceipt, DispatchError> {
        let url = format!("{}/emails", self.base_url);
        let body = SendEmailBody {
            from: format!("Portfolio Contact Form <{}>", self.sender.as_ref()),
            to: vec![String::from(self.recipient.as_ref())],
            subject: notification_subject(submission),
            text: notification_body(submission),
            reply_to: String::from(submission.email.as_ref()),
        };

        let response = self
            .http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|err| DispatchError::Network(Box::new(err)))?;

        let status = response.status();

        // return an error when server response status code is 4xx or 5xx
        match response.error_for_status() {
            Err(err) if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN => {
                Err(DispatchError::Auth(Box::new(err)))
            }
            Err(err) => Err(DispatchError::Provider(Box::new(err))),
            Ok(response) => {
                let body: SendEmailResponse = response
                    .json()
                    .await
                    .map_err(|err| DispatchError::Provider(Box::new(err)))?;

                Ok(DispatchReceipt {
                    message_id: body.id,
                })
            }
        }
    }
}
