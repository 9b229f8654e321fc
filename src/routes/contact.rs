use actix_web::web::Either;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;

use crate::domain::submission::{ContactFormBody, Submission};
use crate::mailer::{DispatchError, MailDispatcher};
use crate::rate_limiter::{RateLimitDecision, RateLimiter};

#[tracing::instrument(
    name = "Contact form submission handler",
    skip(request, body, dispatcher, rate_limiter)
)]
pub async fn handle_submit_contact(
    request: HttpRequest,
    body: Either<web::Json<ContactFormBody>, web::Form<ContactFormBody>>,
    dispatcher: web::Data<MailDispatcher>,
    rate_limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, ContactError> {
    let submission = Submission::parse(body.into_inner()).map_err(|errors| {
        tracing::warn!("Invalid contact form submission: {:?}", errors);
        ContactError::Validation(errors)
    })?;

    let client_id = client_identifier(&request);

    if let RateLimitDecision::Rejected { retry_after } = rate_limiter.check(&client_id) {
        tracing::warn!("Rate limit exceeded for {}", client_id);
        return Err(ContactError::RateLimited { retry_after });
    }

    match dispatcher.dispatch(&submission).await {
        Ok(receipt) => {
            tracing::info!(
                "Contact form submitted successfully from {} (message id {})",
                submission.email.as_ref(),
                receipt.message_id
            );

            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Thank you! Your message has been sent successfully. I'll get back to you soon.",
                "timestamp": submission.received_at.to_rfc3339(),
            })))
        }
        Err(err) => {
            // Full provider detail stays in the server logs; the client only
            // ever sees the generic message.
            tracing::error!(
                "Failed to send the contact notification: {:?} (source: {:?})",
                err,
                std::error::Error::source(&err)
            );

            Err(ContactError::Dispatch(err))
        }
    }
}

/// Endpoint liveness check. Its shape never depends on prior submissions.
#[tracing::instrument(name = "Contact endpoint health handler")]
pub async fn contact_health(_: HttpRequest) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Contact endpoint is working",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// Trust-proxy behavior: prefer the forwarded address so deployments behind a
// reverse proxy rate-limit the real client, not the proxy.
fn client_identifier(request: &HttpRequest) -> String {
    let connection_info = request.connection_info();
    let addr = connection_info.realip_remote_addr().unwrap_or("unknown");

    // Direct peers come back as ip:port; forwarded addresses as a bare ip.
    // Keying on the ip keeps one client on one counter either way.
    addr.parse::<std::net::SocketAddr>()
        .map(|socket_addr| socket_addr.ip().to_string())
        .unwrap_or_else(|_| addr.to_string())
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Please correct the following errors:")]
    Validation(Vec<String>),
    #[error("Too many requests from this IP, please try again later.")]
    RateLimited { retry_after: Duration },
    #[error("Sorry, something went wrong on our end. Please try again later.")]
    Dispatch(#[source] DispatchError),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ContactError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ContactError::Validation(errors) => HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": self.to_string(),
                "errors": errors,
            })),
            ContactError::RateLimited { retry_after } => {
                let retry_after_secs = retry_after.as_secs().max(1);

                HttpResponse::TooManyRequests()
                    .insert_header(("Retry-After", retry_after_secs.to_string()))
                    .json(json!({
                        "success": false,
                        "message": self.to_string(),
                        "retryAfter": retry_after_secs,
                    }))
            }
            ContactError::Dispatch(_) => HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": self.to_string(),
            })),
        }
    }
}
