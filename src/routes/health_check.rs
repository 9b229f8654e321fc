use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::startup::RuntimeEnvironment;

/// Endpoint used by clients to know if the server is working
#[tracing::instrument(name = "Health Check handler", skip(environment))]
pub async fn health_check(environment: web::Data<RuntimeEnvironment>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Server is running perfectly",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": environment.0,
    }))
}
