pub mod config;
pub mod domain;
pub mod mailer;
pub mod rate_limiter;
pub mod routes;
pub mod startup;
pub mod telemetry;
