use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::{get_environment, Settings};
use crate::mailer::MailDispatcher;
use crate::rate_limiter::RateLimiter;
use crate::routes::{contact_health, handle_submit_contact, health_check};

pub struct Application {
    pub port: u16,
    pub server: Server,
}

/// Runtime environment name, reported by the health endpoint.
pub struct RuntimeEnvironment(pub String);

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        // Fail fast on a broken mail setup instead of discovering it on the
        // first submission.
        let dispatcher = MailDispatcher::from_config(&config)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

        let rate_limit = config.get_rate_limit();
        let rate_limiter = RateLimiter::new(
            rate_limit.get_max_requests(),
            rate_limit.get_window(),
            rate_limit.is_enabled(),
        );

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            dispatcher,
            rate_limiter,
            config.get_cors_origin(),
            config.get_static_dir(),
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    dispatcher: MailDispatcher,
    rate_limiter: RateLimiter,
    cors_origin: String,
    static_dir: String,
) -> Result<Server, std::io::Error> {
    let dispatcher = web::Data::new(dispatcher);
    let rate_limiter = web::Data::new(rate_limiter);
    let environment = web::Data::new(RuntimeEnvironment(
        get_environment().as_str().to_string(),
    ));

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .wrap(build_cors(&cors_origin))
            .route("/api/health", web::get().to(health_check))
            .route("/api/contact", web::get().to(contact_health))
            .route("/api/contact", web::post().to(handle_submit_contact))
            // The portfolio site itself; every non-API path falls through here
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
            .app_data(dispatcher.clone())
            .app_data(rate_limiter.clone())
            .app_data(environment.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

fn build_cors(origin: &str) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origin == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(origin).supports_credentials()
    }
}
