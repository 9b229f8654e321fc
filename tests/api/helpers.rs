use reqwest::Response;
use std::collections::HashMap;
use wiremock::MockServer;

use portfolio_backend::config::{get_configuration, Settings};
use portfolio_backend::startup::Application;

pub struct TestApp {
    pub config: Settings,
    pub address: String,
    pub email_server: MockServer,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        // High enough that no test trips it by accident; the rate-limit tests
        // spawn their own app with a small limit.
        Self::spawn_app_with_rate_limit(1000).await
    }

    pub async fn spawn_app_with_rate_limit(max_requests: u32) -> TestApp {
        let mut config = get_configuration().expect("Missing configuration file.");
        let email_server = MockServer::start().await;

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        config.set_email_api_base_url(email_server.uri());
        config.set_rate_limit(max_requests, true);

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            config: config.clone(),
            email_server,
        }
    }

    pub async fn post_contact(&self, body: HashMap<&str, &str>) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/api/contact", self.address);

        client
            .post(&url)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact_form(&self, body: HashMap<&str, &str>) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/api/contact", self.address);

        client
            .post(&url)
            .form(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_contact(&self) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/api/contact", self.address);

        client
            .get(&url)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn valid_contact_body() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("name", "James Kuria"),
        ("email", "user@example.com"),
        ("message", "I would like to talk about a project."),
    ])
}
