use config::{Config, ConfigError, File};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::contact_email::ContactEmail;

#[derive(Debug)]
pub enum Environment {
    Development,
    Production,
}

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email: EmailSettings,
    pub smtp: Option<SmtpSettings>,
    pub email_api: Option<EmailApiSettings>,
    pub rate_limit: RateLimitSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub cors_origin: String,
    pub static_dir: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailSettings {
    pub recipient: String,
    pub sender: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub secure: bool,
    pub username: String,
    // secrecy protects secret information and prevents them to be exposed (eg: via logs)
    pub password: Secret<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailApiSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct RateLimitSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_requests: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub window_secs: u64,
    pub enabled: bool,
}

impl Settings {
    pub fn get_address(&self) -> String {
        format!(
            "{}:{}",
            self.application.get_host(),
            self.application.get_port()
        )
    }

    pub fn get_cors_origin(&self) -> String {
        self.application.get_cors_origin()
    }

    pub fn get_static_dir(&self) -> String {
        self.application.get_static_dir()
    }

    pub fn get_email_recipient(&self) -> Result<ContactEmail, String> {
        self.email.get_recipient()
    }

    pub fn get_email_sender(&self) -> Result<ContactEmail, String> {
        self.email.get_sender()
    }

    pub fn get_smtp_settings(&self) -> Option<&SmtpSettings> {
        self.smtp.as_ref()
    }

    pub fn get_email_api_settings(&self) -> Option<&EmailApiSettings> {
        self.email_api.as_ref()
    }

    pub fn get_rate_limit(&self) -> &RateLimitSettings {
        &self.rate_limit
    }

    pub fn set_app_port(&mut self, port: u16) {
        self.application.port = port;
    }

    pub fn set_email_api_base_url(&mut self, new_base_url: String) {
        if let Some(email_api) = self.email_api.as_mut() {
            email_api.base_url = new_base_url;
        }
    }

    pub fn set_rate_limit(&mut self, max_requests: u32, enabled: bool) {
        self.rate_limit.max_requests = max_requests;
        self.rate_limit.enabled = enabled;
    }
}

impl ApplicationSettings {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_host(&self) -> String {
        self.host.clone()
    }

    pub fn get_cors_origin(&self) -> String {
        self.cors_origin.clone()
    }

    pub fn get_static_dir(&self) -> String {
        self.static_dir.clone()
    }
}

impl EmailSettings {
    pub fn get_recipient(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.recipient.clone()).map_err(|errors| errors.join(", "))
    }

    pub fn get_sender(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.sender.clone()).map_err(|errors| errors.join(", "))
    }
}

impl SmtpSettings {
    pub fn get_host(&self) -> String {
        self.host.clone()
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn get_username(&self) -> String {
        self.username.clone()
    }

    pub fn get_password(&self) -> Secret<String> {
        self.password.clone()
    }
}

impl EmailApiSettings {
    pub fn get_base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn get_api_key(&self) -> Secret<String> {
        self.api_key.clone()
    }
}

impl RateLimitSettings {
    pub fn get_max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn get_window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.window_secs)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            unknown_env => Err(format!(
                "{} is not supported environment. Use either 'development' or 'production'.",
                unknown_env
            )),
        }
    }
}

/// Runtime environment from APP_ENVIRONMENT, development by default.
pub fn get_environment() -> Environment {
    std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT")
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let root_path = std::env::current_dir().expect("Failed to determine the current directory");
    let config_directory = root_path.join("config");
    // Uses development environment by default
    let enviroment = get_environment();
    let config_base_filepath = config_directory.join("base");
    let config_env_filepath = config_directory.join(enviroment.as_str());

    // It merges the base configuration file with the one from the specific environment (development or production)
    let settings = Config::builder()
        .add_source(File::from(config_base_filepath).required(true))
        .add_source(File::from(config_env_filepath).required(true))
        // Merge settings from environment variables with a prefix of APP and "__" separator
        // E.g APP_APPLICATION__PORT would set Settings.application.port
        .add_source(config::Environment::with_prefix("app").separator("__"))
        .build()?;

    tracing::info!("Application environment = {:?}", enviroment);

    // Try to convert the value from the configuration file into a Settings type
    settings.try_deserialize()
}
