use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,

    // Razorpay credentials (never hard-coded, always from the environment)
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,

    // Checkout behavior
    pub default_currency: String,
    pub auto_capture: bool,

    // CORS
    pub allowed_origins: Vec<String>,

    // Upstream
    pub provider_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = Self::parse_environment()?;

        let config = Self {
            environment: environment.clone(),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid PORT")?,

            razorpay_key_id: std::env::var("RAZORPAY_KEY_ID")
                .context("RAZORPAY_KEY_ID required")?,
            razorpay_key_secret: std::env::var("RAZORPAY_KEY_SECRET")
                .context("RAZORPAY_KEY_SECRET required")?,

            default_currency: std::env::var("DEFAULT_CURRENCY")
                .unwrap_or_else(|_| "INR".to_string()),
            auto_capture: std::env::var("AUTO_CAPTURE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("Invalid AUTO_CAPTURE")?,

            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),

            provider_timeout_secs: std::env::var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid PROVIDER_TIMEOUT_SECS")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_environment() -> Result<Environment> {
        let env = std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string());

        match env.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => bail!("Unknown environment: {}", env),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.razorpay_key_id.trim().is_empty() {
            bail!("RAZORPAY_KEY_ID must not be empty");
        }
        if self.razorpay_key_secret.trim().is_empty() {
            bail!("RAZORPAY_KEY_SECRET must not be empty");
        }

        if self.default_currency.len() != 3
            || !self.default_currency.chars().all(|c| c.is_ascii_uppercase())
        {
            bail!(
                "DEFAULT_CURRENCY must be a three-letter ISO 4217 code, got {}",
                self.default_currency
            );
        }

        if self.provider_timeout_secs == 0 {
            bail!("PROVIDER_TIMEOUT_SECS must be greater than zero");
        }

        if self.allowed_origins.is_empty() {
            bail!("ALLOWED_ORIGINS must list at least one origin (or *)");
        }

        tracing::info!(
            "Configuration validated for {:?} environment",
            self.environment
        );

        Ok(())
    }
}
