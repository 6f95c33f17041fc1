use anyhow::{Context, Result};
use chrono::Duration;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

use crate::domains::wizard::{AgeThresholds, FlowRules, WizardConfig};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Benefit application service; submissions fail when unset
    pub submission_api_url: Option<String>,
    pub session_idle_timeout_minutes: i64,
    pub session_ttl_hours: i64,
    /// Send the session cookie over HTTPS only
    pub session_cookie_secure: bool,
    pub age_youth_min: i32,
    pub age_adult_min: i32,
    pub age_senior_min: i32,
    pub marital_status_code_married: u32,
    pub marital_status_code_commonlaw: u32,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            submission_api_url: env::var("SUBMISSION_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            session_idle_timeout_minutes: parse_var("SESSION_IDLE_TIMEOUT_MINUTES", 20)?,
            session_ttl_hours: parse_var("SESSION_TTL_HOURS", 24)?,
            session_cookie_secure: parse_var("SESSION_COOKIE_SECURE", true)?,
            age_youth_min: parse_var("AGE_YOUTH_MIN", 16)?,
            age_adult_min: parse_var("AGE_ADULT_MIN", 18)?,
            age_senior_min: parse_var("AGE_SENIOR_MIN", 65)?,
            marital_status_code_married: parse_var("MARITAL_STATUS_CODE_MARRIED", 1)?,
            marital_status_code_commonlaw: parse_var("MARITAL_STATUS_CODE_COMMONLAW", 2)?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        })
    }

    /// Business settings handed to the wizard engine
    pub fn wizard(&self) -> Result<WizardConfig> {
        let ages = AgeThresholds {
            youth: self.age_youth_min,
            adults: self.age_adult_min,
            seniors: self.age_senior_min,
        };
        anyhow::ensure!(
            ages.youth < ages.adults && ages.adults < ages.seniors,
            "age thresholds must increase: youth {} < adult {} < senior {}",
            ages.youth,
            ages.adults,
            ages.seniors
        );

        Ok(WizardConfig {
            rules: FlowRules {
                ages,
                marital_status_married: self.marital_status_code_married,
                marital_status_commonlaw: self.marital_status_code_commonlaw,
            },
            idle_timeout: Duration::minutes(self.session_idle_timeout_minutes),
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session_ttl_hours)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value", name)),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
