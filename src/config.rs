use crate::error::SendCardError;

const API_KEY_VAR: &str = "RESEND_API_KEY";
const FROM_VAR: &str = "FROM_EMAIL";
const API_URL_VAR: &str = "RESEND_API_URL";

const DEFAULT_API_URL: &str = "https://api.resend.com";

/// Deployment settings for the email provider, read fresh on every invocation.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub from: String,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, SendCardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SendCardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(SendCardError::MissingConfig(key))
        };

        let api_key = required(API_KEY_VAR)?;
        let from = required(FROM_VAR)?;
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            from,
            api_url,
        })
    }

    pub fn emails_endpoint(&self) -> String {
        format!("{}/emails", self.api_url)
    }
}
