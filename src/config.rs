use crate::error::StartupError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PROFILE_PDF: &str = "data_files/me.pdf";
const DEFAULT_PROFILE_SUMMARY: &str = "data_files/profile.txt";
const DEFAULT_MAX_TURNS: usize = 10;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_base_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub pushover_user: String,
    pub pushover_token: String,
    pub persona_name: String,
    pub profile_pdf: PathBuf,
    pub profile_summary: PathBuf,
    pub max_turns: usize,
    pub model_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(StartupError::MissingEnv(name))
        };
        let or_default = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let max_turns: usize = parsed(&lookup, "MAX_TURNS", DEFAULT_MAX_TURNS)?;
        if max_turns == 0 {
            return Err(StartupError::InvalidEnv {
                name: "MAX_TURNS",
                value: "0".to_string(),
            });
        }
        let timeout_secs: u64 = parsed(&lookup, "MODEL_TIMEOUT_SECS", DEFAULT_MODEL_TIMEOUT_SECS)?;

        Ok(Self {
            openai_base_url: or_default("OPENAI_BASE_URL", DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_model: or_default("OPENAI_MODEL", DEFAULT_MODEL),
            pushover_user: required("PUSHOVER_USER")?,
            pushover_token: required("PUSHOVER_TOKEN")?,
            persona_name: required("PERSONA_NAME")?,
            profile_pdf: PathBuf::from(or_default("PROFILE_PDF", DEFAULT_PROFILE_PDF)),
            profile_summary: PathBuf::from(or_default("PROFILE_SUMMARY", DEFAULT_PROFILE_SUMMARY)),
            max_turns,
            model_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, StartupError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| StartupError::InvalidEnv { name, value: raw }),
    }
}
