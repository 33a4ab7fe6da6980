use crate::services::{
    session_service::LoginPolicy,
    upload_service::DEFAULT_MAX_IMAGE_BYTES,
    writeup_service::{DEFAULT_ENDPOINT, DEFAULT_MODEL, WriteupConfig},
};
use anyhow::{Context, Result};
use clap::Parser;
use std::{env, str::FromStr};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub admin_email: String,
    pub volunteer_email: String,
    pub login_password: String,
    pub max_upload_bytes: usize,
    pub notification_ttl_secs: u64,
    pub writeup: WriteupConfig,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Five16 events site API")]
pub struct Args {
    /// Host to bind to (overrides FIVE16_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides FIVE16_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Address that signs in as the administrator (overrides FIVE16_ADMIN_EMAIL)
    #[arg(long)]
    pub admin_email: Option<String>,

    /// Address that signs in as the volunteer (overrides FIVE16_VOLUNTEER_EMAIL)
    #[arg(long)]
    pub volunteer_email: Option<String>,

    /// Largest accepted image upload in bytes (overrides FIVE16_MAX_UPLOAD_BYTES)
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,

    /// Model used for writeups (overrides FIVE16_WRITEUP_MODEL)
    #[arg(long)]
    pub writeup_model: Option<String>,

    /// Load the demo event catalogue at start-up
    #[arg(long)]
    pub seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            admin_email: "admin@five16.com".into(),
            volunteer_email: "volunteer@five16.com".into(),
            login_password: "password".into(),
            max_upload_bytes: DEFAULT_MAX_IMAGE_BYTES,
            notification_ttl_secs: 5,
            writeup: WriteupConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and seed flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // Parse CLI once
        let args = Args::parse();
        Self::from_args(args)
    }

    pub fn from_args(args: Args) -> Result<(Self, bool)> {
        let defaults = Self::default();

        // --- Environment fallback ---
        let env_host = env::var("FIVE16_HOST").unwrap_or(defaults.host);
        let env_port = env_parse("FIVE16_PORT", defaults.port)?;
        let env_admin = env::var("FIVE16_ADMIN_EMAIL").unwrap_or(defaults.admin_email);
        let env_volunteer =
            env::var("FIVE16_VOLUNTEER_EMAIL").unwrap_or(defaults.volunteer_email);
        let login_password =
            env::var("FIVE16_LOGIN_PASSWORD").unwrap_or(defaults.login_password);
        let env_max_upload = env_parse("FIVE16_MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?;
        let notification_ttl_secs =
            env_parse("FIVE16_NOTIFICATION_TTL_SECS", defaults.notification_ttl_secs)?;
        let api_key = env::var("API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let env_model = env::var("FIVE16_WRITEUP_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let endpoint =
            env::var("FIVE16_WRITEUP_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            admin_email: args.admin_email.unwrap_or(env_admin),
            volunteer_email: args.volunteer_email.unwrap_or(env_volunteer),
            login_password,
            max_upload_bytes: args.max_upload_bytes.unwrap_or(env_max_upload),
            notification_ttl_secs,
            writeup: WriteupConfig {
                api_key,
                endpoint,
                model: args.writeup_model.unwrap_or(env_model),
            },
        };

        Ok((cfg, args.seed))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn login_policy(&self) -> LoginPolicy {
        LoginPolicy {
            admin_email: self.admin_email.clone(),
            volunteer_email: self.volunteer_email.clone(),
            password: self.login_password.clone(),
        }
    }

    /// Request body cap for multipart photo batches.
    pub fn multipart_body_limit(&self) -> usize {
        self.max_upload_bytes.saturating_mul(16)
    }
}

fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}
