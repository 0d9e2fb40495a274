use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// `None` runs the service on the in-memory store.
    pub database_url: Option<String>,
    pub migrations_dir: String,
    pub jwt: JwtConfig,
    pub bcrypt_cost: u32,
    pub cors_allowed_origins: AllowedOrigins,
    pub log_request_body: bool,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset and blank values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let secret = var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let bcrypt_cost: u32 = or("BCRYPT_COST", "12")
            .parse()
            .context("BCRYPT_COST must be an integer")?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        let expiry_days: i64 = or("JWT_EXPIRY_DAYS", "7")
            .parse()
            .context("JWT_EXPIRY_DAYS must be an integer")?;
        if expiry_days <= 0 {
            bail!("JWT_EXPIRY_DAYS must be positive");
        }

        Ok(Config {
            server_port: or("SERVER_PORT", "3000")
                .parse()
                .context("SERVER_PORT must be a port number")?,
            database_url: var("DATABASE_URL"),
            migrations_dir: or("MIGRATIONS_DIR", "./migrations"),
            jwt: JwtConfig {
                secret,
                issuer: or("JWT_ISSUER", "footballx"),
                audience: or("JWT_AUDIENCE", "footballx-web"),
                expiry_days,
            },
            bcrypt_cost,
            cors_allowed_origins: parse_origins(&or("CORS_ALLOWED_ORIGINS", "http://localhost:3000"))?,
            log_request_body: parse_bool("LOG_REQUEST_BODY", &or("LOG_REQUEST_BODY", "false"))?,
            log_format: match or("LOG_FORMAT", "plain").to_ascii_lowercase().as_str() {
                "plain" => LogFormat::Plain,
                "json" => LogFormat::Json,
                other => bail!("LOG_FORMAT must be 'plain' or 'json', got '{}'", other),
            },
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{} must be a boolean, got '{}'", key, raw),
    }
}

pub fn parse_origins(raw: &str) -> Result<AllowedOrigins> {
    let value = raw.trim();
    if value == "*" {
        return Ok(AllowedOrigins::Any);
    }

    let origins = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let url = Url::parse(entry).with_context(|| format!("invalid CORS origin '{}'", entry))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                bail!("CORS origin '{}' must use http or https", entry);
            }
            Ok(url.origin().ascii_serialization())
        })
        .collect::<Result<Vec<_>>>()?;

    if origins.is_empty() {
        bail!("CORS_ALLOWED_ORIGINS must be '*' or a comma-separated list of origins");
    }

    Ok(AllowedOrigins::List(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_url, None);
        assert_eq!(config.migrations_dir, "./migrations");
        assert_eq!(config.jwt.issuer, "footballx");
        assert_eq!(config.jwt.audience, "footballx-web");
        assert_eq!(config.jwt.expiry_days, 7);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(
            config.cors_allowed_origins,
            AllowedOrigins::List(vec!["http://localhost:3000".to_string()])
        );
        assert!(!config.log_request_body);
        assert_eq!(config.log_format, LogFormat::Plain);
    }

    #[test]
    fn test_jwt_secret_is_required() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("JWT_SECRET", "  ")])).is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        for (key, value) in [
            ("SERVER_PORT", "http"),
            ("BCRYPT_COST", "3"),
            ("JWT_EXPIRY_DAYS", "0"),
            ("LOG_FORMAT", "xml"),
            ("LOG_REQUEST_BODY", "maybe"),
        ] {
            let result = Config::from_lookup(lookup(&[("JWT_SECRET", "s"), (key, value)]));
            assert!(result.is_err(), "{}={} should be rejected", key, value);
        }
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("DATABASE_URL", "postgres://localhost/footballx"),
            ("LOG_FORMAT", "JSON"),
            ("LOG_REQUEST_BODY", "true"),
            ("BCRYPT_COST", "4"),
        ]))
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/footballx"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.log_request_body);
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*").unwrap(), AllowedOrigins::Any);
        assert_eq!(
            parse_origins(" http://localhost:5173/ , https://footballx.app ").unwrap(),
            AllowedOrigins::List(vec![
                "http://localhost:5173".to_string(),
                "https://footballx.app".to_string(),
            ])
        );
        assert!(parse_origins("ftp://files.example.com").is_err());
        assert!(parse_origins("not a url").is_err());
        assert!(parse_origins(" , ").is_err());
    }
}
