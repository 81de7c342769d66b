use std::{collections::HashSet, env};

use anyhow::{Context, Result};

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_APP_PORT: u16 = 8080;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub roster: DatabaseConfig,
    pub mail: MailConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig::from_env("DATABASE")?;
        // 生徒名簿は別の（読み取り専用の）データベースにある
        let roster = DatabaseConfig::from_env("ROSTER_DATABASE")?;

        let mail = MailConfig {
            host: required("SMTP_HOST")?,
            port: parse_port(env::var("SMTP_PORT").ok().as_deref(), DEFAULT_SMTP_PORT),
            use_tls: env::var("SMTP_USE_SSL")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            username: required("SMTP_USER")?,
            password: required("SMTP_PASS")?,
            from: required("MAIL_FROM")?,
            recipient: required("NOTIFY_MAILBOX")?,
        };

        let auth = AuthConfig {
            admins: parse_admins(&env::var("ADMINS").unwrap_or_default()),
        };

        let server = ServerConfig {
            port: parse_port(env::var("PORT").ok().as_deref(), DEFAULT_APP_PORT),
        };

        Ok(Self {
            database,
            roster,
            mail,
            auth,
            server,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    fn from_env(prefix: &str) -> Result<Self> {
        Ok(Self {
            host: required(&format!("{prefix}_HOST"))?,
            port: required(&format!("{prefix}_PORT"))?
                .parse::<u16>()
                .with_context(|| format!("{prefix}_PORT is not a valid port number"))?,
            username: required(&format!("{prefix}_USERNAME"))?,
            password: required(&format!("{prefix}_PASSWORD"))?,
            database: required(&format!("{prefix}_NAME"))?,
        })
    }
}

pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    pub username: String,
    pub password: String,
    pub from: String,
    /// 貸出・返却の通知を受け取る固定のメールボックス
    pub recipient: String,
}

pub struct AuthConfig {
    pub admins: HashSet<String>,
}

pub struct ServerConfig {
    pub port: u16,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("environment variable {key} is not set"))
}

pub fn parse_port(value: Option<&str>, default: u16) -> u16 {
    value
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(default)
}

pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "on" | "yes")
}

pub fn parse_admins(value: &str) -> HashSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
