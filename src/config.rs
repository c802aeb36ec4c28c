use crate::error::{Error, Result};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;
use std::sync::OnceLock;

pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_MAINTENANCE_DATABASE: &str = "postgres";
pub const DEFAULT_USD_RATE: i64 = 92;

/// Server credentials shared by every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub database_name: String,
    pub maintenance_database: String,
    pub usd_rate: Decimal,
    pub employers_file: String,
    pub vacancies_file: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            credentials: Credentials {
                host: get_env("DB_HOST")?,
                port: get_env_parse_or("DB_PORT", DEFAULT_PORT)?,
                user: get_env("DB_USER")?,
                password: get_env("DB_PASSWORD")?,
            },
            database_name: get_env("DB_NAME")?,
            maintenance_database: get_env_or("DB_MAINTENANCE_NAME", DEFAULT_MAINTENANCE_DATABASE),
            usd_rate: get_env_parse_or("USD_RATE", Decimal::from(DEFAULT_USD_RATE))?,
            employers_file: get_env_or("EMPLOYERS_FILE", "data/employers.json"),
            vacancies_file: get_env_or("VACANCIES_FILE", "data/vacancies.json"),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_port_and_rate() {
        let port: u16 = parse_value("DB_PORT", " 6543 ").unwrap();
        assert_eq!(port, 6543);

        let rate: Decimal = parse_value("USD_RATE", "92.5").unwrap();
        assert_eq!(rate, Decimal::new(925, 1));
    }

    #[test]
    fn rejects_garbage_with_variable_name() {
        let err = parse_value::<u16>("DB_PORT", "not-a-port").unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("DB_PORT")));
    }

    #[test]
    fn unset_variable_falls_back_to_default() {
        let port = get_env_parse_or("VACANCY_STORE_TEST_UNSET_PORT", DEFAULT_PORT).unwrap();
        assert_eq!(port, DEFAULT_PORT);
    }
}
