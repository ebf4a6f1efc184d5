use std::{net::SocketAddr, str::FromStr, time::Duration};

use crate::server::{data::retry::RetryConfig, error::config::ConfigError};

const DEFAULT_ANNOUNCE_CHANNEL_NAME: &str = "clone-report";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,

    pub max_in_flight: usize,
    pub channel_batch_size: usize,
    pub channel_batch_pause: Duration,

    pub retry: RetryConfig,
    pub deadline: Duration,

    pub announce: bool,
    pub announce_channel_name: String,

    /// Answer 207 instead of 200 when a finished run recorded errors
    pub multi_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_in_flight: 5,
            channel_batch_size: 50,
            channel_batch_pause: Duration::from_millis(1000),
            retry: RetryConfig::default(),
            deadline: Duration::from_secs(900),
            announce: true,
            announce_channel_name: DEFAULT_ANNOUNCE_CHANNEL_NAME.to_string(),
            multi_status: false,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// Every variable is optional and falls back to its default. A variable that is set
    /// but cannot be parsed is an error rather than silently replaced.
    ///
    /// # Returns
    /// - `Ok(Config)` - All variables parsed or defaulted
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable holds an unparseable value
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let retry = defaults.retry.clone();

        Ok(Self {
            bind_address: parse_or(&lookup, "BIND_ADDRESS", defaults.bind_address)?,
            max_in_flight: parse_or(&lookup, "CLONE_MAX_IN_FLIGHT", defaults.max_in_flight)?,
            channel_batch_size: parse_or(
                &lookup,
                "CLONE_CHANNEL_BATCH_SIZE",
                defaults.channel_batch_size,
            )?,
            channel_batch_pause: parse_millis(
                &lookup,
                "CLONE_CHANNEL_BATCH_PAUSE_MS",
                defaults.channel_batch_pause,
            )?,
            retry: RetryConfig {
                max_attempts: parse_or(&lookup, "CLONE_RETRY_MAX_ATTEMPTS", retry.max_attempts)?,
                base_delay: parse_millis(&lookup, "CLONE_RETRY_BASE_DELAY_MS", retry.base_delay)?,
                max_delay: parse_millis(&lookup, "CLONE_RETRY_MAX_DELAY_MS", retry.max_delay)?,
                jitter: parse_or(&lookup, "CLONE_RETRY_JITTER", retry.jitter)?,
                ..retry
            },
            deadline: Duration::from_secs(parse_or(
                &lookup,
                "CLONE_DEADLINE_SECS",
                defaults.deadline.as_secs(),
            )?),
            announce: parse_or(&lookup, "CLONE_ANNOUNCE", defaults.announce)?,
            announce_channel_name: lookup("CLONE_ANNOUNCE_CHANNEL_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.announce_channel_name),
            multi_status: parse_or(&lookup, "CLONE_MULTI_STATUS", defaults.multi_status)?,
        })
    }
}

/// Parses variable `name`, falling back to `default` when it is unset or blank.
fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    let Some(value) = lookup(name).filter(|value| !value.trim().is_empty()) else {
        return Ok(default);
    };

    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        })
}

fn parse_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let millis = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);

    parse_or(lookup, name, millis).map(Duration::from_millis)
}
