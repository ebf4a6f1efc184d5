use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable is set but its value cannot be parsed.
    ///
    /// Numeric settings must be non-negative integers, flags must be `true` or `false`,
    /// and `BIND_ADDRESS` must be a socket address such as `0.0.0.0:3000`.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// The value that failed to parse
        value: String,
    },
}
