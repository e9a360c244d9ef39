//! Environment-driven configuration, read once at process start.

use std::env;

const MAX_WIDTH_VAR: &str = "MAX_WIDTH";
const MAX_HEIGHT_VAR: &str = "MAX_HEIGHT";
const FULL_SIZE_TOKEN_VAR: &str = "FULL_SIZE_TOKEN";

const DEFAULT_MAX_WIDTH: u32 = 200;
const DEFAULT_MAX_HEIGHT: u32 = 200;
const DEFAULT_FULL_SIZE_TOKEN: &str = "_full";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bounding box the thumbnail must fit inside.
    pub max_width: u32,
    pub max_height: u32,
    /// Stem suffix marking full-size uploads; stripped to derive the
    /// destination key.
    pub full_size_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidDimension { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    EmptyToken { var: &'static str },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            full_size_token: DEFAULT_FULL_SIZE_TOKEN.to_string(),
        }
    }
}

impl Config {
    /// Unset variables fall back to the defaults; set-but-invalid values
    /// fail startup rather than silently thumbnailing at the wrong size.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_width = parse_dimension(MAX_WIDTH_VAR, lookup(MAX_WIDTH_VAR), DEFAULT_MAX_WIDTH)?;
        let max_height =
            parse_dimension(MAX_HEIGHT_VAR, lookup(MAX_HEIGHT_VAR), DEFAULT_MAX_HEIGHT)?;
        let full_size_token = match lookup(FULL_SIZE_TOKEN_VAR) {
            Some(token) if token.is_empty() => {
                return Err(ConfigError::EmptyToken {
                    var: FULL_SIZE_TOKEN_VAR,
                })
            }
            Some(token) => token,
            None => DEFAULT_FULL_SIZE_TOKEN.to_string(),
        };

        Ok(Self {
            max_width,
            max_height,
            full_size_token,
        })
    }
}

fn parse_dimension(
    var: &'static str,
    value: Option<String>,
    default: u32,
) -> Result<u32, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidDimension { var, value: raw }),
        },
    }
}
