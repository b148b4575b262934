//! Runtime configuration read from the process environment.
//!
//! | Variable                  | Default        | Description                          |
//! |---------------------------|----------------|--------------------------------------|
//! | `SUPABASE_URL`            | --             | Project URL, e.g. `https://x.supabase.co` |
//! | `SUPABASE_ANON_KEY`       | --             | Required whenever `SUPABASE_URL` is set |
//! | `NOMAD_DATA_DIR`          | `.nomad-korea` | Where search history and reactions live |
//! | `NOMAD_HTTP_TIMEOUT_SECS` | `30`           | Per-request timeout for the backend  |
//! | `NOMAD_REVIEW_PAGE_SIZE`  | `5`            | Reviews shown per page               |

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = ".nomad-korea";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REVIEW_PAGE_SIZE: usize = 5;

/// Connection details for the hosted backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub supabase: Option<SupabaseConfig>,
    pub data_dir: PathBuf,
    pub http_timeout: Duration,
    pub review_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            review_page_size: DEFAULT_REVIEW_PAGE_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let supabase = match get("SUPABASE_URL") {
            Some(url) => {
                let anon_key = get("SUPABASE_ANON_KEY").ok_or_else(|| {
                    Error::Config("SUPABASE_ANON_KEY is required when SUPABASE_URL is set".into())
                })?;
                Some(SupabaseConfig {
                    url: url.trim_end_matches('/').to_string(),
                    anon_key,
                })
            }
            None => None,
        };

        let data_dir = get("NOMAD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let http_timeout = match get("NOMAD_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse().map_err(|_| {
                Error::Config(format!("NOMAD_HTTP_TIMEOUT_SECS must be an integer, got '{raw}'"))
            })?),
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let review_page_size = match get("NOMAD_REVIEW_PAGE_SIZE") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(Error::Config(format!(
                        "NOMAD_REVIEW_PAGE_SIZE must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_REVIEW_PAGE_SIZE,
        };

        Ok(Self {
            supabase,
            data_dir,
            http_timeout,
            review_page_size,
        })
    }
}
