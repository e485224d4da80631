use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Well-known directory downloads are saved into, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "Fetched_Images";

/// Size of each body chunk handed to the writer.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Fetch policy. Every field has a default, so a TOML file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Directory the downloaded file is written into. Created if absent.
    pub output_dir: PathBuf,
    /// Receive buffer size in bytes; bounds how much body data is held before each write.
    pub chunk_size: usize,
    /// Maximum time to establish the connection, in seconds.
    pub connect_timeout_secs: u64,
    /// Hard cap on the whole transfer, in seconds. Stalls are caught earlier
    /// by the low-speed limit; this only bounds pathological trickles.
    pub timeout_secs: u64,
    /// Transfer is aborted when it averages below this many bytes per second...
    pub low_speed_limit_bytes: u32,
    /// ...for this many consecutive seconds.
    pub low_speed_time_secs: u64,
    /// Maximum number of redirects followed.
    pub max_redirections: u32,
    /// `User-Agent` header sent with the request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout_secs: 30,
            timeout_secs: 3600,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            max_redirections: 10,
            user_agent: concat!("imgfetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn low_speed_time(&self) -> Duration {
        Duration::from_secs(self.low_speed_time_secs)
    }

    /// Rejects values that would make the transfer unbounded or unable to progress.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            anyhow::bail!("chunk_size must be greater than zero");
        }
        if self.connect_timeout_secs == 0 {
            anyhow::bail!("connect_timeout_secs must be greater than zero");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.low_speed_limit_bytes == 0 || self.low_speed_time_secs == 0 {
            anyhow::bail!(
                "low_speed_limit_bytes and low_speed_time_secs must be greater than zero"
            );
        }
        Ok(())
    }
}

/// Load configuration from an explicit TOML file. Nothing is read or created implicitly.
pub fn load_from(path: &Path) -> Result<FetchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
