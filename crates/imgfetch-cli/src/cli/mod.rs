//! CLI for imgfetch: one URL in, one saved file (or one failure message) out.

mod prompt;
mod report;

use anyhow::Result;
use clap::Parser;
use imgfetch_core::{config, fetch_and_save, FetchConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

pub use prompt::prompt_url;
pub use report::render_outcome;

/// Download a single image (or any HTTP resource) into a local folder.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "Fetch one HTTP resource and save it under a name derived from its URL", long_about = None)]
pub struct Cli {
    /// HTTP/HTTPS URL to download. Prompted for when omitted.
    pub url: Option<String>,

    /// Directory to save into (default: Fetched_Images).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Maximum time for the whole transfer, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum time to establish the connection, in seconds.
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// TOML file with fetch settings; flags override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run_from_args() -> Result<ExitCode> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<ExitCode> {
        let cfg = self.fetch_config()?;
        tracing::debug!("fetch config: {:?}", cfg);

        let url = match self.url.as_deref() {
            Some(u) => u.trim().to_string(),
            None => {
                let stdin = io::stdin();
                prompt_url(&mut stdin.lock(), &mut io::stdout())?.unwrap_or_default()
            }
        };
        if url.is_empty() {
            println!("No URL was entered. Exiting.");
            return Ok(ExitCode::SUCCESS);
        }

        println!("Connecting to the web community...");
        let outcome = fetch_and_save(&url, &cfg);
        for line in render_outcome(&outcome) {
            println!("{}", line);
        }

        Ok(if outcome.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    /// Defaults, then the optional config file, then flags.
    pub fn fetch_config(&self) -> Result<FetchConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => FetchConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = secs;
        }
        if let Some(secs) = self.connect_timeout {
            cfg.connect_timeout_secs = secs;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
