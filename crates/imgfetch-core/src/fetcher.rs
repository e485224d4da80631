//! Single-resource fetch pipeline.
//!
//! Directory preparation, one streamed HTTP GET, status validation, filename
//! derivation and a chunked write, in that order. Nothing is retried and
//! every failure comes back as a [`FetchError`].

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::storage::{ensure_output_dir, ChunkWriter};
use crate::url_model::{derive_name, parse_url};
use std::io;
use std::path::PathBuf;

/// A successfully saved download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Where the body was written (`<output_dir>/<derived filename>`).
    pub path: PathBuf,
    /// Number of body bytes written.
    pub bytes_written: u64,
    /// Final HTTP status after redirects.
    pub status: u32,
    /// True when the URL had no usable last path segment and the name was generated.
    pub generated_name: bool,
}

/// Result of one fetch: the saved file, or a categorized failure.
pub type Outcome = Result<SavedFile, FetchError>;

/// Fetches URLs into the configured output directory.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn fetch_and_save(&self, url: &str) -> Outcome {
        fetch_and_save(url, &self.config)
    }
}

/// Downloads `url` into `config.output_dir` under a name derived from the URL.
///
/// Blocks the calling thread for the whole transfer. An existing file with
/// the same name is overwritten; a write failure leaves the partial file.
pub fn fetch_and_save(url: &str, config: &FetchConfig) -> Outcome {
    tracing::info!(url, "fetch started");
    let outcome = run_pipeline(url, config);
    match &outcome {
        Ok(saved) => tracing::info!(
            url,
            path = %saved.path.display(),
            bytes = saved.bytes_written,
            "fetch completed"
        ),
        Err(e) => tracing::warn!(url, category = %e.category(), "fetch failed: {}", e),
    }
    outcome
}

fn run_pipeline(url: &str, config: &FetchConfig) -> Outcome {
    ensure_output_dir(&config.output_dir)?;
    tracing::debug!(dir = %config.output_dir.display(), "output directory ready");

    check_scheme(url)?;

    // Pure function of the URL; the file itself is only opened once the
    // status is known to be good and body bytes arrive.
    let derived = derive_name(url);
    let save_path = config.output_dir.join(&derived.name);
    tracing::debug!(
        filename = %derived.name,
        generated = derived.generated,
        "derived filename"
    );

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(config.max_redirections)?;
    easy.fail_on_error(true)?;
    easy.useragent(&config.user_agent)?;
    easy.buffer_size(config.chunk_size)?;
    easy.connect_timeout(config.connect_timeout())?;
    easy.low_speed_limit(config.low_speed_limit_bytes)?;
    easy.low_speed_time(config.low_speed_time())?;
    easy.timeout(config.timeout())?;

    let mut writer = ChunkWriter::new(&save_path);
    let mut write_failure: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match writer.write_chunk(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_failure = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    let status = easy.response_code().unwrap_or(0);
    tracing::debug!(status, "response received");
    if status >= 400 {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    if let Err(e) = performed {
        if let Some(source) = write_failure {
            return Err(FetchError::Unexpected {
                context: format!("writing {}", save_path.display()),
                source,
            });
        }
        return Err(e.into());
    }
    tracing::debug!(status, "status validated");

    let bytes_written = writer.finish().map_err(|source| FetchError::Unexpected {
        context: format!("finishing {}", save_path.display()),
        source,
    })?;
    tracing::debug!(path = %save_path.display(), bytes_written, "body written");

    Ok(SavedFile {
        path: save_path,
        bytes_written,
        status,
        generated_name: derived.generated,
    })
}

/// Rejects URLs with an explicit scheme other than http/https. Scheme-less
/// input (including `host:port/...`) is left to libcurl, which assumes http.
fn check_scheme(url: &str) -> Result<(), FetchError> {
    match parse_url(url) {
        Some(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
            Err(FetchError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
            })
        }
        _ => Ok(()),
    }
}
