//! User-facing lines for a fetch outcome.

use imgfetch_core::{ErrorCategory, Outcome};

fn label(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Directory => "Directory Error",
        ErrorCategory::HttpStatus => "HTTP Error",
        ErrorCategory::Connection => "Connection Error",
        ErrorCategory::Timeout => "Timeout Error",
        ErrorCategory::Request => "Request Error",
        ErrorCategory::Unexpected => "Unexpected Error",
    }
}

fn hint(category: ErrorCategory) -> Option<&'static str> {
    match category {
        ErrorCategory::Directory => {
            Some("Could not prepare the output folder. Check the path and its permissions.")
        }
        ErrorCategory::HttpStatus => Some(
            "Could not fetch the image. The URL might be invalid or the image is not available.",
        ),
        ErrorCategory::Connection => Some(
            "Failed to connect to the server. Please check your internet connection or the URL.",
        ),
        ErrorCategory::Timeout => {
            Some("The request timed out. The server might be slow or not responding.")
        }
        ErrorCategory::Request => Some("Check that the URL is a valid http:// or https:// address."),
        ErrorCategory::Unexpected => None,
    }
}

/// Lines to print for `outcome`: directory and naming notices plus the saved
/// path, or the failure plus a hint.
pub fn render_outcome(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Ok(saved) => {
            let mut lines = Vec::new();
            if let Some(dir) = saved.path.parent() {
                lines.push(format!("Ensured directory '{}' exists.", dir.display()));
            }
            if saved.generated_name {
                if let Some(name) = saved.path.file_name() {
                    lines.push(format!(
                        "No filename found in URL. Using generated name: {}",
                        name.to_string_lossy()
                    ));
                }
            }
            lines.push(format!(
                "Success! Image downloaded and saved as '{}'",
                saved.path.display()
            ));
            lines
        }
        Err(err) => {
            let category = err.category();
            let mut lines = vec![format!("{} occurred: {}", label(category), err)];
            lines.extend(hint(category).map(str::to_string));
            lines
        }
    }
}
