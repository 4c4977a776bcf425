//! Wordlist loading.
//!
//! Plain text, one subdomain label per line, blank lines ignored. A missing
//! or unreadable file falls back to the built-in list of common labels so a
//! scan never fails on wordlist problems.

use std::path::Path;

use log::{info, warn};

use crate::config::DEFAULT_WORDLIST;

/// Loads candidate subdomain labels.
///
/// # Arguments
///
/// * `path` - Optional wordlist file; `None` selects the built-in list
///
/// # Returns
///
/// The candidate labels in file order. Never fails: an unreadable file is
/// logged and the built-in list is returned instead.
pub async fn load_wordlist(path: Option<&Path>) -> Vec<String> {
    let Some(path) = path else {
        info!(
            "No wordlist given, using built-in list ({} labels)",
            DEFAULT_WORDLIST.len()
        );
        return default_wordlist();
    };

    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let labels = parse_wordlist(&contents);
            info!("Loaded {} labels from {}", labels.len(), path.display());
            labels
        }
        Err(e) => {
            warn!(
                "Failed to read wordlist {}: {e}; falling back to built-in list",
                path.display()
            );
            default_wordlist()
        }
    }
}

/// Parses wordlist text: one label per line, blank lines ignored.
fn parse_wordlist(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_wordlist() -> Vec<String> {
    DEFAULT_WORDLIST.iter().map(|s| s.to_string()).collect()
}
