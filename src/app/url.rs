//! URL validation and batch preparation.

use log::{info, warn};

use crate::models::Entry;

/// Validates a URL and returns its canonical absolute form.
///
/// Accepts only absolute `http`/`https` URLs. Relative inputs are not
/// completed with a scheme. Length is not limited.
///
/// # Arguments
///
/// * `url` - The trimmed URL string to validate
///
/// # Returns
///
/// `Some(canonical_url)` if the URL is valid, `None` otherwise.
pub fn normalize_url(url: &str) -> Option<String> {
    match url::Url::parse(url) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Some(parsed.to_string()),
            _ => {
                warn!("Rejecting unsupported scheme for URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Rejecting invalid URL: {url}");
            None
        }
    }
}

/// Turns raw input lines into prepared entries.
///
/// Trims every line, drops empty ones, keeps at most `max_urls` of the rest
/// (the excess is dropped silently) and validates each survivor. Order is
/// preserved.
pub fn prepare_urls<I, S>(raw_urls: I, max_urls: usize) -> Vec<Entry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut kept: Vec<String> = Vec::new();
    let mut dropped = 0usize;

    for raw in raw_urls {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if kept.len() < max_urls {
            kept.push(trimmed.to_string());
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        info!("URL list capped at {max_urls}; ignoring {dropped} more");
    }

    kept.into_iter()
        .map(|input| {
            let url = normalize_url(&input);
            Entry { input, url }
        })
        .collect()
}
