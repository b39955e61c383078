//! URL list input.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads URL lines from a file, or from stdin when `path` is `-`.
///
/// Blank lines and `#` comments are skipped. Other lines are returned as-is;
/// validation happens later in `prepare_urls`.
pub async fn read_url_lines(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        log::info!("Reading URLs from stdin");
        return collect_lines(BufReader::new(tokio::io::stdin())).await;
    }

    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    collect_lines(BufReader::new(file)).await
}

async fn collect_lines<R>(reader: R) -> Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut urls = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read line from input")?
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        urls.push(trimmed.to_string());
    }
    Ok(urls)
}
