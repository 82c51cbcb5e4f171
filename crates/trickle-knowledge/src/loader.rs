//! Knowledge source parser.
//!
//! Format:
//! ```text
//! KEYWORDS: wifi, router, internet
//! CONTENT: Restart the router and wait two minutes.
//! If the light stays red, call the helpdesk.
//! ---
//! KEYWORDS: password, reset
//! CONTENT: Go to settings > security > reset password.
//! ```
//! Lines after the first `CONTENT:` continue the content until the next
//! `---` line. Blocks without keywords or content are skipped.

use std::path::Path;
use trickle_core::types::Entry;

const DELIMITER: &str = "---";
const KEYWORDS_PREFIX: &str = "KEYWORDS:";
const CONTENT_PREFIX: &str = "CONTENT:";

/// Parse entries from source text. Malformed blocks are dropped.
pub fn parse_entries(text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim() == DELIMITER {
            entries.extend(parse_block(&block));
            block.clear();
        } else {
            block.push(line);
        }
    }
    entries.extend(parse_block(&block));
    entries
}

fn parse_block(lines: &[&str]) -> Option<Entry> {
    if lines.iter().all(|l| l.trim().is_empty()) {
        return None;
    }

    let mut keywords: Vec<&str> = Vec::new();
    let mut content: Vec<&str> = Vec::new();

    for raw in lines {
        let line = raw.trim();
        if let Some(rest) = line.strip_prefix(KEYWORDS_PREFIX) {
            // A later KEYWORDS line replaces an earlier one.
            keywords = rest.split(',').collect();
        } else if let Some(rest) = line.strip_prefix(CONTENT_PREFIX) {
            content.push(rest.trim());
        } else if !content.is_empty() && !line.is_empty() {
            content.push(line);
        }
    }

    let entry = Entry::new(keywords, content.join(" "));
    if entry.is_none() {
        tracing::debug!("Skipping malformed knowledge block ({} lines)", lines.len());
    }
    entry
}

/// Read and parse a knowledge file. A missing or unreadable file yields
/// no entries; the caller never sees an error.
pub fn load_file(path: &Path) -> Vec<Entry> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_entries(&text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Knowledge source not found: {}, starting empty", path.display());
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Failed to read knowledge source {}: {e}", path.display());
            Vec::new()
        }
    }
}
