use std::fmt::Write;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

const MAX_STEM_CHARS: usize = 80;

/// Filesystem-safe, deterministic export name: `{title}--{hash}.html`.
/// The hash covers title and timestamp, so regenerating the same report
/// yields a new file instead of overwriting the previous export.
pub fn export_filename(title: &str, generated_at: DateTime<Utc>) -> String {
    let stem = sanitize_stem(title);
    let hash = short_hash(&format!("{title}\n{}", generated_at.to_rfc3339()));
    format!("{stem}--{hash}.html")
}

fn sanitize_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut last_dash = false;
    for c in title.chars() {
        let mapped = if c.is_alphanumeric() || c == '_' || c == '.' {
            Some(c)
        } else if c.is_whitespace() || c == '-' {
            Some('-')
        } else {
            None
        };
        match mapped {
            Some('-') if last_dash => {}
            Some(c) => {
                last_dash = c == '-';
                stem.push(c);
            }
            None => {}
        }
    }

    let stem: String = stem
        .trim_matches(&['-', '.', '_'][..])
        .chars()
        .take(MAX_STEM_CHARS)
        .collect();
    let mut stem = stem.trim_end_matches(&['-', '.'][..]).to_string();
    if stem.is_empty() {
        stem = "report".to_string();
    }
    if is_reserved_device_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_reserved_device_name(name: &str) -> bool {
    const RESERVED: &[&str] = &["CON", "PRN", "AUX", "NUL"];
    let upper = name.to_ascii_uppercase();
    RESERVED.contains(&upper.as_str())
        || ((upper.starts_with("COM") || upper.starts_with("LPT"))
            && upper.len() == 4
            && upper.as_bytes()[3].is_ascii_digit())
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
