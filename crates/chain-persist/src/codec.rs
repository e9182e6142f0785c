//! # Key-Value Text Codec
//!
//! The on-disk snapshot format: one `key value` pair per line, ASCII,
//! newline-terminated. This module is the only place that knows the format,
//! keeping the external contract stable while the in-memory representation
//! stays free to change.
//!
//! ```text
//! shirts 20
//! jeans 17
//! ```

use tracing::warn;

/// Encodes pairs into the canonical `key value` text form.
pub fn encode(pairs: &[(&str, u32)]) -> String {
    let mut out = String::new();
    for (key, value) in pairs {
        out.push_str(key);
        out.push(' ');
        out.push_str(&value.to_string());
        out.push('\n');
    }
    out
}

/// Decodes `key value` lines, skipping anything malformed.
///
/// Unknown keys are the caller's business (they ignore them); malformed
/// lines are logged and dropped so one bad line cannot poison the rest of
/// the file.
pub fn decode(text: &str) -> Vec<(String, u32)> {
    let mut pairs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut words = line.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(key), Some(raw), None) => match raw.parse::<u32>() {
                Ok(value) => pairs.push((key.to_string(), value)),
                Err(_) => warn!(line, "Skipping snapshot line with non-numeric value"),
            },
            _ => warn!(line, "Skipping malformed snapshot line"),
        }
    }
    pairs
}

/// Looks up a key in decoded pairs, falling back to a default.
pub fn field_or(pairs: &[(String, u32)], key: &str, default: u32) -> u32 {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| *v)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_emits_one_pair_per_line() {
        let text = encode(&[("shirts", 20), ("jeans", 17)]);
        assert_eq!(text, "shirts 20\njeans 17\n");
    }

    #[test]
    fn decode_round_trips_encode() {
        let text = encode(&[("shirts", 3), ("jeans", 0)]);
        let pairs = decode(&text);
        assert_eq!(
            pairs,
            vec![("shirts".to_string(), 3), ("jeans".to_string(), 0)]
        );
    }

    #[test]
    fn decode_skips_malformed_lines() {
        let pairs = decode("shirts 20\ngarbage\njeans notanumber\n\n  \nstaff_count 5");
        assert_eq!(
            pairs,
            vec![("shirts".to_string(), 20), ("staff_count".to_string(), 5)]
        );
    }

    #[test]
    fn field_or_falls_back_per_field() {
        let pairs = decode("jeans 11");
        assert_eq!(field_or(&pairs, "jeans", 20), 11);
        assert_eq!(field_or(&pairs, "shirts", 20), 20);
    }
}
