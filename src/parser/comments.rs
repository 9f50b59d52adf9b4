//! Values-file comment scanner — line-by-line state machine.
//!
//! Recovers per-key documentation from comment blocks of the form:
//!
//! ```yaml
//! # controller.replicas -- number of controller pods
//! # spread across availability zones
//! # @default -- 3
//! replicas: 3
//! ```

use crate::model::{DescriptionMap, ValueDescription};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*(?P<key>.*)\s+--\s*(?P<desc>.*)$").unwrap());

static RE_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*# @default -- (?P<default>.*)$").unwrap());

static RE_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*# (?P<text>.*)$").unwrap());

// -- Public API ---------------------------------------------------------------

/// Scan the raw text of a values file for key comment blocks.
///
/// A block opens on a `# <key> -- <text>` line with a non-empty key and
/// accumulates `@default` and plain continuation comment lines until the
/// first line matching neither. Later blocks for the same key overwrite
/// earlier ones. Malformed lines never abort the scan; a block still open
/// at end of input is flushed, not dropped.
pub fn scan_comments(input: &str) -> DescriptionMap {
    let mut descriptions = DescriptionMap::new();
    let mut block: Vec<&str> = Vec::new();

    for line in input.lines() {
        // Seeking: try to open a block on each line until one matches
        if block.is_empty() {
            if let Some(caps) = RE_KEY.captures(line) {
                if !caps["key"].is_empty() {
                    block.push(line);
                }
            }
            continue;
        }

        // Accumulating: defaults and continuations extend the block
        if RE_DEFAULT.is_match(line) || RE_CONTINUATION.is_match(line) {
            block.push(line);
            continue;
        }

        // Anything else finalizes the block. The line itself is not
        // re-examined as a new key comment; scanning resumes below it.
        flush_block(&mut block, &mut descriptions);
    }

    flush_block(&mut block, &mut descriptions);
    descriptions
}

/// Reduce one buffered comment block to its key and description entry.
pub fn parse_comment_block(lines: &[&str]) -> (String, ValueDescription) {
    let mut key = String::new();
    let mut entry = ValueDescription::default();

    let Some((first, rest)) = lines.split_first() else {
        return (key, entry);
    };

    if let Some(caps) = RE_KEY.captures(first) {
        key = caps["key"].to_string();
        entry.description = caps["desc"].to_string();
    }

    for line in rest {
        // @default lines also match the continuation pattern, so they are
        // tested first and kept out of the description text
        if let Some(caps) = RE_DEFAULT.captures(line) {
            entry.default = caps["default"].to_string();
            continue;
        }
        if let Some(caps) = RE_CONTINUATION.captures(line) {
            let text = caps["text"].trim_end();
            if !text.is_empty() {
                if !entry.description.is_empty() {
                    entry.description.push(' ');
                }
                entry.description.push_str(text);
            }
        }
    }

    (key, entry)
}

fn flush_block(block: &mut Vec<&str>, out: &mut DescriptionMap) {
    if block.is_empty() {
        return;
    }
    let (key, entry) = parse_comment_block(block);
    out.insert(key, entry);
    block.clear();
}
