//! Pulls values out of `[TAG]...[/TAG]` spans in generated text.

use regex::RegexBuilder;

use crate::errors::{AssemblyError, Result};

/// Every span between `[tag]` and `[/tag]`, trimmed, in document order.
///
/// Matching is non-greedy and crosses newlines. The tag name is literal.
/// A tag that never appears yields an empty vector. A tag too long to
/// compile into a pattern is an `InvalidInput` error.
pub fn extract(tag: &str, text: &str) -> Result<Vec<String>> {
    let pattern = format!(
        r"{}(.*?){}",
        regex::escape(&format!("[{tag}]")),
        regex::escape(&format!("[/{tag}]"))
    );
    let re = RegexBuilder::new(&pattern)
        .dot_matches_new_line(true)
        .size_limit(TAG_PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| AssemblyError::InvalidInput(format!("tag pattern for [{tag}]: {e}")))?;
    Ok(re
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect())
}

const TAG_PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Pairs two tag sequences position by position.
///
/// Sequences of different lengths are a `ContentShapeMismatch`.
pub fn zip_tags(
    left_tag: &str,
    right_tag: &str,
    text: &str,
) -> Result<Vec<(String, String)>> {
    let left = extract(left_tag, text)?;
    let right = extract(right_tag, text)?;
    if left.len() != right.len() {
        return Err(AssemblyError::mismatch(
            format!("[{left_tag}]/[{right_tag}]"),
            left.len(),
            right.len(),
        ));
    }
    Ok(left.into_iter().zip(right).collect())
}

/// The first value of `tag`, or a `ContentShapeMismatch` when it is absent.
pub fn first(tag: &str, text: &str) -> Result<String> {
    extract(tag, text)?
        .into_iter()
        .next()
        .ok_or_else(|| AssemblyError::mismatch(format!("[{tag}]"), 1, 0))
}
