//! Change detector
//!
//! Decides whether a freshly rendered hosts block differs from the one
//! already published in the README. The timestamp line is excluded
//! from the comparison; it changes on every run and would otherwise
//! make every run look dirty.
//!
//! Extraction anchors on the banner start/end sentinel lines the
//! renderer itself emits, not on surrounding Markdown code fences, so
//! detection keeps working however the template wraps the block.
//!
//! A README that is missing, empty, or missing its sentinels is never
//! an error: it forces a publish instead.

use crate::render::{BANNER_END, BANNER_START, UPDATE_TIME_MARKER};

/// Compare newly rendered content against the previously published README
///
/// Returns `true` when the publisher should rewrite the README and
/// persist the snapshot.
pub fn has_changed(new_content: &str, existing_readme: Option<&str>) -> bool {
    let Some(readme) = existing_readme else {
        tracing::info!("No existing README, forcing update");
        return true;
    };

    if readme.trim().is_empty() {
        tracing::info!("Existing README is empty, forcing update");
        return true;
    }

    match extract_block(readme) {
        Some(old_block) => comparable(old_block) != comparable(new_content),
        None => {
            tracing::warn!("Failed to locate hosts block in existing README, forcing update");
            true
        }
    }
}

/// Extract the banner-delimited hosts block from a README
///
/// Returns `None` when either sentinel is missing or out of order.
pub fn extract_block(readme: &str) -> Option<&str> {
    let start = readme.find(BANNER_START)?;
    let tail = &readme[start..];
    let end = tail.find(BANNER_END)?;
    Some(&tail[..end + BANNER_END.len()])
}

/// The content-bearing part of a block: everything before the
/// timestamp marker, trimmed.
fn comparable(block: &str) -> &str {
    block
        .split(UPDATE_TIME_MARKER)
        .next()
        .unwrap_or(block)
        .trim()
}
