use crate::models::{Group, GroupMatcher, FALLBACK_GROUP, MODULE_PLACEHOLDER};
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("invalid pattern for group {description:?}: {source}")]
    Pattern {
        description: String,
        source: regex::Error,
    },
}

/// Build the classification machinery from the configured groups.
///
/// Returns the matcher list sorted by ascending `matchOrder` and the display
/// sequence of bucket names sorted by ascending `displayOrder`. The two
/// orderings are independent: `matchOrder` decides which bucket claims a
/// path, `displayOrder` only decides where the bucket appears in the output.
///
/// The fallback bucket is appended to the display sequence when no group
/// carries its name, so unmatched imports always have somewhere to land.
pub fn build(
    groups: &[Group],
    module_name: &str,
) -> Result<(Vec<GroupMatcher>, Vec<String>), GroupError> {
    let mut by_display: Vec<&Group> = groups.iter().collect();
    by_display.sort_by_key(|g| g.display_order);

    let mut display_order: Vec<String> =
        by_display.iter().map(|g| g.description.clone()).collect();
    if !display_order.iter().any(|d| d == FALLBACK_GROUP) {
        display_order.push(FALLBACK_GROUP.to_string());
    }

    let mut by_match: Vec<&Group> = groups.iter().collect();
    by_match.sort_by_key(|g| g.match_order);

    let mut matchers = Vec::with_capacity(by_match.len());
    for group in by_match {
        let mut patterns = Vec::with_capacity(group.reg_exp.len());
        for raw in &group.reg_exp {
            // A group with no usable patterns never matches anything.
            if raw.is_empty() {
                continue;
            }
            let resolved = if raw == MODULE_PLACEHOLDER {
                module_prefix_pattern(module_name)
            } else {
                raw.clone()
            };
            let pattern = Regex::new(&resolved).map_err(|source| GroupError::Pattern {
                description: group.description.clone(),
                source,
            })?;
            patterns.push(pattern);
        }
        matchers.push(GroupMatcher {
            bucket: group.description.clone(),
            patterns,
        });
    }

    Ok((matchers, display_order))
}

/// Resolve `%{module}%` into an anchored literal prefix of the module path.
fn module_prefix_pattern(module_name: &str) -> String {
    format!(
        "^{}",
        module_name.replace('.', r"\.").replace('/', r"\/")
    )
}

/// Classify one import path: matchers run in `matchOrder` sequence and the
/// first whose pattern matches wins. Unmatched paths fall back to "other".
pub fn classify<'a>(matchers: &'a [GroupMatcher], path: &str) -> &'a str {
    for matcher in matchers {
        if matcher.patterns.iter().any(|p| p.is_match(path)) {
            return &matcher.bucket;
        }
    }
    FALLBACK_GROUP
}
