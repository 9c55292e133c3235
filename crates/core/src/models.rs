use regex::Regex;
use serde::{Deserialize, Deserializer};

/// Placeholder pattern that resolves to the current project's module path.
pub const MODULE_PLACEHOLDER: &str = "%{module}%";

/// Bucket that receives every import no group pattern claims.
pub const FALLBACK_GROUP: &str = "other";

/// What an exclude rule is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcludeMatchType {
    /// The file or directory base name
    Name,
    /// The path relative to the module root
    Path,
}

/// A rule that removes files or directories from consideration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclude {
    pub match_type: ExcludeMatchType,
    pub reg_exp: String,
}

/// A user-defined import bucket
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Bucket name; must be unique across the configuration
    pub description: String,
    /// One or more patterns; an import belongs to the bucket if any matches.
    /// A group with no patterns never matches anything.
    #[serde(default, deserialize_with = "one_or_many")]
    pub reg_exp: Vec<String>,
    /// Classification priority; lower runs first and wins ambiguous matches
    pub match_order: i64,
    /// Output position; lower appears first in the rewritten block
    pub display_order: i64,
}

/// On-disk configuration (`gogroup.yaml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub excludes: Vec<Exclude>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Accept either a single pattern string or a list of them
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(pattern) => vec![pattern],
        OneOrMany::Many(patterns) => patterns,
    })
}

/// A compiled matcher entry: bucket name plus the group's patterns.
/// Built once per run and shared read-only across every file.
#[derive(Debug)]
pub struct GroupMatcher {
    pub bucket: String,
    pub patterns: Vec<Regex>,
}

/// One import statement lifted out of the syntax tree
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRecord {
    /// Path literal exactly as written, quotes included
    pub quoted_path: String,
    /// Decoded import path
    pub path: String,
    /// Local alias (`package_ident`, `_`, or `.`) if present
    pub name: Option<String>,
    /// Comment lines on their own lines directly above the spec
    pub doc_comments: Vec<String>,
    /// Comment trailing the spec on the same line
    pub line_comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_single_pattern() {
        let group: Group = serde_yaml::from_str(
            "description: standard\nregExp: ^[a-z]+$\nmatchOrder: 1\ndisplayOrder: 0\n",
        )
        .unwrap();

        assert_eq!(group.description, "standard");
        assert_eq!(group.reg_exp, vec!["^[a-z]+$".to_string()]);
        assert_eq!(group.match_order, 1);
        assert_eq!(group.display_order, 0);
    }

    #[test]
    fn test_group_pattern_list() {
        let group: Group = serde_yaml::from_str(
            "description: vendored\nregExp:\n  - ^github\\.com\n  - ^gopkg\\.in\nmatchOrder: 2\ndisplayOrder: 1\n",
        )
        .unwrap();

        assert_eq!(group.reg_exp.len(), 2);
    }

    #[test]
    fn test_group_no_patterns() {
        let group: Group =
            serde_yaml::from_str("description: empty\nmatchOrder: 9\ndisplayOrder: 9\n").unwrap();

        assert!(group.reg_exp.is_empty());
    }

    #[test]
    fn test_exclude_match_types() {
        let excludes: Vec<Exclude> = serde_yaml::from_str(
            "- matchType: name\n  regExp: ^vendor$\n- matchType: path\n  regExp: ^third_party/\n",
        )
        .unwrap();

        assert_eq!(excludes[0].match_type, ExcludeMatchType::Name);
        assert_eq!(excludes[1].match_type, ExcludeMatchType::Path);
    }
}
