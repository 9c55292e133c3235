use crate::models::{Exclude, ExcludeMatchType};
use regex::RegexSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExcludeError {
    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Compiled exclusion filters, split by what they are matched against.
/// An empty rule set excludes nothing.
#[derive(Debug)]
pub struct ExcludeFilter {
    by_name: RegexSet,
    by_path: RegexSet,
}

/// Compile the configured exclude rules into the two filter sets.
pub fn build(excludes: &[Exclude]) -> Result<ExcludeFilter, ExcludeError> {
    let names = excludes
        .iter()
        .filter(|e| e.match_type == ExcludeMatchType::Name)
        .map(|e| e.reg_exp.as_str());
    let paths = excludes
        .iter()
        .filter(|e| e.match_type == ExcludeMatchType::Path)
        .map(|e| e.reg_exp.as_str());

    Ok(ExcludeFilter {
        by_name: RegexSet::new(names)?,
        by_path: RegexSet::new(paths)?,
    })
}

impl ExcludeFilter {
    /// Match against a file or directory base name
    pub fn matches_name(&self, name: &str) -> bool {
        self.by_name.is_match(name)
    }

    /// Match against a module-root-relative path
    pub fn matches_path(&self, relative_path: &str) -> bool {
        self.by_path.is_match(relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclude(match_type: ExcludeMatchType, pattern: &str) -> Exclude {
        Exclude {
            match_type,
            reg_exp: pattern.to_string(),
        }
    }

    #[test]
    fn test_name_rules_only_match_names() {
        let filter = build(&[exclude(ExcludeMatchType::Name, "^vendor$")]).unwrap();

        assert!(filter.matches_name("vendor"));
        assert!(!filter.matches_name("vendored"));
        assert!(!filter.matches_path("vendor"));
    }

    #[test]
    fn test_path_rules_only_match_paths() {
        let filter = build(&[exclude(ExcludeMatchType::Path, "^third_party/")]).unwrap();

        assert!(filter.matches_path("third_party/lib/lib.go"));
        assert!(!filter.matches_path("pkg/third_party.go"));
        assert!(!filter.matches_name("third_party"));
    }

    #[test]
    fn test_empty_rules_exclude_nothing() {
        let filter = build(&[]).unwrap();

        assert!(!filter.matches_name("anything"));
        assert!(!filter.matches_path("any/path/at/all.go"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = build(&[exclude(ExcludeMatchType::Name, "([")]).unwrap_err();
        assert!(matches!(err, ExcludeError::Pattern(_)));
    }
}
