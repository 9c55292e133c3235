use crate::models::Config;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read configuration file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("unable to parse configuration file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load and validate the configuration file.
///
/// Ordering contract: groups are matched strictly in ascending `matchOrder`
/// and the first matching group wins, independent of `displayOrder`. A broad
/// pattern with a low `matchOrder` therefore shadows more specific groups
/// with a numerically higher `matchOrder`; arrange `matchOrder` so that the
/// most specific patterns run first.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let config: Config = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for group in &config.groups {
        if group.description.is_empty() {
            return Err(ConfigError::Invalid(
                "group with an empty description".to_string(),
            ));
        }
        if !seen.insert(group.description.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "duplicate group description {:?}",
                group.description
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
excludes:
  - matchType: name
    regExp: ^vendor$
  - matchType: path
    regExp: ^third_party/
groups:
  - description: standard
    regExp: ^[a-zA-Z0-9\/]+$
    matchOrder: 1
    displayOrder: 0
  - description: module
    regExp: "%{module}%"
    matchOrder: 0
    displayOrder: 2
  - description: other
    regExp: .+\..+/
    matchOrder: 2
    displayOrder: 1
"#,
        );

        let config = load(file.path()).unwrap();
        assert_eq!(config.excludes.len(), 2);
        assert_eq!(config.groups.len(), 3);
        assert_eq!(config.groups[1].description, "module");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load(Path::new("/nonexistent/gogroup.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let file = write_config("groups: [not: valid: yaml");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_duplicate_description_rejected() {
        let file = write_config(
            r#"
groups:
  - description: standard
    regExp: ^a$
    matchOrder: 0
    displayOrder: 0
  - description: standard
    regExp: ^b$
    matchOrder: 1
    displayOrder: 1
"#,
        );

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let file = write_config("{}\n");
        let config = load(file.path()).unwrap();
        assert!(config.groups.is_empty());
        assert!(config.excludes.is_empty());
    }
}
