use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use hostel_merge::MergeConfig;
use serde::{Deserialize, Serialize};

/// Contents of the TOML configuration file.
///
/// ```toml
/// [store]
/// path = "data/hostels.json"
///
/// [merge]
/// dry_run = false
/// validate_after_merge = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub store: StoreSection,
    pub merge: MergeConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// JSON file holding every collection.
    pub path: Option<PathBuf>,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The store file: the command-line value wins over the config file.
    pub fn store_path(&self, flag: Option<&Path>) -> anyhow::Result<PathBuf> {
        match flag.or(self.store.path.as_deref()) {
            Some(path) => Ok(path.to_path_buf()),
            None => bail!("no store given: pass --store or set [store] path in the config file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_both_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merge.toml");
        fs::write(
            &path,
            r#"
[store]
path = "db.json"

[merge]
dry_run = true
allocations_collection = "allocs"
"#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.store.path, Some(PathBuf::from("db.json")));
        assert!(config.merge.dry_run);
        assert_eq!(config.merge.allocations_collection, "allocs");
        assert_eq!(config.merge.hostels_collection, "hostels");
        assert!(config.merge.validate_after_merge);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), CliConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[merge\ndry_run = ").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::resolve(Some(&dir.path().join("nope.toml"))).is_err());
        assert_eq!(CliConfig::resolve(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn flag_overrides_file_store_path() {
        let config = CliConfig {
            store: StoreSection {
                path: Some("from-file.json".into()),
            },
            ..Default::default()
        };
        assert_eq!(
            config.store_path(Some(Path::new("flag.json"))).unwrap(),
            PathBuf::from("flag.json")
        );
        assert_eq!(config.store_path(None).unwrap(), PathBuf::from("from-file.json"));
        assert!(CliConfig::default().store_path(None).is_err());
    }
}
