use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileLoadConfig {
    pub center: Option<bool>,
    #[serde(rename = "include-hetero-atoms")]
    pub include_hetero_atoms: Option<bool>,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub load: Option<FileLoadConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Applies `KEY=VALUE` overrides on top of the values read from the file.
    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value = value.trim();
            let load = self.load.get_or_insert_with(Default::default);
            match key {
                "load.center" => load.center = Some(parse_bool(key, value)?),
                "load.include-hetero-atoms" => {
                    load.include_hetero_atoms = Some(parse_bool(key, value)?)
                }
                "load.name" => load.name = Some(value.to_string()),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unknown configuration key: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid boolean value for {}: {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn reads_kebab_case_keys() {
        let file = write_config(
            "[load]\ncenter = false\ninclude-hetero-atoms = true\nname = \"lysozyme\"\n",
        );
        let config = FileConfig::from_file(file.path()).unwrap();
        let load = config.load.unwrap();
        assert_eq!(load.center, Some(false));
        assert_eq!(load.include_hetero_atoms, Some(true));
        assert_eq!(load.name.as_deref(), Some("lysozyme"));
    }

    #[test]
    fn empty_file_is_an_empty_config() {
        let file = write_config("");
        assert_eq!(FileConfig::from_file(file.path()).unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[load]\ncentre = true\n");
        let err = FileConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }

    #[test]
    fn missing_file_is_a_parsing_error() {
        let err = FileConfig::from_file(Path::new("/nonexistent/pdbscope.toml")).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }

    #[test]
    fn set_values_override_file_values() {
        let mut config = FileConfig {
            load: Some(FileLoadConfig {
                center: Some(true),
                ..Default::default()
            }),
        };
        config
            .apply_set_values(&[
                "load.center=false".to_string(),
                "load.include-hetero-atoms = true".to_string(),
            ])
            .unwrap();
        let load = config.load.unwrap();
        assert_eq!(load.center, Some(false));
        assert_eq!(load.include_hetero_atoms, Some(true));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        let mut config = FileConfig::default();
        assert!(matches!(
            config.apply_set_values(&["load.center".to_string()]),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            config.apply_set_values(&["load.center=maybe".to_string()]),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            config.apply_set_values(&["render.quality=high".to_string()]),
            Err(CliError::Config(_))
        ));
    }
}
