use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::LoadArgs;
use crate::error::Result;
use pdbscope::engine::config::{LoadConfig, LoadConfigBuilder};
use tracing::debug;

/// Merges defaults, the optional config file, `--set` overrides and explicit
/// flags (in increasing precedence) into a core [`LoadConfig`].
pub fn build_load_config(args: &LoadArgs) -> Result<LoadConfig> {
    let defaults = DefaultsConfig::default();

    let mut file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    file_config.apply_set_values(&args.set_values)?;
    let file_load = file_config.load.unwrap_or_default();

    let center = if args.no_center {
        false
    } else {
        file_load.center.unwrap_or(defaults.center)
    };
    let include_hetero_atoms = if args.hetatm {
        true
    } else {
        file_load
            .include_hetero_atoms
            .unwrap_or(defaults.include_hetero_atoms)
    };

    let mut builder = LoadConfigBuilder::new()
        .center_at_origin(center)
        .include_hetero_atoms(include_hetero_atoms);
    if let Some(name) = args.name.clone().or(file_load.name) {
        builder = builder.fallback_name(name);
    }
    let config = builder.build();
    debug!(?config, "Resolved load configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Write;
    use std::path::PathBuf;

    fn args() -> LoadArgs {
        LoadArgs {
            input: PathBuf::from("1abc.pdb"),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_match_the_core_defaults() {
        assert_eq!(build_load_config(&args()).unwrap(), LoadConfig::default());
    }

    #[test]
    fn file_values_beat_defaults_and_flags_beat_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[load]\ncenter = false\nname = \"from-file\"").unwrap();

        let mut args = args();
        args.config = Some(file.path().to_path_buf());
        let config = build_load_config(&args).unwrap();
        assert!(!config.center_at_origin);
        assert_eq!(config.fallback_name.as_deref(), Some("from-file"));

        args.name = Some("from-flag".to_string());
        args.hetatm = true;
        let config = build_load_config(&args).unwrap();
        assert!(config.include_hetero_atoms);
        assert_eq!(config.fallback_name.as_deref(), Some("from-flag"));
    }

    #[test]
    fn no_center_flag_wins_over_set_values() {
        let mut args = args();
        args.set_values = vec!["load.center=true".to_string()];
        args.no_center = true;
        assert!(!build_load_config(&args).unwrap().center_at_origin);
    }

    #[test]
    fn invalid_set_value_is_a_config_error() {
        let mut args = args();
        args.set_values = vec!["load.center=yes".to_string()];
        assert!(matches!(build_load_config(&args), Err(CliError::Config(_))));
    }
}
