use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "pdbscope contributors",
    version,
    about = "pdbscope - inspect the chain and secondary structure layout of legacy PDB files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a summary of a structure: name, chains, secondary structures and counts.
    Info(InfoArgs),
    /// Print the element composition of every chain.
    Composition(CompositionArgs),
}

/// Options shared by every command that loads a structure.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the file's coordinates instead of centering the model at the origin.
    #[arg(long)]
    pub no_center: bool,

    /// Read HETATM records as well as ATOM records.
    #[arg(long)]
    pub hetatm: bool,

    /// Name used when the file declares no molecule names (defaults to the file stem).
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Override a configuration value, e.g. `-S load.center=false`.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoFormat {
    #[default]
    Text,
    Toml,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Table,
    Csv,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Output format of the summary.
    #[arg(short, long, value_enum, default_value_t = InfoFormat::Text)]
    pub format: InfoFormat,

    /// Also list every parse diagnostic collected while reading the file.
    #[arg(long)]
    pub diagnostics: bool,
}

/// Arguments for the `composition` subcommand.
#[derive(Args, Debug)]
pub struct CompositionArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Output format of the histogram.
    #[arg(short, long, value_enum, default_value_t = TableFormat::Table)]
    pub format: TableFormat,

    /// Restrict the histogram to a single chain.
    #[arg(long, value_name = "ID")]
    pub chain: Option<String>,

    /// Write the histogram to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn info_parses_global_and_load_flags() {
        let cli = Cli::try_parse_from([
            "pdbscope", "-vv", "info", "1abc.pdb", "--no-center", "--hetatm", "-f", "toml", "-S",
            "load.center=true",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Info(args) = cli.command else {
            panic!("expected the info command");
        };
        assert_eq!(args.load.input, PathBuf::from("1abc.pdb"));
        assert!(args.load.no_center);
        assert!(args.load.hetatm);
        assert_eq!(args.format, InfoFormat::Toml);
        assert_eq!(args.load.set_values, vec!["load.center=true".to_string()]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["pdbscope", "-q", "-v", "info", "1abc.pdb"]);
        assert!(result.is_err());
    }

    #[test]
    fn composition_defaults_to_a_table_on_stdout() {
        let cli = Cli::try_parse_from(["pdbscope", "composition", "1abc.pdb", "--chain", "A"]).unwrap();
        let Commands::Composition(args) = cli.command else {
            panic!("expected the composition command");
        };
        assert_eq!(args.format, TableFormat::Table);
        assert_eq!(args.chain.as_deref(), Some("A"));
        assert!(args.output.is_none());
    }
}
