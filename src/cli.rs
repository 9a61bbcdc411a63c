use crate::config::{self, CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "impseek")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List the symbols a TypeScript source tree imports")]
#[command(
    long_about = "impseek walks a directory for .ts and .tsx files, reads the import \
                  statements in each one and prints every imported symbol once, comma-separated."
)]
#[command(after_help = "EXAMPLES:\n  \
    impseek\n  \
    impseek --package-name \"'react'\"\n  \
    impseek packages/web --time\n  \
    impseek --glob 'src/**/*.ts' --exclude '**/__tests__/**'\n  \
    impseek --output-format json")]
pub struct Cli {
    /// Directory to scan (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Only report imports from lines ending with this text (e.g. "'react'")
    #[arg(short = 'p', long = "package-name", visible_alias = "packageName", value_name = "NAME")]
    pub package_name: Option<String>,

    /// Exclude node_modules folders
    #[arg(short = 'n', long = "node")]
    pub node: bool,

    /// Print how long the run took
    #[arg(short = 't', long = "time")]
    pub time: bool,

    /// Glob selecting the files to read
    #[arg(short = 'g', long = "glob", value_name = "PATTERN")]
    pub glob: Option<String>,

    /// Additional glob patterns to ignore (comma-separated)
    #[arg(short, long, value_delimiter = ',', value_name = "GLOB")]
    pub exclude: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only the result and errors are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Comma-joined list, colored when the terminal supports it
    Human,
    /// JSON object with the list and run counters
    Json,
    /// Comma-joined list without color
    Plain,
}

impl Cli {
    pub fn base_dir(&self) -> PathBuf {
        match self.dir {
            Some(ref dir) if dir.is_absolute() => dir.clone(),
            Some(ref dir) => config::current_dir().join(dir),
            None => config::current_dir(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref(), &self.base_dir())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_pattern(self.glob.clone())
            .with_exclude(self.exclude.clone())
            .with_exclude_node_modules(self.node)
            .with_color(if self.no_color { Some(false) } else { None })
            .with_show_time(self.time)
    }

    /// The package filter, if one was given. An empty value means none.
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn should_use_colors(&self) -> bool {
        !self.no_color && console::Term::stdout().features().colors_supported()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["impseek", "-n", "-t", "-p", "'lodash'"]).unwrap();
        assert!(cli.node);
        assert!(cli.time);
        assert_eq!(cli.package_name(), Some("'lodash'"));
        assert!(cli.dir.is_none());
    }

    #[test]
    fn test_camel_case_package_alias() {
        let cli = Cli::try_parse_from(["impseek", "--packageName", "react'"]).unwrap();
        assert_eq!(cli.package_name(), Some("react'"));
    }

    #[test]
    fn test_empty_package_name_is_no_filter() {
        let cli = Cli::try_parse_from(["impseek", "--package-name", ""]).unwrap();
        assert_eq!(cli.package_name(), None);
    }

    #[test]
    fn test_exclude_list_and_overrides() {
        let cli = Cli::try_parse_from([
            "impseek",
            "--exclude",
            "**/gen/**,**/*.spec.ts",
            "--glob",
            "**/*.ts",
            "--no-color",
        ])
        .unwrap();

        let overrides = cli.create_cli_overrides();
        assert_eq!(
            overrides.exclude,
            Some(vec!["**/gen/**".to_string(), "**/*.spec.ts".to_string()])
        );
        assert_eq!(overrides.pattern.as_deref(), Some("**/*.ts"));
        assert_eq!(overrides.color, Some(false));
        assert!(!cli.should_use_colors());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["impseek", "-q", "-v"]).is_err());

        let cli = Cli::try_parse_from(["impseek", "-vv"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);
    }

    #[test]
    fn test_base_dir_resolution() {
        let cli = Cli::try_parse_from(["impseek", "packages/web"]).unwrap();
        assert!(cli.base_dir().is_absolute());
        assert!(cli.base_dir().ends_with("packages/web"));
    }
}
