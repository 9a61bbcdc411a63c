pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, ScanConfig};
pub use error::{ImpseekError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    collect_imports, extract_imports, CollectionReport, Fragment, ImportCollector, ImportSet,
};
pub use scanner::{FileFilter, SourceFile, SourceScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Process-wide inputs of a run, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub base_dir: PathBuf,
    pub version: &'static str,
    pub use_colors: bool,
}

impl RunContext {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            version: version_info(),
            use_colors: false,
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub imports: ImportSet,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub errors: Vec<String>,
    pub elapsed: Duration,
}

/// Main library interface for impseek
pub struct Impseek {
    config: Config,
    context: RunContext,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl Impseek {
    pub fn new(
        config: Config,
        context: RunContext,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet)
            .with_colors(context.use_colors && config.output.color);
        let show_progress = !quiet && output_mode == OutputMode::Human;
        let progress_manager = ProgressManager::new(show_progress);

        Self {
            config,
            context,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let context = RunContext::new(cli_args.base_dir()).with_colors(cli_args.should_use_colors());
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            context,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Discovers the source files under the base directory and collects the
    /// imports they declare.
    ///
    /// Only discovery can fail; unreadable files are counted in the report.
    pub async fn find_imports(&self, package_name: Option<&str>) -> Result<ImportReport> {
        let start_time = Instant::now();

        let files = self.discover_files().await?;
        let relative_paths: Vec<PathBuf> =
            files.iter().map(|f| f.relative_path.clone()).collect();

        let collection = self.collect(&relative_paths, package_name).await;

        let report = ImportReport {
            files_scanned: files.len(),
            files_failed: collection.files_failed(),
            errors: collection.errors,
            imports: collection.imports,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            files = report.files_scanned,
            failed = report.files_failed,
            imports = report.imports.len(),
            "run finished"
        );

        if report.files_failed > 0 {
            self.output_formatter.warning(&format!(
                "{} of {} files could not be read",
                report.files_failed, report.files_scanned
            ));
        }

        Ok(report)
    }

    /// Walks the base directory on the blocking pool.
    async fn discover_files(&self) -> Result<Vec<SourceFile>> {
        let scanner = SourceScanner::new(&self.config.scan)?;
        let root = self.context.base_dir.clone();

        let spinner = self
            .progress_manager
            .create_spinner("Scanning for source files");

        let joined = tokio::task::spawn_blocking(move || {
            let result = scanner.scan_directory(&root);
            (scanner, result)
        })
        .await;
        ui::progress::finish_and_clear(&spinner);

        let (scanner, result) = joined.map_err(|e| ImpseekError::TaskFailed {
            path: self.context.base_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let files = result?;
        tracing::debug!("{}", scanner.get_statistics(&files).display_summary());
        Ok(files)
    }

    async fn collect(&self, relative_paths: &[PathBuf], package_name: Option<&str>) -> CollectionReport {
        let file_progress = self
            .progress_manager
            .create_file_progress(relative_paths.len() as u64);

        let collection = ImportCollector::new()
            .with_package_name(package_name)
            .with_progress(file_progress.clone())
            .collect(&self.context.base_dir, relative_paths)
            .await;

        ui::progress::finish_and_clear(&file_progress);
        collection
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ImpseekError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
