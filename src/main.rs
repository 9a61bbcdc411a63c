use clap::{CommandFactory, Parser};
use impseek::{Cli, Impseek, ImpseekError, OutputFormatter, OutputMode, UserFriendlyError};
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();

    setup_logging(cli.verbosity_level(), cli.quiet);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let start_time = Instant::now();

    let impseek = match Impseek::from_cli(&cli) {
        Ok(impseek) => impseek,
        Err(e) => {
            print_startup_error(&e);
            print_help();
            return 1;
        }
    };

    match impseek.find_imports(cli.package_name()).await {
        Ok(report) => {
            let formatter = impseek.output_formatter();
            formatter.print_import_report(&report);

            if impseek.config().output.show_time {
                formatter.print_elapsed(start_time.elapsed());
            }
            0
        }
        Err(e) => {
            impseek.handle_error(&e);
            print_help();
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "impseek.toml".to_string());

    match Impseek::generate_sample_config(&config_path) {
        Ok(()) => {
            eprintln!("Generated sample configuration file: {}", config_path);
            eprintln!("\nimpseek picks up impseek.toml from the scanned directory automatically,");
            eprintln!("or pass it explicitly: impseek --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &ImpseekError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

fn print_help() {
    eprintln!();
    eprintln!("{}", Cli::command().render_help());
}

fn setup_logging(verbosity: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("impseek={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
