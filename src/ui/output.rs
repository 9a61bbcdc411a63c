use crate::error::{ImpseekError, UserFriendlyError};
use crate::ImportReport;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");

/// Writes the import list to stdout and everything else to stderr.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported(),
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled && self.mode == OutputMode::Human;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    eprintln!("{}{}", CROSS, style(message).red().bold());
                } else {
                    eprintln!("✗ {}", message);
                }
            }
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.should_show_message(0) {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    eprintln!("{}{}", WARNING, style(message).yellow().bold());
                } else {
                    eprintln!("! {}", message);
                }
            }
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => eprintln!("WARNING: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if !self.should_show_message(1) {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    eprintln!("{}{}", INFO, style(message).cyan());
                } else {
                    eprintln!("i {}", message);
                }
            }
            OutputMode::Json => self.print_json_message("info", message),
            OutputMode::Plain => eprintln!("INFO: {}", message),
        }
    }

    pub fn print_user_friendly_error(&self, error: &ImpseekError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    /// Prints the result line. Quiet mode never suppresses it.
    pub fn print_import_report(&self, report: &ImportReport) {
        println!("{}", self.render_import_report(report));
    }

    pub fn render_import_report(&self, report: &ImportReport) -> String {
        match self.mode {
            OutputMode::Human if self.use_colors => {
                style(report.imports.render()).cyan().to_string()
            }
            OutputMode::Human | OutputMode::Plain => report.imports.render(),
            OutputMode::Json => {
                let summary = serde_json::json!({
                    "imports": report.imports.iter().collect::<Vec<_>>(),
                    "files_scanned": report.files_scanned,
                    "files_failed": report.files_failed,
                    "duration_ms": report.elapsed.as_millis() as u64,
                });
                serde_json::to_string(&summary).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }

    /// Prints `time: <duration>` on stderr. JSON mode carries the duration in
    /// the report instead.
    pub fn print_elapsed(&self, elapsed: Duration) {
        match self.mode {
            OutputMode::Human if self.use_colors => {
                eprintln!("{}: {}", style("time").green(), format_duration(elapsed));
            }
            OutputMode::Human | OutputMode::Plain => {
                eprintln!("time: {}", format_duration(elapsed));
            }
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        eprintln!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{:.3}s", duration.as_secs_f64())
    } else {
        format!("{:.3}ms", duration.as_secs_f64() * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::ImportSet;

    fn report(symbols: &[&str]) -> ImportReport {
        ImportReport {
            imports: symbols.iter().map(|s| s.to_string()).collect::<ImportSet>(),
            files_scanned: 2,
            files_failed: 1,
            errors: vec!["Could not read b.ts: gone".to_string()],
            elapsed: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(!formatter.should_show_message(0));
    }

    #[test]
    fn test_warnings_show_by_default() {
        let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
        assert!(formatter.should_show_message(0));
        assert!(!formatter.should_show_message(1));
    }

    #[test]
    fn test_colors_only_in_human_mode() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false).with_colors(true);
        assert!(!formatter.uses_colors());

        let formatter = OutputFormatter::new(OutputMode::Human, 0, false).with_colors(false);
        assert!(!formatter.uses_colors());
    }

    #[test]
    fn test_plain_report_is_comma_joined() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        assert_eq!(formatter.render_import_report(&report(&["a", "b"])), "a,b");
        assert_eq!(formatter.render_import_report(&report(&[])), "");
    }

    #[test]
    fn test_json_report() {
        let formatter = OutputFormatter::new(OutputMode::Json, 0, false);
        let rendered = formatter.render_import_report(&report(&["a", "b"]));
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["imports"], serde_json::json!(["a", "b"]));
        assert_eq!(value["files_scanned"], 2);
        assert_eq!(value["files_failed"], 1);
        assert_eq!(value["duration_ms"], 12);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
        assert_eq!(format_duration(Duration::from_micros(2500)), "2.500ms");
        assert_eq!(format_duration(Duration::ZERO), "0.000ms");
    }
}
