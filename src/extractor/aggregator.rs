use crate::error::{ImpseekError, Result, UserFriendlyError};
use crate::extractor::parser::extract_imports;
use indexmap::IndexSet;
use indicatif::ProgressBar;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

/// Distinct import symbols across every file of a run.
///
/// Members keep the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    symbols: IndexSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the symbol was already present.
    pub fn insert<S: Into<String>>(&mut self, symbol: S) -> bool {
        self.symbols.insert(symbol.into())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Joins the members with `,`. Commas inside a symbol are not escaped.
    pub fn render(&self) -> String {
        self.iter().collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for ImportSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Extend<String> for ImportSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.symbols.extend(iter);
    }
}

impl FromIterator<String> for ImportSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[derive(Debug, Default)]
pub struct CollectionReport {
    pub imports: ImportSet,
    pub files_read: usize,
    pub errors: Vec<String>,
}

impl CollectionReport {
    pub fn files_failed(&self) -> usize {
        self.errors.len()
    }
}

/// Reads files concurrently and merges the imports they declare.
pub struct ImportCollector {
    package_name: Option<String>,
    progress: Option<ProgressBar>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self {
            package_name: None,
            progress: None,
        }
    }

    pub fn with_package_name<S: Into<String>>(mut self, package_name: Option<S>) -> Self {
        self.package_name = package_name.map(Into::into).filter(|name| !name.is_empty());
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Runs one read-and-extract task per path and joins them all.
    ///
    /// Paths are resolved against `base_dir`. A file that cannot be read is
    /// logged and contributes nothing; the other files are unaffected.
    pub async fn collect(&self, base_dir: &Path, file_paths: &[PathBuf]) -> CollectionReport {
        let tasks: Vec<(PathBuf, JoinHandle<Result<Vec<String>>>)> = file_paths
            .iter()
            .map(|relative| {
                let path = base_dir.join(relative);
                let package_name = self.package_name.clone();
                let progress = self.progress.clone();
                let handle = tokio::spawn(async move {
                    let result = read_and_extract(path, package_name.as_deref()).await;
                    if let Some(pb) = progress {
                        pb.inc(1);
                    }
                    result
                });
                (relative.clone(), handle)
            })
            .collect();

        let mut report = CollectionReport::default();

        for (relative, handle) in tasks {
            match join_extraction(&relative, handle).await {
                Ok(symbols) => {
                    tracing::debug!(
                        file = %relative.display(),
                        symbols = symbols.len(),
                        "extracted imports"
                    );
                    report.files_read += 1;
                    report.imports.extend(symbols);
                }
                Err(e) => {
                    tracing::error!(file = %relative.display(), error = %e.user_message(), "skipping file");
                    report.errors.push(e.user_message());
                }
            }
        }

        report
    }
}

impl Default for ImportCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// A panicked or cancelled task counts as a failed file.
async fn join_extraction(
    relative: &Path,
    handle: JoinHandle<Result<Vec<String>>>,
) -> Result<Vec<String>> {
    handle.await.unwrap_or_else(|e| {
        Err(ImpseekError::TaskFailed {
            path: relative.display().to_string(),
            message: e.to_string(),
        })
    })
}

async fn read_and_extract(path: PathBuf, package_name: Option<&str>) -> Result<Vec<String>> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| ImpseekError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

    // Invalid UTF-8 is replaced rather than failing the file.
    let text = String::from_utf8_lossy(&bytes);
    Ok(extract_imports(&text, package_name))
}

/// Collects the imports of `file_paths` and renders them comma-joined.
pub async fn collect_imports(
    base_dir: &Path,
    file_paths: &[PathBuf],
    package_name: Option<&str>,
) -> String {
    ImportCollector::new()
        .with_package_name(package_name)
        .collect(base_dir, file_paths)
        .await
        .imports
        .render()
}
