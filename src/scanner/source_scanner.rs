use crate::config::ScanConfig;
use crate::error::{ImpseekError, Result};
use crate::scanner::file_filter::FileFilter;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub extension: String,
    pub size: u64,
}

impl SourceFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        let extension = source_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Self {
            source_path,
            relative_path,
            extension,
            size,
        }
    }
}

/// Finds the files a run reads.
pub struct SourceScanner {
    filter: FileFilter,
    max_depth: Option<usize>,
    follow_links: bool,
}

impl SourceScanner {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            filter: FileFilter::new(config)?,
            max_depth: config.max_depth,
            follow_links: config.follow_links,
        })
    }

    /// Walks `root` and returns every matching file, sorted by relative path.
    ///
    /// Any error while walking the tree aborts the scan. An empty result is
    /// not an error.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(ImpseekError::InvalidPath {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(ImpseekError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut walker = WalkDir::new(root_path).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files = Vec::new();

        for entry in walker
            .into_iter()
            .filter_entry(|e| self.should_traverse(e, root_path))
        {
            let entry = entry?;

            if entry.file_type().is_file() {
                if let Some(file) = self.process_file(&entry, root_path)? {
                    files.push(file);
                }
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        tracing::debug!(
            root = %root_path.display(),
            pattern = self.filter.pattern(),
            files = files.len(),
            "discovery finished"
        );

        Ok(files)
    }

    fn should_traverse(&self, entry: &DirEntry, root_path: &Path) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        match entry.path().strip_prefix(root_path) {
            Ok(relative) => self.filter.should_traverse_directory(relative),
            Err(_) => true,
        }
    }

    fn process_file(&self, entry: &DirEntry, root_path: &Path) -> Result<Option<SourceFile>> {
        let path = entry.path();
        let relative_path = calculate_relative_path(path, root_path)?;

        if !self.filter.is_source_file(&relative_path) {
            return Ok(None);
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Some(SourceFile::new(path.to_path_buf(), relative_path, size)))
    }

    pub fn get_statistics(&self, files: &[SourceFile]) -> ScanStatistics {
        let mut files_by_extension = HashMap::new();
        for file in files {
            let ext = if file.extension.is_empty() {
                "no_extension".to_string()
            } else {
                file.extension.clone()
            };
            *files_by_extension.entry(ext).or_insert(0) += 1;
        }

        ScanStatistics {
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            files_by_extension,
        }
    }
}

fn calculate_relative_path(file_path: &Path, root_path: &Path) -> Result<PathBuf> {
    let relative = file_path
        .strip_prefix(root_path)
        .map_err(|_| ImpseekError::InvalidPath {
            path: format!(
                "Cannot calculate relative path for {} from root {}",
                file_path.display(),
                root_path.display()
            ),
        })?;

    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(ImpseekError::InvalidPath {
            path: format!(
                "Path contains parent directory references: {}",
                relative.display()
            ),
        });
    }

    Ok(relative.to_path_buf())
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub files_by_extension: HashMap<String, usize>,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan results: {} files, {}",
            self.total_files,
            format_bytes(self.total_size)
        );

        let mut extensions: Vec<_> = self.files_by_extension.iter().collect();
        extensions.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (ext, count) in extensions {
            summary.push_str(&format!(", {}: {}", ext, count));
        }

        summary
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
