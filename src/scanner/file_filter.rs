use crate::config::ScanConfig;
use crate::error::{ImpseekError, Result};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Include and ignore rules, matched against paths relative to the scan root.
pub struct FileFilter {
    pattern: String,
    include: GlobSet,
    ignore_files: GlobSet,
    ignore_dirs: GlobSet,
}

impl FileFilter {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let case_insensitive = config.case_insensitive;
        let include = build_globset(std::slice::from_ref(&config.pattern), case_insensitive)?;
        let ignore_files = build_globset(&config.ignore, case_insensitive)?;

        // `**/target/**` prunes the `target` directory itself.
        let dir_patterns: Vec<String> = config
            .ignore
            .iter()
            .filter_map(|p| p.strip_suffix("/**"))
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        let ignore_dirs = build_globset(&dir_patterns, case_insensitive)?;

        Ok(Self {
            pattern: config.pattern.clone(),
            include,
            ignore_files,
            ignore_dirs,
        })
    }

    pub fn is_source_file(&self, relative_path: &Path) -> bool {
        self.include.is_match(relative_path) && !self.is_ignored(relative_path)
    }

    pub fn is_ignored(&self, relative_path: &Path) -> bool {
        self.ignore_files.is_match(relative_path)
    }

    pub fn should_traverse_directory(&self, relative_path: &Path) -> bool {
        !self.ignore_dirs.is_match(relative_path)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn build_globset(patterns: &[String], case_insensitive: bool) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern, case_insensitive)?);
    }
    builder.build().map_err(|source| ImpseekError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

fn compile_glob(pattern: &str, case_insensitive: bool) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .literal_separator(true)
        .build()
        .map_err(|source| ImpseekError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}
