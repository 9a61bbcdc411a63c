//! Line-oriented import extraction.
//!
//! This is a text scanner, not a parser in the grammar sense: it looks at one
//! line at a time, keeps a small amount of state between lines, and collects
//! fragments of text believed to hold comma-separated import symbols.

use crate::extractor::lines::split_lines;
use crate::extractor::matcher::matches_package;

pub const IMPORT_KEYWORD: &str = "import";

/// A chunk of text pending conversion into import symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A whole import line that matched the package filter. The symbol list
    /// is cut out of it and its braces removed before splitting.
    Captured(String),
    /// Accumulated text flushed by a non-import line that matched the filter.
    /// Split as is, braces and keywords included.
    Raw(String),
}

impl Fragment {
    pub fn normalize(&self) -> String {
        match self {
            Fragment::Captured(line) => {
                let clause = capture_import_clause(line).unwrap_or("");
                remove_braces(clause)
            }
            Fragment::Raw(text) => text.clone(),
        }
    }

    pub fn symbols(&self) -> Vec<String> {
        self.normalize()
            .split(',')
            .map(|part| trim_symbol(part).to_string())
            .collect()
    }
}

/// Scanner state threaded through the lines of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanState {
    buffer: String,
    continuation: bool,
    fragments: Vec<Fragment>,
}

impl Default for ScanState {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            continuation: true,
            fragments: Vec::new(),
        }
    }
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line to the scanner.
    ///
    /// At most one non-import line is appended to the buffer per
    /// continuation cycle, so statements whose symbols span three or more
    /// lines come out truncated. That limit is kept as is.
    pub fn step(mut self, line: &str, package_name: Option<&str>) -> Self {
        if line.contains(IMPORT_KEYWORD) {
            self.continuation = true;
            if matches_package(line, package_name) {
                self.fragments.push(Fragment::Captured(line.to_string()));
                self.continuation = false;
            } else {
                self.buffer.push_str(line);
            }
            return self;
        }

        if matches_package(line, package_name) {
            self.fragments
                .push(Fragment::Raw(std::mem::take(&mut self.buffer)));
            self.continuation = false;
        }

        // Unflushed import text that never matched is stale by now.
        if self.buffer.contains(IMPORT_KEYWORD) {
            self.buffer.clear();
        }

        if self.continuation {
            self.buffer.push_str(line);
            self.continuation = false;
        }

        self
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_continuing(&self) -> bool {
        self.continuation
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }
}

pub fn scan_fragments(text: &str, package_name: Option<&str>) -> Vec<Fragment> {
    split_lines(text)
        .into_iter()
        .fold(ScanState::new(), |state, line| state.step(line, package_name))
        .into_fragments()
}

/// Extracts the imported symbol names from one file's text, in source order.
///
/// Symbols are trimmed but otherwise unvalidated; malformed statements can
/// produce empty strings or odd fragments instead of an error.
pub fn extract_imports(text: &str, package_name: Option<&str>) -> Vec<String> {
    scan_fragments(text, package_name)
        .iter()
        .flat_map(Fragment::symbols)
        .collect()
}

/// Cuts the symbol list out of an import line.
///
/// The clause starts right after `import`, one whitespace character and an
/// optional `{`, at the leftmost such position. It ends at the last point on
/// the line followed by an optional `}`, one whitespace character and `from`.
/// The clause never crosses a line terminator.
fn capture_import_clause(line: &str) -> Option<&str> {
    for start in clause_starts(line) {
        let limit = line[start..]
            .find(is_line_terminator)
            .map_or(line.len(), |offset| start + offset);

        let ends = std::iter::once(limit)
            .chain(line[start..limit].char_indices().rev().map(|(i, _)| start + i));

        for end in ends {
            if clause_ends_at(&line[end..]) {
                return Some(&line[start..end]);
            }
        }
    }

    None
}

fn clause_starts(line: &str) -> Vec<usize> {
    let mut starts = Vec::new();

    for (idx, keyword) in line.match_indices(IMPORT_KEYWORD) {
        let after = idx + keyword.len();
        let Some(space) = line[after..].chars().next().filter(|c| is_space(*c)) else {
            continue;
        };

        let open = after + space.len_utf8();
        starts.push(open);
        if line[open..].starts_with('{') {
            starts.push(open + 1);
        }
    }

    starts
}

fn clause_ends_at(rest: &str) -> bool {
    let rest = rest.strip_prefix('}').unwrap_or(rest);
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if is_space(c) => chars.as_str().starts_with("from"),
        _ => false,
    }
}

/// Drops the first `{` and the first `}`.
fn remove_braces(clause: &str) -> String {
    clause.replacen('{', "", 1).replacen('}', "", 1)
}

fn trim_symbol(part: &str) -> &str {
    part.trim_matches(is_space)
}

// Byte-order marks count as whitespace; NEL does not.
fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_named_imports() {
        let text = "import {foo, bar} from 'pkg'\nconst x = 1";
        assert_eq!(extract_imports(text, None), vec!["foo", "bar"]);
    }

    #[test]
    fn test_default_and_mixed_imports() {
        assert_eq!(extract_imports("import fg from 'fast-glob'", None), vec!["fg"]);
        assert_eq!(
            extract_imports("import c, {a, b} from 'x'", None),
            vec!["c", "a", "b"]
        );
        assert_eq!(
            extract_imports("import * as path from 'path'", None),
            vec!["* as path"]
        );
    }

    #[test]
    fn test_braces_without_inner_spaces() {
        assert_eq!(
            extract_imports("import {resolve} from 'path'", None),
            vec!["resolve"]
        );
        assert_eq!(
            extract_imports("import { a , b } from 'x'", None),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_many_statements_in_order() {
        let text = "import {a, b} from 'one'\nimport {c} from 'two'\n\nimport {a} from 'three'\n";
        assert_eq!(extract_imports(text, None), vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn test_no_imports_yields_nothing() {
        assert!(extract_imports("const x = 1\nlet y = 2\n", None).is_empty());
        assert!(extract_imports("", None).is_empty());
    }

    #[test]
    fn test_crlf_file() {
        let text = "import {a} from 'x'\r\nimport {b} from 'y'\r\n";
        assert_eq!(extract_imports(text, None), vec!["a", "b"]);
    }

    #[test]
    fn test_package_filter_uses_suffix() {
        let text = "import {map} from 'lodash'\n\
                    import {get} from 'lodash';\n\
                    import {useState} from 'react'\n";
        assert_eq!(extract_imports(text, Some("'lodash'")), vec!["map"]);
        assert_eq!(extract_imports(text, Some("'react'")), vec!["useState"]);
        assert!(extract_imports(text, Some("'vue'")).is_empty());
    }

    #[test]
    fn test_double_quoted_import_is_ignored_without_filter() {
        assert!(extract_imports("import {a} from \"x\"", None).is_empty());
    }

    #[test]
    fn test_three_line_import_is_truncated() {
        let text = "import {\n  a,\n  b\n} from 'pkg'";
        assert_eq!(extract_imports(text, None), vec!["a", ""]);
    }

    #[test]
    fn test_raw_fragment_keeps_braces_and_keyword() {
        let text = "import {a,\n  b} from 'pkg'";
        assert_eq!(
            scan_fragments(text, None),
            vec![Fragment::Raw("import {a,".to_string())]
        );
        assert_eq!(extract_imports(text, None), vec!["import {a", ""]);
    }

    #[test]
    fn test_leading_context_line_is_flushed() {
        let text = "// header\n} from 'x'";
        assert_eq!(extract_imports(text, None), vec!["// header"]);
    }

    #[test]
    fn test_flush_of_empty_buffer_yields_empty_symbol() {
        let text = "import {a} from 'x'\nexport {b} from 'y'";
        assert_eq!(extract_imports(text, None), vec!["a", ""]);
    }

    #[test]
    fn test_unmatched_clause_degrades_to_empty_symbol() {
        assert_eq!(extract_imports("import{a}from 'x'", Some("'x'")), vec![""]);
    }

    #[test]
    fn test_symbol_trim_keeps_next_line_char() {
        let text = "import {\u{85}a\u{85}, \u{feff}b} from 'x'";
        assert_eq!(extract_imports(text, None), vec!["\u{85}a\u{85}", "b"]);
    }

    #[test]
    fn test_greedy_clause_runs_to_last_from() {
        let text = "import {a} from 'x'; import {b} from 'y'";
        assert_eq!(
            extract_imports(text, None),
            vec!["a from 'x'; import {b}"]
        );
    }

    #[test]
    fn test_state_after_each_step() {
        let state = ScanState::new();
        assert!(state.is_continuing());

        let state = state.step("import {", None);
        assert_eq!(state.buffer(), "import {");
        assert!(state.is_continuing());

        let state = state.step("  a,", None);
        assert_eq!(state.buffer(), "  a,");
        assert!(!state.is_continuing());

        let state = state.step("  b", None);
        assert_eq!(state.buffer(), "  a,");

        let state = state.step("} from 'pkg'", None);
        assert_eq!(state.buffer(), "");
        assert_eq!(state.fragments(), &[Fragment::Raw("  a,".to_string())]);
    }

    #[test]
    fn test_captured_fragment_normalization() {
        let fragment = Fragment::Captured("import {foo, bar} from 'pkg'".to_string());
        assert_eq!(fragment.normalize(), "foo, bar");

        let fragment = Fragment::Raw("{foo, bar}".to_string());
        assert_eq!(fragment.normalize(), "{foo, bar}");
    }

    #[test]
    fn test_stray_carriage_return_in_lf_file() {
        // No CRLF anywhere, so the `\r` stays on the line.
        let text = "const z = 1\nimport {a} from 'x'\r";
        assert_eq!(extract_imports(text, None), vec!["a"]);
        assert!(extract_imports(text, Some("'x'")).is_empty());

        // The clause cannot cross it either.
        assert_eq!(extract_imports("import {a}\r from 'x'", None), vec![""]);
    }
}
