use regex::Regex;
use std::sync::LazyLock;

// The quoted path never crosses a line terminator, stray `\r` included.
static ANY_PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"from '[^\n\r\x{2028}\x{2029}]*'").expect("static pattern compiles")
});

/// Decides whether `line` belongs to the requested package.
///
/// Without a filter any line containing `from '...'` matches. With a filter
/// the line must end with the filter text exactly, so `from 'lodash';` does
/// not match the filter `'lodash'`.
pub fn matches_package(line: &str, package_name: Option<&str>) -> bool {
    match package_name {
        Some(name) if !name.is_empty() => line.ends_with(name),
        _ => ANY_PACKAGE.is_match(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_package_matches_quoted_from() {
        assert!(matches_package("import {a} from 'x'", None));
        assert!(matches_package("} from 'x';", None));
        assert!(matches_package("  from '' ", None));
    }

    #[test]
    fn test_any_package_rejects_double_quotes_and_bare_from() {
        assert!(!matches_package("import {a} from \"x\"", None));
        assert!(!matches_package("const from = 'x'", None));
        assert!(!matches_package("import 'side-effect'", None));
    }

    #[test]
    fn test_filter_is_a_suffix_test() {
        assert!(matches_package("import {map} from 'lodash'", Some("'lodash'")));
        assert!(!matches_package("import {map} from 'lodash';", Some("'lodash'")));
        assert!(!matches_package("import {map} from 'lodash/fp'", Some("'lodash'")));
        // Anything ending in the text counts, even outside an import.
        assert!(matches_package("const name = 'lodash'", Some("'lodash'")));
    }

    #[test]
    fn test_filter_without_quotes() {
        assert!(matches_package("import {a} from 'react'", Some("react'")));
        assert!(!matches_package("import {a} from 'react'", Some("react")));
    }

    #[test]
    fn test_empty_filter_means_no_filter() {
        assert!(matches_package("import {a} from 'x'", Some("")));
        assert!(!matches_package("let a = 1", Some("")));
    }
}
