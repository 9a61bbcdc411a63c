/// Splits file text into lines.
///
/// The separator is chosen once for the whole text: `\r\n` if that sequence
/// appears anywhere, `\n` otherwise. Lines are not trimmed, so a file with
/// mixed endings keeps stray `\r` characters on its LF-terminated lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.contains("\r\n") {
        text.split("\r\n").collect()
    } else {
        text.split('\n').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lf_split() {
        assert_eq!(split_lines("a\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_crlf_split() {
        assert_eq!(split_lines("a\r\nb\r\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_mixed_endings_use_crlf_everywhere() {
        // The lone LF does not split once CRLF is present.
        assert_eq!(split_lines("a\r\nb\nc"), vec!["a", "b\nc"]);
    }

    #[test]
    fn test_stray_carriage_return_is_kept() {
        assert_eq!(split_lines("a\rb\nc\r"), vec!["a\rb", "c\r"]);
    }

    #[test]
    fn test_trailing_newline_and_empty_text() {
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }
}
