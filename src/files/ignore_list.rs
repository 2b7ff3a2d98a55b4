//! Line-delimited ignore list (one entry per line)

/// Parsed ignore list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList {
    lines: Vec<String>,
    trailing_newline: bool,
    line_ending: &'static str,
}

impl IgnoreList {
    pub fn parse(contents: &str) -> Self {
        Self {
            lines: contents.lines().map(str::to_string).collect(),
            trailing_newline: contents.ends_with('\n'),
            line_ending: if contents.contains("\r\n") { "\r\n" } else { "\n" },
        }
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.iter().any(|existing| existing == line)
    }

    /// Remove every line exactly equal to `line`
    ///
    /// Returns `false` if there was nothing to remove.
    pub fn remove(&mut self, line: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|existing| existing != line);
        self.lines.len() != before
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join(self.line_ending);
        if self.trailing_newline && !out.is_empty() {
            out.push_str(self.line_ending);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remove_exact_line_only() {
        let mut list = IgnoreList::parse("@atlaskit/avatar\n@atlaskit/button\n@atlaskit/button-group\n");

        assert!(list.remove("@atlaskit/button"));
        assert_eq!(list.render(), "@atlaskit/avatar\n@atlaskit/button-group\n");
    }

    #[test]
    fn test_remove_absent_line_is_noop() {
        let text = "@atlaskit/avatar\n";
        let mut list = IgnoreList::parse(text);

        assert!(!list.remove("@atlaskit/button"));
        assert_eq!(list.render(), text);
    }

    #[test]
    fn test_no_trailing_newline_preserved() {
        let mut list = IgnoreList::parse("a\nb");
        list.remove("a");
        assert_eq!(list.render(), "b");
    }

    #[test]
    fn test_crlf_lines() {
        let mut list = IgnoreList::parse("a\r\nb\r\n");
        assert!(list.contains("a"));
        assert!(list.remove("a"));
        assert_eq!(list.lines(), &["b".to_string()]);
    }

    #[test]
    fn test_crlf_preserved_on_render() {
        let mut list = IgnoreList::parse("a\r\nb\r\nc\r\n");
        assert!(list.remove("b"));
        assert_eq!(list.render(), "a\r\nc\r\n");
    }
}
