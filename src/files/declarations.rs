//! Flow declaration index
//!
//! The index is a generated file made of a comment header followed by
//! `declare module '<name>' { ... }` blocks:
//!
//! ```text
//! // @flow
//! // Generated, keep sorted
//!
//! declare module '@atlaskit/avatar' {
//!   declare module.exports: any;
//! }
//!
//! declare module '@atlaskit/button' {
//!   declare module.exports: any;
//! }
//! ```
//!
//! Blocks are stored as the text following their `declare` keyword and are
//! kept sorted as plain strings. The header is never sorted.

/// Separator between the header and each block
const DELIMITER: &str = "\ndeclare";

/// Keyword that starts a block
const KEYWORD: &str = "declare";

/// Every block fragment starts with this after the keyword
const BLOCK_START: &str = " module";

/// Parsed declaration index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationIndex {
    header: String,
    blocks: Vec<String>,
}

/// The `any`-typed block that makes Flow ignore a package
pub fn ignore_block(package_name: &str) -> String {
    format!(" module '{}' {{\n  declare module.exports: any;\n}}\n", package_name)
}

impl DeclarationIndex {
    /// Parse index text into header and blocks
    ///
    /// Fragments that do not start with ` module` belong to the header.
    pub fn parse(contents: &str) -> Self {
        let mut header_parts: Vec<&str> = Vec::new();
        let mut blocks = Vec::new();

        for (i, fragment) in contents.split(DELIMITER).enumerate() {
            // A file with no header starts directly with a block
            if i == 0 {
                if let Some(rest) = fragment.strip_prefix(KEYWORD) {
                    if rest.starts_with(BLOCK_START) {
                        blocks.push(rest.to_string());
                        continue;
                    }
                }
            }

            if fragment.starts_with(BLOCK_START) {
                blocks.push(fragment.to_string());
            } else {
                header_parts.push(fragment);
            }
        }

        Self {
            header: header_parts.join(DELIMITER),
            blocks,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Whether an equal block is already declared
    ///
    /// Trailing blank lines after a block do not make it a different block.
    pub fn contains(&self, block: &str) -> bool {
        let block = block.trim_end();
        self.blocks
            .iter()
            .any(|existing| existing.trim_end() == block)
    }

    /// Insert a block and re-sort
    ///
    /// Returns `false` without touching anything if an equal block exists.
    pub fn insert(&mut self, block: String) -> bool {
        if self.contains(&block) {
            return false;
        }
        self.blocks.push(block);
        self.blocks.sort();
        true
    }

    /// Serialize back to file text
    pub fn render(&self) -> String {
        let mut out = self.header.clone();
        for block in &self.blocks {
            out.push_str(DELIMITER);
            out.push_str(block);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "// @flow\n// Generated file\n";

    fn file_with(names: &[&str]) -> String {
        let mut index = DeclarationIndex::parse(HEADER);
        for name in names {
            index.insert(ignore_block(name));
        }
        index.render()
    }

    #[test]
    fn test_parse_header_and_blocks() {
        let text = format!(
            "{}\ndeclare{}\ndeclare{}",
            HEADER,
            ignore_block("@atlaskit/avatar"),
            ignore_block("@atlaskit/button")
        );
        let index = DeclarationIndex::parse(&text);

        assert_eq!(index.header(), HEADER);
        assert_eq!(index.blocks().len(), 2);
        assert!(index.contains(&ignore_block("@atlaskit/button")));
        assert_eq!(index.render(), text);
    }

    #[test]
    fn test_nested_declare_is_not_a_delimiter() {
        // The body's "  declare module.exports" is indented, so it stays in the block
        let index = DeclarationIndex::parse(&file_with(&["@atlaskit/avatar"]));
        assert_eq!(index.blocks(), &[ignore_block("@atlaskit/avatar")]);
    }

    #[test]
    fn test_insert_sorts_blocks() {
        let text = file_with(&["@atlaskit/tooltip", "@atlaskit/avatar", "@atlaskit/button"]);
        let index = DeclarationIndex::parse(&text);

        let mut sorted = index.blocks().to_vec();
        sorted.sort();
        assert_eq!(index.blocks(), sorted.as_slice());
        assert!(index.blocks()[0].contains("@atlaskit/avatar"));
        assert!(index.blocks()[2].contains("@atlaskit/tooltip"));
    }

    #[test]
    fn test_insert_twice_is_identical() {
        let once = file_with(&["@atlaskit/button"]);

        let mut index = DeclarationIndex::parse(&once);
        assert!(!index.insert(ignore_block("@atlaskit/button")));
        assert_eq!(index.render(), once);
    }

    #[test]
    fn test_existing_block_followed_by_blank_lines() {
        let text = format!(
            "// @flow\n\ndeclare{}\n\ndeclare{}",
            ignore_block("a"),
            ignore_block("b")
        );
        let mut index = DeclarationIndex::parse(&text);

        assert!(index.contains(&ignore_block("a")));
        assert!(!index.insert(ignore_block("a")));
        assert_eq!(index.blocks().len(), 2);
        assert_eq!(index.render().matches("module 'a'").count(), 1);
        assert_eq!(index.render(), text);
    }

    #[test]
    fn test_render_layout() {
        let text = file_with(&["b", "a"]);
        assert_eq!(
            text,
            "// @flow\n// Generated file\n\
             \ndeclare module 'a' {\n  declare module.exports: any;\n}\n\
             \ndeclare module 'b' {\n  declare module.exports: any;\n}\n"
        );
    }

    #[test]
    fn test_file_without_header() {
        let text = format!("declare{}", ignore_block("z"));
        let mut index = DeclarationIndex::parse(&text);
        assert_eq!(index.header(), "");
        assert_eq!(index.blocks().len(), 1);

        index.insert(ignore_block("a"));
        let rendered = index.render();
        let reparsed = DeclarationIndex::parse(&rendered);
        assert_eq!(reparsed, index);
    }

    #[test]
    fn test_other_declarations_stay_in_header() {
        let text = format!(
            "// @flow\ndeclare var __DEV__: boolean;\n\ndeclare{}",
            ignore_block("pkg")
        );
        let index = DeclarationIndex::parse(&text);

        assert_eq!(index.header(), "// @flow\ndeclare var __DEV__: boolean;\n");
        assert_eq!(index.blocks().len(), 1);
        assert_eq!(index.render(), text);
    }

    #[test]
    fn test_empty_file() {
        let mut index = DeclarationIndex::parse("");
        assert!(index.blocks().is_empty());
        index.insert(ignore_block("pkg"));
        assert_eq!(
            index.render(),
            "\ndeclare module 'pkg' {\n  declare module.exports: any;\n}\n"
        );
    }
}
