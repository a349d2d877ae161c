use crate::config::ExampleConfig;
use once_cell::sync::Lazy;
use regex::Regex;

/// An opening fence with its tag glued to the backticks, the body, and a
/// closing fence on a line of its own. The body group is lazy and absent
/// for an empty block, so a block never swallows the next one.
static CODE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^```([^\s`]+)[ \t]*\r?\n(?:((?s:.*?))\r?\n)??```[ \t]*\r?$").unwrap()
});

/// A fenced code block extracted from markdown.
///
/// ````markdown
/// ```c++
/// #include <vector>
/// std::vector<int> v;
/// ```
/// ````
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// The tag from the fence marker (e.g., "c++", "python")
    pub language: String,
    /// The lines between the fences
    pub lines: Vec<String>,
}

/// Lines of all matching code blocks, split by where they belong in the
/// assembled program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleLines {
    /// Lines rendered before the entry point, unchanged
    pub directive_lines: Vec<String>,
    /// Lines rendered inside the entry point, already indented
    pub statement_lines: Vec<String>,
}

/// Extracts every tagged fenced code block from markdown `content`, in
/// document order.
///
/// Untagged fences are not considered code samples and are skipped.
pub fn extract_code_blocks(content: &str) -> Vec<CodeBlock> {
    CODE_BLOCK_REGEX
        .captures_iter(content)
        .map(|caps| CodeBlock {
            language: caps[1].to_string(),
            lines: caps
                .get(2)
                .map(|body| {
                    body.as_str()
                        .split('\n')
                        .map(|line| line.trim_end_matches('\r').to_string())
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

/// Collects the lines of every block tagged with one of the configured
/// fence markers and sorts them into directives and statements.
///
/// A line is a directive when it starts with the directive marker. Other
/// lines, blank ones included, are statements and get the indent prefix.
pub fn extract_example(content: &str, config: &ExampleConfig) -> ExampleLines {
    let mut example = ExampleLines::default();

    for block in extract_code_blocks(content) {
        if !config.matches_fence(&block.language) {
            log::debug!("Skipping {} block", block.language);
            continue;
        }

        for line in block.lines {
            if line.starts_with(config.directive_marker.as_str()) {
                example.directive_lines.push(line);
            } else {
                example
                    .statement_lines
                    .push(format!("{}{}", config.indent, line));
            }
        }
    }

    log::debug!(
        "Extracted {} directive line(s) and {} statement line(s)",
        example.directive_lines.len(),
        example.statement_lines.len()
    );

    example
}
