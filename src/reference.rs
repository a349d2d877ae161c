use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// `## Title Words` with two or more hashes. Titles containing punctuation
/// such as `:` or backticks do not produce an anchor.
static HEADING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{2,}[ \t]+([\w-][\w \t-]*?)[ \t]*\r?$").unwrap());

/// `[label](path#fragment)` where both path and fragment are optional.
static REFERENCE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\[\]]+\]\(([./\w-]+)?(?:#([\w-]+))?\)").unwrap());

/// An outbound link found in a markdown document.
///
/// `target` is already resolved against the directory of the document the
/// link was written in, so it can be checked without further context. It is
/// kept as written; use [`normalize_path`] to compare it with other paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub target: PathBuf,
    pub anchor: Option<String>,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(anchor) => write!(f, "{}#{}", self.target.display(), anchor),
            None => write!(f, "{}", self.target.display()),
        }
    }
}

/// Headings and references extracted from a single document.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    pub heading_anchors: HashSet<String>,
    pub references: Vec<Reference>,
}

impl DocumentIndex {
    pub fn has_anchor(&self, anchor: &str) -> bool {
        self.heading_anchors.contains(anchor)
    }
}

/// Converts heading text into its link anchor: `Foo  Bar` becomes `foo-bar`.
pub fn anchor_from_heading(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Indexes markdown `content` that was read from `path`.
///
/// Relative link targets are joined with the parent directory of `path`. A
/// link with only a `#fragment` refers back to `path` itself.
pub fn index_document(path: &Path, content: &str) -> DocumentIndex {
    let heading_anchors = HEADING_REGEX
        .captures_iter(content)
        .map(|caps| anchor_from_heading(&caps[1]))
        .collect();

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let references = REFERENCE_REGEX
        .captures_iter(content)
        .filter_map(|caps| {
            let link_path = caps.get(1).map(|m| m.as_str());
            let anchor = caps.get(2).map(|m| m.as_str().to_string());

            let target = match link_path {
                Some(link_path) => base_dir.join(link_path),
                None if anchor.is_some() => path.to_path_buf(),
                // `[label]()` names nothing
                None => return None,
            };

            Some(Reference { target, anchor })
        })
        .collect();

    DocumentIndex {
        heading_anchors,
        references,
    }
}

/// Reads and indexes the markdown file at `path`.
pub fn index_file(path: &Path) -> Result<DocumentIndex> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let index = index_document(path, &content);

    log::debug!(
        "Indexed {}: {} heading(s), {} reference(s)",
        path.display(),
        index.heading_anchors.len(),
        index.references.len()
    );

    Ok(index)
}

/// Lexically normalizes a path so equivalent spellings compare equal.
///
/// `.` components are dropped and `dir/..` pairs collapse. Leading `..`
/// components that cannot be collapsed are kept. The filesystem is not
/// consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
