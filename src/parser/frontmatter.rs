//! Frontmatter extraction: a YAML block delimited by `---` lines at the
//! very top of the document.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::parser::error::ParseError;

/// Presentation metadata from the frontmatter block.
///
/// The named fields are a loose contract with downstream renderers;
/// anything else the author writes passes through `extra` unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PresentationMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// `light`, `dark` or `auto`; left as free text for forward compat.
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, rename = "aspectRatio")]
    pub aspect_ratio: Option<String>,
    /// `XS` | `S` | `M` | `L` | `XL`.
    #[serde(default, rename = "fontSize")]
    pub font_size: Option<String>,
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for PresentationMeta {
    fn default() -> Self {
        PresentationMeta {
            title: None,
            theme: default_theme(),
            mode: None,
            aspect_ratio: None,
            font_size: None,
            extra: BTreeMap::new(),
        }
    }
}

fn default_theme() -> String {
    "default".to_string()
}

/// Split a document into its metadata and markdown body.
///
/// Frontmatter exists only when the first line is exactly `---`; the block
/// runs to the next such line. A lone opening fence with no close is plain
/// content, not an open block. Invalid YAML is the one error this crate
/// reports; its span covers the whole frontmatter block.
pub fn extract(source: &str, file_id: usize) -> Result<(PresentationMeta, &str), ParseError> {
    let Some(yaml_start) = opening_fence_end(source) else {
        return Ok((PresentationMeta::default(), source));
    };

    let mut offset = yaml_start;
    for line in source[yaml_start..].split_inclusive('\n') {
        if is_fence_line(line) {
            let yaml = &source[yaml_start..offset];
            let body = &source[offset + line.len()..];
            let meta = if yaml.trim().is_empty() {
                PresentationMeta::default()
            } else {
                serde_yaml::from_str(yaml)
                    .map_err(|e| ParseError::frontmatter(&e, 0..offset + line.len(), file_id))?
            };
            return Ok((meta, body));
        }
        offset += line.len();
    }

    // Unterminated fence: treat the whole document as content.
    Ok((PresentationMeta::default(), source))
}

/// Byte offset just past the opening `---` line, if the document has one.
fn opening_fence_end(source: &str) -> Option<usize> {
    let first_line = source.split_inclusive('\n').next()?;
    if is_fence_line(first_line) {
        Some(first_line.len())
    } else {
        None
    }
}

fn is_fence_line(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == "---"
}
