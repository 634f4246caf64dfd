//! Style sheets mapping token categories to display attributes
//!
//! A sheet is a list of `(Category, definition)` pairs. Definitions are short
//! space-separated word lists such as `"bold #289"` or `"#88F bg:"`. Categories without
//! their own definition inherit everything from their parent.

mod murphy;

pub use murphy::murphy;

use serde::Serialize;
use std::collections::BTreeMap;
use weblex_engine::logging::{codes, Code};
use weblex_engine::{log_error, Category};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("Invalid word '{word}' in style definition for {category}")]
    InvalidDefinition { category: Category, word: String },

    #[error("Invalid color '{value}' for {category}")]
    InvalidColor { category: Category, value: String },
}

impl StyleError {
    pub fn error_code(&self) -> Code {
        match self {
            StyleError::InvalidDefinition { .. } => codes::style::INVALID_STYLE_DEFINITION,
            StyleError::InvalidColor { .. } => codes::style::INVALID_COLOR,
        }
    }
}

/// Display attributes after inheritance; colors are six hex digits without `#`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Clone)]
pub struct StyleSheet {
    name: &'static str,
    background_color: &'static str,
    highlight_color: &'static str,
    defined: Vec<Category>,
    resolved: BTreeMap<Category, ResolvedStyle>,
}

impl StyleSheet {
    /// Resolves every category up front. `default_style` styles the root category.
    pub fn new(
        name: &'static str,
        default_style: &str,
        definitions: &[(Category, &str)],
    ) -> Result<Self, StyleError> {
        let lookup = |category: Category| {
            definitions
                .iter()
                .rev()
                .find(|(defined, _)| *defined == category)
                .map(|(_, definition)| *definition)
        };

        let base = apply_definition(
            Category::Token,
            &ResolvedStyle::default(),
            &ResolvedStyle::default(),
            default_style,
        )
        .inspect_err(|e| log_failure(name, e))?;

        let mut resolved = BTreeMap::new();
        // ALL lists parents first, so a parent is always resolved before its children
        for &category in Category::ALL {
            let inherited = match category.parent() {
                Some(parent) => resolved.get(&parent).unwrap_or(&base),
                None => &base,
            };
            let style = match lookup(category) {
                Some(definition) => apply_definition(category, &base, inherited, definition)
                    .inspect_err(|e| log_failure(name, e))?,
                None => inherited.clone(),
            };
            resolved.insert(category, style);
        }

        let mut defined: Vec<Category> = definitions.iter().map(|(c, _)| *c).collect();
        defined.sort();
        defined.dedup();

        Ok(Self {
            name,
            background_color: "#ffffff",
            highlight_color: "#ffffcc",
            defined,
            resolved,
        })
    }

    pub fn with_background(mut self, background: &'static str, highlight: &'static str) -> Self {
        self.background_color = background;
        self.highlight_color = highlight;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn background_color(&self) -> &'static str {
        self.background_color
    }

    pub fn highlight_color(&self) -> &'static str {
        self.highlight_color
    }

    /// Effective style of `category` after walking its ancestors
    pub fn resolve(&self, category: Category) -> ResolvedStyle {
        category
            .ancestors()
            .find_map(|c| self.resolved.get(&c))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether `category` carries its own definition instead of only inheriting
    pub fn styles_category(&self, category: Category) -> bool {
        self.defined.binary_search(&category).is_ok()
    }

    /// Every category paired with its resolved style, parents first
    pub fn iter(&self) -> impl Iterator<Item = (Category, &ResolvedStyle)> {
        Category::ALL
            .iter()
            .filter_map(|c| self.resolved.get(c).map(|style| (*c, style)))
    }
}

fn log_failure(sheet: &str, error: &StyleError) {
    log_error!(error.error_code(), "Style sheet rejected", "style" => sheet, "error" => error);
}

/// Applies one definition on top of `inherited`; `noinherit` starts from `base` instead
fn apply_definition(
    category: Category,
    base: &ResolvedStyle,
    inherited: &ResolvedStyle,
    definition: &str,
) -> Result<ResolvedStyle, StyleError> {
    let words: Vec<&str> = definition.split_whitespace().collect();
    let mut style = if words.contains(&"noinherit") {
        base.clone()
    } else {
        inherited.clone()
    };

    for word in words {
        match word {
            "noinherit" => {}
            "bold" => style.bold = true,
            "nobold" => style.bold = false,
            "italic" => style.italic = true,
            "noitalic" => style.italic = false,
            "underline" => style.underline = true,
            "nounderline" => style.underline = false,
            // font family hints carry no attribute here
            "roman" | "sans" | "mono" => {}
            _ => {
                if let Some(value) = word.strip_prefix("bg:") {
                    style.bgcolor = parse_color(category, value)?;
                } else if let Some(value) = word.strip_prefix("border:") {
                    style.border = parse_color(category, value)?;
                } else if word.starts_with('#') {
                    style.color = parse_color(category, word)?;
                } else {
                    return Err(StyleError::InvalidDefinition {
                        category,
                        word: word.to_string(),
                    });
                }
            }
        }
    }

    Ok(style)
}

/// `#abc` expands to `aabbcc`; an empty value clears the color
fn parse_color(category: Category, value: &str) -> Result<Option<String>, StyleError> {
    if value.is_empty() {
        return Ok(None);
    }

    let invalid = || StyleError::InvalidColor {
        category,
        value: value.to_string(),
    };
    let digits = value.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    match digits.len() {
        6 => Ok(Some(digits.to_string())),
        3 => Ok(Some(digits.chars().flat_map(|c| [c, c]).collect())),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_children_inherit_parent_definition() {
        let sheet = StyleSheet::new(
            "test",
            "",
            &[(Category::Keyword, "bold #289"), (Category::KeywordType, "#66f")],
        )
        .unwrap();

        let keyword = sheet.resolve(Category::Keyword);
        assert_eq!(keyword.color.as_deref(), Some("228899"));
        assert!(keyword.bold);

        let constant = sheet.resolve(Category::KeywordConstant);
        assert_eq!(constant, keyword);

        let ty = sheet.resolve(Category::KeywordType);
        assert_eq!(ty.color.as_deref(), Some("6666ff"));
        assert!(ty.bold);
        assert!(sheet.styles_category(Category::KeywordType));
        assert!(!sheet.styles_category(Category::KeywordConstant));
    }

    #[test]
    fn test_negations_and_empty_background() {
        let sheet = StyleSheet::new(
            "test",
            "",
            &[
                (Category::Comment, "italic bg:#eee"),
                (Category::CommentPreproc, "noitalic bg:"),
                (Category::CommentSingle, "underline border:#000000"),
            ],
        )
        .unwrap();

        let preproc = sheet.resolve(Category::CommentPreproc);
        assert!(!preproc.italic);
        assert_eq!(preproc.bgcolor, None);

        let single = sheet.resolve(Category::CommentSingle);
        assert!(single.italic && single.underline);
        assert_eq!(single.bgcolor.as_deref(), Some("eeeeee"));
        assert_eq!(single.border.as_deref(), Some("000000"));
    }

    #[test]
    fn test_noinherit_starts_from_default_style() {
        let sheet = StyleSheet::new(
            "test",
            "#111",
            &[(Category::Name, "bold #222"), (Category::NameTag, "noinherit italic")],
        )
        .unwrap();

        let tag = sheet.resolve(Category::NameTag);
        assert_eq!(tag.color.as_deref(), Some("111111"));
        assert!(!tag.bold);
        assert!(tag.italic);
        assert_eq!(sheet.resolve(Category::Text).color.as_deref(), Some("111111"));
    }

    #[test]
    fn test_invalid_definitions() {
        let err = StyleSheet::new("test", "", &[(Category::Keyword, "blod")]).unwrap_err();
        assert_matches!(err, StyleError::InvalidDefinition { category: Category::Keyword, ref word } if word == "blod");
        assert_eq!(err.error_code(), codes::style::INVALID_STYLE_DEFINITION);

        let err = StyleSheet::new("test", "", &[(Category::Name, "#12345")]).unwrap_err();
        assert_matches!(err, StyleError::InvalidColor { ref value, .. } if value == "#12345");
        assert_eq!(err.error_code(), codes::style::INVALID_COLOR);

        let err = StyleSheet::new("test", "", &[(Category::Name, "bg:red")]).unwrap_err();
        assert_matches!(err, StyleError::InvalidColor { .. });
    }

    #[test]
    fn test_resolved_style_serializes_without_empty_colors() {
        let style = ResolvedStyle {
            color: Some("ff0000".to_string()),
            bold: true,
            ..ResolvedStyle::default()
        };
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["color"], "ff0000");
        assert_eq!(json["bold"], true);
        assert!(json.get("bgcolor").is_none());
    }
}
