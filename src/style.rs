//! Tooltip stylesheet and host-level customization.
//!
//! Embedding documents can only reach a tooltip's appearance through two
//! hooks: the `important` class on the host and the `--color-primary`
//! custom property. Everything else in the stylesheet targets nodes inside
//! the shadow root.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Class that switches on the host background.
pub const IMPORTANT_CLASS: &str = "important";
/// Custom property read by the `important` background.
pub const COLOR_PRIMARY_VAR: &str = "--color-primary";
pub const COLOR_PRIMARY_FALLBACK: &str = "#ccc";

pub const TOOLTIP_STYLESHEET: &str = r#"
div {
    font-weight: normal;
    background-color: black;
    color: white;
    position: absolute;
    top: 1.5rem;
    left: 0.75rem;
    z-index: 10;
    padding: 0.15rem;
    border-radius: 3px;
    box-shadow: 1px 1px 6px rgba(0,0,0,0.26);
}

:host {
    position: relative;
}

:host(.important) {
    background: var(--color-primary, #ccc);
    padding: 0.15rem;
}

:host-context(p) {
    font-weight: bold;
}

::slotted(.highlight) {
    border-bottom: 2px dotted red;
}

.icon {
    background: black;
    color: white;
    padding: 0.15rem 0.5rem;
    text-align: center;
    border-radius: 50%;
}
"#;

/// Host appearance after applying `:host(...)` and `:host-context(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostStyle {
    pub position: &'static str,
    pub background: Option<String>,
    pub padding: Option<&'static str>,
    pub font_weight: &'static str,
}

/// Parse inline `style` declarations (`name: value; ...`).
///
/// Malformed entries without a colon are skipped.
pub fn parse_declarations(style: &str) -> BTreeMap<String, String> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

fn var_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"var\(\s*(--[A-Za-z0-9_-]+)\s*(?:,\s*([^)]*?)\s*)?\)")
            .expect("var() pattern is valid")
    })
}

/// Substitute `var(--name, fallback)` references from `props`.
///
/// An unset property without a fallback resolves to the empty string.
pub fn resolve_vars(value: &str, props: &BTreeMap<String, String>) -> String {
    var_regex()
        .replace_all(value, |caps: &regex::Captures<'_>| {
            props
                .get(&caps[1])
                .filter(|v| !v.is_empty())
                .cloned()
                .or_else(|| caps.get(2).map(|m| m.as_str().to_string()))
                .unwrap_or_default()
        })
        .into_owned()
}

/// Compute a tooltip host's style.
///
/// `host_classes` are the host's classes, `inline_style` its `style`
/// attribute, `ancestor_tags` the tags of its light-tree ancestors.
pub fn compute_host_style<'a>(
    host_classes: impl IntoIterator<Item = &'a str>,
    inline_style: Option<&str>,
    ancestor_tags: impl IntoIterator<Item = &'a str>,
) -> HostStyle {
    let important = host_classes.into_iter().any(|c| c == IMPORTANT_CLASS);
    let in_paragraph = ancestor_tags.into_iter().any(|t| t == "p");

    let (background, padding) = if important {
        let props = inline_style.map(parse_declarations).unwrap_or_default();
        let value = format!("var({COLOR_PRIMARY_VAR}, {COLOR_PRIMARY_FALLBACK})");
        (Some(resolve_vars(&value, &props)), Some("0.15rem"))
    } else {
        (None, None)
    };

    HostStyle {
        position: "relative",
        background,
        padding,
        font_weight: if in_paragraph { "bold" } else { "normal" },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let decls = parse_declarations(" --color-primary: red ; color:blue;bogus; :x");
        assert_eq!(decls.get("--color-primary").map(String::as_str), Some("red"));
        assert_eq!(decls.get("color").map(String::as_str), Some("blue"));
        assert_eq!(decls.len(), 2);
    }

    #[test]
    fn test_resolve_vars_uses_fallback() {
        let mut props = BTreeMap::new();
        assert_eq!(resolve_vars("var(--color-primary, #ccc)", &props), "#ccc");
        props.insert("--color-primary".to_string(), "tomato".to_string());
        assert_eq!(resolve_vars("var(--color-primary, #ccc)", &props), "tomato");
        assert_eq!(resolve_vars("1px solid var(--missing)", &props), "1px solid ");
    }

    #[test]
    fn test_plain_host_has_no_background() {
        let style = compute_host_style([] as [&str; 0], None, ["body"]);
        assert_eq!(style.background, None);
        assert_eq!(style.padding, None);
        assert_eq!(style.font_weight, "normal");
    }

    #[test]
    fn test_important_host_in_paragraph() {
        let style = compute_host_style(
            ["important"],
            Some("--color-primary: #f00"),
            ["p", "body"],
        );
        assert_eq!(style.background.as_deref(), Some("#f00"));
        assert_eq!(style.padding, Some("0.15rem"));
        assert_eq!(style.font_weight, "bold");
    }

    #[test]
    fn test_stylesheet_exposes_only_documented_hooks() {
        assert!(TOOLTIP_STYLESHEET.contains(":host(.important)"));
        assert!(TOOLTIP_STYLESHEET.contains("var(--color-primary, #ccc)"));
    }
}
