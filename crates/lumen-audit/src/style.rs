//! Visual-style compliance: brand palette, neutral backgrounds, button
//! classes, and WCAG contrast over inline-styled text.

use regex::Regex;

use lumen_core::config::LumenConfig;
use lumen_core::types::Issue;
use lumen_dom::{Document, Element};

use crate::contrast;

/// Run all style checks in their fixed order.
pub fn run_style_checks(doc: &Document, config: &LumenConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(check_palette(doc, config));
    issues.extend(check_background(doc, config));
    issues.extend(check_buttons(doc, config));
    issues.extend(check_contrast(doc, config));
    issues
}

/// Six-digit hex colors inside a style value.
fn hex_color_pattern() -> Regex {
    Regex::new(r"#[0-9a-fA-F]{6}").expect("valid regex")
}

/// Palette: every hex color mentioned in an inline color/background style
/// must be in the approved set.
pub fn check_palette(doc: &Document, config: &LumenConfig) -> Vec<Issue> {
    let pattern = hex_color_pattern();
    let approved: Vec<String> = config
        .palette
        .approved
        .iter()
        .map(|c| c.to_uppercase())
        .collect();
    let mut issues = Vec::new();
    for element in doc.elements_with_inline_style() {
        let Some(style) = element.inline_style() else {
            continue;
        };
        if !style.contains("color") && !style.contains("background") {
            continue;
        }
        for color in pattern.find_iter(style) {
            if !approved.contains(&color.as_str().to_uppercase()) {
                issues.push(Issue::error(
                    "Colors",
                    format!("Non-compliant color used: {}", color.as_str()),
                    "Use approved brand palette colors",
                ));
            }
        }
    }
    issues
}

/// Background: the document should use the neutral background utility
/// class somewhere. One warning per document when absent.
pub fn check_background(doc: &Document, config: &LumenConfig) -> Vec<Issue> {
    let has_neutral = doc
        .all_elements()
        .iter()
        .any(|el| el.classes().iter().any(|c| c.contains(&config.palette.neutral_class)));
    if has_neutral {
        return Vec::new();
    }
    vec![Issue::warning(
        "Background",
        "Page might not meet the neutral background requirement",
        "Ensure sufficient use of the neutral background class",
    )]
}

/// Buttons: styled buttons and links need an approved button class.
/// The marker matches anywhere in a class name, so variants like
/// `x-btn-primary` count.
pub fn check_buttons(doc: &Document, config: &LumenConfig) -> Vec<Issue> {
    let marker = &config.palette.button_class_prefix;
    let mut issues = Vec::new();
    for button in doc.select_tags(&["button", "a"]) {
        let classes = button.classes();
        if classes.is_empty() {
            continue;
        }
        if !classes.iter().any(|c| c.contains(marker.as_str())) {
            issues.push(Issue::warning(
                "Buttons",
                format!("Button missing approved styling: {}", button.opening_tag()),
                "Apply an approved button class",
            ));
        }
    }
    issues
}

/// Contrast: for every element with its own text, resolve effective
/// text/background colors from inline styles and compare the WCAG ratio
/// against the size-dependent threshold.
pub fn check_contrast(doc: &Document, config: &LumenConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    for element in doc.all_elements() {
        if !element.has_own_text() {
            continue;
        }
        // Malformed inline colors are skipped, never fatal.
        let Some(fg) = resolve_text_color(&element) else {
            continue;
        };
        let bg = resolve_background_color(&element);

        let ratio = contrast::contrast_ratio(fg, bg);
        let large = contrast::is_large_text(font_size_px(&element), is_bold(&element));
        let required = contrast::required_ratio(large, &config.contrast);
        if ratio < required {
            issues.push(Issue::error(
                "Color Contrast",
                format!(
                    "Contrast ratio {:.2}:1 is below the required {:.1}:1: {}",
                    ratio,
                    required,
                    element.opening_tag()
                ),
                "Increase the contrast between the text and background colors",
            ));
        }
    }
    issues
}

/// Inline text color; black when unspecified, `None` when declared but
/// not a parseable hex color.
fn resolve_text_color(element: &Element) -> Option<(u8, u8, u8)> {
    match element.style_declaration("color") {
        Some(value) => contrast::hex_to_rgb(&value).ok(),
        None => Some((0, 0, 0)),
    }
}

/// Walk the ancestor chain until an inline background declaration with a
/// hex color is found; white when the walk reaches the root empty-handed.
fn resolve_background_color(element: &Element) -> (u8, u8, u8) {
    let pattern = hex_color_pattern();
    let mut current = Some(*element);
    while let Some(el) = current {
        for property in ["background-color", "background"] {
            if let Some(value) = el.style_declaration(property) {
                if let Some(hex) = pattern.find(&value) {
                    if let Ok(rgb) = contrast::hex_to_rgb(hex.as_str()) {
                        return rgb;
                    }
                }
            }
        }
        current = el.parent();
    }
    (255, 255, 255)
}

fn font_size_px(element: &Element) -> f64 {
    element
        .style_declaration("font-size")
        .and_then(|v| v.trim().strip_suffix("px").map(|n| n.trim().to_string()))
        .and_then(|n| n.parse::<f64>().ok())
        .unwrap_or(16.0)
}

fn is_bold(element: &Element) -> bool {
    element
        .style_declaration("font-weight")
        .map(|v| {
            let v = v.trim().to_lowercase();
            v == "bold" || v == "bolder" || v.parse::<u32>().is_ok_and(|w| w >= 700)
        })
        .unwrap_or(false)
}
