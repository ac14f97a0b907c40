use lumen_core::types::Issue;
use lumen_dom::Document;

// Re-export the remaining battery checks so engine.rs keeps using checks::*
pub use crate::checks_extended::{
    check_language, check_landmarks, check_lists, check_multimedia, check_skip_links,
    check_tables,
};

/// Interactive element tags for keyboard and focus checks.
pub(crate) const INTERACTIVE_TAGS: &[&str] = &["button", "a", "input", "select", "textarea"];

/// Run the full structural battery in its fixed order.
///
/// Every check is pure and independent; re-running on the same tree yields
/// an identical issue list.
pub fn run_battery(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(check_images(doc));
    issues.extend(check_headings(doc));
    issues.extend(check_forms(doc));
    issues.extend(check_aria(doc));
    issues.extend(check_keyboard(doc));
    issues.extend(check_focus(doc));
    issues.extend(check_skip_links(doc));
    issues.extend(check_language(doc));
    issues.extend(check_landmarks(doc));
    issues.extend(check_tables(doc));
    issues.extend(check_lists(doc));
    issues.extend(check_multimedia(doc));
    issues
}

/// Images: every `img` must carry a non-empty `alt` attribute.
pub fn check_images(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    for img in doc.select_tags(&["img"]) {
        let alt = img.attr("alt").unwrap_or("");
        if alt.is_empty() {
            issues.push(Issue::error(
                "Images",
                format!("Image missing alt text: {}", img.opening_tag()),
                "Add descriptive alt text to the image",
            ));
        }
    }
    issues
}

/// Headings: walking document order, a jump of more than one level
/// (e.g. h2 to h4) is a warning. Level 0 is the implicit start state.
pub fn check_headings(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut prev_level = 0u32;
    for heading in doc.select_tags(&["h1", "h2", "h3", "h4", "h5", "h6"]) {
        let Ok(level) = heading.tag()[1..].parse::<u32>() else {
            continue;
        };
        if level > prev_level + 1 {
            issues.push(Issue::warning(
                "Headings",
                format!("Heading level skipped from h{} to h{}", prev_level, level),
                "Maintain proper heading hierarchy",
            ));
        }
        prev_level = level;
    }
    issues
}

/// Forms: every non-submit/button/hidden input needs a `label` element
/// referencing its id via `for`.
pub fn check_forms(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    let labels = doc.select_tags(&["label"]);
    for input in doc.select_tags(&["input"]) {
        let input_type = input.attr("type").unwrap_or("");
        if matches!(input_type, "submit" | "button" | "hidden") {
            continue;
        }
        let labeled = input.attr("id").is_some_and(|id| {
            !id.is_empty() && labels.iter().any(|label| label.attr("for") == Some(id))
        });
        if !labeled {
            issues.push(Issue::error(
                "Forms",
                format!("Input missing label: {}", input.opening_tag()),
                "Add proper label for the input field",
            ));
        }
    }
    issues
}

/// ARIA: any element carrying an `aria-*` attribute must also carry `role`.
pub fn check_aria(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    for element in doc.elements_with_attr_prefix("aria-") {
        if !element.has_attr("role") {
            issues.push(Issue::warning(
                "ARIA",
                format!(
                    "Element with ARIA attributes missing role: {}",
                    element.opening_tag()
                ),
                "Add appropriate role attribute",
            ));
        }
    }
    issues
}

/// Keyboard navigation: positive tabindex disrupts tab order (warning,
/// non-numeric values ignored); interactive elements with a click handler
/// but no key handler are unreachable from the keyboard (error).
pub fn check_keyboard(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    for element in doc.all_elements() {
        if let Some(tabindex) = element.attr("tabindex") {
            if let Ok(value) = tabindex.trim().parse::<i64>() {
                if value > 0 {
                    issues.push(Issue::warning(
                        "Keyboard Navigation",
                        format!(
                            "tabindex greater than 0 disrupts natural tab order: {}",
                            element.opening_tag()
                        ),
                        "Use tabindex=\"0\" or rely on natural document order",
                    ));
                }
            }
        }
    }
    for element in doc.select_tags(INTERACTIVE_TAGS) {
        let has_click = element.has_attr("onclick");
        let has_key = element.has_attr("onkeypress")
            || element.has_attr("onkeydown")
            || element.has_attr("onkeyup");
        if has_click && !has_key {
            issues.push(Issue::error(
                "Keyboard Navigation",
                format!(
                    "Interactive element has a click handler but no keyboard handler: {}",
                    element.opening_tag()
                ),
                "Add a matching key event handler or use a native control",
            ));
        }
    }
    issues
}

/// Focus management: interactive elements must not disable the focus
/// outline inline (`outline: none`, whitespace-insensitive).
pub fn check_focus(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    for element in doc.select_tags(INTERACTIVE_TAGS) {
        let disables_outline = element
            .style_declaration("outline")
            .is_some_and(|v| v.eq_ignore_ascii_case("none"));
        if disables_outline {
            issues.push(Issue::error(
                "Focus Management",
                format!(
                    "Interactive element disables the focus outline: {}",
                    element.opening_tag()
                ),
                "Keep a visible focus indicator on interactive elements",
            ));
        }
    }
    issues
}
