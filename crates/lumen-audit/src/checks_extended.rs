//! Battery checks for page structure: skip links, language, landmarks,
//! tables, lists, and multimedia.

use lumen_core::types::Issue;
use lumen_dom::Document;

/// Skip links: the document needs an anchor to `#main-content` or an
/// anchor whose text mentions "skip". One warning per document.
pub fn check_skip_links(doc: &Document) -> Vec<Issue> {
    let has_skip_link = doc.select_tags(&["a"]).iter().any(|a| {
        a.attr("href") == Some("#main-content") || a.text().to_lowercase().contains("skip")
    });
    if has_skip_link {
        return Vec::new();
    }
    vec![Issue::warning(
        "Skip Links",
        "No skip link found at the start of the document",
        "Add a skip link targeting #main-content so keyboard users can bypass navigation",
    )]
}

/// Language: the root `html` element must declare a non-empty `lang`.
pub fn check_language(doc: &Document) -> Vec<Issue> {
    let lang = doc.root().attr("lang").unwrap_or("");
    if lang.trim().is_empty() {
        return vec![Issue::error(
            "Language",
            "Missing lang attribute on the html element",
            "Declare the page language, e.g. <html lang=\"en\">",
        )];
    }
    Vec::new()
}

/// Document structure: a missing main landmark is an error; missing
/// header/nav/footer landmarks each warn.
pub fn check_landmarks(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !has_landmark(doc, "main", "main") {
        issues.push(Issue::error(
            "Document Structure",
            "Missing main landmark",
            "Add a <main> element or role=\"main\" around the primary content",
        ));
    }
    for (tag, role) in [
        ("header", "banner"),
        ("nav", "navigation"),
        ("footer", "contentinfo"),
    ] {
        if !has_landmark(doc, tag, role) {
            issues.push(Issue::warning(
                "Document Structure",
                format!("Missing {} landmark", tag),
                format!("Add a <{}> element or role=\"{}\"", tag, role),
            ));
        }
    }
    issues
}

fn has_landmark(doc: &Document, tag: &str, role: &str) -> bool {
    !doc.select_tags(&[tag]).is_empty()
        || doc
            .all_elements()
            .iter()
            .any(|el| el.attr("role") == Some(role))
}

/// Tables: each table is checked independently; a missing caption warns
/// and missing header cells error, and both may fire for one table.
pub fn check_tables(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    for table in doc.select_tags(&["table"]) {
        let descendants = table.descendants();
        if !descendants.iter().any(|el| el.tag() == "caption") {
            issues.push(Issue::warning(
                "Tables",
                format!("Table missing caption: {}", table.opening_tag()),
                "Add a <caption> describing the table contents",
            ));
        }
        if !descendants.iter().any(|el| el.tag() == "th") {
            issues.push(Issue::error(
                "Tables",
                format!("Table has no header cells: {}", table.opening_tag()),
                "Mark header cells with <th> so screen readers can relate data cells",
            ));
        }
    }
    issues
}

/// Lists: a `ul`/`ol` with no `li` children is an error, and every direct
/// element child that is not an `li` is its own error.
pub fn check_lists(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    for list in doc.select_tags(&["ul", "ol"]) {
        let children = list.children();
        if !children.iter().any(|child| child.tag() == "li") {
            issues.push(Issue::error(
                "Lists",
                format!("Empty list: {}", list.opening_tag()),
                "Populate the list with <li> items or remove it",
            ));
        }
        for child in &children {
            if child.tag() != "li" {
                issues.push(Issue::error(
                    "Lists",
                    format!(
                        "List contains a non-li child element: {}",
                        child.opening_tag()
                    ),
                    "Only <li> elements may be direct children of a list",
                ));
            }
        }
    }
    issues
}

/// Multimedia: video needs a captions track (error); audio needs a
/// transcript link somewhere in the document (warning).
pub fn check_multimedia(doc: &Document) -> Vec<Issue> {
    let mut issues = Vec::new();
    for video in doc.select_tags(&["video"]) {
        let has_captions = video
            .descendants()
            .iter()
            .any(|el| el.tag() == "track" && el.attr("kind") == Some("captions"));
        if !has_captions {
            issues.push(Issue::error(
                "Multimedia",
                format!("Video missing captions track: {}", video.opening_tag()),
                "Add a <track kind=\"captions\"> child to the video",
            ));
        }
    }
    let has_transcript_link = doc.select_tags(&["a"]).iter().any(|a| {
        a.attr("href")
            .is_some_and(|href| href.ends_with(".txt") || href.ends_with(".pdf"))
    });
    for audio in doc.select_tags(&["audio"]) {
        if !has_transcript_link {
            issues.push(Issue::warning(
                "Multimedia",
                format!("Audio without a transcript link: {}", audio.opening_tag()),
                "Link a text transcript (.txt or .pdf) near the audio",
            ));
        }
    }
    issues
}
