/// Shared test helpers for all lumen integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
use lumen_core::types::{CustomRule, Severity};

/// A page that passes every accessibility and style check.
#[allow(dead_code)]
pub fn clean_page() -> &'static str {
    "<html lang='en'><body style='background-color: #F9F7F5'>\
     <header></header>\
     <nav><a href='#main-content'>Skip to content</a></nav>\
     <main id='main-content'><div class='bg-neutral'>\
     <h1 style='color: #044014'>Welcome</h1>\
     <p>All good here.</p>\
     </div></main>\
     <footer></footer>\
     </body></html>"
}

/// A page that trips a known set of checks: missing alt text, a skipped
/// heading level, an unlabeled input, a removed focus outline, and an
/// off-palette color.
#[allow(dead_code)]
pub fn broken_page() -> &'static str {
    "<html><body>\
     <img src='hero.png'>\
     <h1>Title</h1><h3>Skipped</h3>\
     <form><input type='text' name='q'></form>\
     <button style='outline: none'>Go</button>\
     <div style='color: #FF0000'>Red text</div>\
     </body></html>"
}

#[allow(dead_code)]
pub fn sample_rule(name: &str) -> CustomRule {
    CustomRule {
        name: name.to_string(),
        description: "flag embedded frames".to_string(),
        selector: "iframe".to_string(),
        condition: "exists".to_string(),
        message: "Embedded iframe found".to_string(),
        recommendation: "Replace the iframe with native content".to_string(),
        severity: Severity::Error,
    }
}
