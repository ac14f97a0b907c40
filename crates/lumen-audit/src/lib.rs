//! Audit engine for lumen accessibility and style compliance.
//!
//! Runs a fixed battery of structural checks against a parsed document and
//! produces issues:
//! - Images: missing alt text
//! - Headings: skipped hierarchy levels
//! - Forms: inputs without labels
//! - ARIA: aria-* attributes without a role
//! - Keyboard Navigation: positive tabindex, click handlers without key handlers
//! - Focus Management: disabled focus outlines
//! - Skip Links, Language, Document Structure (landmarks)
//! - Tables, Lists, Multimedia
//! - Colors / Background / Buttons: brand palette compliance
//! - Color Contrast: WCAG AA luminance ratios
//!
//! User-defined rules (CSS selector + condition DSL) extend the battery at
//! runtime through [`rules::RuleSet`], managed by [`engine::AuditEngine`].

pub mod checks;
pub mod checks_extended;
pub mod contrast;
pub mod engine;
pub mod rules;
pub mod style;

pub use engine::AuditEngine;
