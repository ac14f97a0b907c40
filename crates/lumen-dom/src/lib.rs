//! DOM adapter for lumen.
//!
//! Wraps a parsed HTML tree behind a small capability surface: select by
//! tag, CSS selector, or attribute predicate; read attributes and inline
//! styles; walk parents and children; extract text. Parsing is best-effort
//! and never fails — malformed markup produces whatever tree the parser
//! can recover, the way browsers do.
//!
//! Everything above this crate depends only on [`Document`] and
//! [`Element`]; the concrete tree comes from `scraper`.

pub mod document;

pub use document::{Document, Element, SelectorError};
