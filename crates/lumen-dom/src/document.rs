use scraper::{ElementRef, Html, Selector};

/// A CSS selector string that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid CSS selector `{selector}`: {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

/// A parsed HTML document.
///
/// Owns the tree; [`Element`] handles borrow from it and are only valid
/// for the document's lifetime. All selection methods return elements in
/// document (source) order.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw markup. Never fails: the parser recovers from malformed
    /// input the way browsers do.
    pub fn parse(markup: &str) -> Self {
        Document {
            html: Html::parse_document(markup),
        }
    }

    /// The root `html` element.
    pub fn root(&self) -> Element<'_> {
        Element {
            inner: self.html.root_element(),
        }
    }

    /// All elements in document order.
    pub fn all_elements(&self) -> Vec<Element<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(|inner| Element { inner })
            .collect()
    }

    /// All elements whose tag name is in `tags`, in document order.
    pub fn select_tags(&self, tags: &[&str]) -> Vec<Element<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| tags.contains(&el.value().name()))
            .map(|inner| Element { inner })
            .collect()
    }

    /// All elements matching a CSS selector, in document order.
    pub fn select<'a>(&'a self, css: &str) -> Result<Vec<Element<'a>>, SelectorError> {
        let selector = Selector::parse(css).map_err(|e| SelectorError {
            selector: css.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self
            .html
            .select(&selector)
            .map(|inner| Element { inner })
            .collect())
    }

    /// All elements carrying at least one attribute whose name starts with
    /// `prefix` (e.g. `aria-`), in document order.
    pub fn elements_with_attr_prefix(&self, prefix: &str) -> Vec<Element<'_>> {
        self.all_elements()
            .into_iter()
            .filter(|el| el.has_attr_with_prefix(prefix))
            .collect()
    }

    /// All elements carrying an inline `style` attribute, in document order.
    pub fn elements_with_inline_style(&self) -> Vec<Element<'_>> {
        self.all_elements()
            .into_iter()
            .filter(|el| el.inline_style().is_some())
            .collect()
    }
}

/// One element in a parsed document.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Lowercase tag name.
    pub fn tag(&self) -> &'a str {
        self.inner.value().name()
    }

    /// Attribute value, distinguishing presence from absence.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// True if any attribute name starts with `prefix`.
    pub fn has_attr_with_prefix(&self, prefix: &str) -> bool {
        self.inner
            .value()
            .attrs()
            .any(|(name, _)| name.starts_with(prefix))
    }

    /// The element's `class` list.
    pub fn classes(&self) -> Vec<&'a str> {
        self.inner.value().classes().collect()
    }

    /// Raw inline `style` attribute, when present.
    pub fn inline_style(&self) -> Option<&'a str> {
        self.attr("style")
    }

    /// Value of one inline-style declaration, whitespace-insensitive on
    /// both property and value (`outline : none` matches `outline:none`).
    pub fn style_declaration(&self, property: &str) -> Option<String> {
        let style = self.inline_style()?;
        for decl in style.split(';') {
            let mut parts = decl.splitn(2, ':');
            let name = parts.next()?.trim();
            if name.eq_ignore_ascii_case(property) {
                return parts.next().map(|v| v.trim().to_string());
            }
        }
        None
    }

    /// Concatenated descendant text.
    pub fn text(&self) -> String {
        self.inner.text().collect()
    }

    /// True if the element has a non-whitespace text node as a direct child.
    pub fn has_own_text(&self) -> bool {
        self.inner.children().any(|child| {
            child
                .value()
                .as_text()
                .is_some_and(|t| !t.trim().is_empty())
        })
    }

    pub fn parent(&self) -> Option<Element<'a>> {
        self.inner.parent().and_then(ElementRef::wrap).map(|inner| Element { inner })
    }

    /// Direct element children, in order. Text nodes are skipped.
    pub fn children(&self) -> Vec<Element<'a>> {
        self.inner
            .children()
            .filter_map(ElementRef::wrap)
            .map(|inner| Element { inner })
            .collect()
    }

    /// All descendant elements, in document order. Does not include `self`.
    pub fn descendants(&self) -> Vec<Element<'a>> {
        self.inner
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(|inner| Element { inner })
            .collect()
    }

    /// Full serialized markup of the element, including descendants.
    pub fn outer_html(&self) -> String {
        self.inner.html()
    }

    /// Opening-tag rendering for embedding in issue messages,
    /// e.g. `<img src="a.png">`.
    pub fn opening_tag(&self) -> String {
        let attrs: String = self
            .inner
            .value()
            .attrs()
            .map(|(name, value)| format!(" {}=\"{}\"", name, value))
            .collect();
        format!("<{}{}>", self.tag(), attrs)
    }
}

impl std::fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.opening_tag())
    }
}
