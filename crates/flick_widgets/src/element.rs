//! Retained element tree
//!
//! Widgets render into a small HTML-like tree: a tag, an optional identity
//! key, a class set, an inline style, text, and children. Hosts walk the
//! tree to build their native nodes; tests and debugging use
//! [`Element::to_html`].
//!
//! # Example
//!
//! ```rust
//! use flick_widgets::element::{div, li, ul};
//!
//! let list = ul()
//!     .class("items")
//!     .child(li().key("a").text("First"))
//!     .child(li().key("b").text("Second"));
//!
//! assert_eq!(list.children().len(), 2);
//! assert_eq!(list.children()[0].key_str(), Some("a"));
//! assert_eq!(
//!     div().class("box").text("hi").to_html(),
//!     r#"<div class="box">hi</div>"#
//! );
//! ```

use std::fmt::Write as _;

use smallvec::SmallVec;

/// A node in the rendered tree
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    tag: String,
    key: Option<String>,
    classes: SmallVec<[String; 4]>,
    style: Option<String>,
    text: Option<String>,
    children: Vec<Element>,
}

/// Create an element with the given tag
pub fn element(tag: impl Into<String>) -> Element {
    Element {
        tag: tag.into(),
        ..Default::default()
    }
}

/// Create a `div`
pub fn div() -> Element {
    element("div")
}

/// Create an unordered list
pub fn ul() -> Element {
    element("ul")
}

/// Create a list item
pub fn li() -> Element {
    element("li")
}

impl Element {
    /// Set the identity key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add a class. Empty names are ignored, and a name already present is
    /// kept once at its first position.
    pub fn class(mut self, name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        if !name.is_empty() && !self.has_class(name) {
            self.classes.push(name.to_string());
        }
        self
    }

    /// Add a class if present
    pub fn class_opt(self, name: Option<&str>) -> Self {
        match name {
            Some(name) => self.class(name),
            None => self,
        }
    }

    /// Add every whitespace-separated class in `names`
    pub fn classes<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        names
            .into_iter()
            .flat_map(str::split_whitespace)
            .fold(self, |el, name| el.class(name))
    }

    /// Set the inline style
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set the text content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append children
    pub fn children_from(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The identity key, if one was set
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn class_list(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    pub fn inline_style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// All descendants (including `self`) carrying `class`, depth first
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_by_class(class, found);
        }
    }

    /// First descendant (including `self`) carrying `class`
    pub fn first_by_class(&self, class: &str) -> Option<&Element> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.first_by_class(class))
    }

    /// Serialize to HTML. Keys are emitted as `data-key`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        if let Some(style) = &self.style {
            let _ = write!(out, " style=\"{}\"", escape(style.trim()));
        }
        if let Some(key) = &self.key {
            let _ = write!(out, " data-key=\"{}\"", escape(key));
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
