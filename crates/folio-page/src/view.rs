//! Minimal element tree serialized to HTML

use std::fmt::Write;

/// Elements that never carry children or a closing tag
const VOID_TAGS: &[&str] = &["img", "br", "hr", "meta", "input", "link"];

/// A node in the rendered page
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Element(Element),
    Text(String),
    Fragment(Vec<View>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<View>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any existing value
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child only when present
    pub fn child_opt(mut self, child: Option<impl Into<View>>) -> Self {
        if let Some(child) = child {
            self.children.push(child.into());
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(View::Text(text.into()))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        View::Element(element)
    }
}

impl From<&str> for View {
    fn from(text: &str) -> Self {
        View::Text(text.to_string())
    }
}

impl From<String> for View {
    fn from(text: String) -> Self {
        View::Text(text)
    }
}

impl View {
    /// Serialize to an HTML string with all text and attribute values escaped
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            View::Text(text) => out.push_str(&escape_text(text)),
            View::Fragment(children) => {
                for child in children {
                    child.render_into(out);
                }
            }
            View::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag) {
                    return;
                }
                for child in &el.children {
                    child.render_into(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }

    /// All elements in document order matching a predicate
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(pred, &mut found);
        found
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        match self {
            View::Text(_) => {}
            View::Fragment(children) => {
                for child in children {
                    child.collect(pred, found);
                }
            }
            View::Element(el) => {
                if pred(el) {
                    found.push(el);
                }
                for child in &el.children {
                    child.collect(pred, found);
                }
            }
        }
    }

    /// Elements carrying `data-affordance="<name>"`
    pub fn affordances(&self, name: &str) -> Vec<&Element> {
        self.find_all(&|el| el.attr("data-affordance") == Some(name))
    }

    /// Concatenated text content
    pub fn text_content(&self) -> String {
        match self {
            View::Text(text) => text.clone(),
            View::Fragment(children) => children.iter().map(View::text_content).collect(),
            View::Element(el) => el.children.iter().map(View::text_content).collect(),
        }
    }
}

/// Escape text content
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for use inside double quotes
pub fn escape_attr(value: &str) -> String {
    escape_text(value)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
