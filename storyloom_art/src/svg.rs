// Structured SVG element tree and serializer.
//
// Composers build illustrations as a tree of `Element`s and serialize once at
// the end. Every element is closed by construction (self-closing when it has
// no children), and every attribute value and text node is XML-escaped, so
// the rendered string is well-formed no matter what character names or trait
// strings flow in.
//
// `Document` owns the root `<svg>` element with the fixed viewBox of its
// `Canvas`. The small shape constructors at the bottom (`circle`, `rect`,
// ...) keep the drawing recipes in `scene.rs` and `portrait.rs` terse.

use std::borrow::Cow;
use std::fmt::Display;

use smallvec::SmallVec;

use crate::geometry::Canvas;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A child of an element.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// One SVG element with ordered attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: SmallVec<[(&'static str, String); 8]>,
    children: Vec<Node>,
    paired: bool,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: SmallVec::new(),
            children: Vec::new(),
            paired: false,
        }
    }

    /// Always write an explicit closing tag, even with no children.
    pub fn paired(mut self) -> Self {
        self.paired = true;
        self
    }

    /// Set an attribute. A repeated key replaces the earlier value.
    pub fn attr(mut self, key: &'static str, value: impl Display) -> Self {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.extend(children);
        self
    }

    /// Append a text node.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn extend(&mut self, children: impl IntoIterator<Item = Element>) {
        self.children.extend(children.into_iter().map(Node::Element));
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Count this element and its descendants whose `class` is `class`.
    pub fn count_class(&self, class: &str) -> usize {
        let own = usize::from(self.get_attr("class") == Some(class));
        own + self
            .child_elements()
            .map(|c| c.count_class(class))
            .sum::<usize>()
    }

    /// Find descendant elements (depth-first) whose `class` is `class`.
    pub fn find_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        if self.get_attr("class") == Some(class) {
            out.push(self);
        }
        for c in self.child_elements() {
            c.find_class(class, out);
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&escape(v));
            out.push('"');
        }
        if self.children.is_empty() && !self.paired {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_into(out),
                Node::Text(t) => out.push_str(&escape(t)),
            }
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}

/// A complete SVG document over a fixed canvas.
#[derive(Clone, Debug)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(canvas: Canvas) -> Self {
        let root = Element::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("viewBox", canvas.view_box())
            .attr("width", "100%")
            .attr("height", "100%")
            .paired();
        Self { root }
    }

    pub fn push(&mut self, el: Element) {
        self.root.push(el);
    }

    pub fn extend(&mut self, els: impl IntoIterator<Item = Element>) {
        self.root.extend(els);
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serialize the document as a single trimmed string.
    pub fn render(&self) -> String {
        self.root.render().trim().to_string()
    }
}

/// Escape the five XML special characters.
///
/// Characters XML 1.0 does not allow at all (C0 controls other than tab,
/// newline, and carriage return, plus U+FFFE and U+FFFF) become U+FFFD.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| needs_escape(c) || is_forbidden(c)) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_forbidden(c) => out.push(char::REPLACEMENT_CHARACTER),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '"' | '\'')
}

fn is_forbidden(c: char) -> bool {
    (c < ' ' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

// ---------------------------------------------------------------------------
// Shape constructors
// ---------------------------------------------------------------------------

pub fn group(class: &str) -> Element {
    Element::new("g").attr("class", class)
}

pub fn circle(cx: impl Display, cy: impl Display, r: impl Display) -> Element {
    Element::new("circle")
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("r", r)
}

pub fn rect(
    x: impl Display,
    y: impl Display,
    width: impl Display,
    height: impl Display,
) -> Element {
    Element::new("rect")
        .attr("x", x)
        .attr("y", y)
        .attr("width", width)
        .attr("height", height)
}

pub fn line(x1: impl Display, y1: impl Display, x2: impl Display, y2: impl Display) -> Element {
    Element::new("line")
        .attr("x1", x1)
        .attr("y1", y1)
        .attr("x2", x2)
        .attr("y2", y2)
}

pub fn path(d: impl Display) -> Element {
    Element::new("path").attr("d", d)
}

pub fn polygon(points: impl Display) -> Element {
    Element::new("polygon").attr("points", points)
}
