//! Thin navigation layer over `scraper`.
//!
//! The extractors only ever talk to [`Document`] and [`Node`], which expose
//! the handful of tree operations they need (tag/attribute lookups, trimmed
//! text, element children and siblings). Every lookup returns an `Option` or
//! an iterator, so absence of an expected element is never an error here.

pub mod entities;

use scraper::{ElementRef, Html};

use crate::extractor::ExtractError;

pub use entities::decode_entities;

/// A parsed page or fragment. Owned by a single request.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw markup. The HTML5 parser recovers from any malformed input,
    /// so the only thing rejected is input with no markup at all.
    pub fn parse(raw: &str) -> Result<Self, ExtractError> {
        if raw.trim().is_empty() {
            return Err(ExtractError::MalformedDocument(
                "document is empty".to_string(),
            ));
        }
        Ok(Self {
            html: Html::parse_document(raw),
        })
    }

    pub fn root(&self) -> Node<'_> {
        Node(self.html.root_element())
    }

    pub fn find_first(&self, tag: &str) -> Option<Node<'_>> {
        self.root().find_first(tag)
    }

    pub fn filter<'d>(&'d self, tag: &str) -> impl Iterator<Item = Node<'d>> + use<'d> {
        self.root().filter(tag)
    }

    /// First element named `tag` carrying `value` in any of its attributes.
    pub fn find_node(&self, tag: &str, value: &str) -> Option<Node<'_>> {
        self.root().find_node(tag, value)
    }
}

/// A single element of a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn tag(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// True when any attribute's full value equals `value`.
    pub fn has_attr_value(&self, value: &str) -> bool {
        self.0.value().attrs().any(|(_, v)| v == value)
    }

    /// True when the `class` attribute lists `class` among its tokens.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Concatenated descendant text, trimmed.
    pub fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    /// Descendant text with runs of whitespace collapsed to single spaces.
    pub fn text_normalized(&self) -> String {
        self.0.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
    }

    /// Element children, skipping text and comment nodes.
    pub fn children(self) -> impl Iterator<Item = Node<'a>> + use<'a> {
        self.0.children().filter_map(ElementRef::wrap).map(Node)
    }

    pub fn first_child(&self) -> Option<Node<'a>> {
        self.children().next()
    }

    pub fn child(&self, index: usize) -> Option<Node<'a>> {
        self.children().nth(index)
    }

    /// Next element sibling, skipping text and comment nodes.
    pub fn next_sibling(&self) -> Option<Node<'a>> {
        self.0.next_siblings().find_map(ElementRef::wrap).map(Node)
    }

    /// Descendant elements in document order, excluding `self`.
    pub fn descendants(self) -> impl Iterator<Item = Node<'a>> + use<'a> {
        self.0.descendants().skip(1).filter_map(ElementRef::wrap).map(Node)
    }

    pub fn filter(self, tag: &str) -> impl Iterator<Item = Node<'a>> + use<'a> {
        let tag = tag.to_ascii_lowercase();
        self.descendants().filter(move |node| node.tag() == tag)
    }

    pub fn find_first(&self, tag: &str) -> Option<Node<'a>> {
        self.filter(tag).next()
    }

    pub fn find_node(&self, tag: &str, value: &str) -> Option<Node<'a>> {
        self.filter(tag).find(|node| node.has_attr_value(value))
    }

    /// First descendant whose `class` contains `class`, whatever its tag.
    pub fn find_class(&self, class: &str) -> Option<Node<'a>> {
        self.descendants().find(|node| node.has_class(class))
    }
}
