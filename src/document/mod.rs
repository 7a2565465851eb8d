// src/document/mod.rs
//! Read-only query facade over one parsed page.
//!
//! Every query takes a precompiled [`Selector`] and returns an owned, ordered
//! result. A query that matches nothing returns an empty `Vec`; callers decide
//! whether emptiness is a failure.

pub mod range;

use scraper::node::Node as DomNode;
use scraper::{ElementRef, Html, Selector};

/// One fetched, parsed page plus the URL it was fetched from.
pub struct Document {
    html: Html,
    url: String,
}

impl Document {
    pub fn parse(html: &str, url: impl Into<String>) -> Self {
        Self {
            html: Html::parse_document(html),
            url: url.into(),
        }
    }

    /// The source URL supplied by the crawler.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn root(&self) -> Node<'_> {
        Node::new(self.html.root_element())
    }

    pub fn query_nodes(&self, selector: &Selector) -> Vec<Node<'_>> {
        self.html.select(selector).map(Node::new).collect()
    }

    pub fn query_text(&self, selector: &Selector) -> Vec<String> {
        self.html
            .select(selector)
            .flat_map(|el| Node::new(el).own_text())
            .collect()
    }

    pub fn query_attr(&self, selector: &Selector, attr: &str) -> Vec<String> {
        self.html
            .select(selector)
            .filter_map(|el| el.value().attr(attr))
            .map(str::to_string)
            .collect()
    }

    /// First node in document order matching the landmark.
    pub fn find_landmark(&self, landmark: &Landmark) -> Option<Node<'_>> {
        self.html
            .select(&landmark.selector)
            .map(Node::new)
            .find(|node| landmark.matches(node))
    }

    /// Element siblings strictly between `start` and the first following sibling
    /// matching `end`. Runs to the last sibling when `end` is `None` or never
    /// matches; empty when `start` is not in the document.
    pub fn select_between(&self, start: &Landmark, end: Option<&Landmark>) -> Vec<Node<'_>> {
        let Some(anchor) = self.find_landmark(start) else {
            tracing::debug!("Range start landmark {:?} not found in {}", start, self.url);
            return Vec::new();
        };
        let Some(parent) = anchor.parent() else {
            return Vec::new();
        };

        let siblings = parent.element_children();
        range::bounded_range(
            &siblings,
            |node| node.same_node(&anchor),
            |node| end.is_some_and(|landmark| landmark.matches(node)),
        )
        .to_vec()
    }
}

/// Handle to one element of a [`Document`]. Queries on a node only see its
/// descendants.
#[derive(Clone, Copy, Debug)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    pub fn name(&self) -> &'a str {
        self.element.value().name()
    }

    pub fn attr(&self, attr: &str) -> Option<&'a str> {
        self.element.value().attr(attr)
    }

    pub fn same_node(&self, other: &Node<'_>) -> bool {
        self.element.id() == other.element.id()
    }

    pub fn query_nodes(&self, selector: &Selector) -> Vec<Node<'a>> {
        self.element.select(selector).map(Node::new).collect()
    }

    pub fn query_text(&self, selector: &Selector) -> Vec<String> {
        self.element
            .select(selector)
            .flat_map(|el| Node::new(el).own_text())
            .collect()
    }

    pub fn query_attr(&self, selector: &Selector, attr: &str) -> Vec<String> {
        self.element
            .select(selector)
            .filter_map(|el| el.value().attr(attr))
            .map(str::to_string)
            .collect()
    }

    /// Direct child text nodes, trimmed, blanks dropped.
    pub fn own_text(&self) -> Vec<String> {
        self.element
            .children()
            .filter_map(|child| match child.value() {
                DomNode::Text(text) => clean(text),
                _ => None,
            })
            .collect()
    }

    /// All descendant text joined with single spaces.
    pub fn text(&self) -> String {
        collapse_whitespace(&self.element.text().collect::<String>())
    }

    /// Text of every sibling after this node, text nodes included, one entry per
    /// non-blank text run.
    pub fn following_text(&self) -> Vec<String> {
        let mut collected = Vec::new();
        for sibling in self.element.next_siblings() {
            match sibling.value() {
                DomNode::Text(text) => collected.extend(clean(text)),
                DomNode::Element(_) => {
                    if let Some(el) = ElementRef::wrap(sibling) {
                        collected.extend(el.text().filter_map(clean));
                    }
                }
                _ => {}
            }
        }
        collected
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Node::new)
    }

    pub fn element_children(&self) -> Vec<Node<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .map(Node::new)
            .collect()
    }
}

/// A node that bounds a range selection: an element matching `selector` whose
/// text, when `text` is set, contains that phrase.
#[derive(Debug)]
pub struct Landmark {
    selector: Selector,
    text: Option<&'static str>,
}

impl Landmark {
    pub fn new(selector: Selector) -> Self {
        Self { selector, text: None }
    }

    pub fn containing(mut self, text: &'static str) -> Self {
        self.text = Some(text);
        self
    }

    pub fn matches(&self, node: &Node<'_>) -> bool {
        self.selector.matches(&node.element)
            && self.text.map_or(true, |phrase| node.text().contains(phrase))
    }
}

fn clean(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| collapse_whitespace(trimmed))
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
