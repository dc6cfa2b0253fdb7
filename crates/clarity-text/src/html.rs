//! HTML fragment parsing, text-node rewriting and serialization.
//!
//! Note content is parsed as a `<body>` fragment into an owned DOM, edited,
//! and serialized back; nothing is shared between calls.

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{local_name, namespace_url, ns, parse_fragment, Attribute, LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use tracing::{trace, warn};

/// Attribute identifying inserted annotation spans.
pub const MARK_ATTR: &str = "data-ai-mark";

/// Classification of an annotation span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Glossary,
    Grammar,
}

impl MarkKind {
    /// Value of the `data-ai-mark` attribute.
    pub fn mark(self) -> &'static str {
        match self {
            MarkKind::Glossary => "glossary",
            MarkKind::Grammar => "grammar",
        }
    }

    /// Styling class of the span.
    pub fn class(self) -> &'static str {
        match self {
            MarkKind::Glossary => "glossary-term",
            MarkKind::Grammar => "grammar-underline",
        }
    }
}

/// Replacement content for one text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    Mark {
        kind: MarkKind,
        text: String,
        title: Option<String>,
    },
}

/// A parsed HTML fragment.
///
/// Owns the document: dropping an `RcDom` detaches every descendant, so the
/// root handle is only usable while `dom` is alive.
pub struct Fragment {
    _dom: RcDom,
    root: Handle,
}

impl Fragment {
    /// Parse `html` as the children of a `<body>` element.
    ///
    /// Malformed markup is recovered by the HTML5 parsing algorithm.
    pub fn parse(html: &str) -> Self {
        let dom = parse_fragment(
            RcDom::default(),
            ParseOpts::default(),
            QualName::new(None, ns!(html), local_name!("body")),
            Vec::new(),
        )
        .one(html);

        // Fragment parsing puts the content under a synthetic <html> root.
        let root = dom
            .document
            .children
            .borrow()
            .first()
            .cloned()
            .unwrap_or_else(|| dom.document.clone());
        Self { _dom: dom, root }
    }

    /// Concatenated text of every text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.root, &mut out);
        out
    }

    /// Text nodes outside annotation spans and literal regions.
    pub fn eligible_text_nodes(&self) -> Vec<Handle> {
        let mut nodes = Vec::new();
        collect_eligible(&self.root, false, &mut nodes);
        nodes
    }

    /// Rewrite eligible text nodes.
    ///
    /// `rewrite` returns `None` to leave a node untouched. Returns the number
    /// of annotation spans inserted.
    pub fn rewrite_text_nodes<F>(&self, mut rewrite: F) -> usize
    where
        F: FnMut(&str) -> Option<Vec<Piece>>,
    {
        let mut marks = 0;
        for node in self.eligible_text_nodes() {
            let pieces = match &node.data {
                NodeData::Text { contents } => {
                    let contents = contents.borrow();
                    rewrite(&contents)
                }
                _ => None,
            };
            let Some(pieces) = pieces else { continue };

            let replacements: Vec<Handle> = pieces
                .into_iter()
                .map(|piece| match piece {
                    Piece::Text(text) => new_text(&text),
                    Piece::Mark { kind, text, title } => {
                        marks += 1;
                        new_mark(kind, &text, title.as_deref())
                    }
                })
                .collect();
            trace!(pieces = replacements.len(), "Replacing text node");
            replace_node(&node, replacements);
        }
        marks
    }

    /// Serialize the fragment's children back to HTML.
    pub fn to_html(&self) -> std::io::Result<String> {
        let mut bytes = Vec::new();
        serialize(
            &mut bytes,
            &SerializableHandle::from(self.root.clone()),
            SerializeOpts {
                traversal_scope: TraversalScope::ChildrenOnly(None),
                ..Default::default()
            },
        )?;
        String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Plain text of an HTML fragment.
///
/// Markup is stripped and text is kept verbatim, including whitespace; the
/// same input always yields the same string.
///
/// # Examples
///
/// ```
/// use clarity_text::plain_text;
///
/// assert_eq!(plain_text("<p>Hello <b>world</b> &amp; co</p>"), "Hello world & co");
/// ```
pub fn plain_text(html: &str) -> String {
    Fragment::parse(html).text_content()
}

/// Parse, rewrite eligible text nodes, and serialize.
///
/// Never fails: if serialization errors the input is returned unchanged.
pub(crate) fn rewrite_html<F>(html: &str, component: &'static str, rewrite: F) -> (String, usize)
where
    F: FnMut(&str) -> Option<Vec<Piece>>,
{
    let fragment = Fragment::parse(html);
    let marks = fragment.rewrite_text_nodes(rewrite);
    match fragment.to_html() {
        Ok(out) => (out, marks),
        Err(e) => {
            warn!(
                subsystem = "text",
                component,
                error = %e,
                "HTML serialization failed, returning input unchanged"
            );
            (html.to_string(), 0)
        }
    }
}

fn collect_text(handle: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &handle.data {
        out.push_str(&contents.borrow());
    }
    for child in handle.children.borrow().iter() {
        collect_text(child, out);
    }
}

fn collect_eligible(handle: &Handle, excluded: bool, out: &mut Vec<Handle>) {
    let excluded = match &handle.data {
        NodeData::Text { .. } => {
            if !excluded {
                out.push(handle.clone());
            }
            return;
        }
        NodeData::Element { name, attrs, .. } => {
            excluded || is_literal(&name.local) || has_mark(&attrs.borrow())
        }
        _ => excluded,
    };
    for child in handle.children.borrow().iter() {
        collect_eligible(child, excluded, out);
    }
}

fn is_literal(name: &LocalName) -> bool {
    matches!(
        *name,
        local_name!("code")
            | local_name!("pre")
            | local_name!("script")
            | local_name!("style")
            | local_name!("textarea")
    )
}

fn has_mark(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|a| &*a.name.local == MARK_ATTR)
}

fn new_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from_slice(text)),
    })
}

fn attribute(name: LocalName, value: &str) -> Attribute {
    Attribute {
        name: QualName::new(None, ns!(), name),
        value: StrTendril::from_slice(value),
    }
}

fn new_mark(kind: MarkKind, text: &str, title: Option<&str>) -> Handle {
    let mut attrs = vec![
        attribute(local_name!("class"), kind.class()),
        attribute(LocalName::from(MARK_ATTR), kind.mark()),
    ];
    if let Some(title) = title {
        attrs.push(attribute(local_name!("title"), title));
    }

    let span = Node::new(NodeData::Element {
        name: QualName::new(None, ns!(html), local_name!("span")),
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    });
    append(&span, new_text(text));
    span
}

fn append(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

fn replace_node(node: &Handle, replacements: Vec<Handle>) {
    let Some(parent) = node.parent.take().and_then(|weak| weak.upgrade()) else {
        return;
    };
    for replacement in &replacements {
        replacement.parent.set(Some(Rc::downgrade(&parent)));
    }
    let mut children = parent.children.borrow_mut();
    if let Some(idx) = children.iter().position(|c| Rc::ptr_eq(c, node)) {
        children.splice(idx..idx + 1, replacements);
    }
}
