//! Render output: the element tree handed to the native renderer.
//!
//! A `RenderNode` is fully resolved: styles are merged into one mapping,
//! attribute expressions are evaluated, and event handlers carry the scope
//! of the stateful frame that rendered them.

use std::fmt;

use indexmap::IndexMap;

use crate::environment::ScopeRef;
use crate::value::{FunctionValue, Value};

/// Element kinds the evaluator knows how to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Generic container.
    View,
    Text,
    Image,
    /// Virtualized list driven by `count` and a `render` callback.
    RecyclerView,
}

impl ElementKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "View" => Some(ElementKind::View),
            "Text" => Some(ElementKind::Text),
            "Image" => Some(ElementKind::Image),
            "RecyclerView" => Some(ElementKind::RecyclerView),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ElementKind::View => "View",
            ElementKind::Text => "Text",
            ElementKind::Image => "Image",
            ElementKind::RecyclerView => "RecyclerView",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A script callback attached to a rendered element.
#[derive(Clone, Debug)]
pub struct EventHandler {
    pub callback: FunctionValue,
    /// Scope of the stateful frame that rendered the element, if any.
    /// Dispatch marks it with `needUpdate` so setters request a re-render.
    pub owner: Option<ScopeRef>,
}

/// One child of a rendered element.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderChild {
    Text(String),
    Node(RenderNode),
}

/// A resolved element.
#[derive(Clone, Debug)]
pub struct RenderNode {
    pub kind: ElementKind,
    pub props: IndexMap<String, Value>,
    pub style: IndexMap<String, Value>,
    pub children: Vec<RenderChild>,
    pub events: IndexMap<String, EventHandler>,
}

impl RenderNode {
    pub fn new(kind: ElementKind) -> Self {
        RenderNode {
            kind,
            props: IndexMap::new(),
            style: IndexMap::new(),
            children: Vec::new(),
            events: IndexMap::new(),
        }
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                RenderChild::Text(text) => Some(text.as_str()),
                RenderChild::Node(_) => None,
            })
            .collect()
    }

    /// Direct element children.
    pub fn child_nodes(&self) -> impl Iterator<Item = &RenderNode> {
        self.children.iter().filter_map(|child| match child {
            RenderChild::Node(node) => Some(node),
            RenderChild::Text(_) => None,
        })
    }

    /// Every handler for `event` in the tree, in pre-order.
    pub fn handlers(&self, event: &str) -> Vec<&EventHandler> {
        let mut found = Vec::new();
        self.collect_handlers(event, &mut found);
        found
    }

    fn collect_handlers<'a>(&'a self, event: &str, found: &mut Vec<&'a EventHandler>) {
        if let Some(handler) = self.events.get(event) {
            found.push(handler);
        }
        for child in self.child_nodes() {
            child.collect_handlers(event, found);
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{indent}<{}", self.kind)?;
        for (name, value) in &self.props {
            write!(f, " {name}={}", PropDisplay(value))?;
        }
        if !self.style.is_empty() {
            f.write_str(" style={")?;
            for (i, (name, value)) in self.style.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}: {}", PropDisplay(value))?;
            }
            f.write_str("}")?;
        }
        for name in self.events.keys() {
            write!(f, " {name}")?;
        }
        if self.children.is_empty() {
            return writeln!(f, " />");
        }
        writeln!(f, ">")?;
        for child in &self.children {
            match child {
                RenderChild::Text(text) => writeln!(f, "{indent}  {text:?}")?,
                RenderChild::Node(node) => node.write_tree(f, depth + 1)?,
            }
        }
        writeln!(f, "{indent}</{}>", self.kind)
    }
}

/// Structural equality; handlers compare by callback identity.
impl PartialEq for RenderNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.props == other.props
            && self.style == other.style
            && self.children == other.children
            && self.events.len() == other.events.len()
            && self
                .events
                .iter()
                .zip(&other.events)
                .all(|((a_name, a), (b_name, b))| a_name == b_name && a.callback == b.callback)
    }
}

/// Indented, JSX-like rendering of the whole tree.
impl fmt::Display for RenderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Strings quoted, everything else as displayed.
struct PropDisplay<'a>(&'a Value);

impl fmt::Display for PropDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Str(s) => write!(f, "{:?}", &**s),
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_element_kind_names() {
        assert_eq!(ElementKind::from_name("RecyclerView"), Some(ElementKind::RecyclerView));
        assert_eq!(ElementKind::from_name("Button"), None);
        assert_eq!(ElementKind::Image.as_str(), "Image");
    }

    #[test]
    fn test_display_tree() {
        let mut text = RenderNode::new(ElementKind::Text);
        text.style.insert("fontSize".into(), Value::Int(14));
        text.children.push(RenderChild::Text("count: 1".into()));

        let mut image = RenderNode::new(ElementKind::Image);
        image.props.insert("source".into(), Value::string("a.png"));

        let mut root = RenderNode::new(ElementKind::View);
        root.children.push(RenderChild::Node(text));
        root.children.push(RenderChild::Node(image));

        assert_eq!(
            root.to_string(),
            "<View>\n  <Text style={fontSize: 14}>\n    \"count: 1\"\n  </Text>\n  <Image source=\"a.png\" />\n</View>\n"
        );
    }

    #[test]
    fn test_handlers_in_pre_order() {
        let first = FunctionValue::native("first", |_| Ok(Value::Undefined));
        let second = FunctionValue::native("second", |_| Ok(Value::Undefined));

        let mut inner = RenderNode::new(ElementKind::Text);
        inner.events.insert(
            "onClick".into(),
            EventHandler {
                callback: second.clone(),
                owner: None,
            },
        );
        let mut root = RenderNode::new(ElementKind::View);
        root.events.insert(
            "onClick".into(),
            EventHandler {
                callback: first.clone(),
                owner: None,
            },
        );
        root.children.push(RenderChild::Node(inner));

        let handlers = root.handlers("onClick");
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0].callback, first);
        assert_eq!(handlers[1].callback, second);
        assert!(root.handlers("onPress").is_empty());
    }

    #[test]
    fn test_text_of_children() {
        let mut node = RenderNode::new(ElementKind::Text);
        node.children.push(RenderChild::Text("a".into()));
        node.children.push(RenderChild::Text("b".into()));
        assert_eq!(node.text(), "ab");
    }
}
