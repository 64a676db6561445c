//! JSX element rendering.
//!
//! Attributes are evaluated in the element's scope. `style` attributes are
//! merged into one mapping, `onXxx` attributes holding functions become
//! event handlers bound to the innermost stateful frame, and the rest land
//! in `props`. Children are then resolved per element kind.

use indexmap::IndexMap;
use recos_ir::{JsxElement, Node};

use super::{Exit, Interpreter};
use crate::diagnostics::EvalCounters;
use crate::environment::ScopeRef;
use crate::errors::{type_mismatch, EvalResult};
use crate::render::{ElementKind, EventHandler, RenderChild, RenderNode};
use crate::value::{format_number, Value};

impl Interpreter {
    /// Render `element`, or `None` for element kinds nothing renders.
    pub(crate) fn render_element(
        &mut self,
        element: &JsxElement,
        scope: &ScopeRef,
    ) -> EvalResult<Option<RenderNode>> {
        let Some(kind) = ElementKind::from_name(&element.name) else {
            tracing::warn!(element = %element.name, "unhandled element kind; nothing rendered");
            return Ok(None);
        };
        self.count(EvalCounters::count_element);

        let mut node = RenderNode::new(kind);
        for attribute in &element.attributes {
            let Some(value) = &attribute.value else {
                tracing::warn!(
                    element = %element.name,
                    attribute = %attribute.name,
                    "attribute without a value skipped"
                );
                continue;
            };
            if attribute.name == "style" {
                self.merge_style(value, scope, &mut node.style)?;
                continue;
            }
            match self.eval_expr(value, scope)? {
                Value::Function(callback) if is_event_name(&attribute.name) => {
                    let owner = self.hooks.last().map(|ctx| ctx.frame_scope().clone());
                    node.events
                        .insert(attribute.name.clone(), EventHandler { callback, owner });
                }
                value => {
                    node.props.insert(attribute.name.clone(), value);
                }
            }
        }

        match kind {
            ElementKind::RecyclerView => self.render_list(&mut node)?,
            ElementKind::Text => self.render_text(element, scope, &mut node)?,
            ElementKind::Image => render_image(&mut node)?,
            ElementKind::View => self.render_view(element, scope, &mut node)?,
        }
        Ok(Some(node))
    }

    /// Merge a `style` value, one object or a comma sequence of objects,
    /// into `style`. Later keys win.
    fn merge_style(
        &mut self,
        value: &Node,
        scope: &ScopeRef,
        style: &mut IndexMap<String, Value>,
    ) -> EvalResult<()> {
        let parts = match value {
            Node::Sequence { expressions } => expressions.as_slice(),
            single => std::slice::from_ref(single),
        };
        for part in parts {
            match self.eval_expr(part, scope)? {
                Value::Object(object) => style.extend(object.snapshot()),
                other => return Err(type_mismatch("style object", other.type_name())),
            }
        }
        Ok(())
    }

    /// `count` children, each a render of the `render` callback with the
    /// item index as its first argument.
    fn render_list(&mut self, node: &mut RenderNode) -> EvalResult<()> {
        let render = node.props.shift_remove("render");
        let count = match node.props.get("count") {
            None => 0,
            Some(count) => count
                .as_integer()
                .ok_or_else(|| type_mismatch("number", count.type_name()))?,
        };
        if count <= 0 {
            return Ok(());
        }
        let callback = match render {
            Some(Value::Function(callback)) => callback,
            Some(other) => return Err(type_mismatch("function", other.type_name())),
            None => {
                tracing::warn!(count, "RecyclerView without a render callback");
                return Ok(());
            }
        };
        for index in 0..count {
            if let Some(child) = self.render_function(&callback, vec![Value::Int(index)])? {
                node.children.push(RenderChild::Node(child));
            }
        }
        Ok(())
    }

    /// Concatenate text and expression children into one text child.
    fn render_text(
        &mut self,
        element: &JsxElement,
        scope: &ScopeRef,
        node: &mut RenderNode,
    ) -> EvalResult<()> {
        let mut text = String::new();
        for child in &element.children {
            match child {
                Node::JsxText { text: fragment } => text.push_str(fragment),
                expression => {
                    let value = self.eval_expr(expression, scope)?;
                    if let Some(fragment) = text_fragment(&value)? {
                        text.push_str(&fragment);
                    }
                }
            }
        }
        if !text.is_empty() {
            node.children.push(RenderChild::Text(text));
        }
        Ok(())
    }

    /// Elements, component calls and text, in order. A call that returns a
    /// plain value contributes it as text.
    fn render_view(
        &mut self,
        element: &JsxElement,
        scope: &ScopeRef,
        node: &mut RenderNode,
    ) -> EvalResult<()> {
        for child in &element.children {
            match child {
                Node::JsxText { text } => {
                    if !text.trim().is_empty() {
                        node.children.push(RenderChild::Text(text.clone()));
                    }
                }
                Node::JsxElement(_) | Node::Call { .. } => match self.render_exit(Some(child), scope)? {
                    Exit::Render(Some(rendered)) => node.children.push(RenderChild::Node(rendered)),
                    Exit::Render(None) => {}
                    Exit::Value(value) => {
                        if let Some(fragment) = text_fragment(&value)? {
                            node.children.push(RenderChild::Text(fragment));
                        }
                    }
                },
                expression => {
                    let value = self.eval_expr(expression, scope)?;
                    if let Some(fragment) = text_fragment(&value)? {
                        node.children.push(RenderChild::Text(fragment));
                    }
                }
            }
        }
        Ok(())
    }
}

/// `source` must be a string; the renderer shows `placeholder` until it loads.
fn render_image(node: &mut RenderNode) -> EvalResult<()> {
    match node.props.get("source") {
        None | Some(Value::Str(_)) => {}
        Some(other) => return Err(type_mismatch("string", other.type_name())),
    }
    node.props
        .insert("placeholder".to_string(), Value::string("placeholder"));
    Ok(())
}

/// Text for an expression child: numbers in decimal form, nullish values
/// skipped.
fn text_fragment(value: &Value) -> EvalResult<Option<String>> {
    match value {
        Value::Str(s) => Ok(Some(s.to_string())),
        Value::Int(n) => Ok(Some(n.to_string())),
        Value::Float(n) => Ok(Some(format_number(*n))),
        Value::Null | Value::Undefined => Ok(None),
        other => Err(type_mismatch("text", other.type_name())),
    }
}

/// `onClick`, `onPress`, ...
fn is_event_name(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert!(is_event_name("onClick"));
        assert!(is_event_name("onLongPress"));
        assert!(!is_event_name("on"));
        assert!(!is_event_name("once"));
        assert!(!is_event_name("source"));
    }

    #[test]
    fn test_text_fragments() {
        assert_eq!(text_fragment(&Value::Float(2.5)).unwrap(), Some("2.5".into()));
        assert_eq!(text_fragment(&Value::Int(3)).unwrap(), Some("3".into()));
        assert_eq!(text_fragment(&Value::Null).unwrap(), None);
        assert!(text_fragment(&Value::Bool(true)).is_err());
    }
}
