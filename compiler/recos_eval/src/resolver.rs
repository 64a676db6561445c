//! Module-level component resolution.
//!
//! Identifiers are first offered to the [`ModuleResolver`]: a name it knows
//! evaluates to that component, ahead of any scope binding. A [`Bundle`] is
//! the usual resolver, loaded from the JSON document the bundler emits:
//!
//! ```text
//! { "components": { "HelloWorld": { "params": [], "body": { "type": "Block", ... } } } }
//! ```

use std::rc::Rc;

use indexmap::IndexMap;
use recos_ir::FunctionDecl;

/// Source of named top-level components.
pub trait ModuleResolver {
    fn resolve(&self, name: &str) -> Option<Rc<FunctionDecl>>;
}

/// Resolver with no components.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoModules;

impl ModuleResolver for NoModules {
    fn resolve(&self, _name: &str) -> Option<Rc<FunctionDecl>> {
        None
    }
}

/// Error loading a bundle.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("malformed bundle: {0}")]
    Json(#[from] serde_json::Error),
}

/// Named component declarations, in bundle order.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Bundle {
    #[serde(default)]
    components: IndexMap<String, Rc<FunctionDecl>>,
}

impl Bundle {
    pub fn new() -> Self {
        Bundle::default()
    }

    pub fn from_json(source: &str) -> Result<Self, BundleError> {
        let mut bundle: Bundle = serde_json::from_str(source)?;
        // Components are keyed by name; give anonymous declarations that
        // name so backtraces show it.
        for (name, decl) in &mut bundle.components {
            if decl.name.is_none() {
                Rc::make_mut(decl).name = Some(name.clone());
            }
        }
        Ok(bundle)
    }

    pub fn insert(&mut self, name: impl Into<String>, decl: FunctionDecl) {
        self.components.insert(name.into(), Rc::new(decl));
    }

    pub fn get(&self, name: &str) -> Option<&Rc<FunctionDecl>> {
        self.components.get(name)
    }

    /// Component names in bundle order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ModuleResolver for Bundle {
    fn resolve(&self, name: &str) -> Option<Rc<FunctionDecl>> {
        self.components.get(name).cloned()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use pretty_assertions::assert_eq;
    use recos_ir::Node;

    use super::*;

    #[test]
    fn test_no_modules() {
        assert!(NoModules.resolve("App").is_none());
    }

    #[test]
    fn test_bundle_from_json() {
        let bundle = Bundle::from_json(
            r#"{
                "components": {
                    "Greeting": {
                        "params": ["name"],
                        "body": {
                            "type": "Block",
                            "body": [{
                                "type": "Return",
                                "argument": {
                                    "type": "Binary",
                                    "op": "+",
                                    "left": { "type": "String", "value": "hi " },
                                    "right": { "type": "Identifier", "name": "name" }
                                }
                            }]
                        }
                    },
                    "Empty": { "body": { "type": "Block" } }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(bundle.names().collect::<Vec<_>>(), ["Greeting", "Empty"]);
        let greeting = bundle.resolve("Greeting").unwrap();
        assert_eq!(greeting.name.as_deref(), Some("Greeting"));
        assert_eq!(greeting.params, ["name"]);
        assert_eq!(*bundle.get("Empty").unwrap().body, Node::block(vec![]));
        assert!(bundle.resolve("Missing").is_none());
    }

    #[test]
    fn test_malformed_bundle() {
        let err = Bundle::from_json(r#"{ "components": { "A": { "body": { "type": "Nope" } } } }"#)
            .unwrap_err();
        assert!(err.to_string().starts_with("malformed bundle:"));
    }

    #[test]
    fn test_insert() {
        let mut bundle = Bundle::new();
        bundle.insert("App", FunctionDecl::new(Some("App"), &[], Node::block(vec![])));
        assert_eq!(bundle.len(), 1);
        assert!(bundle.resolve("App").is_some());
    }
}
