//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::rc::Rc;

use super::Interpreter;
use crate::diagnostics::{CallStack, EvalCounters};
use crate::eval_mode::{BlockScoping, EvalConfig, UnresolvedPolicy};
use crate::resolver::{ModuleResolver, NoModules};

/// Builder for creating Interpreter instances.
///
/// Defaults reproduce on-device behavior: unresolved identifiers read as
/// `undefined`, blocks share their scope, the call depth is bounded only on
/// WASM, and no components are resolvable.
pub struct InterpreterBuilder {
    config: EvalConfig,
    resolver: Option<Rc<dyn ModuleResolver>>,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            config: EvalConfig::default(),
            resolver: None,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum call depth; `None` for unbounded.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.config.unresolved = policy;
        self
    }

    #[must_use]
    pub fn block_scoping(mut self, scoping: BlockScoping) -> Self {
        self.config.block_scoping = scoping;
        self
    }

    /// Collect [`EvalCounters`].
    #[must_use]
    pub fn profile(mut self, enabled: bool) -> Self {
        self.config.profile = enabled;
        self
    }

    /// Set the resolver consulted for component names.
    #[must_use]
    pub fn resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolver = Some(Rc::new(resolver));
        self
    }

    /// Share an existing resolver.
    #[must_use]
    pub fn shared_resolver(mut self, resolver: Rc<dyn ModuleResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let counters = self.config.profile.then(EvalCounters::default);
        Interpreter {
            root: Interpreter::fresh_root(),
            call_stack: CallStack::new(self.config.max_call_depth),
            hooks: Vec::new(),
            resolver: self
                .resolver
                .unwrap_or_else(|| Rc::new(NoModules) as Rc<dyn ModuleResolver>),
            config: self.config,
            counters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_applies_config() {
        let interpreter = InterpreterBuilder::new()
            .max_call_depth(Some(8))
            .unresolved(UnresolvedPolicy::Error)
            .block_scoping(BlockScoping::Lexical)
            .profile(true)
            .build();

        assert_eq!(interpreter.config().max_call_depth, Some(8));
        assert_eq!(interpreter.config().unresolved, UnresolvedPolicy::Error);
        assert_eq!(interpreter.config().block_scoping, BlockScoping::Lexical);
        assert_eq!(interpreter.counters(), Some(&EvalCounters::default()));
    }

    #[test]
    fn test_profile_off_by_default() {
        assert!(Interpreter::new().counters().is_none());
    }
}
