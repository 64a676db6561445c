//! Evaluation policies.
//!
//! The default policy reproduces how bundles behave on device: unresolved
//! identifiers read as `undefined` and blocks share their enclosing scope.
//! Hosts that want stricter checking (tests, the CLI's `--strict`) opt in.

/// What reading an identifier that nothing binds produces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnresolvedPolicy {
    /// Read as `undefined`.
    #[default]
    Nullish,
    /// Fail with `UnresolvedIdentifier`.
    Error,
}

/// Whether `{ ... }` blocks introduce a scope.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockScoping {
    /// Statements run in the enclosing scope; `let` inside a block leaks out.
    #[default]
    Shared,
    /// Each block gets a child scope.
    Lexical,
}

/// Interpreter-wide evaluation settings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EvalConfig {
    /// Maximum nested invocations, or `None` for unlimited (the stack grows
    /// on demand instead).
    pub max_call_depth: Option<usize>,
    pub unresolved: UnresolvedPolicy,
    pub block_scoping: BlockScoping,
    /// Collect [`EvalCounters`](crate::EvalCounters).
    pub profile: bool,
}

impl EvalConfig {
    /// Platform default call depth: unlimited on native, 200 on WASM.
    #[inline]
    pub fn default_max_call_depth() -> Option<usize> {
        #[cfg(target_arch = "wasm32")]
        {
            Some(200)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_call_depth: Self::default_max_call_depth(),
            unresolved: UnresolvedPolicy::default(),
            block_scoping: BlockScoping::default(),
            profile: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_device_behavior() {
        let config = EvalConfig::default();
        assert_eq!(config.unresolved, UnresolvedPolicy::Nullish);
        assert_eq!(config.block_scoping, BlockScoping::Shared);
        assert!(!config.profile);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_native_depth_is_unbounded() {
        assert_eq!(EvalConfig::default().max_call_depth, None);
    }
}
