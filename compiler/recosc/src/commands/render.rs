//! The `render` command: load a bundle, render one component, optionally
//! click rendered handlers, and print the final tree.

use recos_eval::{
    BlockScoping, Bundle, EvalConfig, EvalCounters, HookStoreHandle, Interpreter, NamedArgs, RenderNode,
    UnresolvedPolicy, Value,
};

use super::{read_file, report_and_exit, CommandError};

/// Options for `recos render`.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Component to render.
    pub component: String,
    /// Named arguments passed to the component.
    pub args: NamedArgs,
    /// `onClick` handlers to dispatch after the first render, by pre-order
    /// index in the tree current at the time of the click.
    pub clicks: Vec<usize>,
    pub strict: bool,
    pub lexical_blocks: bool,
    pub max_depth: Option<usize>,
    pub profile: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            component: "HelloWorld".to_string(),
            args: NamedArgs::new(),
            clicks: Vec::new(),
            strict: false,
            lexical_blocks: false,
            max_depth: EvalConfig::default_max_call_depth(),
            profile: false,
        }
    }
}

impl RenderOptions {
    fn interpreter(&self, bundle: Bundle) -> Interpreter {
        let unresolved = if self.strict {
            UnresolvedPolicy::Error
        } else {
            UnresolvedPolicy::Nullish
        };
        let block_scoping = if self.lexical_blocks {
            BlockScoping::Lexical
        } else {
            BlockScoping::Shared
        };
        Interpreter::builder()
            .unresolved(unresolved)
            .block_scoping(block_scoping)
            .max_call_depth(self.max_depth)
            .profile(self.profile)
            .resolver(bundle)
            .build()
    }
}

/// Parse the flags following `recos render <bundle.json>`.
///
/// `--arg=name=value` parses `value` as JSON and falls back to a plain
/// string, so `--arg=label=clicks` and `--arg=count=3` both work.
pub fn parse_render_options(args: &[String]) -> Result<RenderOptions, String> {
    let mut options = RenderOptions::default();
    for arg in args {
        if let Some(name) = arg.strip_prefix("--component=") {
            options.component = name.to_string();
        } else if let Some(pair) = arg.strip_prefix("--arg=") {
            let Some((name, raw)) = pair.split_once('=') else {
                return Err(format!("expected --arg=<name>=<value>, got '{arg}'"));
            };
            let value = match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(json) => Value::from(&json),
                Err(_) => Value::string(raw),
            };
            options.args.insert(name.to_string(), value);
        } else if let Some(index) = arg.strip_prefix("--click=") {
            let index = index
                .parse()
                .map_err(|_| format!("invalid click index '{index}'"))?;
            options.clicks.push(index);
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_depth = match depth {
                "none" => None,
                depth => Some(
                    depth
                        .parse()
                        .map_err(|_| format!("invalid max depth '{depth}'"))?,
                ),
            };
        } else if arg == "--strict" {
            options.strict = true;
        } else if arg == "--lexical-blocks" {
            options.lexical_blocks = true;
        } else if arg == "--profile" {
            options.profile = true;
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }
    Ok(options)
}

/// What a render session produced.
#[derive(Debug)]
pub struct RenderOutput {
    /// The tree after the last render.
    pub tree: Option<RenderNode>,
    /// Number of renders, the first one included.
    pub renders: usize,
    /// Hook state after the last commit.
    pub state: Vec<Value>,
    /// Counter report, when profiling was requested.
    pub profile: Option<String>,
}

/// Render `options.component` from the bundle in `source`, then replay
/// `options.clicks`, re-rendering whenever a click requests it.
pub fn render_bundle(source: &str, options: &RenderOptions) -> Result<RenderOutput, CommandError> {
    let bundle = Bundle::from_json(source)?;
    let mut interpreter = options.interpreter(bundle);
    let store = HookStoreHandle::default();

    let mut tree = interpreter.render_component(&options.component, &options.args, &store)?;
    let mut renders = 1;

    for &index in &options.clicks {
        let Some(current) = &tree else {
            return Err(CommandError::NothingRendered {
                component: options.component.clone(),
            });
        };
        let handlers = current.handlers("onClick");
        let Some(&handler) = handlers.get(index) else {
            return Err(CommandError::NoSuchHandler {
                index,
                available: handlers.len(),
            });
        };
        let handler = handler.clone();
        tracing::debug!(index, "clicking onClick handler");
        interpreter.dispatch_event(&handler, Vec::new())?;

        if store.borrow_mut().take_rerender_request() {
            tree = interpreter.render_component(&options.component, &options.args, &store)?;
            renders += 1;
        }
    }

    let state = store.borrow().state().to_vec();
    Ok(RenderOutput {
        tree,
        renders,
        state,
        profile: interpreter.counters().map(EvalCounters::report),
    })
}

/// `recos render`: print the final tree to stdout, the profile to stderr.
pub fn render_file(path: &str, options: &RenderOptions) {
    let source = read_file(path);
    match render_bundle(&source, options) {
        Ok(output) => {
            match &output.tree {
                Some(tree) => print!("{tree}"),
                None => println!("(nothing rendered)"),
            }
            if let Some(report) = &output.profile {
                eprintln!("{report}");
                eprintln!("  renders:               {}", output.renders);
            }
        }
        Err(err) => report_and_exit(&err),
    }
}
