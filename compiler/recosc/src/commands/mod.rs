//! Command handlers for the `recos` CLI.
//!
//! Each submodule implements one command. Shared helpers such as
//! `read_file` live here in the module root.

mod list;
mod render;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

pub use list::{list_components, list_file};
pub use render::{parse_render_options, render_bundle, render_file, RenderOptions, RenderOutput};

use recos_eval::{BundleError, EvalError};

/// Failure of a command after its input was read.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Bundle(#[from] BundleError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("`{component}` rendered nothing; there is no handler to click")]
    NothingRendered { component: String },
    #[error("click {index} is out of range: the tree has {available} onClick handler(s)")]
    NoSuchHandler { index: usize, available: usize },
}

/// Print `err` with its backtrace, if any, and exit with status 1.
pub(crate) fn report_and_exit(err: &CommandError) -> ! {
    eprintln!("error: {err}");
    if let CommandError::Eval(EvalError {
        backtrace: Some(backtrace),
        ..
    }) = err
    {
        eprint!("{backtrace}");
    }
    std::process::exit(1);
}

/// Read a file, printing a friendly message and exiting if it can't be read.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
