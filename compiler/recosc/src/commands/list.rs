//! The `list` command: print the components a bundle declares.

use recos_eval::Bundle;

use super::{read_file, report_and_exit, CommandError};

/// Component names in bundle order.
pub fn list_components(source: &str) -> Result<Vec<String>, CommandError> {
    let bundle = Bundle::from_json(source)?;
    Ok(bundle.names().map(str::to_string).collect())
}

pub fn list_file(path: &str) {
    let source = read_file(path);
    match list_components(&source) {
        Ok(names) => {
            for name in names {
                println!("{name}");
            }
        }
        Err(err) => report_and_exit(&err),
    }
}
