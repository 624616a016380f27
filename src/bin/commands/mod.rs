pub mod config;
pub mod database;
pub mod link;
pub mod runtime;
pub mod scene;
pub mod setting;
pub mod widget;

use std::path::PathBuf;

use anyhow::anyhow;

/// Print a JSON response from the app surface
///
/// Returns `false` when the response carries an `error` key.
pub(crate) fn print_response(body: &str, pretty: bool) -> bool {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => {
            println!("{}", body);
            return true;
        }
    };

    let ok = value.get("error").is_none();
    let output = if pretty {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string())
    } else {
        body.to_string()
    };

    if ok {
        println!("{}", output);
    } else {
        eprintln!("{}", output);
    }
    ok
}

/// Read widget code from a file, `-` meaning stdin
pub(crate) fn read_code(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin())
            .map_err(|e| anyhow!("Failed to read code from stdin: {}", e));
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read code from '{}': {}", path.display(), e))
}
