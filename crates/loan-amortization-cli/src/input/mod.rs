pub mod file;
pub mod stdin;

use log::debug;
use serde_json::Value;

/// Resolve the JSON request for a command: `--input` wins over piped stdin.
/// `None` means neither was supplied and the command should fall back to flags.
pub fn load_request(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        debug!("reading request from {path}");
        return file::read_json_value(path).map(Some);
    }
    let piped = stdin::read_stdin()?;
    if piped.is_some() {
        debug!("reading request from stdin");
    }
    Ok(piped)
}
