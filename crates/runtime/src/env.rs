//! Process environment setup before the runtime starts.

use std::path::Path;

/// Load `.env` from the working directory and default `LOG_LEVEL`.
/// Variables already set in the environment are never overwritten.
pub(crate) fn init_env() {
    load_dotenv(Path::new(".env"));

    if std::env::var("LOG_LEVEL").is_err() {
        unsafe {
            std::env::set_var("LOG_LEVEL", "error");
        }
    }
}

fn load_dotenv(path: &Path) {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"').trim_matches('\'');
        if !key.is_empty() && std::env::var(key).is_err() {
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}
