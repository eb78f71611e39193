use std::path::{Path, PathBuf};

/// The script the runtime was asked to execute.
#[derive(Debug, Clone)]
pub struct ResolvedScript {
    pub path: PathBuf,
    pub directory: PathBuf,
}

/// Resolve a user-supplied script path to an absolute file.
///
/// A directory argument falls back to `main.js` inside it, matching
/// how a bare `luna run .` is expected to behave.
pub fn resolve_script_path(input: &str) -> Result<ResolvedScript, String> {
    let candidate = PathBuf::from(input);
    let candidate = if candidate.is_dir() {
        candidate.join("main.js")
    } else {
        candidate
    };

    if !candidate.is_file() {
        return Err(format!("script not found: {}", candidate.display()));
    }

    let path = absolutize(&candidate);
    let directory = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(ResolvedScript { path, directory })
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_script_reports_path() {
        let err = resolve_script_path("does-not-exist.js").unwrap_err();
        assert!(err.contains("does-not-exist.js"));
    }
}
