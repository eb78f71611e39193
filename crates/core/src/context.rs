use std::collections::HashMap;
use std::path::PathBuf;

use crate::args::{Args, ParseError, parse_env};
use crate::registry::Registry;
use crate::script::{ResolvedScript, resolve_script_path};

#[derive(Debug, Clone)]
pub struct Context {
    pub args: Args,
    pub env: EnvContext,
    pub script: Option<ScriptContext>,
}

#[derive(Debug, Clone)]
pub struct EnvContext {
    pub vars: HashMap<String, String>,
    pub cwd: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ScriptContext {
    pub input: String,
    pub resolved: ResolvedScript,
}

#[derive(Debug, Clone)]
pub enum ContextError {
    Parse(Vec<ParseError>),
    ScriptResolve(String),
}

impl EnvContext {
    pub fn load() -> Self {
        let vars = std::env::vars().collect::<HashMap<_, _>>();
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { vars, cwd }
    }
}

impl ScriptContext {
    /// Resolve the first positional (or `HANDLER_PATH`) into a script.
    pub fn from_args(args: &Args) -> Result<Option<Self>, String> {
        let input = match args
            .positionals
            .first()
            .cloned()
            .or_else(|| std::env::var("HANDLER_PATH").ok())
        {
            Some(input) => input,
            None => return Ok(None),
        };

        let resolved = resolve_script_path(&input)?;
        Ok(Some(Self { input, resolved }))
    }
}

impl Context {
    pub fn from_env(registry: &Registry) -> Result<Self, ContextError> {
        let parsed = parse_env(registry);
        if !parsed.errors.is_empty() {
            return Err(ContextError::Parse(parsed.errors));
        }

        let env = EnvContext::load();
        let script =
            ScriptContext::from_args(&parsed.args).map_err(ContextError::ScriptResolve)?;

        Ok(Self {
            args: parsed.args,
            env,
            script,
        })
    }
}
