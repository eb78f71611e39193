mod args;
mod context;
mod registry;
mod script;

pub use args::{Args, ParseError, ParseErrorKind, ParseOutcome, parse_env};
pub use context::{Context, ContextError, EnvContext, ScriptContext};
pub use registry::{CommandSpec, FlagSpec, ParamSpec, Registry};
pub use script::{ResolvedScript, resolve_script_path};
