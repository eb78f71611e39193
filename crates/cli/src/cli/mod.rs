use std::collections::BTreeMap;

use core::{Context, FlagSpec, ParseError, ParseErrorKind, Registry};
use stdio::{error as stdio_error, raw};

// define & export cli's submodules
pub mod run;

pub fn register_global_flags(registry: &mut Registry) {
    registry.add_flag(FlagSpec {
        name: "--help",
        aliases: &["-H", "help"],
        description: "show help",
    });
    registry.add_flag(FlagSpec {
        name: "--version",
        aliases: &["-V", "version"],
        description: "show version",
    });
    registry.add_flag(FlagSpec {
        name: "--verbose",
        aliases: &[],
        description: "show detailed metadata where supported",
    });
    registry.add_flag(FlagSpec {
        name: "--debug",
        aliases: &["-d", "debug"],
        description: "enable debug logging",
    });
}

// provide helpful info if no args are provided
pub fn help(registry: &Registry) {
    raw("");
    raw("Usage: luna [options] [command]");
    raw(&format!(
        "luna v{} - device bindings for scripts",
        env!("CARGO_PKG_VERSION")
    ));
    raw("");

    let dim = "\x1b[2m";
    let reset = "\x1b[0m";

    let mut grouped: BTreeMap<&str, Vec<&core::CommandSpec>> = BTreeMap::new();
    for command in registry.commands() {
        grouped.entry(command.category).or_default().push(command);
    }

    for (category, commands) in grouped {
        raw(&format!("{dim}{category}{reset}"));
        for command in commands {
            raw(&format!("  {}\t\t{}", command.name, command.summary));
        }
        raw("");
    }

    if !registry.flags().is_empty() {
        raw(&format!("{dim}flags{reset}"));
        for flag in registry.flags() {
            raw(&format!("  {}\t\t{}", flag.name, flag.description));
        }
        raw("");
    }
}

pub fn version(verbose: bool) {
    let version = env!("CARGO_PKG_VERSION");
    raw(&format!("luna [version {}]", version));
    if verbose {
        let git_sha = option_env!("LUNA_GIT_SHA").unwrap_or("unknown");
        let target = option_env!("LUNA_TARGET").unwrap_or("unknown");
        raw(&format!("git_sha: {}", git_sha));
        raw(&format!("target: {}", target));
    }
    raw("");
}

pub fn error(msg: Option<&str>) {
    stdio_error(
        "cli",
        msg.unwrap_or("instructions unclear. try '--help' for guidance"),
    );
}

pub fn execute(registry: &Registry) {
    let parsed = core::parse_env(registry);
    if !parsed.errors.is_empty() {
        let message = format_parse_errors(&parsed.errors);
        error(Some(message.as_str()));
        return;
    }

    let args = &parsed.args;
    if args.commands.is_empty() {
        if args.flags.is_empty() {
            help(registry);
            return;
        }
        if args.flags.contains_key("--help")
            || args.flags.contains_key("-H")
            || args.flags.contains_key("help")
        {
            help(registry);
            return;
        }
        if args.flags.contains_key("--version")
            || args.flags.contains_key("-V")
            || args.flags.contains_key("version")
        {
            let verbose = args.flags.contains_key("--verbose");
            version(verbose);
            return;
        }
        error(None);
        return;
    }

    let context = match Context::from_env(registry) {
        Ok(context) => context,
        Err(core::ContextError::Parse(errors)) => {
            let message = format_parse_errors(&errors);
            error(Some(message.as_str()));
            return;
        }
        Err(core::ContextError::ScriptResolve(message)) => {
            error(Some(message.as_str()));
            return;
        }
    };

    let cmd = &context.args;
    if cmd.flags.contains_key("--debug")
        || cmd.flags.contains_key("-d")
        || cmd.flags.contains_key("debug")
    {
        unsafe {
            std::env::set_var("LOG_LEVEL", "debug");
        }
    }

    let cmd_name = &cmd.commands[0];
    let Some(command) = registry.command_for(cmd_name) else {
        error(None);
        return;
    };

    (command.handler)(&context);
}

pub fn format_parse_errors(errors: &[ParseError]) -> String {
    let mut output = String::new();
    for error in errors {
        match &error.kind {
            ParseErrorKind::UnknownToken => {
                output.push_str(&format!("unknown argument '{}'", error.token));
                if !error.suggestions.is_empty() {
                    output.push_str(". did you mean ");
                    output.push_str(&format_suggestions(&error.suggestions));
                    output.push('?');
                }
                output.push('\n');
            }
            ParseErrorKind::MissingParamValue { param } => {
                output.push_str(&format!("missing value for '{}'\n", param));
            }
        }
    }
    output
}

fn format_suggestions(suggestions: &[String]) -> String {
    suggestions
        .iter()
        .map(|suggestion| format!("'{}'", suggestion))
        .collect::<Vec<String>>()
        .join(", ")
}
