use std::collections::{HashMap, HashSet};

use crate::registry::Registry;

#[derive(Debug, Clone)]
pub struct Args {
    pub flags: HashMap<String, bool>,
    pub params: HashMap<String, String>,
    pub commands: Vec<String>,
    pub positionals: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub args: Args,
    pub errors: Vec<ParseError>,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub token: String,
    pub kind: ParseErrorKind,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum ParseErrorKind {
    UnknownToken,
    MissingParamValue { param: String },
}

impl ParseError {
    fn unknown(token: String, suggestions: Vec<String>) -> Self {
        Self {
            token,
            kind: ParseErrorKind::UnknownToken,
            suggestions,
        }
    }

    fn missing_param(param: String) -> Self {
        Self {
            token: param.clone(),
            kind: ParseErrorKind::MissingParamValue { param },
            suggestions: Vec::new(),
        }
    }
}

impl Args {
    pub fn collect(args: Vec<String>, registry: &Registry) -> ParseOutcome {
        let mut flags = HashMap::new();
        let mut params = HashMap::new();
        let mut commands = Vec::new();
        let mut positionals = Vec::new();
        let mut errors = Vec::new();
        let mut flag_tokens: HashSet<&'static str> = HashSet::new();
        let mut param_tokens: HashSet<&'static str> = HashSet::new();
        let suggestion_tokens = registry.suggestion_tokens();

        for flag in registry.flags() {
            flag_tokens.insert(flag.name);
            for alias in flag.aliases {
                flag_tokens.insert(alias);
            }
        }

        for param in registry.params() {
            param_tokens.insert(param.name);
        }

        let mut in_command = false;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let arg_str = arg.as_str();
            if flag_tokens.contains(arg_str) {
                flags.insert(arg.clone(), true);
                continue;
            }

            if param_tokens.contains(arg_str) {
                if let Some(value) = iter.next() {
                    params.insert(arg.clone(), value.clone());
                } else {
                    errors.push(ParseError::missing_param(arg.clone()));
                }
                continue;
            }

            if !in_command {
                if let Some(command) = registry.command_for(arg_str) {
                    commands.push(command.name.to_string());
                    in_command = true;
                    continue;
                }
            }

            if arg_str.starts_with('-') {
                let suggestions = suggest(arg_str, &suggestion_tokens);
                errors.push(ParseError::unknown(arg.clone(), suggestions));
                continue;
            }

            if in_command {
                positionals.push(arg.clone());
                continue;
            }

            let suggestions = suggest(arg_str, &suggestion_tokens);
            errors.push(ParseError::unknown(arg.clone(), suggestions));
        }

        ParseOutcome {
            args: Args {
                flags,
                params,
                commands,
                positionals,
            },
            errors,
        }
    }
}

pub fn parse_env(registry: &Registry) -> ParseOutcome {
    let args: Vec<String> = std::env::args().skip(1).collect();
    Args::collect(args, registry)
}

fn suggest(token: &str, candidates: &[String]) -> Vec<String> {
    let threshold = if token.len() <= 4 {
        1
    } else if token.len() <= 7 {
        2
    } else {
        3
    };

    let mut scored: Vec<(usize, &String)> = candidates
        .iter()
        .map(|candidate| (levenshtein(token, candidate), candidate))
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    let mut matches = Vec::new();
    for (distance, candidate) in scored {
        if distance <= threshold {
            matches.push(candidate.clone());
        }
        if matches.len() >= 3 {
            break;
        }
    }

    matches
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a.is_empty() {
        return b.chars().count();
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let b_len = b.chars().count();
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(curr[j] + 1, prev[j + 1] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::registry::{CommandSpec, FlagSpec, Registry};

    fn noop(_: &Context) {}

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.add_command(CommandSpec {
            name: "run",
            category: "runtime",
            summary: "run a script",
            aliases: &[],
            handler: noop,
        });
        registry.add_flag(FlagSpec {
            name: "--debug",
            aliases: &["-d"],
            description: "enable debug logging",
        });
        registry
    }

    fn collect(tokens: &[&str]) -> ParseOutcome {
        Args::collect(
            tokens.iter().map(|t| t.to_string()).collect(),
            &registry(),
        )
    }

    #[test]
    fn command_then_positionals() {
        let parsed = collect(&["run", "app.js", "extra"]);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.args.commands, vec!["run"]);
        assert_eq!(parsed.args.positionals, vec!["app.js", "extra"]);
    }

    #[test]
    fn flag_alias_resolves() {
        let parsed = collect(&["run", "app.js", "-d"]);
        assert!(parsed.errors.is_empty());
        assert!(parsed.args.flags.contains_key("-d"));
    }

    #[test]
    fn unknown_flag_gets_suggestion() {
        let parsed = collect(&["run", "--debgu"]);
        assert_eq!(parsed.errors.len(), 1);
        assert!(matches!(
            parsed.errors[0].kind,
            ParseErrorKind::UnknownToken
        ));
        assert!(parsed.errors[0].suggestions.contains(&"--debug".to_string()));
    }

    #[test]
    fn bare_positional_without_command_is_an_error() {
        let parsed = collect(&["app.js"]);
        assert_eq!(parsed.errors.len(), 1);
    }
}
