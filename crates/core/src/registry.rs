use crate::context::Context;

/// A top-level CLI command.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub category: &'static str,
    pub summary: &'static str,
    pub aliases: &'static [&'static str],
    pub handler: fn(&Context),
}

/// A boolean flag (`--watch`), possibly with aliases (`-W`).
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

/// A parameter that consumes the following token as its value.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// Registry of everything the CLI understands. Commands register
/// themselves at startup; the parser and help output both read from
/// here so they can never disagree.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<CommandSpec>,
    flags: Vec<FlagSpec>,
    params: Vec<ParamSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: CommandSpec) {
        self.commands.push(command);
    }

    pub fn add_flag(&mut self, flag: FlagSpec) {
        self.flags.push(flag);
    }

    pub fn add_param(&mut self, param: ParamSpec) {
        self.params.push(param);
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn flags(&self) -> &[FlagSpec] {
        &self.flags
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Look up a command by name or alias.
    pub fn command_for(&self, token: &str) -> Option<&CommandSpec> {
        self.commands
            .iter()
            .find(|command| command.name == token || command.aliases.contains(&token))
    }

    /// Every token worth suggesting when the user typos something.
    pub fn suggestion_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        for command in &self.commands {
            tokens.push(command.name.to_string());
            for alias in command.aliases {
                tokens.push((*alias).to_string());
            }
        }
        for flag in &self.flags {
            tokens.push(flag.name.to_string());
            for alias in flag.aliases {
                tokens.push((*alias).to_string());
            }
        }
        for param in &self.params {
            tokens.push(param.name.to_string());
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Context) {}

    #[test]
    fn command_lookup_matches_aliases() {
        let mut registry = Registry::new();
        registry.add_command(CommandSpec {
            name: "run",
            category: "runtime",
            summary: "run a script",
            aliases: &["r"],
            handler: noop,
        });

        assert!(registry.command_for("run").is_some());
        assert!(registry.command_for("r").is_some());
        assert!(registry.command_for("serve").is_none());
    }
}
