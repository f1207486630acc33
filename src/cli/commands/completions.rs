//! `keysafe completions`: generate shell completion scripts.
//!
//! Usage:
//!   keysafe completions bash > ~/.bash_completion.d/keysafe
//!   keysafe completions zsh
//!   keysafe completions fish
//!   keysafe completions powershell

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    write_completions(shell, &mut io::stdout());
    Ok(())
}

/// Render the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "keysafe", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_script_mentions_subcommands() {
        let script = render(Shell::Bash);
        assert!(script.contains("keysafe"));
        assert!(script.contains("list"));
        assert!(script.contains("delete"));
    }

    #[test]
    fn every_shell_renders_something() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!render(shell).is_empty(), "{shell} produced no output");
        }
    }
}
