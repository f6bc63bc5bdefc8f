//! # Shell Completion Module
//!
//! Generates completion scripts for the supported shells through
//! `clap_complete`.
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! musicrec completion bash > ~/.local/share/bash-completion/completions/musicrec
//!
//! # Generate zsh completions
//! musicrec completion zsh > ~/.config/zsh/completions/_musicrec
//! ```

use crate::cli::Shell;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::Write;

/// Write shell completions for `cmd` to `out`
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(gen, cmd, name, out);
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub const fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::CommandFactory;

    #[test]
    fn test_shell_conversion() {
        assert_eq!(shell_to_completion_shell(Shell::Bash), CompletionShell::Bash);
        assert_eq!(shell_to_completion_shell(Shell::Zsh), CompletionShell::Zsh);
        assert_eq!(shell_to_completion_shell(Shell::Fish), CompletionShell::Fish);
    }

    #[test]
    fn test_bash_completion_mentions_commands() {
        let mut cmd = Args::command();
        let mut out = Vec::new();
        generate_completions(CompletionShell::Bash, &mut cmd, &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("_musicrec"));
        assert!(script.contains("recommend"));
        assert!(script.contains("popular"));
    }
}
