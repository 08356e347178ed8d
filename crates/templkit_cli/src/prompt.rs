use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use templkit_io_fs::{Confirm, EnumConfirmPrompt};

/// Asks on the terminal. Without a terminal on stdin every prompt is declined,
/// so unattended runs need `--force`.
#[derive(Debug, Default)]
pub struct ConfirmTerminal;

impl Confirm for ConfirmTerminal {
    fn confirm(&mut self, prompt: &EnumConfirmPrompt) -> bool {
        if !std::io::stdin().is_terminal() {
            tracing::warn!("stdin is not a terminal; declining: {prompt}");
            return false;
        }

        if let EnumConfirmPrompt::ExistingOutputs { paths, .. } = prompt {
            println!("Warning: the following context engineering files already exist:");
            for path in paths {
                println!("  - {}", path.display());
            }
        }

        dialoguer::Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
