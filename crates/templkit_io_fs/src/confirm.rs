//! Yes/no decisions requested by the run pipeline.

use std::fmt;
use std::path::PathBuf;

/// A question the pipeline needs answered before touching the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumConfirmPrompt {
    /// The target has none of the usual project markers.
    NotAProject {
        /// Target directory.
        target: PathBuf,
    },
    /// Output of an earlier run is already present.
    ExistingOutputs {
        /// Target directory.
        target: PathBuf,
        /// Top-level entries that already exist, relative to `target`.
        paths: Vec<PathBuf>,
    },
}

impl fmt::Display for EnumConfirmPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAProject { target } => write!(
                f,
                "'{}' doesn't appear to contain a project. Continue?",
                target.display()
            ),
            Self::ExistingOutputs { paths, .. } => {
                let l_names = paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>();
                write!(
                    f,
                    "These files already exist: {}. Overwrite existing files?",
                    l_names.join(", ")
                )
            }
        }
    }
}

/// Answers [`EnumConfirmPrompt`]s. `true` means proceed.
pub trait Confirm {
    fn confirm(&mut self, prompt: &EnumConfirmPrompt) -> bool;
}

/// Gives the same answer to every prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmFixed(pub bool);

impl Confirm for ConfirmFixed {
    fn confirm(&mut self, _prompt: &EnumConfirmPrompt) -> bool {
        self.0
    }
}

impl<F> Confirm for F
where
    F: FnMut(&EnumConfirmPrompt) -> bool,
{
    fn confirm(&mut self, prompt: &EnumConfirmPrompt) -> bool {
        self(prompt)
    }
}
