//! Debugging harness wrapping the trainer process

use serde::{Deserialize, Serialize};

/// How the trainer process is wrapped.
///
/// `PostMortem` runs the script under `python -m pdb -c continue`: execution
/// starts immediately, and an uncaught failure drops into an interactive
/// debugger session instead of tearing the process down. This is the whole
/// point of the launcher, so it is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugHarness {
    /// Post-mortem debugging via pdb
    #[default]
    PostMortem,
    /// Plain `python script.py ...`, no debugger attached
    Disabled,
}

impl DebugHarness {
    /// Interpreter arguments inserted before the script path
    pub fn interpreter_args(&self) -> &'static [&'static str] {
        match self {
            DebugHarness::PostMortem => &["-m", "pdb", "-c", "continue"],
            DebugHarness::Disabled => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_mortem_continues_from_start() {
        assert_eq!(
            DebugHarness::PostMortem.interpreter_args(),
            ["-m", "pdb", "-c", "continue"]
        );
    }

    #[test]
    fn test_disabled_harness_adds_nothing() {
        assert!(DebugHarness::Disabled.interpreter_args().is_empty());
    }
}
