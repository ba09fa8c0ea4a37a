//! Build phase tracking
//!
//! A solution build moves through
//! `Init -> Selected -> [PacksInstalled] -> Converted -> Processing(0..n) -> Done`,
//! and any failure moves it straight to `Failed`. There is no way back out
//! of `Done` or `Failed`.

use std::fmt;

/// Discrete state of a solution build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildPhase {
    /// Tool environment prepared
    Init,
    /// Contexts to build resolved
    Selected,
    /// Missing packs installed
    PacksInstalled,
    /// Solution converted into descriptors
    Converted,
    /// Building the i-th selected context
    Processing(usize),
    /// All selected contexts built
    Done,
    /// Aborted
    Failed,
}

impl BuildPhase {
    /// Whether moving from `self` to `next` is allowed
    pub fn can_advance_to(self, next: BuildPhase) -> bool {
        use BuildPhase::{Converted, Done, Failed, Init, PacksInstalled, Processing, Selected};

        match (self, next) {
            (Done | Failed, _) => false,
            (_, Failed)
            | (Init, Selected)
            | (Selected, PacksInstalled | Converted)
            | (PacksInstalled, Converted)
            | (Converted, Processing(0) | Done)
            | (Processing(_), Done) => true,
            (Processing(i), Processing(j)) => j == i + 1,
            _ => false,
        }
    }

    /// Whether the build has finished, successfully or not
    pub fn is_terminal(self) -> bool {
        matches!(self, BuildPhase::Done | BuildPhase::Failed)
    }
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Selected => write!(f, "selected"),
            Self::PacksInstalled => write!(f, "packs-installed"),
            Self::Converted => write!(f, "converted"),
            Self::Processing(i) => write!(f, "processing[{i}]"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Records the phases a build went through
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    history: Vec<BuildPhase>,
}

impl PhaseTracker {
    /// Start in [`BuildPhase::Init`]
    pub fn new() -> Self {
        Self {
            history: vec![BuildPhase::Init],
        }
    }

    /// Current phase
    pub fn current(&self) -> BuildPhase {
        self.history.last().copied().unwrap_or(BuildPhase::Init)
    }

    /// Move to `next`
    pub fn advance(&mut self, next: BuildPhase) {
        let current = self.current();
        debug_assert!(
            current.can_advance_to(next),
            "invalid build phase transition {current} -> {next}"
        );
        tracing::debug!("build phase: {current} -> {next}");
        self.history.push(next);
    }

    /// Phases visited so far, oldest first
    pub fn history(&self) -> &[BuildPhase] {
        &self.history
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}
