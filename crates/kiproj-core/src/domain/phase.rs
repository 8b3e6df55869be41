//! Creation phase state machine.
//!
//! A single [`CreationPhase`] value tracks how far one creation attempt got.
//! Rollback eligibility is derived from it: once directory creation has
//! begun, and until the attempt completes, anything under the project root
//! belongs to this attempt and may be removed.
//!
//! ```text
//! Unstarted ─► DirsCreating ─► DirsDone ─► TemplateCopying ─► TemplateDone ─► GitSetup ─► Complete
//!     │              │             │              │                │            │
//!     ▼              └─────────────┴──────────────┴────────────────┴────────────┴─► RolledBack
//! FailedPrecondition
//! ```

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationPhase {
    #[default]
    Unstarted,
    DirsCreating,
    DirsDone,
    TemplateCopying,
    TemplateDone,
    GitSetup,
    Complete,
    /// The project root already existed; nothing was touched.
    FailedPrecondition,
    /// A step failed after directory creation began and the root was removed.
    RolledBack,
}

impl CreationPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unstarted => "unstarted",
            Self::DirsCreating => "dirs-creating",
            Self::DirsDone => "dirs-done",
            Self::TemplateCopying => "template-copying",
            Self::TemplateDone => "template-done",
            Self::GitSetup => "git-setup",
            Self::Complete => "complete",
            Self::FailedPrecondition => "failed-precondition",
            Self::RolledBack => "rolled-back",
        }
    }

    /// Whether a failure in this phase leaves behind state owned by the
    /// attempt, i.e. whether the project root must be removed.
    pub const fn requires_rollback(self) -> bool {
        matches!(
            self,
            Self::DirsCreating
                | Self::DirsDone
                | Self::TemplateCopying
                | Self::TemplateDone
                | Self::GitSetup
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Complete | Self::FailedPrecondition | Self::RolledBack
        )
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        use CreationPhase::*;

        if self.is_terminal() {
            return false;
        }
        match (self, next) {
            (Unstarted, DirsCreating) | (Unstarted, FailedPrecondition) => true,
            (DirsCreating, DirsDone)
            | (DirsDone, TemplateCopying)
            | (TemplateCopying, TemplateDone)
            | (TemplateDone, GitSetup)
            | (GitSetup, Complete) => true,
            // The root could not be claimed (a concurrent creator won the race).
            (DirsCreating, FailedPrecondition) => true,
            (from, RolledBack) => from.requires_rollback(),
            _ => false,
        }
    }

    /// Move to `next`, rejecting edges that are not part of the graph.
    pub fn transition(&mut self, next: Self) -> Result<(), DomainError> {
        if !self.can_transition_to(next) {
            return Err(DomainError::InvalidPhaseTransition {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }
}

impl fmt::Display for CreationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CreationPhase::*;

    const ALL: [CreationPhase; 9] = [
        Unstarted,
        DirsCreating,
        DirsDone,
        TemplateCopying,
        TemplateDone,
        GitSetup,
        Complete,
        FailedPrecondition,
        RolledBack,
    ];

    #[test]
    fn happy_path_walks_every_step() {
        let mut phase = CreationPhase::default();
        for next in [
            DirsCreating,
            DirsDone,
            TemplateCopying,
            TemplateDone,
            GitSetup,
            Complete,
        ] {
            phase.transition(next).unwrap();
        }
        assert_eq!(phase, Complete);
        assert!(phase.is_terminal());
    }

    #[test]
    fn rollback_only_after_directory_creation_began() {
        assert!(!Unstarted.requires_rollback());
        assert!(DirsCreating.requires_rollback());
        assert!(GitSetup.requires_rollback());
        assert!(!Complete.requires_rollback());
        assert!(!FailedPrecondition.requires_rollback());
        assert!(!RolledBack.requires_rollback());
    }

    #[test]
    fn every_rollback_eligible_phase_can_roll_back() {
        for phase in ALL {
            assert_eq!(
                phase.can_transition_to(RolledBack),
                phase.requires_rollback(),
                "{phase}"
            );
        }
    }

    #[test]
    fn unstarted_can_fail_precondition_without_cleanup() {
        let mut phase = Unstarted;
        phase.transition(FailedPrecondition).unwrap();
        assert!(phase.is_terminal());
        assert!(!phase.requires_rollback());
    }

    #[test]
    fn skipping_steps_is_rejected() {
        let mut phase = Unstarted;
        let err = phase.transition(TemplateCopying).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidPhaseTransition {
                from: Unstarted,
                to: TemplateCopying
            }
        );
        assert_eq!(phase, Unstarted);
    }

    #[test]
    fn terminal_phases_have_no_exits() {
        for from in [Complete, FailedPrecondition, RolledBack] {
            for to in ALL {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
    }
}
