//! # Types
//!
//! Shared data structures used across all modules of the funding protocol.
//!
//! ## Config / State split
//!
//! A `Project` is stored as two ledger entries:
//!
//! - [`ProjectConfig`]: title, goals and terms. Editable while the project is
//!   a `Draft`, frozen afterwards.
//! - [`ProjectState`]: status and contribution deadline, written on every
//!   lifecycle transition.
//!
//! Money lives in a third entry, [`ProjectLedger`], owned by the contribution
//! module. The public API returns the reconstructed [`Project`].
//!
//! ## Status as a Finite-State Machine
//!
//! ```text
//! Draft ──► PendingReview ──► Contributable ──┬──► InDevelopment ──┬──► Completed
//!                                             │                    │
//!                                             └──► Refundable ◄────┘
//! ```
//!
//! No state can be re-entered once left. [`ProjectStatus::can_transition_to`]
//! is the single source of truth for the edges above.

use soroban_sdk::{contracttype, Address, String, Vec};

/// Current lifecycle state of a project.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    /// Being written by its developer; config, timeline and tiers editable.
    Draft,
    /// Submitted; waiting for curator approvals.
    PendingReview,
    /// Published; accepting contributions until the deadline.
    Contributable,
    /// Goal met; funds are released milestone by milestone.
    InDevelopment,
    /// Goal missed, a completion vote failed or an admin cancelled the project.
    Refundable,
    /// Final milestone accepted; all escrow released.
    Completed,
}

impl ProjectStatus {
    pub fn can_transition_to(&self, next: &ProjectStatus) -> bool {
        matches!(
            (self, next),
            (ProjectStatus::Draft, ProjectStatus::PendingReview)
                | (ProjectStatus::PendingReview, ProjectStatus::Contributable)
                | (ProjectStatus::Contributable, ProjectStatus::InDevelopment)
                | (ProjectStatus::Contributable, ProjectStatus::Refundable)
                | (ProjectStatus::InDevelopment, ProjectStatus::Refundable)
                | (ProjectStatus::InDevelopment, ProjectStatus::Completed)
        )
    }
}

/// Project configuration, editable only while `Draft`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub developer: Address,
    pub developer_id: u64,
    pub title: String,
    pub description: String,
    pub about: String,
    pub min_goal: i128,
    pub max_goal: i128,
    pub contribution_period_weeks: u32,
    pub no_refunds: bool,
    pub no_timeline: bool,
}

/// Mutable lifecycle state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    pub status: ProjectStatus,
    /// Ledger timestamp at which contributions close. Zero until published.
    pub contribution_deadline: u64,
}

/// Escrow accounting for one project.
///
/// The vault holds a single pooled balance; this record is what keeps each
/// project's share apart. Remaining escrow is
/// `funds_raised - released - refunded`.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProjectLedger {
    /// Total ever contributed. Never decreases.
    pub funds_raised: i128,
    /// Paid out to the developer.
    pub released: i128,
    /// Paid back to contributors.
    pub refunded: i128,
    /// Principal of contributors who have taken a refund.
    pub withdrawn_principal: i128,
    /// Unique addresses that ever contributed; the voting population.
    pub contributor_count: u32,
}

impl ProjectLedger {
    pub fn escrow_remaining(&self) -> i128 {
        self.funds_raised - self.released - self.refunded
    }

    /// Principal still backing the project; milestone releases are a
    /// percentage of this.
    pub fn release_base(&self) -> i128 {
        self.funds_raised - self.withdrawn_principal
    }
}

/// Full project view returned by `get_project`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Auto-incremented unique ID, starting at 1.
    pub id: u64,
    /// Address that created the project and receives released funds.
    pub developer: Address,
    pub developer_id: u64,
    pub title: String,
    pub description: String,
    pub about: String,
    pub status: ProjectStatus,
    pub min_goal: i128,
    pub max_goal: i128,
    pub contribution_period_weeks: u32,
    pub no_refunds: bool,
    pub no_timeline: bool,
    pub funds_raised: i128,
    pub contribution_deadline: u64,
}

/// One step of a project timeline.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub title: String,
    pub description: String,
    /// Share of the raised funds tied to this milestone, 0–100.
    pub percentage: u32,
    pub completed: bool,
}

/// Reward tier offered to contributors.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionTier {
    pub contributor_limit: u32,
    pub max_contribution: i128,
    pub min_contribution: i128,
    pub rewards: String,
}

/// Registered developer identity.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Developer {
    pub id: u64,
    pub account: Address,
    pub name: String,
}

/// Curator tally for a project awaiting review.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DraftCuration {
    pub approval_count: u32,
    /// True from submission for review until publication.
    pub is_active: bool,
}

/// The single milestone-completion vote of a project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneCompletionSubmission {
    pub report: String,
    pub approval_count: u32,
    pub disapproval_count: u32,
    pub is_active: bool,
    pub has_failed: bool,
    pub submitted_at: u64,
    /// Incremented per submission; vote records are keyed by it.
    pub round: u32,
}

/// The single timeline-revision vote of a project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimelineProposal {
    /// Completed milestones carried forward followed by the pending ones.
    pub milestones: Vec<Milestone>,
    pub approval_count: u32,
    pub disapproval_count: u32,
    pub is_active: bool,
    pub has_failed: bool,
    pub proposed_at: u64,
    pub round: u32,
}

/// How much is released when a milestone completion is approved.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReleaseMode {
    /// Release the share of the milestone about to begin (the one after the
    /// milestone just completed).
    NextMilestone,
    /// Release the share of the milestone just completed.
    CurrentMilestone,
}

/// Protocol-wide tunables, owner-controlled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    /// Distinct curator approvals required to publish.
    pub curation_threshold: u32,
    /// Seconds after submission when a completion vote can be closed by timeout.
    pub completion_voting_period: u64,
    /// Seconds after proposal when a timeline vote can be closed by timeout.
    pub proposal_voting_period: u64,
    pub release_mode: ReleaseMode,
}
