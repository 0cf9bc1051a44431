#![allow(dead_code)]

extern crate std;

use soroban_sdk::Vec;

use crate::types::{
    Milestone, MilestoneCompletionSubmission, Project, ProjectLedger, ProjectStatus,
    TimelineProposal,
};

/// INV-1: funds raised never exceed the project's maximum goal.
pub fn assert_goal_invariant(project: &Project) {
    assert!(
        project.funds_raised <= project.max_goal,
        "INV-1 violated: project {} raised {} above max goal {}",
        project.id,
        project.funds_raised,
        project.max_goal
    );
}

/// INV-2: escrow never goes negative and only leaves the vault as a release
/// or a refund.
pub fn assert_ledger_conserved(ledger: &ProjectLedger) {
    assert!(ledger.released >= 0 && ledger.refunded >= 0);
    assert!(
        ledger.released + ledger.refunded <= ledger.funds_raised,
        "INV-2 violated: released {} + refunded {} exceed raised {}",
        ledger.released,
        ledger.refunded,
        ledger.funds_raised
    );
    assert!(ledger.withdrawn_principal <= ledger.funds_raised);
}

/// INV-3: a refund never pays more than the contributor put in.
pub fn assert_refund_bounded(refund: i128, contribution: i128) {
    assert!(
        refund >= 0 && refund <= contribution,
        "INV-3 violated: refund {} for contribution {}",
        refund,
        contribution
    );
}

/// INV-4: an active timeline sums to exactly 100, or is empty for
/// timeline-less projects.
pub fn assert_timeline_percentages(timeline: &Vec<Milestone>, no_timeline: bool) {
    let sum: u32 = timeline.iter().map(|m| m.percentage).sum();
    if no_timeline {
        assert!(timeline.is_empty(), "INV-4 violated: timeline-less project has milestones");
    } else {
        assert_eq!(sum, 100, "INV-4 violated: active timeline sums to {}", sum);
    }
}

/// INV-5: completed milestones form a prefix of the active timeline.
pub fn assert_completed_prefix(timeline: &Vec<Milestone>) {
    let mut seen_incomplete = false;
    for milestone in timeline.iter() {
        if !milestone.completed {
            seen_incomplete = true;
        }
        assert!(
            !(seen_incomplete && milestone.completed),
            "INV-5 violated: completed milestone after an incomplete one"
        );
    }
}

/// INV-6: a completion vote and a timeline proposal are never open together.
pub fn assert_votes_exclusive(
    submission: &Option<MilestoneCompletionSubmission>,
    proposal: &Option<TimelineProposal>,
) {
    let submission_open = submission.as_ref().is_some_and(|s| s.is_active);
    let proposal_open = proposal.as_ref().is_some_and(|p| p.is_active);
    assert!(
        !(submission_open && proposal_open),
        "INV-6 violated: completion vote and timeline proposal both open"
    );
}

/// INV-7: only the lifecycle edges of the project state machine occur.
pub fn assert_valid_status_transition(from: &ProjectStatus, to: &ProjectStatus) {
    assert!(
        from == to || from.can_transition_to(to),
        "INV-7 violated: invalid status transition from {:?} to {:?}",
        from,
        to
    );
}

/// INV-8: the early-finalize rule is `approvals * 4 >= population * 3`.
pub fn expected_early_quorum(approvals: u32, population: u32) -> bool {
    population > 0 && u64::from(approvals) * 4 >= u64::from(population) * 3
}
