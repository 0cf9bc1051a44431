//! # Timeline
//!
//! Each project keeps three milestone lists:
//!
//! - **pending**: edited freely by the developer, validated only when promoted;
//! - **active**: the timeline contributors vote against;
//! - **history**: every active list that a successful proposal superseded.
//!
//! Percentages are checked in two phases. A single milestone above 100 is
//! rejected on entry; the sum rule (exactly 100) is checked when the pending
//! list is promoted, either on submission for review or through a proposal.
//!
//! Completed milestones always form a prefix of the active list.

use soroban_sdk::{Address, Env, String, Vec};

use crate::types::{Milestone, ProjectStatus};
use crate::{fail, project, storage, Error};

pub const FULL_PERCENTAGE: u32 = 100;

// ─────────────────────────────────────────────────────────
// Pure helpers
// ─────────────────────────────────────────────────────────

pub fn percentage_sum(milestones: &Vec<Milestone>) -> u32 {
    milestones
        .iter()
        .fold(0u32, |sum, m| sum.saturating_add(m.percentage))
}

/// A promotable timeline: non-empty, every share within 0–100, summing to 100.
pub fn is_complete(milestones: &Vec<Milestone>) -> bool {
    !milestones.is_empty()
        && milestones.iter().all(|m| m.percentage <= FULL_PERCENTAGE)
        && percentage_sum(milestones) == FULL_PERCENTAGE
}

/// Sum of completed percentages; the share of funds no longer refundable.
pub fn released_percentage(milestones: &Vec<Milestone>) -> u32 {
    milestones
        .iter()
        .filter(|m| m.completed)
        .fold(0u32, |sum, m| sum.saturating_add(m.percentage))
}

pub fn first_incomplete(milestones: &Vec<Milestone>) -> Option<u32> {
    milestones
        .iter()
        .position(|m| !m.completed)
        .map(|index| index as u32)
}

/// Completed milestones of `active` followed by `pending`.
pub fn compose(env: &Env, active: &Vec<Milestone>, pending: &Vec<Milestone>) -> Vec<Milestone> {
    let mut composed = Vec::new(env);
    for milestone in active.iter().filter(|m| m.completed) {
        composed.push_back(milestone);
    }
    composed.append(pending);
    composed
}

// ─────────────────────────────────────────────────────────
// Pending edits
// ─────────────────────────────────────────────────────────

/// Pending edits are open while drafting and during development, except
/// while a timeline proposal is being voted on.
fn require_editable(env: &Env, developer: &Address, id: u64) {
    let (_, state) = project::load_owned(env, id, developer);
    if !matches!(
        state.status,
        ProjectStatus::Draft | ProjectStatus::InDevelopment
    ) {
        fail(env, Error::InvalidState);
    }
    if let Some(proposal) = storage::load_proposal(env, id) {
        if proposal.is_active {
            fail(env, Error::VoteAlreadyActive);
        }
    }
}

fn new_milestone(env: &Env, title: String, description: String, percentage: u32) -> Milestone {
    if title.is_empty() || description.is_empty() || percentage > FULL_PERCENTAGE {
        fail(env, Error::InvalidSubmission);
    }
    Milestone {
        title,
        description,
        percentage,
        completed: false,
    }
}

/// Append to the pending timeline. Returns the new pending length.
pub fn add_milestone(
    env: &Env,
    developer: &Address,
    id: u64,
    title: String,
    description: String,
    percentage: u32,
) -> u32 {
    require_editable(env, developer, id);
    let milestone = new_milestone(env, title, description, percentage);

    let mut pending = storage::load_pending_timeline(env, id);
    pending.push_back(milestone);
    storage::save_pending_timeline(env, id, &pending);
    pending.len()
}

pub fn edit_milestone(
    env: &Env,
    developer: &Address,
    id: u64,
    index: u32,
    title: String,
    description: String,
    percentage: u32,
) {
    require_editable(env, developer, id);
    let mut pending = storage::load_pending_timeline(env, id);
    if index >= pending.len() {
        fail(env, Error::MilestoneNotFound);
    }
    pending.set(index, new_milestone(env, title, description, percentage));
    storage::save_pending_timeline(env, id, &pending);
}

pub fn clear_pending(env: &Env, developer: &Address, id: u64) {
    require_editable(env, developer, id);
    storage::save_pending_timeline(env, id, &Vec::new(env));
}

// ─────────────────────────────────────────────────────────
// Promotion
// ─────────────────────────────────────────────────────────

/// Draft submission: pending becomes active as is.
pub fn promote_pending(env: &Env, id: u64) {
    let pending = storage::load_pending_timeline(env, id);
    storage::save_timeline(env, id, &pending);
    storage::save_pending_timeline(env, id, &Vec::new(env));
}

/// Accepted proposal: archive the active list and install `proposed`.
pub fn replace_active(env: &Env, id: u64, proposed: &Vec<Milestone>) {
    let mut history = storage::load_timeline_history(env, id);
    history.push_back(storage::load_timeline(env, id));
    storage::save_timeline_history(env, id, &history);
    storage::save_timeline(env, id, proposed);
    storage::save_pending_timeline(env, id, &Vec::new(env));
}

#[cfg(test)]
mod test {
    use super::*;

    fn milestone(env: &Env, percentage: u32, completed: bool) -> Milestone {
        Milestone {
            title: String::from_str(env, "m"),
            description: String::from_str(env, "d"),
            percentage,
            completed,
        }
    }

    #[test]
    fn test_is_complete_requires_exact_hundred() {
        let env = Env::default();
        let mut list = Vec::new(&env);
        assert!(!is_complete(&list));
        list.push_back(milestone(&env, 40, false));
        list.push_back(milestone(&env, 50, false));
        assert!(!is_complete(&list));
        list.push_back(milestone(&env, 10, false));
        assert!(is_complete(&list));
        list.push_back(milestone(&env, 0, false));
        assert!(is_complete(&list));
    }

    #[test]
    fn test_compose_keeps_completed_prefix() {
        let env = Env::default();
        let active = Vec::from_array(
            &env,
            [
                milestone(&env, 20, true),
                milestone(&env, 30, false),
                milestone(&env, 50, false),
            ],
        );
        let pending = Vec::from_array(&env, [milestone(&env, 80, false)]);

        let composed = compose(&env, &active, &pending);

        assert_eq!(composed.len(), 2);
        assert_eq!(released_percentage(&composed), 20);
        assert_eq!(first_incomplete(&composed), Some(1));
        assert!(is_complete(&composed));
    }

    #[test]
    fn test_first_incomplete_none_when_all_done() {
        let env = Env::default();
        let active = Vec::from_array(&env, [milestone(&env, 100, true)]);
        assert_eq!(first_incomplete(&active), None);
        assert_eq!(released_percentage(&active), 100);
    }
}
