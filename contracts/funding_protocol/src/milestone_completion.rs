//! # Milestone-Completion Voting
//!
//! ```text
//! inactive ──submit──► open ──finalize──┬──► approved (inactive) ── next milestone released
//!                                       └──► rejected (inactive) ── project Refundable
//! ```
//!
//! A completion vote and a timeline proposal are never open at the same time.

use soroban_sdk::{log, Address, Env, String};

use crate::types::{MilestoneCompletionSubmission, ProjectStatus, ReleaseMode};
use crate::{config, contribution, events, fail, project, storage, timeline, voting, Error};

/// Fails `VoteAlreadyActive` if either vote is open on `id`.
pub fn require_no_open_vote(env: &Env, id: u64) {
    let submission_open = storage::load_completion(env, id).is_some_and(|s| s.is_active);
    let proposal_open = storage::load_proposal(env, id).is_some_and(|p| p.is_active);
    if submission_open || proposal_open {
        fail(env, Error::VoteAlreadyActive);
    }
}

fn load_open(env: &Env, id: u64) -> MilestoneCompletionSubmission {
    match storage::load_completion(env, id) {
        Some(submission) if submission.is_active => submission,
        _ => fail(env, Error::InvalidState),
    }
}

pub fn submit(env: &Env, developer: &Address, id: u64, report: String) {
    let (_, state) = project::load_owned(env, id, developer);
    if state.status != ProjectStatus::InDevelopment {
        fail(env, Error::InvalidState);
    }
    require_no_open_vote(env, id);
    if report.is_empty() {
        fail(env, Error::InvalidSubmission);
    }
    if timeline::first_incomplete(&storage::load_timeline(env, id)).is_none() {
        fail(env, Error::MilestoneNotFound);
    }

    let round = storage::load_completion(env, id).map_or(1, |s| s.round + 1);
    let submission = MilestoneCompletionSubmission {
        report,
        approval_count: 0,
        disapproval_count: 0,
        is_active: true,
        has_failed: false,
        submitted_at: env.ledger().timestamp(),
        round,
    };
    storage::save_completion(env, id, &submission);
    events::emit_completion_submitted(env, id, round);
}

pub fn vote(
    env: &Env,
    voter: &Address,
    id: u64,
    approve: bool,
) -> MilestoneCompletionSubmission {
    if !storage::has_contribution_record(env, id, voter) {
        fail(env, Error::Unauthorized);
    }
    let mut submission = load_open(env, id);
    voting::require_open(
        env,
        submission.submitted_at,
        config::load(env).completion_voting_period,
    );
    if storage::has_completion_vote(env, id, submission.round, voter) {
        fail(env, Error::AlreadyVoted);
    }

    if approve {
        submission.approval_count += 1;
    } else {
        submission.disapproval_count += 1;
    }
    storage::save_completion_vote(env, id, submission.round, voter, approve);
    storage::save_completion(env, id, &submission);

    events::emit_completion_voted(env, id, voter.clone(), approve);
    submission
}

/// Close the open submission. Returns `true` when the milestone was accepted.
pub fn finalize(env: &Env, developer: &Address, id: u64) -> bool {
    let (config, mut state) = project::load_owned(env, id, developer);
    let mut submission = load_open(env, id);
    let protocol = config::load(env);
    let population = storage::load_ledger(env, id).contributor_count;

    let success = voting::decide(
        env,
        submission.approval_count,
        submission.disapproval_count,
        population,
        submission.submitted_at,
        protocol.completion_voting_period,
    );

    submission.is_active = false;
    submission.has_failed = !success;
    storage::save_completion(env, id, &submission);
    events::emit_completion_closed(env, id, submission.round, success);

    if !success {
        project::transition(env, id, &mut state, ProjectStatus::Refundable);
        return false;
    }

    let mut active = storage::load_timeline(env, id);
    let index = timeline::first_incomplete(&active)
        .unwrap_or_else(|| fail(env, Error::MilestoneNotFound));
    let mut milestone = active
        .get(index)
        .unwrap_or_else(|| fail(env, Error::MilestoneNotFound));
    milestone.completed = true;
    active.set(index, milestone.clone());
    storage::save_timeline(env, id, &active);

    match active.get(index + 1) {
        None => {
            contribution::release_remaining(env, id, &config.developer);
            project::transition(env, id, &mut state, ProjectStatus::Completed);
        }
        Some(next) => {
            let percentage = match protocol.release_mode {
                ReleaseMode::NextMilestone => next.percentage,
                ReleaseMode::CurrentMilestone => milestone.percentage,
            };
            let released = contribution::release_share(env, id, &config.developer, percentage);
            log!(env, "milestone completed", id, index, released);
        }
    }
    true
}
