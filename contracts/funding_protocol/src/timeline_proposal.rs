//! # Timeline-Proposal Voting
//!
//! Lets a developer in `InDevelopment` replace the rest of the timeline.
//! The proposed timeline is frozen when the vote opens: completed milestones
//! of the active timeline followed by the pending list. Pending edits are
//! refused until the vote closes.
//!
//! A failed proposal leaves the project and its active timeline untouched.

use soroban_sdk::{log, Address, Env};

use crate::milestone_completion::require_no_open_vote;
use crate::types::{ProjectStatus, TimelineProposal};
use crate::{config, events, fail, project, storage, timeline, voting, Error};

fn load_open(env: &Env, id: u64) -> TimelineProposal {
    match storage::load_proposal(env, id) {
        Some(proposal) if proposal.is_active => proposal,
        _ => fail(env, Error::InvalidState),
    }
}

/// Open a vote on the pending timeline. The completed milestones of the
/// active timeline are kept in front of it, and together they must total
/// 100: with 50% already completed, the pending list must add up to 50.
pub fn propose(env: &Env, developer: &Address, id: u64) {
    let (_, state) = project::load_owned(env, id, developer);
    if state.status != ProjectStatus::InDevelopment {
        fail(env, Error::InvalidState);
    }
    require_no_open_vote(env, id);

    let pending = storage::load_pending_timeline(env, id);
    let milestones = timeline::compose(env, &storage::load_timeline(env, id), &pending);
    if pending.is_empty() || !timeline::is_complete(&milestones) {
        log!(env, "proposed timeline rejected", id, timeline::percentage_sum(&milestones));
        fail(env, Error::InvalidPercentages);
    }

    let round = storage::load_proposal(env, id).map_or(1, |p| p.round + 1);
    let proposal = TimelineProposal {
        milestones,
        approval_count: 0,
        disapproval_count: 0,
        is_active: true,
        has_failed: false,
        proposed_at: env.ledger().timestamp(),
        round,
    };
    storage::save_proposal(env, id, &proposal);
    events::emit_timeline_proposed(env, id, round);
}

pub fn vote(env: &Env, voter: &Address, id: u64, approve: bool) -> TimelineProposal {
    if !storage::has_contribution_record(env, id, voter) {
        fail(env, Error::Unauthorized);
    }
    let mut proposal = load_open(env, id);
    voting::require_open(
        env,
        proposal.proposed_at,
        config::load(env).proposal_voting_period,
    );
    if storage::has_proposal_vote(env, id, proposal.round, voter) {
        fail(env, Error::AlreadyVoted);
    }

    if approve {
        proposal.approval_count += 1;
    } else {
        proposal.disapproval_count += 1;
    }
    storage::save_proposal_vote(env, id, proposal.round, voter, approve);
    storage::save_proposal(env, id, &proposal);

    events::emit_proposal_voted(env, id, voter.clone(), approve);
    proposal
}

/// Close the open proposal. Returns `true` when the new timeline took effect.
pub fn finalize(env: &Env, developer: &Address, id: u64) -> bool {
    project::load_owned(env, id, developer);
    let mut proposal = load_open(env, id);
    let population = storage::load_ledger(env, id).contributor_count;

    let success = voting::decide(
        env,
        proposal.approval_count,
        proposal.disapproval_count,
        population,
        proposal.proposed_at,
        config::load(env).proposal_voting_period,
    );

    proposal.is_active = false;
    proposal.has_failed = !success;
    storage::save_proposal(env, id, &proposal);
    events::emit_proposal_closed(env, id, proposal.round, success);

    if success {
        timeline::replace_active(env, id, &proposal.milestones);
    }
    success
}
