//! # Project Registry
//!
//! Owns project configuration and the lifecycle state machine described in
//! [`crate::types`]. Every status change goes through [`transition`], which
//! refuses edges outside [`ProjectStatus::can_transition_to`].

use soroban_sdk::{log, Address, Env, String};

use crate::config::WEEK;
use crate::types::{DraftCuration, Project, ProjectConfig, ProjectState, ProjectStatus};
use crate::{contribution, events, fail, identity, storage, tiers, timeline, Error};

// ─────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────

pub fn load_config(env: &Env, id: u64) -> ProjectConfig {
    storage::load_project_config(env, id).unwrap_or_else(|| fail(env, Error::ProjectNotFound))
}

pub fn load_state(env: &Env, id: u64) -> ProjectState {
    storage::load_project_state(env, id).unwrap_or_else(|| fail(env, Error::ProjectNotFound))
}

/// Reconstruct the public [`Project`] view.
pub fn load(env: &Env, id: u64) -> Project {
    let config = load_config(env, id);
    let state = load_state(env, id);
    let ledger = storage::load_ledger(env, id);
    Project {
        id: config.id,
        developer: config.developer,
        developer_id: config.developer_id,
        title: config.title,
        description: config.description,
        about: config.about,
        status: state.status,
        min_goal: config.min_goal,
        max_goal: config.max_goal,
        contribution_period_weeks: config.contribution_period_weeks,
        no_refunds: config.no_refunds,
        no_timeline: config.no_timeline,
        funds_raised: ledger.funds_raised,
        contribution_deadline: state.contribution_deadline,
    }
}

/// Load a project on behalf of `caller`, who must be its developer.
pub fn load_owned(env: &Env, id: u64, caller: &Address) -> (ProjectConfig, ProjectState) {
    let config = load_config(env, id);
    if config.developer != *caller {
        fail(env, Error::Unauthorized);
    }
    let state = load_state(env, id);
    (config, state)
}

/// Like [`load_owned`], additionally requiring `Draft`.
fn load_owned_draft(env: &Env, id: u64, caller: &Address) -> ProjectConfig {
    let (config, state) = load_owned(env, id, caller);
    if state.status != ProjectStatus::Draft {
        fail(env, Error::InvalidState);
    }
    config
}

/// Move `id` to `to`, persisting the new state and emitting `status`.
pub fn transition(env: &Env, id: u64, state: &mut ProjectState, to: ProjectStatus) {
    let from = state.status;
    if !from.can_transition_to(&to) {
        log!(env, "illegal project transition", id, from, to);
        fail(env, Error::InvalidState);
    }
    state.status = to;
    storage::save_project_state(env, id, state);
    events::emit_status_changed(env, id, from, to);
}

// ─────────────────────────────────────────────────────────
// Draft editing
// ─────────────────────────────────────────────────────────

pub fn create_project(
    env: &Env,
    developer: &Address,
    title: String,
    description: String,
    about: String,
) -> u64 {
    let developer_id = identity::require_developer(env, developer);
    if title.is_empty() || description.is_empty() || about.is_empty() {
        fail(env, Error::InvalidSubmission);
    }

    let id = storage::next_project_id(env);
    let config = ProjectConfig {
        id,
        developer: developer.clone(),
        developer_id,
        title,
        description,
        about,
        min_goal: 0,
        max_goal: 0,
        contribution_period_weeks: 0,
        no_refunds: false,
        no_timeline: false,
    };
    let state = ProjectState {
        status: ProjectStatus::Draft,
        contribution_deadline: 0,
    };
    storage::save_project_config(env, &config);
    storage::save_project_state(env, id, &state);

    events::emit_project_created(env, id, developer.clone(), developer_id);
    id
}

pub fn edit_project_info(
    env: &Env,
    developer: &Address,
    id: u64,
    title: String,
    description: String,
    about: String,
) {
    let mut config = load_owned_draft(env, id, developer);
    if title.is_empty() || description.is_empty() || about.is_empty() {
        fail(env, Error::InvalidSubmission);
    }
    config.title = title;
    config.description = description;
    config.about = about;
    storage::save_project_config(env, &config);
}

pub fn set_contribution_goals(
    env: &Env,
    developer: &Address,
    id: u64,
    min_goal: i128,
    max_goal: i128,
    contribution_period_weeks: u32,
) {
    let mut config = load_owned_draft(env, id, developer);
    if min_goal <= 0 || min_goal > max_goal || contribution_period_weeks == 0 {
        fail(env, Error::InvalidSubmission);
    }
    config.min_goal = min_goal;
    config.max_goal = max_goal;
    config.contribution_period_weeks = contribution_period_weeks;
    storage::save_project_config(env, &config);
}

pub fn set_terms(env: &Env, developer: &Address, id: u64, no_refunds: bool, no_timeline: bool) {
    let mut config = load_owned_draft(env, id, developer);
    config.no_refunds = no_refunds;
    config.no_timeline = no_timeline;
    storage::save_project_config(env, &config);
}

// ─────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────

/// Validate the draft, promote pending timeline and tiers, open curation.
/// Any failed check aborts the whole invocation with `InvalidSubmission`.
pub fn submit_for_review(env: &Env, developer: &Address, id: u64) {
    let config = load_owned_draft(env, id, developer);
    let mut state = load_state(env, id);

    if config.min_goal <= 0 || config.contribution_period_weeks == 0 {
        fail(env, Error::InvalidSubmission);
    }
    if storage::load_pending_tiers(env, id).is_empty() {
        fail(env, Error::InvalidSubmission);
    }
    let pending = storage::load_pending_timeline(env, id);
    let timeline_ok = if config.no_timeline {
        pending.is_empty()
    } else {
        timeline::is_complete(&pending)
    };
    if !timeline_ok {
        log!(env, "pending timeline rejected", id, timeline::percentage_sum(&pending));
        fail(env, Error::InvalidSubmission);
    }

    timeline::promote_pending(env, id);
    tiers::promote_pending(env, id);
    storage::save_draft_curation(
        env,
        id,
        &DraftCuration {
            approval_count: 0,
            is_active: true,
        },
    );
    transition(env, id, &mut state, ProjectStatus::PendingReview);
}

/// PendingReview → Contributable. Reachable only from curation.
pub fn publish(env: &Env, id: u64) {
    let config = load_config(env, id);
    let mut state = load_state(env, id);
    let period = WEEK * u64::from(config.contribution_period_weeks);
    state.contribution_deadline = env.ledger().timestamp() + period;
    transition(env, id, &mut state, ProjectStatus::Contributable);
}

/// Close the contribution period.
///
/// A project that met its minimum goal moves to `InDevelopment`; one that
/// did not becomes `Refundable`. A timeline-less project that met its goal
/// has nothing to vote on, so its whole escrow is released and it completes
/// immediately.
pub fn begin_development(env: &Env, developer: &Address, id: u64) -> ProjectStatus {
    let (config, mut state) = load_owned(env, id, developer);
    if state.status != ProjectStatus::Contributable {
        fail(env, Error::InvalidState);
    }
    if env.ledger().timestamp() < state.contribution_deadline {
        fail(env, Error::PeriodNotElapsed);
    }

    let ledger = storage::load_ledger(env, id);
    if ledger.funds_raised < config.min_goal {
        transition(env, id, &mut state, ProjectStatus::Refundable);
        return state.status;
    }

    transition(env, id, &mut state, ProjectStatus::InDevelopment);
    if config.no_timeline {
        contribution::release_remaining(env, id, &config.developer);
        transition(env, id, &mut state, ProjectStatus::Completed);
    }
    state.status
}

/// Force a live project into `Refundable`, closing whichever vote is open.
pub fn cancel(env: &Env, id: u64) {
    let mut state = load_state(env, id);
    if !matches!(
        state.status,
        ProjectStatus::Contributable | ProjectStatus::InDevelopment
    ) {
        fail(env, Error::InvalidState);
    }

    if let Some(mut submission) = storage::load_completion(env, id) {
        if submission.is_active {
            submission.is_active = false;
            submission.has_failed = true;
            storage::save_completion(env, id, &submission);
            events::emit_completion_closed(env, id, submission.round, false);
        }
    }
    if let Some(mut proposal) = storage::load_proposal(env, id) {
        if proposal.is_active {
            proposal.is_active = false;
            proposal.has_failed = true;
            storage::save_proposal(env, id, &proposal);
            events::emit_proposal_closed(env, id, proposal.round, false);
        }
    }

    transition(env, id, &mut state, ProjectStatus::Refundable);
}
