//! Contribution tiers.
//!
//! Tiers are drafted in a pending list and promoted together with the
//! timeline on submission for review. They can only be edited in `Draft`.

use soroban_sdk::{Address, Env, String, Vec};

use crate::types::{ContributionTier, ProjectStatus};
use crate::{fail, project, storage, Error};

fn require_draft(env: &Env, developer: &Address, id: u64) {
    let (_, state) = project::load_owned(env, id, developer);
    if state.status != ProjectStatus::Draft {
        fail(env, Error::InvalidState);
    }
}

fn new_tier(
    env: &Env,
    contributor_limit: u32,
    max_contribution: i128,
    min_contribution: i128,
    rewards: String,
) -> ContributionTier {
    if contributor_limit == 0
        || min_contribution <= 0
        || min_contribution > max_contribution
        || rewards.is_empty()
    {
        fail(env, Error::InvalidSubmission);
    }
    ContributionTier {
        contributor_limit,
        max_contribution,
        min_contribution,
        rewards,
    }
}

/// Append to the pending tiers. Returns the new pending length.
pub fn add_tier(
    env: &Env,
    developer: &Address,
    id: u64,
    contributor_limit: u32,
    max_contribution: i128,
    min_contribution: i128,
    rewards: String,
) -> u32 {
    require_draft(env, developer, id);
    let tier = new_tier(env, contributor_limit, max_contribution, min_contribution, rewards);

    let mut pending = storage::load_pending_tiers(env, id);
    pending.push_back(tier);
    storage::save_pending_tiers(env, id, &pending);
    pending.len()
}

#[allow(clippy::too_many_arguments)]
pub fn edit_tier(
    env: &Env,
    developer: &Address,
    id: u64,
    index: u32,
    contributor_limit: u32,
    max_contribution: i128,
    min_contribution: i128,
    rewards: String,
) {
    require_draft(env, developer, id);
    let mut pending = storage::load_pending_tiers(env, id);
    if index >= pending.len() {
        fail(env, Error::TierNotFound);
    }
    let tier = new_tier(env, contributor_limit, max_contribution, min_contribution, rewards);
    pending.set(index, tier);
    storage::save_pending_tiers(env, id, &pending);
}

pub fn clear_pending(env: &Env, developer: &Address, id: u64) {
    require_draft(env, developer, id);
    storage::save_pending_tiers(env, id, &Vec::new(env));
}

pub fn promote_pending(env: &Env, id: u64) {
    let pending = storage::load_pending_tiers(env, id);
    storage::save_tiers(env, id, &pending);
    storage::save_pending_tiers(env, id, &Vec::new(env));
}
