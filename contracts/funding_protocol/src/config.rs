//! Owner-controlled protocol tunables.
//!
//! A fresh deployment runs with [`default_config`]; the owner may change any
//! field afterwards. Voting periods are read when a vote is finalized, so a
//! change also moves the timeout of votes that are already open.

use soroban_sdk::{Address, Env};

use crate::types::{ProtocolConfig, ReleaseMode};
use crate::{fail, registry, storage, Error};

/// One week in seconds of ledger time.
pub const WEEK: u64 = 604_800;

pub fn default_config() -> ProtocolConfig {
    ProtocolConfig {
        curation_threshold: 1,
        completion_voting_period: 2 * WEEK,
        proposal_voting_period: 2 * WEEK,
        release_mode: ReleaseMode::NextMilestone,
    }
}

pub fn load(env: &Env) -> ProtocolConfig {
    storage::load_config(env).unwrap_or_else(default_config)
}

pub fn set_curation_threshold(env: &Env, caller: &Address, threshold: u32) {
    registry::require_owner(env, caller);
    if threshold == 0 {
        fail(env, Error::InvalidConfig);
    }
    let mut config = load(env);
    config.curation_threshold = threshold;
    storage::save_config(env, &config);
}

pub fn set_voting_periods(env: &Env, caller: &Address, completion: u64, proposal: u64) {
    registry::require_owner(env, caller);
    if completion == 0 || proposal == 0 {
        fail(env, Error::InvalidConfig);
    }
    let mut config = load(env);
    config.completion_voting_period = completion;
    config.proposal_voting_period = proposal;
    storage::save_config(env, &config);
}

pub fn set_release_mode(env: &Env, caller: &Address, mode: ReleaseMode) {
    registry::require_owner(env, caller);
    let mut config = load(env);
    config.release_mode = mode;
    storage::save_config(env, &config);
}
