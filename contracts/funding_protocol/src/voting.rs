//! Quorum rules shared by milestone-completion and timeline-proposal votes.
//!
//! A vote closes in one of two ways:
//!
//! - **early**: approvals reach three quarters of the contributor set, which
//!   approves the vote at once;
//! - **timeout**: once the voting period has elapsed, the vote passes iff
//!   approvals outnumber disapprovals.
//!
//! Before either condition holds, finalizing fails with `VotingStillOpen`.

use soroban_sdk::Env;

use crate::{fail, Error};

const QUORUM_NUMERATOR: u64 = 3;
const QUORUM_DENOMINATOR: u64 = 4;

/// `approvals / population ≥ 3/4`, with an empty population never reaching it.
pub fn has_quorum(approvals: u32, population: u32) -> bool {
    population > 0
        && u64::from(approvals) * QUORUM_DENOMINATOR >= u64::from(population) * QUORUM_NUMERATOR
}

/// Decide a vote. Returns whether it passed, or fails with `VotingStillOpen`.
pub fn decide(
    env: &Env,
    approvals: u32,
    disapprovals: u32,
    population: u32,
    opened_at: u64,
    period: u64,
) -> bool {
    if has_quorum(approvals, population) {
        return true;
    }
    if env.ledger().timestamp() >= opened_at.saturating_add(period) {
        return approvals > disapprovals;
    }
    fail(env, Error::VotingStillOpen)
}

/// Votes are accepted until the voting period ends.
pub fn require_open(env: &Env, opened_at: u64, period: u64) {
    if env.ledger().timestamp() >= opened_at.saturating_add(period) {
        fail(env, Error::InvalidState);
    }
}
