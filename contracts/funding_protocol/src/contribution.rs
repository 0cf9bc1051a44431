//! # Contribution Ledger
//!
//! Tracks what each contributor escrowed and how much of every project's
//! escrow has left the vault. All token movement goes through [`vault`].
//!
//! ## Refunds
//!
//! ```text
//! released_pct = Σ percentage of completed milestones
//! refundable   = contribution * (100 - released_pct) / 100
//! ```
//!
//! `refundable` is further capped at the contributor's pro-rata share of the
//! project's remaining escrow. When releases have run ahead of completed
//! milestones, every refunder absorbs the shortfall in proportion to their
//! principal, and a project can never draw on another project's funds.

use soroban_sdk::{log, Address, Env, Vec};

use crate::types::{ProjectLedger, ProjectStatus};
use crate::{events, fail, project, storage, timeline, vault, Error};

pub fn contribute(env: &Env, contributor: &Address, id: u64, amount: i128) -> i128 {
    let config = project::load_config(env, id);
    let state = project::load_state(env, id);
    if state.status != ProjectStatus::Contributable
        || env.ledger().timestamp() >= state.contribution_deadline
    {
        fail(env, Error::InvalidState);
    }
    if amount <= 0 {
        fail(env, Error::InvalidAmount);
    }

    let mut ledger = storage::load_ledger(env, id);
    let funds_raised = ledger
        .funds_raised
        .checked_add(amount)
        .unwrap_or_else(|| fail(env, Error::Overflow));
    if funds_raised > config.max_goal {
        log!(env, "contribution exceeds max goal", id, amount, config.max_goal);
        fail(env, Error::GoalExceeded);
    }

    let previous = storage::load_contribution(env, id, contributor);
    if !storage::has_contribution_record(env, id, contributor) {
        storage::save_contributor(env, id, ledger.contributor_count, contributor);
        ledger.contributor_count += 1;
    }
    storage::save_contribution(env, id, contributor, previous + amount);

    ledger.funds_raised = funds_raised;
    storage::save_ledger(env, id, &ledger);

    vault::deposit(env, contributor, amount);
    events::emit_project_funded(env, id, contributor.clone(), amount, funds_raised);
    funds_raised
}

pub fn refund(env: &Env, contributor: &Address, id: u64) -> i128 {
    let config = project::load_config(env, id);
    if config.no_refunds {
        fail(env, Error::RefundsDisabled);
    }
    let state = project::load_state(env, id);
    if !matches!(
        state.status,
        ProjectStatus::Refundable | ProjectStatus::InDevelopment
    ) {
        fail(env, Error::InvalidState);
    }
    let contribution = storage::load_contribution(env, id, contributor);
    if contribution <= 0 {
        fail(env, Error::NothingToRefund);
    }

    let mut ledger = storage::load_ledger(env, id);
    let released_pct = timeline::released_percentage(&storage::load_timeline(env, id));
    let amount = refundable_amount(env, &ledger, contribution, released_pct);
    if amount <= 0 {
        fail(env, Error::NothingToRefund);
    }

    storage::save_contribution(env, id, contributor, 0);
    ledger.refunded += amount;
    ledger.withdrawn_principal += contribution;
    storage::save_ledger(env, id, &ledger);

    vault::withdraw(env, amount, contributor);
    events::emit_refunded(env, id, contributor.clone(), amount);
    amount
}

/// Refund owed on `contribution` given the project's current ledger.
pub fn refundable_amount(
    env: &Env,
    ledger: &ProjectLedger,
    contribution: i128,
    released_pct: u32,
) -> i128 {
    let unreleased_pct = i128::from(timeline::FULL_PERCENTAGE.saturating_sub(released_pct));
    let by_timeline = contribution
        .checked_mul(unreleased_pct)
        .unwrap_or_else(|| fail(env, Error::Overflow))
        / 100;

    let base = ledger.release_base();
    if base <= 0 {
        return 0;
    }
    let pro_rata = contribution
        .checked_mul(ledger.escrow_remaining())
        .unwrap_or_else(|| fail(env, Error::Overflow))
        / base;

    by_timeline.min(pro_rata)
}

// ─────────────────────────────────────────────────────────
// Releases to the developer
// ─────────────────────────────────────────────────────────

/// Pay `percentage` of the release base to the developer, capped at the
/// remaining escrow. Returns the amount paid.
pub fn release_share(env: &Env, id: u64, developer: &Address, percentage: u32) -> i128 {
    let ledger = storage::load_ledger(env, id);
    let share = ledger
        .release_base()
        .checked_mul(i128::from(percentage))
        .unwrap_or_else(|| fail(env, Error::Overflow))
        / 100;
    release(env, id, developer, ledger, share)
}

/// Pay whatever escrow the project still holds to the developer.
pub fn release_remaining(env: &Env, id: u64, developer: &Address) -> i128 {
    let ledger = storage::load_ledger(env, id);
    let remaining = ledger.escrow_remaining();
    release(env, id, developer, ledger, remaining)
}

fn release(
    env: &Env,
    id: u64,
    developer: &Address,
    mut ledger: ProjectLedger,
    requested: i128,
) -> i128 {
    let amount = requested.min(ledger.escrow_remaining());
    if amount <= 0 {
        return 0;
    }
    ledger.released += amount;
    storage::save_ledger(env, id, &ledger);

    vault::withdraw(env, amount, developer);
    events::emit_funds_released(env, id, developer.clone(), amount);
    amount
}

// ─────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────

pub fn get_contribution(env: &Env, id: u64, contributor: &Address) -> i128 {
    storage::load_contribution(env, id, contributor)
}

/// Largest page `get_contributors` returns.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Contributors in arrival order, starting at `start`, at most `limit`
/// (capped at [`MAX_PAGE_SIZE`]) of them.
pub fn get_contributors(env: &Env, id: u64, start: u32, limit: u32) -> Vec<Address> {
    let count = get_ledger(env, id).contributor_count;
    let end = start
        .saturating_add(limit.min(MAX_PAGE_SIZE))
        .min(count);
    let mut page = Vec::new(env);
    for index in start..end {
        if let Some(contributor) = storage::load_contributor(env, id, index) {
            page.push_back(contributor);
        }
    }
    page
}

/// Anyone who ever contributed, refunded or not. This is the voting set.
pub fn is_contributor(env: &Env, id: u64, address: &Address) -> bool {
    storage::has_contribution_record(env, id, address)
}

pub fn get_ledger(env: &Env, id: u64) -> ProjectLedger {
    project::load_config(env, id);
    storage::load_ledger(env, id)
}
