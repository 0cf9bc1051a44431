//! # Curation Gate
//!
//! Curators decide which submitted projects may seek funding. Each curator
//! holds one standing vote per project and may change it while the project
//! is under review; the approval tally is maintained incrementally:
//!
//! | stored     | new        | tally |
//! |------------|------------|-------|
//! | none       | approve    | +1    |
//! | none       | disapprove | 0     |
//! | approve    | disapprove | −1    |
//! | disapprove | approve    | +1    |
//! | same       | same       | 0     |
//!
//! `publish_project` is the only path from `PendingReview` to `Contributable`.

use soroban_sdk::{Address, Env};

use crate::types::{DraftCuration, ProjectStatus};
use crate::{config, events, fail, project, storage, Error};

pub fn create_curator(env: &Env, curator: &Address) -> u64 {
    if storage::curator_id_of(env, curator).is_some() {
        fail(env, Error::AlreadyCurator);
    }
    let id = storage::next_curator_id(env);
    storage::save_curator(env, curator, id);
    events::emit_curator_created(env, id, curator.clone());
    id
}

pub fn is_curator(env: &Env, address: &Address) -> bool {
    storage::curator_id_of(env, address).is_some()
}

fn load_active(env: &Env, id: u64) -> DraftCuration {
    match storage::load_draft_curation(env, id) {
        Some(curation) if curation.is_active => curation,
        _ => fail(env, Error::InvalidState),
    }
}

/// Record `curator`'s standing vote. Returns the approval tally.
pub fn curate(env: &Env, curator: &Address, id: u64, approve: bool) -> u32 {
    if !is_curator(env, curator) {
        fail(env, Error::Unauthorized);
    }
    project::load_config(env, id);
    let mut curation = load_active(env, id);

    let previous = storage::load_curator_vote(env, id, curator);
    if previous == Some(approve) {
        return curation.approval_count;
    }
    match (previous, approve) {
        (Some(true), false) => curation.approval_count -= 1,
        (_, true) => curation.approval_count += 1,
        _ => {}
    }

    storage::save_curator_vote(env, id, curator, approve);
    storage::save_draft_curation(env, id, &curation);
    events::emit_project_curated(env, id, curator.clone(), approve, curation.approval_count);
    curation.approval_count
}

pub fn publish_project(env: &Env, developer: &Address, id: u64) {
    let (_, state) = project::load_owned(env, id, developer);
    if state.status != ProjectStatus::PendingReview {
        fail(env, Error::InvalidState);
    }
    let mut curation = load_active(env, id);
    if curation.approval_count < config::load(env).curation_threshold {
        fail(env, Error::InvalidState);
    }

    curation.is_active = false;
    storage::save_draft_curation(env, id, &curation);
    project::publish(env, id);
}
