//! Developer identities.
//!
//! Only registered developers may create projects. One account maps to one
//! developer id, handed out from 1.

use soroban_sdk::{Address, Env, String};

use crate::types::Developer;
use crate::{events, fail, storage, Error};

pub fn create_developer(env: &Env, account: &Address, name: String) -> u64 {
    if name.is_empty() {
        fail(env, Error::InvalidSubmission);
    }
    if storage::developer_id_of(env, account).is_some() {
        fail(env, Error::AlreadyDeveloper);
    }

    let id = storage::next_developer_id(env);
    storage::save_developer(
        env,
        &Developer {
            id,
            account: account.clone(),
            name,
        },
    );

    events::emit_developer_created(env, id, account.clone());
    id
}

pub fn get_developer(env: &Env, developer_id: u64) -> Developer {
    storage::load_developer(env, developer_id)
        .unwrap_or_else(|| fail(env, Error::DeveloperNotFound))
}

pub fn is_known_developer(env: &Env, account: &Address) -> bool {
    storage::developer_id_of(env, account).is_some()
}

/// The developer id of `account`, or `Unauthorized` if it has none.
pub fn require_developer(env: &Env, account: &Address) -> u64 {
    storage::developer_id_of(env, account).unwrap_or_else(|| fail(env, Error::Unauthorized))
}
