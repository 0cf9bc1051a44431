//! # Access Registry
//!
//! Binds short names to addresses. The protocol trusts exactly the addresses
//! bound here:
//!
//! ```text
//! owner ── may (re)bind and unbind every name, tunes ProtocolConfig
//! admin ── may cancel projects
//! vault ── the custody contract all escrow moves through
//! ```
//!
//! ## Storage layout
//!
//! - `RegistryKey::Binding(name)` → `Address`, the address bound to `name`.
//! - `RegistryKey::Holder(addr)`  → `Symbol`, the name `addr` is bound to.
//!
//! An address is bound to **at most one name**, so both maps stay in sync.
//!
//! ## Event emissions
//!
//! | Event topic  | Trigger                   |
//! |--------------|---------------------------|
//! | `bound`      | Name bound or rebound     |
//! | `unbound`    | Name cleared              |
//!
//! ## Threat model notes
//!
//! - Rebinding requires the caller to name the address it expects to replace,
//!   so two racing owner transactions cannot silently clobber each other.
//! - `owner` cannot be unbound; it can only be handed over with `register`.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{fail, Error};

pub const OWNER: Symbol = symbol_short!("owner");
pub const ADMIN: Symbol = symbol_short!("admin");
pub const VAULT: Symbol = symbol_short!("vault");

// ─────────────────────────────────────────────────────────
// Storage keys
// ─────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryKey {
    Binding(Symbol),
    Holder(Address),
}

fn store_binding(env: &Env, name: &Symbol, address: &Address) {
    let storage = env.storage().persistent();
    storage.set(&RegistryKey::Binding(name.clone()), address);
    storage.set(&RegistryKey::Holder(address.clone()), name);
}

fn clear_binding(env: &Env, name: &Symbol, address: &Address) {
    let storage = env.storage().persistent();
    storage.remove(&RegistryKey::Binding(name.clone()));
    storage.remove(&RegistryKey::Holder(address.clone()));
}

// ─────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────

/// The address bound to `name`, if any.
pub fn resolve(env: &Env, name: &Symbol) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&RegistryKey::Binding(name.clone()))
}

/// The name `address` is bound to, if any.
pub fn name_of(env: &Env, address: &Address) -> Option<Symbol> {
    env.storage()
        .persistent()
        .get(&RegistryKey::Holder(address.clone()))
}

/// `true` when `address` is bound to any name.
pub fn is_authorized(env: &Env, address: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&RegistryKey::Holder(address.clone()))
}

/// The vault contract address. Panics with `NotInitialized` before `init`.
pub fn vault_address(env: &Env) -> Address {
    resolve(env, &VAULT).unwrap_or_else(|| fail(env, Error::NotInitialized))
}

// ─────────────────────────────────────────────────────────
// Initialisation
// ─────────────────────────────────────────────────────────

/// Bind `owner` and `vault`. Panics with `AlreadyInitialized` if an owner
/// is already bound.
pub fn init(env: &Env, owner: &Address, vault: &Address) {
    if resolve(env, &OWNER).is_some() {
        fail(env, Error::AlreadyInitialized);
    }
    if owner == vault {
        fail(env, Error::NameConflict);
    }
    store_binding(env, &OWNER, owner);
    store_binding(env, &VAULT, vault);

    emit_bound(env, &OWNER, None, owner);
    emit_bound(env, &VAULT, None, vault);
}

// ─────────────────────────────────────────────────────────
// Binding management
// ─────────────────────────────────────────────────────────

/// Bind `name` to `new`, replacing `old`.
///
/// - `caller` must be the bound owner.
/// - `new` may not already be bound under a different name.
/// - If `name` is already bound, `old` must equal the current address.
///   If `name` is unbound, `old` is ignored.
pub fn register(env: &Env, caller: &Address, name: &Symbol, old: Option<Address>, new: &Address) {
    require_owner(env, caller);

    if let Some(held) = name_of(env, new) {
        if held != *name {
            fail(env, Error::NameConflict);
        }
    }

    let previous = resolve(env, name);
    if let Some(ref current) = previous {
        if old.as_ref() != Some(current) {
            fail(env, Error::NameConflict);
        }
        clear_binding(env, name, current);
    }

    store_binding(env, name, new);
    emit_bound(env, name, previous, new);
}

/// Clear `name`, which must currently be bound to `address`.
/// The owner binding cannot be cleared.
pub fn unregister(env: &Env, caller: &Address, name: &Symbol, address: &Address) {
    require_owner(env, caller);

    if *name == OWNER {
        fail(env, Error::Unauthorized);
    }
    match resolve(env, name) {
        Some(ref current) if current == address => clear_binding(env, name, current),
        _ => fail(env, Error::NameConflict),
    }

    env.events()
        .publish((symbol_short!("unbound"), name.clone()), address.clone());
}

// ─────────────────────────────────────────────────────────
// Access guards (called from lib.rs handlers)
// ─────────────────────────────────────────────────────────

/// Assert that `address` is the bound owner.
pub fn require_owner(env: &Env, address: &Address) {
    match resolve(env, &OWNER) {
        Some(ref owner) if owner == address => {}
        Some(_) => fail(env, Error::Unauthorized),
        None => fail(env, Error::NotInitialized),
    }
}

/// Assert that `address` is bound to `admin` or `owner`.
pub fn require_admin_or_owner(env: &Env, address: &Address) {
    match name_of(env, address) {
        Some(ref name) if *name == ADMIN || *name == OWNER => {}
        _ => fail(env, Error::Unauthorized),
    }
}

/// Topic: `(bound, name)`
/// Data:  `(previous, new)`
fn emit_bound(env: &Env, name: &Symbol, previous: Option<Address>, new: &Address) {
    env.events()
        .publish((symbol_short!("bound"), name.clone()), (previous, new.clone()));
}
