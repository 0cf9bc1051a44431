//! Cross-contract access to the funding vault.
//!
//! The protocol never touches the escrow token directly. Every movement goes
//! through the vault bound under `vault` in the access registry, with this
//! contract's own address as the authorized caller.

use soroban_sdk::{contractclient, Address, Env};

use crate::registry;

#[allow(dead_code)]
#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn deposit(env: Env, caller: Address, from: Address, amount: i128) -> i128;
    fn withdraw(env: Env, caller: Address, amount: i128, recipient: Address) -> i128;
    fn get_balance(env: Env) -> i128;
}

fn client(env: &Env) -> VaultClient<'_> {
    VaultClient::new(env, &registry::vault_address(env))
}

/// Pull `amount` from `from` into the vault.
pub fn deposit(env: &Env, from: &Address, amount: i128) {
    client(env).deposit(&env.current_contract_address(), from, &amount);
}

/// Pay `amount` out of the vault to `recipient`.
pub fn withdraw(env: &Env, amount: i128, recipient: &Address) {
    client(env).withdraw(&env.current_contract_address(), &amount, recipient);
}
