//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the protocol.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type             | Description                         |
//! |------------------|------------------|-------------------------------------|
//! | `Config`         | `ProtocolConfig` | Owner-controlled tunables           |
//! | `ProjectCount`   | `u64`            | Auto-increment project ID counter   |
//! | `DeveloperCount` | `u64`            | Auto-increment developer ID counter |
//! | `CuratorCount`   | `u64`            | Auto-increment curator ID counter   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                             | Type                            |
//! |---------------------------------|---------------------------------|
//! | `ProjConfig(id)`                | `ProjectConfig`                 |
//! | `ProjState(id)`                 | `ProjectState`                  |
//! | `Ledger(id)`                    | `ProjectLedger`                 |
//! | `Timeline(id)`                  | `Vec<Milestone>` (active)       |
//! | `PendingTimeline(id)`           | `Vec<Milestone>`                |
//! | `TimelineHistory(id)`           | `Vec<Vec<Milestone>>`           |
//! | `Tiers(id)` / `PendingTiers(id)`| `Vec<ContributionTier>`         |
//! | `Developer(dev_id)`             | `Developer`                     |
//! | `DeveloperOf(addr)`             | `u64`                           |
//! | `Curator(addr)`                 | `u64`                           |
//! | `DraftCuration(id)`             | `DraftCuration`                 |
//! | `CuratorVote(id, addr)`         | `bool`                          |
//! | `Contribution(id, addr)`        | `i128`                          |
//! | `Contributor(id, index)`        | `Address`                       |
//! | `Completion(id)`                | `MilestoneCompletionSubmission` |
//! | `CompletionVote(id, round, a)`  | `bool`                          |
//! | `Proposal(id)`                  | `TimelineProposal`              |
//! | `ProposalVote(id, round, a)`    | `bool`                          |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Vote records carry the round of the vote they belong to, so opening a new
//! vote never has to clear the previous one's records.

use soroban_sdk::{contracttype, Address, Env, IntoVal, TryFromVal, Val, Vec};

use crate::types::{
    ContributionTier, Developer, DraftCuration, Milestone, MilestoneCompletionSubmission,
    ProjectConfig, ProjectLedger, ProjectState, ProtocolConfig, TimelineProposal,
};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    ProjectCount,
    DeveloperCount,
    CuratorCount,
    ProjConfig(u64),
    ProjState(u64),
    Ledger(u64),
    Timeline(u64),
    PendingTimeline(u64),
    TimelineHistory(u64),
    Tiers(u64),
    PendingTiers(u64),
    Developer(u64),
    DeveloperOf(Address),
    Curator(Address),
    DraftCuration(u64),
    CuratorVote(u64, Address),
    Contribution(u64, Address),
    Contributor(u64, u32),
    Completion(u64),
    CompletionVote(u64, u32, Address),
    Proposal(u64),
    ProposalVote(u64, u32, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Read and increment the counter under `key`.
/// Returns the incremented value, so the first ID handed out is 1.
fn next_id(env: &Env, key: &DataKey) -> u64 {
    bump_instance(env);
    let current: u64 = env.storage().instance().get(key).unwrap_or(0);
    let next = current + 1;
    env.storage().instance().set(key, &next);
    next
}

pub fn next_project_id(env: &Env) -> u64 {
    next_id(env, &DataKey::ProjectCount)
}

pub fn next_developer_id(env: &Env) -> u64 {
    next_id(env, &DataKey::DeveloperCount)
}

pub fn next_curator_id(env: &Env) -> u64 {
    next_id(env, &DataKey::CuratorCount)
}

pub fn project_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

pub fn load_config(env: &Env) -> Option<ProtocolConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &ProtocolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn get<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn set<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

// ─────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────

pub fn load_project_config(env: &Env, id: u64) -> Option<ProjectConfig> {
    get(env, &DataKey::ProjConfig(id))
}

pub fn save_project_config(env: &Env, config: &ProjectConfig) {
    set(env, &DataKey::ProjConfig(config.id), config);
}

pub fn load_project_state(env: &Env, id: u64) -> Option<ProjectState> {
    get(env, &DataKey::ProjState(id))
}

pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    set(env, &DataKey::ProjState(id), state);
}

pub fn load_ledger(env: &Env, id: u64) -> ProjectLedger {
    get(env, &DataKey::Ledger(id)).unwrap_or_default()
}

pub fn save_ledger(env: &Env, id: u64, ledger: &ProjectLedger) {
    set(env, &DataKey::Ledger(id), ledger);
}

// ─────────────────────────────────────────────────────────
// Timelines and tiers
// ─────────────────────────────────────────────────────────

pub fn load_timeline(env: &Env, id: u64) -> Vec<Milestone> {
    get(env, &DataKey::Timeline(id)).unwrap_or_else(|| Vec::new(env))
}

pub fn save_timeline(env: &Env, id: u64, milestones: &Vec<Milestone>) {
    set(env, &DataKey::Timeline(id), milestones);
}

pub fn load_pending_timeline(env: &Env, id: u64) -> Vec<Milestone> {
    get(env, &DataKey::PendingTimeline(id)).unwrap_or_else(|| Vec::new(env))
}

pub fn save_pending_timeline(env: &Env, id: u64, milestones: &Vec<Milestone>) {
    set(env, &DataKey::PendingTimeline(id), milestones);
}

pub fn load_timeline_history(env: &Env, id: u64) -> Vec<Vec<Milestone>> {
    get(env, &DataKey::TimelineHistory(id)).unwrap_or_else(|| Vec::new(env))
}

pub fn save_timeline_history(env: &Env, id: u64, history: &Vec<Vec<Milestone>>) {
    set(env, &DataKey::TimelineHistory(id), history);
}

pub fn load_tiers(env: &Env, id: u64) -> Vec<ContributionTier> {
    get(env, &DataKey::Tiers(id)).unwrap_or_else(|| Vec::new(env))
}

pub fn save_tiers(env: &Env, id: u64, tiers: &Vec<ContributionTier>) {
    set(env, &DataKey::Tiers(id), tiers);
}

pub fn load_pending_tiers(env: &Env, id: u64) -> Vec<ContributionTier> {
    get(env, &DataKey::PendingTiers(id)).unwrap_or_else(|| Vec::new(env))
}

pub fn save_pending_tiers(env: &Env, id: u64, tiers: &Vec<ContributionTier>) {
    set(env, &DataKey::PendingTiers(id), tiers);
}

// ─────────────────────────────────────────────────────────
// Identities
// ─────────────────────────────────────────────────────────

pub fn load_developer(env: &Env, developer_id: u64) -> Option<Developer> {
    get(env, &DataKey::Developer(developer_id))
}

pub fn save_developer(env: &Env, developer: &Developer) {
    set(env, &DataKey::Developer(developer.id), developer);
    set(env, &DataKey::DeveloperOf(developer.account.clone()), &developer.id);
}

pub fn developer_id_of(env: &Env, account: &Address) -> Option<u64> {
    get(env, &DataKey::DeveloperOf(account.clone()))
}

pub fn curator_id_of(env: &Env, curator: &Address) -> Option<u64> {
    get(env, &DataKey::Curator(curator.clone()))
}

pub fn save_curator(env: &Env, curator: &Address, curator_id: u64) {
    set(env, &DataKey::Curator(curator.clone()), &curator_id);
}

// ─────────────────────────────────────────────────────────
// Curation
// ─────────────────────────────────────────────────────────

pub fn load_draft_curation(env: &Env, id: u64) -> Option<DraftCuration> {
    get(env, &DataKey::DraftCuration(id))
}

pub fn save_draft_curation(env: &Env, id: u64, curation: &DraftCuration) {
    set(env, &DataKey::DraftCuration(id), curation);
}

pub fn load_curator_vote(env: &Env, id: u64, curator: &Address) -> Option<bool> {
    get(env, &DataKey::CuratorVote(id, curator.clone()))
}

pub fn save_curator_vote(env: &Env, id: u64, curator: &Address, approve: bool) {
    set(env, &DataKey::CuratorVote(id, curator.clone()), &approve);
}

// ─────────────────────────────────────────────────────────
// Contributions
// ─────────────────────────────────────────────────────────

pub fn load_contribution(env: &Env, id: u64, contributor: &Address) -> i128 {
    get(env, &DataKey::Contribution(id, contributor.clone())).unwrap_or(0)
}

pub fn save_contribution(env: &Env, id: u64, contributor: &Address, amount: i128) {
    set(env, &DataKey::Contribution(id, contributor.clone()), &amount);
}

pub fn has_contribution_record(env: &Env, id: u64, contributor: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Contribution(id, contributor.clone()))
}

/// Contributors are stored one entry per member, indexed in arrival order
/// by `ProjectLedger::contributor_count`.
pub fn load_contributor(env: &Env, id: u64, index: u32) -> Option<Address> {
    get(env, &DataKey::Contributor(id, index))
}

pub fn save_contributor(env: &Env, id: u64, index: u32, contributor: &Address) {
    set(env, &DataKey::Contributor(id, index), contributor);
}

// ─────────────────────────────────────────────────────────
// Votes
// ─────────────────────────────────────────────────────────

pub fn load_completion(env: &Env, id: u64) -> Option<MilestoneCompletionSubmission> {
    get(env, &DataKey::Completion(id))
}

pub fn save_completion(env: &Env, id: u64, submission: &MilestoneCompletionSubmission) {
    set(env, &DataKey::Completion(id), submission);
}

pub fn has_completion_vote(env: &Env, id: u64, round: u32, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::CompletionVote(id, round, voter.clone()))
}

pub fn save_completion_vote(env: &Env, id: u64, round: u32, voter: &Address, approve: bool) {
    set(env, &DataKey::CompletionVote(id, round, voter.clone()), &approve);
}

pub fn load_proposal(env: &Env, id: u64) -> Option<TimelineProposal> {
    get(env, &DataKey::Proposal(id))
}

pub fn save_proposal(env: &Env, id: u64, proposal: &TimelineProposal) {
    set(env, &DataKey::Proposal(id), proposal);
}

pub fn has_proposal_vote(env: &Env, id: u64, round: u32, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::ProposalVote(id, round, voter.clone()))
}

pub fn save_proposal_vote(env: &Env, id: u64, round: u32, voter: &Address, approve: bool) {
    set(env, &DataKey::ProposalVote(id, round, voter.clone()), &approve);
}
