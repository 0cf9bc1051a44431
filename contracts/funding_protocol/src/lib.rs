//! # Funding Protocol Contract
//!
//! Milestone-based crowdfunding with curator review and contributor
//! governance. Escrow is custodied by the separate `funding_vault` contract;
//! this contract decides when and to whom it moves.
//!
//! | Phase          | Entry Point(s)                                                        |
//! |----------------|-----------------------------------------------------------------------|
//! | Bootstrap      | [`FundingProtocol::init`]                                             |
//! | Access         | `register`, `unregister`, `resolve`, `name_of`, `is_authorized`       |
//! | Configuration  | `set_curation_threshold`, `set_voting_periods`, `set_release_mode`    |
//! | Identities     | `create_developer`, `create_curator`                                  |
//! | Drafting       | `create_project`, `edit_project_info`, goals, terms, milestones, tiers|
//! | Review         | `submit_project_for_review`, `curate`, `publish_project`              |
//! | Funding        | `contribute_to_project`, `begin_project_development`                  |
//! | Governance     | milestone-completion and timeline-proposal votes                      |
//! | Exit           | `refund`, `cancel_project`                                            |
//!
//! ## Architecture
//!
//! Every entry point authenticates its first argument with `require_auth`
//! and then delegates. Authorization against the access registry lives in
//! [`registry`]; storage layout in [`storage`]; each component owns the
//! module of the same name. This file contains no business logic.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, Address, Env, String, Symbol, Vec,
};

mod config;
mod contribution;
mod curation;
pub mod events;
mod identity;
mod milestone_completion;
mod project;
pub mod registry;
mod storage;
mod tiers;
mod timeline;
mod timeline_proposal;
mod types;
mod vault;
mod voting;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod fuzz_test;
#[cfg(test)]
mod test_events;

pub use config::WEEK;
pub use types::{
    ContributionTier, Developer, DraftCuration, Milestone, MilestoneCompletionSubmission, Project,
    ProjectLedger, ProjectStatus, ProtocolConfig, ReleaseMode, TimelineProposal,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 1,
    InvalidState = 2,
    InvalidSubmission = 3,
    GoalExceeded = 4,
    PeriodNotElapsed = 5,
    NothingToRefund = 6,
    AlreadyVoted = 7,
    AlreadyCurator = 8,
    NameConflict = 9,
    RefundsDisabled = 10,
    VoteAlreadyActive = 11,
    VotingStillOpen = 12,
    InvalidPercentages = 13,
    ProjectNotFound = 14,
    MilestoneNotFound = 15,
    TierNotFound = 16,
    InvalidAmount = 17,
    AlreadyInitialized = 18,
    NotInitialized = 19,
    AlreadyDeveloper = 20,
    DeveloperNotFound = 21,
    InvalidConfig = 22,
    Overflow = 23,
}

/// Abort the invocation with `err`, reverting every write made so far.
#[inline(always)]
pub(crate) fn fail(env: &Env, err: Error) -> ! {
    panic_with_error!(env, err)
}

#[contract]
pub struct FundingProtocol;

#[contractimpl]
impl FundingProtocol {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Bind `owner` and the vault contract in the access registry.
    ///
    /// Must be called exactly once. The vault must separately be initialised
    /// with this contract as its authorized caller.
    pub fn init(env: Env, owner: Address, vault: Address) {
        owner.require_auth();
        registry::init(&env, &owner, &vault);
        storage::save_config(&env, &config::default_config());
    }

    // ─────────────────────────────────────────────────────────
    // Access registry
    // ─────────────────────────────────────────────────────────

    /// Bind `name` to `new`. `old` must name the address currently bound,
    /// if any. Owner only.
    pub fn register(env: Env, caller: Address, name: Symbol, old: Option<Address>, new: Address) {
        caller.require_auth();
        registry::register(&env, &caller, &name, old, &new);
    }

    /// Clear `name`, currently bound to `address`. Owner only.
    pub fn unregister(env: Env, caller: Address, name: Symbol, address: Address) {
        caller.require_auth();
        registry::unregister(&env, &caller, &name, &address);
    }

    pub fn resolve(env: Env, name: Symbol) -> Option<Address> {
        registry::resolve(&env, &name)
    }

    pub fn name_of(env: Env, address: Address) -> Option<Symbol> {
        registry::name_of(&env, &address)
    }

    pub fn is_authorized(env: Env, address: Address) -> bool {
        registry::is_authorized(&env, &address)
    }

    // ─────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> ProtocolConfig {
        config::load(&env)
    }

    /// Distinct curator approvals needed to publish. Must be at least 1.
    pub fn set_curation_threshold(env: Env, caller: Address, threshold: u32) {
        caller.require_auth();
        config::set_curation_threshold(&env, &caller, threshold);
    }

    pub fn get_curation_threshold(env: Env) -> u32 {
        config::load(&env).curation_threshold
    }

    /// Voting periods in seconds for completion and proposal votes.
    pub fn set_voting_periods(env: Env, caller: Address, completion: u64, proposal: u64) {
        caller.require_auth();
        config::set_voting_periods(&env, &caller, completion, proposal);
    }

    pub fn set_release_mode(env: Env, caller: Address, mode: ReleaseMode) {
        caller.require_auth();
        config::set_release_mode(&env, &caller, mode);
    }

    // ─────────────────────────────────────────────────────────
    // Identities
    // ─────────────────────────────────────────────────────────

    pub fn create_developer(env: Env, account: Address, name: String) -> u64 {
        account.require_auth();
        identity::create_developer(&env, &account, name)
    }

    pub fn get_developer(env: Env, developer_id: u64) -> Developer {
        identity::get_developer(&env, developer_id)
    }

    pub fn developer_id_of(env: Env, account: Address) -> Option<u64> {
        storage::developer_id_of(&env, &account)
    }

    pub fn is_known_developer(env: Env, account: Address) -> bool {
        identity::is_known_developer(&env, &account)
    }

    /// Join the global curator roster. Returns the curator id.
    pub fn create_curator(env: Env, curator: Address) -> u64 {
        curator.require_auth();
        curation::create_curator(&env, &curator)
    }

    pub fn is_curator(env: Env, address: Address) -> bool {
        curation::is_curator(&env, &address)
    }

    // ─────────────────────────────────────────────────────────
    // Project drafting
    // ─────────────────────────────────────────────────────────

    /// Create a `Draft` project owned by `developer`. Returns its id.
    pub fn create_project(
        env: Env,
        developer: Address,
        title: String,
        description: String,
        about: String,
    ) -> u64 {
        developer.require_auth();
        project::create_project(&env, &developer, title, description, about)
    }

    pub fn edit_project_info(
        env: Env,
        developer: Address,
        project_id: u64,
        title: String,
        description: String,
        about: String,
    ) {
        developer.require_auth();
        project::edit_project_info(&env, &developer, project_id, title, description, about);
    }

    pub fn set_project_contribution_goals(
        env: Env,
        developer: Address,
        project_id: u64,
        min_goal: i128,
        max_goal: i128,
        contribution_period_weeks: u32,
    ) {
        developer.require_auth();
        project::set_contribution_goals(
            &env,
            &developer,
            project_id,
            min_goal,
            max_goal,
            contribution_period_weeks,
        );
    }

    pub fn set_project_terms(
        env: Env,
        developer: Address,
        project_id: u64,
        no_refunds: bool,
        no_timeline: bool,
    ) {
        developer.require_auth();
        project::set_terms(&env, &developer, project_id, no_refunds, no_timeline);
    }

    /// Append a milestone to the pending timeline. Returns the pending length.
    pub fn add_milestone(
        env: Env,
        developer: Address,
        project_id: u64,
        title: String,
        description: String,
        percentage: u32,
    ) -> u32 {
        developer.require_auth();
        timeline::add_milestone(&env, &developer, project_id, title, description, percentage)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn edit_milestone(
        env: Env,
        developer: Address,
        project_id: u64,
        index: u32,
        title: String,
        description: String,
        percentage: u32,
    ) {
        developer.require_auth();
        timeline::edit_milestone(
            &env,
            &developer,
            project_id,
            index,
            title,
            description,
            percentage,
        );
    }

    pub fn clear_pending_timeline(env: Env, developer: Address, project_id: u64) {
        developer.require_auth();
        timeline::clear_pending(&env, &developer, project_id);
    }

    /// Append a reward tier to the pending tiers. Returns the pending length.
    #[allow(clippy::too_many_arguments)]
    pub fn add_contribution_tier(
        env: Env,
        developer: Address,
        project_id: u64,
        contributor_limit: u32,
        max_contribution: i128,
        min_contribution: i128,
        rewards: String,
    ) -> u32 {
        developer.require_auth();
        tiers::add_tier(
            &env,
            &developer,
            project_id,
            contributor_limit,
            max_contribution,
            min_contribution,
            rewards,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn edit_contribution_tier(
        env: Env,
        developer: Address,
        project_id: u64,
        index: u32,
        contributor_limit: u32,
        max_contribution: i128,
        min_contribution: i128,
        rewards: String,
    ) {
        developer.require_auth();
        tiers::edit_tier(
            &env,
            &developer,
            project_id,
            index,
            contributor_limit,
            max_contribution,
            min_contribution,
            rewards,
        );
    }

    pub fn clear_pending_tiers(env: Env, developer: Address, project_id: u64) {
        developer.require_auth();
        tiers::clear_pending(&env, &developer, project_id);
    }

    // ─────────────────────────────────────────────────────────
    // Review and lifecycle
    // ─────────────────────────────────────────────────────────

    /// Promote the pending timeline and tiers and open curation.
    pub fn submit_project_for_review(env: Env, developer: Address, project_id: u64) {
        developer.require_auth();
        project::submit_for_review(&env, &developer, project_id);
    }

    /// Record a curator's standing vote. Returns the approval tally.
    pub fn curate(env: Env, curator: Address, project_id: u64, approve: bool) -> u32 {
        curator.require_auth();
        curation::curate(&env, &curator, project_id, approve)
    }

    /// Open contributions once enough curators approve.
    pub fn publish_project(env: Env, developer: Address, project_id: u64) {
        developer.require_auth();
        curation::publish_project(&env, &developer, project_id);
    }

    /// Close the contribution period. Returns the resulting status.
    pub fn begin_project_development(
        env: Env,
        developer: Address,
        project_id: u64,
    ) -> ProjectStatus {
        developer.require_auth();
        project::begin_development(&env, &developer, project_id)
    }

    /// Force a live project into `Refundable`. Admin or owner only.
    pub fn cancel_project(env: Env, caller: Address, project_id: u64) {
        caller.require_auth();
        registry::require_admin_or_owner(&env, &caller);
        project::cancel(&env, project_id);
    }

    // ─────────────────────────────────────────────────────────
    // Contributions
    // ─────────────────────────────────────────────────────────

    /// Escrow `amount` into the vault. Returns the project's funds raised.
    pub fn contribute_to_project(
        env: Env,
        contributor: Address,
        project_id: u64,
        amount: i128,
    ) -> i128 {
        contributor.require_auth();
        contribution::contribute(&env, &contributor, project_id, amount)
    }

    /// Pay back the unreleased share of the caller's contribution.
    pub fn refund(env: Env, contributor: Address, project_id: u64) -> i128 {
        contributor.require_auth();
        contribution::refund(&env, &contributor, project_id)
    }

    // ─────────────────────────────────────────────────────────
    // Milestone completion
    // ─────────────────────────────────────────────────────────

    pub fn submit_milestone_completion(
        env: Env,
        developer: Address,
        project_id: u64,
        report: String,
    ) {
        developer.require_auth();
        milestone_completion::submit(&env, &developer, project_id, report);
    }

    pub fn vote_on_milestone_completion(
        env: Env,
        contributor: Address,
        project_id: u64,
        approve: bool,
    ) -> MilestoneCompletionSubmission {
        contributor.require_auth();
        milestone_completion::vote(&env, &contributor, project_id, approve)
    }

    /// Close the completion vote. Returns `true` if the milestone was accepted.
    pub fn finalize_milestone_completion(env: Env, developer: Address, project_id: u64) -> bool {
        developer.require_auth();
        milestone_completion::finalize(&env, &developer, project_id)
    }

    // ─────────────────────────────────────────────────────────
    // Timeline proposals
    // ─────────────────────────────────────────────────────────

    pub fn propose_new_timeline(env: Env, developer: Address, project_id: u64) {
        developer.require_auth();
        timeline_proposal::propose(&env, &developer, project_id);
    }

    pub fn vote_on_timeline_proposal(
        env: Env,
        contributor: Address,
        project_id: u64,
        approve: bool,
    ) -> TimelineProposal {
        contributor.require_auth();
        timeline_proposal::vote(&env, &contributor, project_id, approve)
    }

    /// Close the proposal vote. Returns `true` if the new timeline took effect.
    pub fn finalize_timeline_proposal(env: Env, developer: Address, project_id: u64) -> bool {
        developer.require_auth();
        timeline_proposal::finalize(&env, &developer, project_id)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_project(env: Env, project_id: u64) -> Project {
        project::load(&env, project_id)
    }

    pub fn project_count(env: Env) -> u64 {
        storage::project_count(&env)
    }

    pub fn get_timeline(env: Env, project_id: u64) -> Vec<Milestone> {
        storage::load_timeline(&env, project_id)
    }

    pub fn get_pending_timeline(env: Env, project_id: u64) -> Vec<Milestone> {
        storage::load_pending_timeline(&env, project_id)
    }

    pub fn get_timeline_history(env: Env, project_id: u64) -> Vec<Vec<Milestone>> {
        storage::load_timeline_history(&env, project_id)
    }

    pub fn get_contribution_tiers(env: Env, project_id: u64) -> Vec<ContributionTier> {
        storage::load_tiers(&env, project_id)
    }

    pub fn get_pending_contribution_tiers(env: Env, project_id: u64) -> Vec<ContributionTier> {
        storage::load_pending_tiers(&env, project_id)
    }

    pub fn get_draft_curation(env: Env, project_id: u64) -> Option<DraftCuration> {
        storage::load_draft_curation(&env, project_id)
    }

    pub fn curator_vote(env: Env, project_id: u64, curator: Address) -> Option<bool> {
        storage::load_curator_vote(&env, project_id, &curator)
    }

    pub fn get_contribution(env: Env, project_id: u64, contributor: Address) -> i128 {
        contribution::get_contribution(&env, project_id, &contributor)
    }

    /// One page of the contributor set, in arrival order.
    pub fn get_contributors(env: Env, project_id: u64, start: u32, limit: u32) -> Vec<Address> {
        contribution::get_contributors(&env, project_id, start, limit)
    }

    pub fn contributor_count(env: Env, project_id: u64) -> u32 {
        storage::load_ledger(&env, project_id).contributor_count
    }

    pub fn is_contributor(env: Env, project_id: u64, address: Address) -> bool {
        contribution::is_contributor(&env, project_id, &address)
    }

    pub fn get_ledger(env: Env, project_id: u64) -> ProjectLedger {
        contribution::get_ledger(&env, project_id)
    }

    pub fn get_completion_submission(
        env: Env,
        project_id: u64,
    ) -> Option<MilestoneCompletionSubmission> {
        storage::load_completion(&env, project_id)
    }

    pub fn has_voted_on_completion(env: Env, project_id: u64, voter: Address) -> bool {
        storage::load_completion(&env, project_id)
            .is_some_and(|s| storage::has_completion_vote(&env, project_id, s.round, &voter))
    }

    pub fn get_timeline_proposal(env: Env, project_id: u64) -> Option<TimelineProposal> {
        storage::load_proposal(&env, project_id)
    }

    pub fn has_voted_on_proposal(env: Env, project_id: u64, voter: Address) -> bool {
        storage::load_proposal(&env, project_id)
            .is_some_and(|p| storage::has_proposal_vote(&env, project_id, p.round, &voter))
    }
}
