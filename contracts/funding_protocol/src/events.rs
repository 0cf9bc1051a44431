use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::ProjectStatus;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeveloperCreated {
    pub developer_id: u64,
    pub account: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub developer: Address,
    pub developer_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusChanged {
    pub project_id: u64,
    pub from: ProjectStatus,
    pub to: ProjectStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CuratorCreated {
    pub curator_id: u64,
    pub curator: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCurated {
    pub project_id: u64,
    pub curator: Address,
    pub approve: bool,
    pub approval_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectFunded {
    pub project_id: u64,
    pub contributor: Address,
    pub amount: i128,
    pub funds_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRefunded {
    pub project_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsReleased {
    pub project_id: u64,
    pub developer: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteOpened {
    pub project_id: u64,
    pub round: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCast {
    pub project_id: u64,
    pub voter: Address,
    pub approve: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteClosed {
    pub project_id: u64,
    pub round: u32,
    pub success: bool,
}

pub fn emit_developer_created(env: &Env, developer_id: u64, account: Address) {
    let topics = (symbol_short!("dev_new"), developer_id);
    let data = DeveloperCreated {
        developer_id,
        account,
    };
    env.events().publish(topics, data);
}

pub fn emit_project_created(env: &Env, project_id: u64, developer: Address, developer_id: u64) {
    let topics = (symbol_short!("created"), project_id);
    let data = ProjectCreated {
        project_id,
        developer,
        developer_id,
    };
    env.events().publish(topics, data);
}

pub fn emit_status_changed(env: &Env, project_id: u64, from: ProjectStatus, to: ProjectStatus) {
    let topics = (symbol_short!("status"), project_id);
    let data = StatusChanged {
        project_id,
        from,
        to,
    };
    env.events().publish(topics, data);
}

pub fn emit_curator_created(env: &Env, curator_id: u64, curator: Address) {
    let topics = (symbol_short!("curator"), curator_id);
    env.events().publish(topics, CuratorCreated { curator_id, curator });
}

pub fn emit_project_curated(
    env: &Env,
    project_id: u64,
    curator: Address,
    approve: bool,
    approval_count: u32,
) {
    let topics = (symbol_short!("curated"), project_id);
    let data = ProjectCurated {
        project_id,
        curator,
        approve,
        approval_count,
    };
    env.events().publish(topics, data);
}

pub fn emit_project_funded(
    env: &Env,
    project_id: u64,
    contributor: Address,
    amount: i128,
    funds_raised: i128,
) {
    let topics = (symbol_short!("funded"), project_id);
    let data = ProjectFunded {
        project_id,
        contributor,
        amount,
        funds_raised,
    };
    env.events().publish(topics, data);
}

pub fn emit_refunded(env: &Env, project_id: u64, contributor: Address, amount: i128) {
    let topics = (symbol_short!("refunded"), project_id);
    let data = ContributionRefunded {
        project_id,
        contributor,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_funds_released(env: &Env, project_id: u64, developer: Address, amount: i128) {
    let topics = (symbol_short!("released"), project_id);
    let data = FundsReleased {
        project_id,
        developer,
        amount,
    };
    env.events().publish(topics, data);
}

// ── Milestone completion votes ───────────────────────────

pub fn emit_completion_submitted(env: &Env, project_id: u64, round: u32) {
    let topics = (symbol_short!("ms_submit"), project_id);
    env.events().publish(topics, VoteOpened { project_id, round });
}

pub fn emit_completion_voted(env: &Env, project_id: u64, voter: Address, approve: bool) {
    let topics = (symbol_short!("ms_vote"), project_id);
    let data = VoteCast {
        project_id,
        voter,
        approve,
    };
    env.events().publish(topics, data);
}

pub fn emit_completion_closed(env: &Env, project_id: u64, round: u32, success: bool) {
    let topics = (symbol_short!("ms_final"), project_id);
    let data = VoteClosed {
        project_id,
        round,
        success,
    };
    env.events().publish(topics, data);
}

// ── Timeline proposal votes ──────────────────────────────

pub fn emit_timeline_proposed(env: &Env, project_id: u64, round: u32) {
    let topics = (symbol_short!("tl_prop"), project_id);
    env.events().publish(topics, VoteOpened { project_id, round });
}

pub fn emit_proposal_voted(env: &Env, project_id: u64, voter: Address, approve: bool) {
    let topics = (symbol_short!("tl_vote"), project_id);
    let data = VoteCast {
        project_id,
        voter,
        approve,
    };
    env.events().publish(topics, data);
}

pub fn emit_proposal_closed(env: &Env, project_id: u64, round: u32, success: bool) {
    let topics = (symbol_short!("tl_final"), project_id);
    let data = VoteClosed {
        project_id,
        round,
        success,
    };
    env.events().publish(topics, data);
}
