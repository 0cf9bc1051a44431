extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, Symbol, TryIntoVal, Val, Vec,
};

use crate::events::{ProjectCreated, ProjectFunded, StatusChanged, VoteClosed};
use crate::registry::ADMIN;
use crate::test::{
    contribute, draft_project, project_in_development, published_project, setup, text, Harness,
};
use crate::ProjectStatus;

/// Data of the last event this contract published under `topic`.
fn last_event(h: &Harness, topic: Symbol, project_id: u64) -> Val {
    let expected_topics: Vec<Val> =
        vec![&h.env, topic.into_val(&h.env), project_id.into_val(&h.env)];
    h.env
        .events()
        .all()
        .iter()
        .filter(|(contract, topics, _)| {
            *contract == h.client.address && *topics == expected_topics
        })
        .last()
        .map(|(_, _, data)| data)
        .expect("event not found")
}

#[test]
fn test_project_created_event() {
    let h = setup();
    let id = h.client.create_project(
        &h.developer,
        &text(&h.env, "t"),
        &text(&h.env, "d"),
        &text(&h.env, "a"),
    );

    let data: ProjectCreated = last_event(&h, symbol_short!("created"), id)
        .try_into_val(&h.env)
        .unwrap();
    assert_eq!(
        data,
        ProjectCreated {
            project_id: id,
            developer: h.developer.clone(),
            developer_id: 1,
        }
    );
}

#[test]
fn test_status_event_on_submission() {
    let h = setup();
    let id = draft_project(&h, 1000, 10_000, 4, &[100]);
    h.client.submit_project_for_review(&h.developer, &id);

    let data: StatusChanged = last_event(&h, symbol_short!("status"), id)
        .try_into_val(&h.env)
        .unwrap();
    assert_eq!(
        data,
        StatusChanged {
            project_id: id,
            from: ProjectStatus::Draft,
            to: ProjectStatus::PendingReview,
        }
    );
}

#[test]
fn test_funded_event_carries_running_total() {
    let h = setup();
    let id = published_project(&h, 1000, 10_000, 4, &[100]);
    contribute(&h, id, 400);
    let contributor = contribute(&h, id, 600);

    let data: ProjectFunded = last_event(&h, symbol_short!("funded"), id)
        .try_into_val(&h.env)
        .unwrap();
    assert_eq!(
        data,
        ProjectFunded {
            project_id: id,
            contributor,
            amount: 600,
            funds_raised: 1000,
        }
    );
}

#[test]
fn test_completion_close_event() {
    let h = setup();
    let (id, voters) = project_in_development(&h, &[50, 50], &[1000]);
    h.client
        .submit_milestone_completion(&h.developer, &id, &text(&h.env, "done"));
    h.client.vote_on_milestone_completion(&voters[0], &id, &true);
    h.client.finalize_milestone_completion(&h.developer, &id);

    let data: VoteClosed = last_event(&h, symbol_short!("ms_final"), id)
        .try_into_val(&h.env)
        .unwrap();
    assert_eq!(
        data,
        VoteClosed {
            project_id: id,
            round: 1,
            success: true,
        }
    );
}

#[test]
fn test_registry_bound_event() {
    let h = setup();
    let admin = Address::generate(&h.env);
    h.client.register(&h.owner, &ADMIN, &None, &admin);

    let event = h.env.events().all().last().expect("no events");
    assert_eq!(event.0, h.client.address);
    let expected_topics: Vec<Val> = vec![
        &h.env,
        symbol_short!("bound").into_val(&h.env),
        ADMIN.into_val(&h.env),
    ];
    assert_eq!(event.1, expected_topics);
    let (previous, bound): (Option<Address>, Address) = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(previous, None);
    assert_eq!(bound, admin);
}
