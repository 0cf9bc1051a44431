extern crate std;

use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, token, Address};

use crate::invariants::*;
use crate::test::{
    advance, draft_project, project_in_development, published_project, setup, text,
};
use crate::{Error, ProjectStatus, ReleaseMode, WEEK};

// ── 1. Goal invariant ───────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fuzz_contributions_never_exceed_max_goal(
        max_goal in 1_000i128..=20_000i128,
        amounts in prop::collection::vec(1i128..=6_000i128, 1..=8),
    ) {
        let h = setup();
        let id = published_project(&h, 1, max_goal, 4, &[100]);
        let sac = token::StellarAssetClient::new(&h.env, &h.token.address);

        for amount in amounts {
            let contributor = Address::generate(&h.env);
            sac.mint(&contributor, &amount);
            let before = h.client.get_project(&id).funds_raised;

            let result = h.client.try_contribute_to_project(&contributor, &id, &amount);

            let after = h.client.get_project(&id);
            if before + amount > max_goal {
                prop_assert_eq!(result, Err(Ok(Error::GoalExceeded.into())));
                prop_assert_eq!(after.funds_raised, before);
                prop_assert_eq!(h.token.balance(&contributor), amount);
            } else {
                prop_assert_eq!(result, Ok(Ok(before + amount)));
            }
            assert_goal_invariant(&after);
            prop_assert_eq!(h.vault.get_balance(), after.funds_raised);
        }
    }
}

// ── 2. Refund conservation ──────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn fuzz_refunds_conserve_escrow(
        contributions in prop::collection::vec(200i128..=1_600i128, 5..=6),
        complete_first in any::<bool>(),
        corrected_release in any::<bool>(),
    ) {
        let h = setup();
        if corrected_release {
            h.client.set_release_mode(&h.owner, &ReleaseMode::CurrentMilestone);
        }
        let (id, voters) = project_in_development(&h, &[20, 30, 50], &contributions);

        if complete_first {
            h.client.submit_milestone_completion(&h.developer, &id, &text(&h.env, "done"));
            for voter in voters.iter() {
                h.client.vote_on_milestone_completion(voter, &id, &true);
            }
            prop_assert!(h.client.finalize_milestone_completion(&h.developer, &id));
        }

        let mut refunded = 0i128;
        for (voter, contribution) in voters.iter().zip(contributions.iter()) {
            let paid = h.client.refund(voter, &id);
            assert_refund_bounded(paid, *contribution);
            refunded += paid;

            prop_assert_eq!(
                h.client.try_refund(voter, &id),
                Err(Ok(Error::NothingToRefund.into()))
            );
            let ledger = h.client.get_ledger(&id);
            assert_ledger_conserved(&ledger);
            prop_assert_eq!(h.vault.get_balance(), ledger.escrow_remaining());
        }

        let ledger = h.client.get_ledger(&id);
        prop_assert_eq!(ledger.refunded, refunded);
        prop_assert!(h.vault.get_balance() >= 0);
        assert_completed_prefix(&h.client.get_timeline(&id));
    }
}

// ── 3. Quorum correctness ───────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fuzz_early_finalize_matches_quorum(
        population in 1usize..=8,
        approvals_seed in any::<u8>(),
    ) {
        let h = setup();
        let contributions = std::vec![1_250i128; population];
        let (id, voters) = project_in_development(&h, &[50, 50], &contributions);
        let approvals = usize::from(approvals_seed) % (population + 1);

        h.client.submit_milestone_completion(&h.developer, &id, &text(&h.env, "done"));
        for voter in voters.iter().take(approvals) {
            h.client.vote_on_milestone_completion(voter, &id, &true);
        }

        let result = h.client.try_finalize_milestone_completion(&h.developer, &id);
        if expected_early_quorum(approvals as u32, population as u32) {
            prop_assert_eq!(result, Ok(Ok(true)));
        } else {
            prop_assert_eq!(result, Err(Ok(Error::VotingStillOpen.into())));
        }
    }

    #[test]
    fn fuzz_timeout_finalize_is_majority_of_cast(
        approvals in 0usize..=4,
        disapprovals in 0usize..=4,
    ) {
        let h = setup();
        let contributions = std::vec![1_000i128; 8];
        let (id, voters) = project_in_development(&h, &[50, 50], &contributions);

        h.client.submit_milestone_completion(&h.developer, &id, &text(&h.env, "done"));
        for voter in voters.iter().take(approvals) {
            h.client.vote_on_milestone_completion(voter, &id, &true);
        }
        for voter in voters.iter().skip(approvals).take(disapprovals) {
            h.client.vote_on_milestone_completion(voter, &id, &false);
        }
        advance(&h, 2 * WEEK);

        let accepted = h.client.finalize_milestone_completion(&h.developer, &id);

        prop_assert_eq!(accepted, approvals > disapprovals);
        let expected = if accepted {
            ProjectStatus::InDevelopment
        } else {
            ProjectStatus::Refundable
        };
        prop_assert_eq!(h.client.get_project(&id).status, expected);
        assert_valid_status_transition(&ProjectStatus::InDevelopment, &expected);
    }
}

// ── 4. Percentage invariant ─────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn fuzz_only_full_timelines_are_promoted(
        percentages in prop::collection::vec(0u32..=100u32, 1..=5),
    ) {
        let h = setup();
        let id = draft_project(&h, 1000, 10_000, 4, &percentages);
        let sum: u32 = percentages.iter().sum();

        let result = h.client.try_submit_project_for_review(&h.developer, &id);

        if sum == 100 {
            prop_assert_eq!(result, Ok(Ok(())));
            assert_timeline_percentages(&h.client.get_timeline(&id), false);
        } else {
            prop_assert_eq!(result, Err(Ok(Error::InvalidSubmission.into())));
            prop_assert_eq!(h.client.get_project(&id).status, ProjectStatus::Draft);
            prop_assert_eq!(h.client.get_timeline(&id).len(), 0);
        }
    }
}

// ── 5. Mutual exclusion ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fuzz_completion_and_proposal_votes_never_overlap(
        ops in prop::collection::vec(0u8..9, 1..=24),
    ) {
        let h = setup();
        let (id, voters) = project_in_development(&h, &[50, 50], &[1_000]);
        let voter = &voters[0];

        for op in ops {
            // Rejected calls are expected; only the resulting state matters.
            match op {
                0 => {
                    let report = text(&h.env, "done");
                    let _ = h.client.try_submit_milestone_completion(&h.developer, &id, &report);
                }
                1 => {
                    let _ = h.client.try_add_milestone(
                        &h.developer,
                        &id,
                        &text(&h.env, "revised"),
                        &text(&h.env, "d"),
                        &50,
                    );
                }
                2 => {
                    let _ = h.client.try_propose_new_timeline(&h.developer, &id);
                }
                3 => {
                    let _ = h.client.try_vote_on_milestone_completion(voter, &id, &true);
                }
                4 => {
                    let _ = h.client.try_vote_on_timeline_proposal(voter, &id, &true);
                }
                5 => {
                    let _ = h.client.try_finalize_milestone_completion(&h.developer, &id);
                }
                6 => {
                    let _ = h.client.try_finalize_timeline_proposal(&h.developer, &id);
                }
                7 => advance(&h, WEEK),
                _ => {
                    let _ = h.client.try_clear_pending_timeline(&h.developer, &id);
                }
            }

            assert_votes_exclusive(
                &h.client.get_completion_submission(&id),
                &h.client.get_timeline_proposal(&id),
            );
            let project = h.client.get_project(&id);
            assert_completed_prefix(&h.client.get_timeline(&id));
            assert_timeline_percentages(&h.client.get_timeline(&id), project.no_timeline);
            assert_ledger_conserved(&h.client.get_ledger(&id));
        }
    }
}
