//! Property tests for voting through the store

use proptest::prelude::*;
use stackit_domain::traits::QuestionStore;
use stackit_domain::{AnswerId, NewQuestion, Tag, VoteKind};
use stackit_store::{MemoryStore, TickingClock};

fn vote_kind() -> impl Strategy<Value = VoteKind> {
    prop_oneof![Just(VoteKind::Like), Just(VoteKind::Dislike)]
}

proptest! {
    /// Property: after every vote, each answer's counters match its voter map
    /// and answers stay sorted by descending likes
    #[test]
    fn test_counts_and_ranking_hold(votes in prop::collection::vec((0usize..3, 0usize..4, vote_kind()), 1..80)) {
        let mut store = MemoryStore::with_clock(TickingClock::starting_at(0));
        let q = store
            .add_question(NewQuestion::new("Q", "d", vec![Tag::Graph]), "alice")
            .unwrap();
        let answers: Vec<AnswerId> = (0..3)
            .map(|i| store.add_answer(q, &format!("answer {}", i), "bob").unwrap())
            .collect();

        for (answer, voter, kind) in votes {
            store.vote(q, answers[answer], &format!("voter{}", voter), kind).unwrap();

            let question = store.question(q).unwrap();
            prop_assert_eq!(question.answers.len(), 3);
            for a in &question.answers {
                let likes = a.voters().values().filter(|k| **k == VoteKind::Like).count();
                let dislikes = a.voters().values().filter(|k| **k == VoteKind::Dislike).count();
                prop_assert_eq!(a.likes() as usize, likes);
                prop_assert_eq!(a.dislikes() as usize, dislikes);
            }
            prop_assert!(question.answers.windows(2).all(|w| w[0].likes() >= w[1].likes()));
        }
    }
}
