//! Integration tests for stackit-store
//!
//! These tests drive the store through the QuestionStore trait the way the
//! presentation shell does.

use stackit_domain::traits::QuestionStore;
use stackit_domain::{FilterMode, NewQuestion, QuestionId, Tag, ViewQuery, VoteKind};
use stackit_store::{MemoryStore, StoreError, TickingClock, ValidationError, SEED_QUESTIONS};

fn empty_store() -> MemoryStore {
    MemoryStore::with_clock(TickingClock::starting_at(1_700_000_000_000))
}

fn seeded_store() -> MemoryStore {
    empty_store().with_seed_catalog()
}

fn add(store: &mut MemoryStore, title: &str, tags: Vec<Tag>, author: &str) -> QuestionId {
    store
        .add_question(NewQuestion::new(title, "<p>details</p>", tags), author)
        .unwrap()
}

#[test]
fn test_alice_bob_scenario() {
    let mut store = empty_store();

    let q1 = add(&mut store, "Q1", vec![Tag::Array], "alice");
    let q = store.question(q1).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(q.author, "alice");
    assert!(q.answers.is_empty());

    let a1 = store.add_answer(q1, "A1", "alice").unwrap();
    let answer = store.question(q1).unwrap().answer(a1).unwrap();
    assert_eq!(store.question(q1).unwrap().answers.len(), 1);
    assert_eq!(answer.likes(), 0);

    store.vote(q1, a1, "alice", VoteKind::Like).unwrap();
    assert_eq!(store.question(q1).unwrap().answer(a1).unwrap().likes(), 1);

    store.vote(q1, a1, "alice", VoteKind::Like).unwrap();
    assert_eq!(store.question(q1).unwrap().answer(a1).unwrap().likes(), 0);

    let removed = store.delete_answer(q1, a1, "bob").unwrap();
    assert!(!removed, "bob is not the author");
    assert!(store.question(q1).unwrap().answer(a1).is_some());
}

#[test]
fn test_author_can_delete_answer() {
    let mut store = empty_store();
    let q = add(&mut store, "Q", vec![Tag::Heap], "alice");
    let a = store.add_answer(q, "A", "bob").unwrap();

    assert!(store.delete_answer(q, a, "bob").unwrap());
    assert!(store.question(q).unwrap().answers.is_empty());
}

#[test]
fn test_only_author_deletes_question() {
    let mut store = empty_store();
    let q = add(&mut store, "Q", vec![Tag::Graph], "alice");

    assert!(!store.delete_question(q, "bob").unwrap());
    assert_eq!(store.len(), 1);

    assert!(store.delete_question(q, "alice").unwrap());
    assert!(store.is_empty());
}

#[test]
fn test_delete_question_removes_its_answers() {
    let mut store = empty_store();
    let q = add(&mut store, "Q", vec![Tag::Trie], "alice");
    let a = store.add_answer(q, "A", "bob").unwrap();
    store.vote(q, a, "carol", VoteKind::Dislike).unwrap();

    store.delete_question(q, "alice").unwrap();

    assert!(store.question(q).is_none());
    assert!(store.questions().iter().all(|other| other.answer(a).is_none()));
    let err = store.vote(q, a, "carol", VoteKind::Like).unwrap_err();
    assert_eq!(err, StoreError::QuestionNotFound(q));
}

#[test]
fn test_empty_answer_rejected_without_change() {
    let mut store = empty_store();
    let q = add(&mut store, "Q", vec![Tag::Dp], "alice");
    let revision = store.revision();

    let err = store.add_answer(q, "   ", "bob").unwrap_err();

    assert_eq!(err, StoreError::Validation(ValidationError::EmptyAnswer));
    assert!(store.question(q).unwrap().answers.is_empty());
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_question_without_tags_rejected() {
    let mut store = empty_store();
    let err = store
        .add_question(NewQuestion::new("Q", "d", vec![]), "alice")
        .unwrap_err();

    assert_eq!(err, StoreError::Validation(ValidationError::NoTags));
    assert!(store.is_empty());
}

#[test]
fn test_seeded_tag_filter() {
    let store = seeded_store();
    let query = ViewQuery {
        tag: Some(Tag::Dp),
        page_size: SEED_QUESTIONS.len(),
        ..Default::default()
    };

    let snapshot = store.view(&query);

    assert_eq!(snapshot.total_items, 4);
    assert!(snapshot.items.iter().all(|q| q.has_tag(Tag::Dp)));
}

#[test]
fn test_seeded_unanswered_returns_everything() {
    let store = seeded_store();
    let query = ViewQuery {
        mode: FilterMode::Unanswered,
        page_size: 100,
        ..Default::default()
    };

    let snapshot = store.view(&query);

    assert_eq!(snapshot.total_items, SEED_QUESTIONS.len());
    assert_eq!(snapshot.items.len(), SEED_QUESTIONS.len());
}

#[test]
fn test_unanswered_excludes_answered() {
    let mut store = seeded_store();
    let first = store.questions()[0].id;
    store.add_answer(first, "Base case plus recursive case", "bob").unwrap();

    let snapshot = store.view(&ViewQuery {
        mode: FilterMode::Unanswered,
        page_size: 100,
        ..Default::default()
    });

    assert_eq!(snapshot.total_items, SEED_QUESTIONS.len() - 1);
    assert!(snapshot.items.iter().all(|q| q.id != first));
}

#[test]
fn test_pagination_counts() {
    let store = seeded_store();

    for page_size in [1, 3, 4, 5, 22, 50] {
        let snapshot = store.view(&ViewQuery { page_size, ..Default::default() });
        assert_eq!(snapshot.total_pages, SEED_QUESTIONS.len().div_ceil(page_size));
    }

    let last = store.view(&ViewQuery { page: 6, page_size: 4, ..Default::default() });
    assert_eq!(last.items.len(), 2);

    let beyond = store.view(&ViewQuery { page: 7, page_size: 4, ..Default::default() });
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_pages, 6);
}

#[test]
fn test_view_is_pure_and_repeatable() {
    let store = seeded_store();
    let query = ViewQuery {
        tag: Some(Tag::Graph),
        mode: FilterMode::Newest,
        page: 1,
        page_size: 2,
    };
    let before: Vec<QuestionId> = store.questions().iter().map(|q| q.id).collect();
    let revision = store.revision();

    let first = store.view(&query);
    let second = store.view(&query);

    assert_eq!(first, second);
    let after: Vec<QuestionId> = store.questions().iter().map(|q| q.id).collect();
    assert_eq!(before, after);
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_snapshot_is_detached_from_later_mutation() {
    let mut store = seeded_store();
    let snapshot = store.view(&ViewQuery::default());
    let target = snapshot.items[0].id;

    store.add_answer(target, "late answer", "bob").unwrap();

    assert!(snapshot.items[0].answers.is_empty());
    assert!(store.view(&ViewQuery::default()).revision > snapshot.revision);
}

#[test]
fn test_new_question_leads_default_and_newest_views() {
    let mut store = seeded_store();
    let q = add(&mut store, "How do tries save space?", vec![Tag::Trie], "alice");

    let all = store.view(&ViewQuery::default());
    let newest = store.view(&ViewQuery { mode: FilterMode::Newest, ..Default::default() });

    assert_eq!(all.items[0].id, q);
    assert_eq!(newest.items[0].id, q);
}

#[test]
fn test_newest_reverses_seed_order() {
    let store = seeded_store();
    let snapshot = store.view(&ViewQuery {
        mode: FilterMode::Newest,
        page_size: 100,
        ..Default::default()
    });

    let titles: Vec<&str> = snapshot.items.iter().map(|q| q.title.as_str()).collect();
    assert_eq!(titles.first(), Some(&"Minimum Spanning Tree"));
    assert_eq!(titles.last(), Some(&"What is recursion?"));
}

#[test]
fn test_switching_vote_across_voters() {
    let mut store = empty_store();
    let q = add(&mut store, "Q", vec![Tag::Sorting], "alice");
    let a = store.add_answer(q, "Merge sort is stable", "bob").unwrap();

    store.vote(q, a, "alice", VoteKind::Like).unwrap();
    store.vote(q, a, "carol", VoteKind::Like).unwrap();
    let outcome = store.vote(q, a, "alice", VoteKind::Dislike).unwrap();

    assert_eq!(outcome.previous, Some(VoteKind::Like));
    assert_eq!(outcome.current, Some(VoteKind::Dislike));
    let answer = store.question(q).unwrap().answer(a).unwrap();
    assert_eq!((answer.likes(), answer.dislikes()), (1, 1));
}
