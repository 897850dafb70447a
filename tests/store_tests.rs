//! Concurrent writers against the store's read-then-write transactions.

use std::collections::HashSet;

use chrono::Utc;
use quiz_api::db::{DecisionOutcome, NewQuestion, Store};
use quiz_api::entities::approval_documents::DocumentStatus;
use tokio::task::JoinSet;

async fn store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("quiz-api-store-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

fn question(n: i32) -> NewQuestion {
    NewQuestion {
        question_text: format!("Question {n}"),
        choices: ["a", "b", "c", "d"].map(String::from),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_question_creates_all_succeed() {
    const WRITERS: i32 = 20;
    let store = store().await;

    let mut tasks = JoinSet::new();
    for n in 0..WRITERS {
        let store = store.clone();
        tasks.spawn(async move { store.add_question(question(n), Utc::now()).await });
    }

    let mut orders = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        let created = result.expect("task panicked").expect("create failed");
        assert!(
            orders.insert(created.display_order),
            "duplicate order {}",
            created.display_order
        );
    }

    let expected: HashSet<i32> = (1..=WRITERS).collect();
    assert_eq!(orders, expected);
    assert_eq!(store.list_questions().await.unwrap().len(), orders.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_decisions_all_apply() {
    let store = store().await;

    let pending: Vec<i32> = store
        .list_documents()
        .await
        .unwrap()
        .into_iter()
        .filter(|d| d.status == DocumentStatus::Pending)
        .map(|d| d.id)
        .collect();
    assert!(!pending.is_empty());

    let mut tasks = JoinSet::new();
    for id in pending.clone() {
        let store = store.clone();
        tasks.spawn(async move {
            store
                .decide_documents(&[id], DocumentStatus::Approved, "ok", Utc::now())
                .await
        });
    }

    while let Some(result) = tasks.join_next().await {
        let outcome = result.expect("task panicked").expect("decision failed");
        assert_eq!(outcome, DecisionOutcome::Applied(1));
    }

    let documents = store.list_documents().await.unwrap();
    for id in pending {
        let doc = documents.iter().find(|d| d.id == id).unwrap();
        assert_eq!(doc.status, DocumentStatus::Approved);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resets_all_succeed() {
    let store = store().await;
    let total = store.list_documents().await.unwrap().len();

    let mut tasks = JoinSet::new();
    for _ in 0..10 {
        let store = store.clone();
        tasks.spawn(async move { store.reset_documents(Utc::now()).await });
    }

    while let Some(result) = tasks.join_next().await {
        let count = result.expect("task panicked").expect("reset failed");
        assert_eq!(count, total);
    }

    for doc in store.list_documents().await.unwrap() {
        assert_eq!(doc.status, DocumentStatus::seeded(doc.id));
        assert!(doc.reason.is_empty());
    }
}
