use std::collections::HashMap;

use chrono::NaiveDate;
use engine::{Engine, EngineError, MoneyCents};
use migration::{Migrator, MigratorTrait};
use uuid::Uuid;

async fn engine_with_db() -> Engine {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    Engine::builder()
        .database(db)
        .build()
        .await
        .expect("build engine")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn counts(pairs: &[(Uuid, i64)]) -> HashMap<Uuid, i64> {
    pairs.iter().copied().collect()
}

#[tokio::test]
async fn shared_batch_charges_everyone_and_undo_restores() {
    let engine = engine_with_db().await;

    let alice = engine.register_person("Alice").await.expect("register");
    let bob = engine.register_person("Bob").await.expect("register");

    let (entry, people) = engine
        .submit_daily_entry(
            date(2026, 8, 1),
            MoneyCents::new(600),
            &counts(&[(alice.id, 2), (bob.id, 1)]),
        )
        .await
        .expect("submit entry");

    assert_eq!(entry.total_eggs, 3);
    assert_eq!(entry.total_cost, MoneyCents::new(1800));
    assert_eq!(entry.allocations.len(), 2);

    // Updated people come back in registration order.
    assert_eq!(people[0].name, "Alice");
    assert_eq!(people[0].total_eggs, 2);
    assert_eq!(people[0].balance, MoneyCents::new(-1200));
    assert_eq!(people[1].name, "Bob");
    assert_eq!(people[1].balance, MoneyCents::new(-600));

    let (_, alice_after) = engine
        .record_payment(alice.id, MoneyCents::new(1200))
        .await
        .expect("record payment");
    assert_eq!(alice_after.balance, MoneyCents::ZERO);

    let dues = engine.dues().await.expect("dues");
    assert_eq!(dues.len(), 1);
    assert_eq!(dues[0].name, "Bob");
    assert_eq!(dues[0].amount, MoneyCents::new(600));

    let totals = engine.total_balance().await.expect("totals");
    assert_eq!(totals.total_credit, MoneyCents::ZERO);
    assert_eq!(totals.total_due, MoneyCents::new(600));
    assert_eq!(totals.net_balance, MoneyCents::new(-600));

    let undone = engine.undo_last_daily_entry().await.expect("undo");
    assert_eq!(undone.id, entry.id);

    // Charges are reversed, the payment stays.
    let alice = engine.person(alice.id).await.expect("load alice");
    assert_eq!(alice.total_eggs, 0);
    assert_eq!(alice.balance, MoneyCents::new(1200));
    let bob = engine.person(bob.id).await.expect("load bob");
    assert_eq!(bob.total_eggs, 0);
    assert_eq!(bob.balance, MoneyCents::ZERO);

    assert!(engine.dues().await.expect("dues").is_empty());
}

#[tokio::test]
async fn undo_is_single_level() {
    let engine = engine_with_db().await;
    let alice = engine.register_person("Alice").await.expect("register");

    engine
        .submit_daily_entry(date(2026, 8, 1), MoneyCents::new(500), &counts(&[(alice.id, 1)]))
        .await
        .expect("first entry");
    engine
        .submit_daily_entry(date(2026, 8, 2), MoneyCents::new(500), &counts(&[(alice.id, 2)]))
        .await
        .expect("second entry");

    // Undo walks back one entry at a time, newest first.
    let second = engine.undo_last_daily_entry().await.expect("undo second");
    assert_eq!(second.date, date(2026, 8, 2));
    let first = engine.undo_last_daily_entry().await.expect("undo first");
    assert_eq!(first.date, date(2026, 8, 1));

    let err = engine.undo_last_daily_entry().await.expect_err("nothing left");
    assert!(matches!(err, EngineError::NotFound(_)));

    let alice = engine.person(alice.id).await.expect("load alice");
    assert_eq!(alice.total_eggs, 0);
    assert_eq!(alice.balance, MoneyCents::ZERO);
}

#[tokio::test]
async fn submission_without_eggs_is_rejected() {
    let engine = engine_with_db().await;
    let alice = engine.register_person("Alice").await.expect("register");

    let err = engine
        .submit_daily_entry(date(2026, 8, 1), MoneyCents::new(500), &counts(&[(alice.id, 0)]))
        .await
        .expect_err("all-zero batch");
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine
        .submit_daily_entry(date(2026, 8, 1), MoneyCents::new(500), &HashMap::new())
        .await
        .expect_err("empty batch");
    assert!(matches!(err, EngineError::Validation(_)));

    assert!(engine.daily_history().await.expect("history").is_empty());
}

#[tokio::test]
async fn negative_count_and_bad_price_are_rejected() {
    let engine = engine_with_db().await;
    let alice = engine.register_person("Alice").await.expect("register");

    let err = engine
        .submit_daily_entry(date(2026, 8, 1), MoneyCents::new(500), &counts(&[(alice.id, -1)]))
        .await
        .expect_err("negative count");
    assert!(matches!(err, EngineError::Validation(_)));

    for price in [0, -500] {
        let err = engine
            .submit_daily_entry(date(2026, 8, 1), MoneyCents::new(price), &counts(&[(alice.id, 1)]))
            .await
            .expect_err("non-positive price");
        assert!(matches!(err, EngineError::Validation(_)));
    }
}

#[tokio::test]
async fn unknown_person_rejects_the_whole_batch() {
    let engine = engine_with_db().await;
    let alice = engine.register_person("Alice").await.expect("register");

    let err = engine
        .submit_daily_entry(
            date(2026, 8, 1),
            MoneyCents::new(500),
            &counts(&[(alice.id, 2), (Uuid::new_v4(), 1)]),
        )
        .await
        .expect_err("unknown person");
    assert!(matches!(err, EngineError::NotFound(_)));

    // Nothing was applied.
    let alice = engine.person(alice.id).await.expect("load alice");
    assert_eq!(alice.total_eggs, 0);
    assert_eq!(alice.balance, MoneyCents::ZERO);
    assert!(engine.daily_history().await.expect("history").is_empty());
}

#[tokio::test]
async fn person_names_are_unique_case_insensitively() {
    let engine = engine_with_db().await;

    engine.register_person("Alice").await.expect("register");

    let err = engine
        .register_person("  alice ")
        .await
        .expect_err("duplicate name");
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine.register_person("   ").await.expect_err("blank name");
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn payments_must_be_positive_and_target_a_person() {
    let engine = engine_with_db().await;
    let alice = engine.register_person("Alice").await.expect("register");

    for amount in [0, -100] {
        let err = engine
            .record_payment(alice.id, MoneyCents::new(amount))
            .await
            .expect_err("non-positive payment");
        assert!(matches!(err, EngineError::Validation(_)));
    }

    let err = engine
        .record_payment(Uuid::new_v4(), MoneyCents::new(100))
        .await
        .expect_err("unknown person");
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn person_history_merges_charges_and_payments_in_order() {
    let engine = engine_with_db().await;
    let alice = engine.register_person("Alice").await.expect("register");

    engine
        .submit_daily_entry(date(2026, 8, 1), MoneyCents::new(600), &counts(&[(alice.id, 2)]))
        .await
        .expect("first entry");
    engine
        .record_payment(alice.id, MoneyCents::new(500))
        .await
        .expect("payment");
    engine
        .submit_daily_entry(date(2026, 8, 2), MoneyCents::new(700), &counts(&[(alice.id, 1)]))
        .await
        .expect("second entry");

    let rows = engine.person_history(alice.id).await.expect("history");
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].eggs, 2);
    assert_eq!(rows[0].amount, MoneyCents::new(-1200));
    assert_eq!(rows[1].eggs, 0);
    assert_eq!(rows[1].amount, MoneyCents::new(500));
    assert_eq!(rows[2].eggs, 1);
    assert_eq!(rows[2].amount, MoneyCents::new(-700));
}

#[tokio::test]
async fn zero_count_participants_stay_out_of_history() {
    let engine = engine_with_db().await;
    let alice = engine.register_person("Alice").await.expect("register");
    let bob = engine.register_person("Bob").await.expect("register");

    engine
        .submit_daily_entry(
            date(2026, 8, 1),
            MoneyCents::new(600),
            &counts(&[(alice.id, 2), (bob.id, 0)]),
        )
        .await
        .expect("submit entry");

    let bob_after = engine.person(bob.id).await.expect("load bob");
    assert_eq!(bob_after.total_eggs, 0);
    assert_eq!(bob_after.balance, MoneyCents::ZERO);
    assert!(engine.person_history(bob.id).await.expect("history").is_empty());
}

#[tokio::test]
async fn daily_history_is_sorted_by_date_then_creation() {
    let engine = engine_with_db().await;
    let alice = engine.register_person("Alice").await.expect("register");

    engine
        .submit_daily_entry(date(2026, 8, 3), MoneyCents::new(500), &counts(&[(alice.id, 1)]))
        .await
        .expect("later date first");
    engine
        .submit_daily_entry(date(2026, 8, 1), MoneyCents::new(500), &counts(&[(alice.id, 1)]))
        .await
        .expect("earlier date second");
    engine
        .submit_daily_entry(date(2026, 8, 1), MoneyCents::new(600), &counts(&[(alice.id, 1)]))
        .await
        .expect("same date again");

    let rows = engine.daily_history().await.expect("history");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date, date(2026, 8, 1));
    assert_eq!(rows[0].egg_price, MoneyCents::new(500));
    assert_eq!(rows[1].date, date(2026, 8, 1));
    assert_eq!(rows[1].egg_price, MoneyCents::new(600));
    assert_eq!(rows[2].date, date(2026, 8, 3));
}

#[tokio::test]
async fn rename_keeps_totals_and_rejects_collisions() {
    let engine = engine_with_db().await;
    let alice = engine.register_person("Alice").await.expect("register");
    engine.register_person("Bob").await.expect("register");

    engine
        .submit_daily_entry(date(2026, 8, 1), MoneyCents::new(600), &counts(&[(alice.id, 2)]))
        .await
        .expect("submit entry");

    let renamed = engine
        .rename_person(alice.id, "Alicia")
        .await
        .expect("rename");
    assert_eq!(renamed.name, "Alicia");
    assert_eq!(renamed.balance, MoneyCents::new(-1200));

    let err = engine
        .rename_person(alice.id, "bob")
        .await
        .expect_err("name collision");
    assert!(matches!(err, EngineError::Validation(_)));

    let reloaded = engine.person(alice.id).await.expect("load");
    assert_eq!(reloaded.name, "Alicia");
    assert_eq!(reloaded.total_eggs, 2);
}

#[tokio::test]
async fn people_are_listed_in_registration_order() {
    let engine = engine_with_db().await;

    for name in ["Charlie", "Alice", "Bob"] {
        engine.register_person(name).await.expect("register");
    }

    let people = engine.list_people().await.expect("list");
    let names: Vec<_> = people.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Charlie", "Alice", "Bob"]);
}
