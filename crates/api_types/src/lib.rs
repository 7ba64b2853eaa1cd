//! Wire types shared by the HTTP server and its clients.
//!
//! All money fields are integer minor units (`*_minor`); the boundary never
//! carries floats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub mod person {
    use super::*;

    /// Request body for registering a person.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PersonNew {
        pub name: String,
    }

    /// Request body for renaming a person.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PersonRename {
        pub name: String,
    }

    /// A person with their running totals.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PersonView {
        pub id: Uuid,
        pub name: String,
        pub total_eggs: i64,
        /// Positive = credit, negative = debt.
        pub balance_minor: i64,
    }
}

pub mod daily_entry {
    use super::*;

    /// Request body for recording one day's batch.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DailyEntryNew {
        /// Calendar date, `YYYY-MM-DD`.
        pub date: NaiveDate,
        /// Price per egg. Must be > 0.
        pub egg_price_minor: i64,
        /// Person id to egg count. Counts must be >= 0 and at least one
        /// must be > 0.
        pub allocations: HashMap<Uuid, i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DailyEntryView {
        pub id: Uuid,
        pub date: NaiveDate,
        pub egg_price_minor: i64,
        pub total_eggs: i64,
        pub total_cost_minor: i64,
    }

    /// Response body for a recorded batch: the entry plus everyone it
    /// charged, with updated totals.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DailyEntryCreated {
        pub entry: DailyEntryView,
        pub people: Vec<super::person::PersonView>,
    }

    /// Response body for an undo: the entry that was removed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UndoResponse {
        pub entry: DailyEntryView,
    }
}

pub mod payment {
    use super::*;

    /// Request body for recording a payment.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentNew {
        pub person_id: Uuid,
        /// Must be > 0.
        pub amount_minor: i64,
    }

    /// Response body for a recorded payment: the payer with their updated
    /// balance.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentRecorded {
        pub person: super::person::PersonView,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DailyHistoryRow {
        pub date: NaiveDate,
        pub egg_price_minor: i64,
        pub total_eggs: i64,
        pub total_cost_minor: i64,
    }

    /// One line of a person's merged history. Charges have a negative
    /// `amount_minor`, payments a positive one with zero eggs.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PersonHistoryRow {
        pub date: NaiveDate,
        pub eggs: i64,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DueView {
        pub name: String,
        /// Positive amount owed.
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DuesResponse {
        pub dues: Vec<DueView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TotalBalance {
        pub total_credit_minor: i64,
        pub total_due_minor: i64,
        pub net_balance_minor: i64,
    }
}
