//! Ledger engine for a group that shares egg expenses.
//!
//! The database is the single source of truth: every operation opens its own
//! transaction and reads or writes through it, so there is no long-lived
//! in-memory state to drift. Mutating operations are serialized by an
//! internal write lock, see [`Engine`].

pub use allocations::Allocation;
pub use daily_entries::DailyEntry;
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{
    BalanceTotals, DailyEntrySummary, Due, Engine, EngineBuilder, PersonHistoryRow,
};
pub use payments::Payment;
pub use people::Person;

mod allocations;
mod daily_entries;
mod error;
mod money;
mod ops;
mod payments;
mod people;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
