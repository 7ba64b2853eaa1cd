//! Daily entry primitives.
//!
//! A `DailyEntry` is one day's batch: the unit egg price plus the per-person
//! allocation of that batch, recorded via [`Allocation`] rows. The entry with
//! the highest `created_seq` is the only one eligible for undo.
//!
//! [`Allocation`]: super::allocations::Allocation

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{Allocation, EngineError, MoneyCents, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyEntry {
    pub id: Uuid,
    /// Calendar date of the batch. Not unique: several entries may share a
    /// date, recency is tracked by `created_seq`.
    pub date: NaiveDate,
    /// Unit price, currency-minor-units per egg.
    pub egg_price: MoneyCents,
    /// Sum of the allocation counts.
    pub total_eggs: i64,
    /// `total_eggs * egg_price`.
    pub total_cost: MoneyCents,
    /// Recency order (global sequence). Highest wins the undo slot.
    pub created_seq: i64,
    /// Full allocation map, zero-count rows included for audit completeness.
    pub allocations: Vec<Allocation>,
}

impl DailyEntry {
    pub fn new(
        date: NaiveDate,
        egg_price: MoneyCents,
        total_eggs: i64,
        total_cost: MoneyCents,
        created_seq: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            egg_price,
            total_eggs,
            total_cost,
            created_seq,
            allocations: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "daily_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: Date,
    pub egg_price_minor: i64,
    pub total_eggs: i64,
    pub total_cost_minor: i64,
    pub created_seq: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::allocations::Entity")]
    Allocations,
}

impl Related<super::allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Allocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&DailyEntry> for ActiveModel {
    fn from(entry: &DailyEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            date: ActiveValue::Set(entry.date),
            egg_price_minor: ActiveValue::Set(entry.egg_price.cents()),
            total_eggs: ActiveValue::Set(entry.total_eggs),
            total_cost_minor: ActiveValue::Set(entry.total_cost.cents()),
            created_seq: ActiveValue::Set(entry.created_seq),
        }
    }
}

impl TryFrom<Model> for DailyEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "daily entry")?,
            date: model.date,
            egg_price: MoneyCents::new(model.egg_price_minor),
            total_eggs: model.total_eggs,
            total_cost: MoneyCents::new(model.total_cost_minor),
            created_seq: model.created_seq,
            allocations: Vec::new(),
        })
    }
}
