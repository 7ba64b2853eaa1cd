//! Allocation rows: the per-person share of one daily entry.
//!
//! One row per person referenced by the submission, including zero-count
//! rows. `cost_minor` stores the exact charge (`egg_count * egg_price` at
//! submission time) so undo can reverse it bit-exactly without re-reading
//! the price.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub person_id: Uuid,
    pub egg_count: i64,
    pub cost: MoneyCents,
}

impl Allocation {
    pub fn new(entry_id: Uuid, person_id: Uuid, egg_count: i64, cost: MoneyCents) -> Self {
        Self {
            id: Uuid::new_v4(),
            entry_id,
            person_id,
            egg_count,
            cost,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "allocations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub entry_id: String,
    pub person_id: String,
    pub egg_count: i64,
    pub cost_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::daily_entries::Entity",
        from = "Column::EntryId",
        to = "super::daily_entries::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    DailyEntries,
    #[sea_orm(
        belongs_to = "super::people::Entity",
        from = "Column::PersonId",
        to = "super::people::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    People,
}

impl Related<super::daily_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyEntries.def()
    }
}

impl Related<super::people::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::People.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Allocation> for ActiveModel {
    fn from(allocation: &Allocation) -> Self {
        Self {
            id: ActiveValue::Set(allocation.id.to_string()),
            entry_id: ActiveValue::Set(allocation.entry_id.to_string()),
            person_id: ActiveValue::Set(allocation.person_id.to_string()),
            egg_count: ActiveValue::Set(allocation.egg_count),
            cost_minor: ActiveValue::Set(allocation.cost.cents()),
        }
    }
}

impl TryFrom<Model> for Allocation {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "allocation")?,
            entry_id: parse_uuid(&model.entry_id, "daily entry")?,
            person_id: parse_uuid(&model.person_id, "person")?,
            egg_count: model.egg_count,
            cost: MoneyCents::new(model.cost_minor),
        })
    }
}
