//! Payment log rows.
//!
//! A payment is a discrete recharge by one person; it strictly increases
//! that person's balance and is never removed.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub id: Uuid,
    pub person_id: Uuid,
    /// Always positive.
    pub amount: MoneyCents,
    pub created_at: DateTime<Utc>,
    /// Creation order (global sequence), used to merge the payment log with
    /// the daily charges in per-person history.
    pub created_seq: i64,
}

impl Payment {
    pub fn new(
        person_id: Uuid,
        amount: MoneyCents,
        created_at: DateTime<Utc>,
        created_seq: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            person_id,
            amount,
            created_at,
            created_seq,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub person_id: String,
    pub amount_minor: i64,
    pub created_at: DateTimeUtc,
    pub created_seq: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::people::Entity",
        from = "Column::PersonId",
        to = "super::people::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    People,
}

impl Related<super::people::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::People.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Payment> for ActiveModel {
    fn from(payment: &Payment) -> Self {
        Self {
            id: ActiveValue::Set(payment.id.to_string()),
            person_id: ActiveValue::Set(payment.person_id.to_string()),
            amount_minor: ActiveValue::Set(payment.amount.cents()),
            created_at: ActiveValue::Set(payment.created_at),
            created_seq: ActiveValue::Set(payment.created_seq),
        }
    }
}

impl TryFrom<Model> for Payment {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "payment")?,
            person_id: parse_uuid(&model.person_id, "person")?,
            amount: MoneyCents::new(model.amount_minor),
            created_at: model.created_at,
            created_seq: model.created_seq,
        })
    }
}
