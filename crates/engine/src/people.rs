//! The module contains the `Person` struct and its entity.
//!
//! A person is a member of the group that shares the egg expenses. People
//! are never deleted so that every historical allocation and payment stays
//! attributable.

use sea_orm::entity::{ActiveValue, prelude::*};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::parse_uuid};

/// A tracked member of the group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    /// Stable identifier, assigned once at registration.
    pub id: Uuid,
    pub name: String,
    /// Cumulative egg count, non-decreasing except on undo.
    pub total_eggs: i64,
    /// Running balance: payments minus allocated costs.
    ///
    /// Positive = credit owed to the person, negative = amount they owe.
    pub balance: MoneyCents,
    /// Registration order (global sequence).
    pub created_seq: i64,
}

impl Person {
    pub fn new(name: String, created_seq: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            total_eggs: 0,
            balance: MoneyCents::ZERO,
            created_seq,
        }
    }
}

/// Case-insensitive NFC key used for uniqueness checks on person names.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().nfc().collect::<String>().to_lowercase()
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "people")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub name_norm: String,
    pub total_eggs: i64,
    pub balance_minor: i64,
    pub created_seq: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::allocations::Entity")]
    Allocations,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Allocations.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Person> for ActiveModel {
    fn from(person: &Person) -> Self {
        Self {
            id: ActiveValue::Set(person.id.to_string()),
            name: ActiveValue::Set(person.name.clone()),
            name_norm: ActiveValue::Set(name_key(&person.name)),
            total_eggs: ActiveValue::Set(person.total_eggs),
            balance_minor: ActiveValue::Set(person.balance.cents()),
            created_seq: ActiveValue::Set(person.created_seq),
        }
    }
}

impl TryFrom<Model> for Person {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "person")?,
            name: model.name,
            total_eggs: model.total_eggs,
            balance: MoneyCents::new(model.balance_minor),
            created_seq: model.created_seq,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_person_starts_empty() {
        let person = Person::new("Alice".to_string(), 1);
        assert_eq!(person.total_eggs, 0);
        assert!(person.balance.is_zero());
    }

    #[test]
    fn name_key_is_case_insensitive_nfc() {
        assert_eq!(name_key("  Alice "), "alice");
        // "é" composed vs decomposed normalize to the same key
        assert_eq!(name_key("Jos\u{e9}"), name_key("Jose\u{301}"));
    }
}
