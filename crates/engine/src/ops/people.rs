use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Person, ResultEngine, people};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Registers a new person with a zero egg count and a zero balance.
    ///
    /// Names are unique case-insensitively after Unicode normalization.
    pub async fn register_person(&self, name: &str) -> ResultEngine<Person> {
        let name = normalize_required_name(name)?;
        let _write = self.write_lock.lock().await;
        with_tx!(self, |db_tx| {
            let exists = people::Entity::find()
                .filter(people::Column::NameNorm.eq(people::name_key(&name)))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::Validation(format!(
                    "person '{name}' already exists"
                )));
            }

            let seq = self.next_created_seq(&db_tx).await?;
            let person = Person::new(name, seq);
            people::ActiveModel::from(&person).insert(&db_tx).await?;
            Ok(person)
        })
    }

    /// Return a person snapshot from DB.
    pub async fn person(&self, person_id: Uuid) -> ResultEngine<Person> {
        with_tx!(self, |db_tx| {
            let model = people::Entity::find_by_id(person_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("person not exists".to_string()))?;
            Person::try_from(model)
        })
    }

    /// Lists every person in registration order.
    pub async fn list_people(&self) -> ResultEngine<Vec<Person>> {
        with_tx!(self, |db_tx| {
            let models = people::Entity::find()
                .order_by_asc(people::Column::CreatedSeq)
                .all(&db_tx)
                .await?;
            models.into_iter().map(Person::try_from).collect()
        })
    }

    /// Renames an existing person. History stays attached to the id.
    pub async fn rename_person(&self, person_id: Uuid, new_name: &str) -> ResultEngine<Person> {
        let new_name = normalize_required_name(new_name)?;
        let _write = self.write_lock.lock().await;
        with_tx!(self, |db_tx| {
            let model = people::Entity::find_by_id(person_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("person not exists".to_string()))?;

            let taken = people::Entity::find()
                .filter(people::Column::NameNorm.eq(people::name_key(&new_name)))
                .filter(people::Column::Id.ne(person_id.to_string()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::Validation(format!(
                    "person '{new_name}' already exists"
                )));
            }

            let active = people::ActiveModel {
                id: ActiveValue::Set(person_id.to_string()),
                name: ActiveValue::Set(new_name.clone()),
                name_norm: ActiveValue::Set(people::name_key(&new_name)),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            let mut person = Person::try_from(model)?;
            person.name = new_name;
            Ok(person)
        })
    }
}
