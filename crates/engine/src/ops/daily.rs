use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Allocation, DailyEntry, EngineError, MoneyCents, Person, ResultEngine, allocations,
    daily_entries, people,
};

use super::{Engine, with_tx};

impl Engine {
    /// Records one day's egg batch and charges everyone it names.
    ///
    /// Every referenced person gets an allocation row, zero counts included.
    /// For each person the egg count is added to their running total and
    /// `count * egg_price` is subtracted from their balance. The whole batch
    /// is applied atomically or not at all.
    ///
    /// Returns the stored entry plus the updated people in registration
    /// order.
    pub async fn submit_daily_entry(
        &self,
        date: NaiveDate,
        egg_price: MoneyCents,
        counts: &HashMap<Uuid, i64>,
    ) -> ResultEngine<(DailyEntry, Vec<Person>)> {
        if !egg_price.is_positive() {
            return Err(EngineError::Validation(
                "egg price must be positive".to_string(),
            ));
        }
        if counts.values().any(|&count| count < 0) {
            return Err(EngineError::Validation(
                "egg counts must not be negative".to_string(),
            ));
        }
        if !counts.values().any(|&count| count > 0) {
            return Err(EngineError::Validation("nothing to record".to_string()));
        }

        let _write = self.write_lock.lock().await;
        with_tx!(self, |db_tx| {
            // Resolve every referenced person before touching anything, so a
            // single unknown id rejects the whole batch.
            let mut persons: Vec<(Person, i64)> = Vec::with_capacity(counts.len());
            for (&person_id, &count) in counts {
                let model = people::Entity::find_by_id(person_id.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::NotFound("person not exists".to_string()))?;
                persons.push((Person::try_from(model)?, count));
            }

            let total_eggs: i64 = persons.iter().map(|(_, count)| count).sum();
            let total_cost = egg_price
                .checked_mul_count(total_eggs)
                .ok_or_else(|| EngineError::Validation("entry cost overflows".to_string()))?;

            let seq = self.next_created_seq(&db_tx).await?;
            let mut entry = DailyEntry::new(date, egg_price, total_eggs, total_cost, seq);
            daily_entries::ActiveModel::from(&entry).insert(&db_tx).await?;

            for (person, count) in &mut persons {
                let cost = egg_price
                    .checked_mul_count(*count)
                    .ok_or_else(|| EngineError::Validation("entry cost overflows".to_string()))?;

                let allocation = Allocation::new(entry.id, person.id, *count, cost);
                allocations::ActiveModel::from(&allocation)
                    .insert(&db_tx)
                    .await?;
                entry.allocations.push(allocation);

                person.total_eggs += *count;
                person.balance -= cost;
                let active = people::ActiveModel {
                    id: ActiveValue::Set(person.id.to_string()),
                    total_eggs: ActiveValue::Set(person.total_eggs),
                    balance_minor: ActiveValue::Set(person.balance.cents()),
                    ..Default::default()
                };
                active.update(&db_tx).await?;
            }

            let mut updated: Vec<Person> =
                persons.into_iter().map(|(person, _)| person).collect();
            updated.sort_by_key(|person| person.created_seq);
            Ok((entry, updated))
        })
    }

    /// Removes the most recently created daily entry and reverses its
    /// charges using the costs stored at submission time.
    ///
    /// Only the latest entry is undoable; once it is gone the next most
    /// recent one takes its place.
    pub async fn undo_last_daily_entry(&self) -> ResultEngine<DailyEntry> {
        let _write = self.write_lock.lock().await;
        with_tx!(self, |db_tx| {
            let entry_model = daily_entries::Entity::find()
                .order_by_desc(daily_entries::Column::CreatedSeq)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("nothing to undo".to_string()))?;
            let mut entry = DailyEntry::try_from(entry_model)?;

            let allocation_models = allocations::Entity::find()
                .filter(allocations::Column::EntryId.eq(entry.id.to_string()))
                .all(&db_tx)
                .await?;

            for allocation_model in allocation_models {
                let allocation = Allocation::try_from(allocation_model)?;

                // People are never deleted, so a dangling reference here
                // means the store is corrupted.
                let person_model = people::Entity::find_by_id(allocation.person_id.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| {
                        EngineError::Conflict("allocation references a missing person".to_string())
                    })?;
                let mut person = Person::try_from(person_model)?;

                person.total_eggs -= allocation.egg_count;
                person.balance += allocation.cost;
                let active = people::ActiveModel {
                    id: ActiveValue::Set(person.id.to_string()),
                    total_eggs: ActiveValue::Set(person.total_eggs),
                    balance_minor: ActiveValue::Set(person.balance.cents()),
                    ..Default::default()
                };
                active.update(&db_tx).await?;

                entry.allocations.push(allocation);
            }

            allocations::Entity::delete_many()
                .filter(allocations::Column::EntryId.eq(entry.id.to_string()))
                .exec(&db_tx)
                .await?;
            daily_entries::Entity::delete_by_id(entry.id.to_string())
                .exec(&db_tx)
                .await?;

            Ok(entry)
        })
    }
}
