use chrono::Utc;
use uuid::Uuid;

use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{EngineError, MoneyCents, Payment, Person, ResultEngine, payments, people};

use super::{Engine, with_tx};

impl Engine {
    /// Records a payment and credits the person's balance.
    ///
    /// Payments are append-only; undo never touches them.
    pub async fn record_payment(
        &self,
        person_id: Uuid,
        amount: MoneyCents,
    ) -> ResultEngine<(Payment, Person)> {
        if !amount.is_positive() {
            return Err(EngineError::Validation(
                "payment amount must be positive".to_string(),
            ));
        }

        let _write = self.write_lock.lock().await;
        with_tx!(self, |db_tx| {
            let model = people::Entity::find_by_id(person_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("person not exists".to_string()))?;
            let mut person = Person::try_from(model)?;

            let seq = self.next_created_seq(&db_tx).await?;
            let payment = Payment::new(person_id, amount, Utc::now(), seq);
            payments::ActiveModel::from(&payment).insert(&db_tx).await?;

            person.balance += amount;
            let active = people::ActiveModel {
                id: ActiveValue::Set(person.id.to_string()),
                balance_minor: ActiveValue::Set(person.balance.cents()),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            Ok((payment, person))
        })
    }
}
