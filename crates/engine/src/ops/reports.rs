use chrono::NaiveDate;
use uuid::Uuid;

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Allocation, DailyEntry, EngineError, MoneyCents, Payment, ResultEngine, allocations,
    daily_entries, payments, people,
};

use super::{Engine, with_tx};

/// Group-wide balance totals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceTotals {
    /// Sum of positive balances.
    pub total_credit: MoneyCents,
    /// Sum of negative balances, reported as a positive amount.
    pub total_due: MoneyCents,
    /// `total_credit - total_due`.
    pub net_balance: MoneyCents,
}

/// One person's outstanding debt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Due {
    pub name: String,
    /// Positive amount owed.
    pub amount: MoneyCents,
}

/// One daily entry, without its allocations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyEntrySummary {
    pub date: NaiveDate,
    pub egg_price: MoneyCents,
    pub total_eggs: i64,
    pub total_cost: MoneyCents,
}

/// One line of a person's merged charge/payment history.
///
/// Charges carry a negative `amount` and the egg count; payments carry a
/// positive `amount` and zero eggs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonHistoryRow {
    pub date: NaiveDate,
    pub eggs: i64,
    pub amount: MoneyCents,
    pub created_seq: i64,
}

impl Engine {
    /// Returns the group-wide credit/debt totals.
    pub async fn total_balance(&self) -> ResultEngine<BalanceTotals> {
        let people = self.list_people().await?;

        let mut total_credit = MoneyCents::ZERO;
        let mut total_due = MoneyCents::ZERO;
        for person in &people {
            if person.balance.is_negative() {
                total_due += person.balance.abs();
            } else {
                total_credit += person.balance;
            }
        }

        Ok(BalanceTotals {
            total_credit,
            total_due,
            net_balance: total_credit - total_due,
        })
    }

    /// Lists everyone with a negative balance, in registration order.
    pub async fn dues(&self) -> ResultEngine<Vec<Due>> {
        let people = self.list_people().await?;

        Ok(people
            .into_iter()
            .filter(|person| person.balance.is_negative())
            .map(|person| Due {
                name: person.name,
                amount: person.balance.abs(),
            })
            .collect())
    }

    /// Lists all daily entries, oldest date first. Entries sharing a date
    /// keep their creation order.
    pub async fn daily_history(&self) -> ResultEngine<Vec<DailyEntrySummary>> {
        with_tx!(self, |db_tx| {
            let models = daily_entries::Entity::find()
                .order_by_asc(daily_entries::Column::Date)
                .order_by_asc(daily_entries::Column::CreatedSeq)
                .all(&db_tx)
                .await?;

            let mut out = Vec::with_capacity(models.len());
            for model in models {
                let entry = DailyEntry::try_from(model)?;
                out.push(DailyEntrySummary {
                    date: entry.date,
                    egg_price: entry.egg_price,
                    total_eggs: entry.total_eggs,
                    total_cost: entry.total_cost,
                });
            }
            Ok(out)
        })
    }

    /// Merges one person's charges and payments into a single chronological
    /// history. Zero-count allocations are omitted.
    pub async fn person_history(&self, person_id: Uuid) -> ResultEngine<Vec<PersonHistoryRow>> {
        with_tx!(self, |db_tx| {
            people::Entity::find_by_id(person_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("person not exists".to_string()))?;

            let charge_rows: Vec<(allocations::Model, Option<daily_entries::Model>)> =
                allocations::Entity::find()
                    .filter(allocations::Column::PersonId.eq(person_id.to_string()))
                    .filter(allocations::Column::EggCount.gt(0))
                    .find_also_related(daily_entries::Entity)
                    .all(&db_tx)
                    .await?;

            let mut rows = Vec::with_capacity(charge_rows.len());
            for (allocation_model, entry_model) in charge_rows {
                let entry_model = entry_model.ok_or_else(|| {
                    EngineError::Conflict("allocation references a missing entry".to_string())
                })?;
                let allocation = Allocation::try_from(allocation_model)?;
                let entry = DailyEntry::try_from(entry_model)?;
                rows.push(PersonHistoryRow {
                    date: entry.date,
                    eggs: allocation.egg_count,
                    amount: -allocation.cost,
                    created_seq: entry.created_seq,
                });
            }

            let payment_models = payments::Entity::find()
                .filter(payments::Column::PersonId.eq(person_id.to_string()))
                .all(&db_tx)
                .await?;
            for payment_model in payment_models {
                let payment = Payment::try_from(payment_model)?;
                rows.push(PersonHistoryRow {
                    date: payment.created_at.date_naive(),
                    eggs: 0,
                    amount: payment.amount,
                    created_seq: payment.created_seq,
                });
            }

            rows.sort_by_key(|row| row.created_seq);
            Ok(rows)
        })
    }
}
