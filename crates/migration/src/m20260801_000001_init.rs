//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for the egg ledger:
//!
//! - `people`: group members with denormalized running totals
//! - `daily_entries`: one row per recorded batch
//! - `allocations`: per-person share of a daily entry
//! - `payments`: append-only payment log

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum People {
    Table,
    Id,
    Name,
    NameNorm,
    TotalEggs,
    BalanceMinor,
    CreatedSeq,
}

#[derive(Iden)]
enum DailyEntries {
    Table,
    Id,
    Date,
    EggPriceMinor,
    TotalEggs,
    TotalCostMinor,
    CreatedSeq,
}

#[derive(Iden)]
enum Allocations {
    Table,
    Id,
    EntryId,
    PersonId,
    EggCount,
    CostMinor,
}

#[derive(Iden)]
enum Payments {
    Table,
    Id,
    PersonId,
    AmountMinor,
    CreatedAt,
    CreatedSeq,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. People
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(People::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(People::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(People::Name).string().not_null())
                    .col(ColumnDef::new(People::NameNorm).string().not_null())
                    .col(ColumnDef::new(People::TotalEggs).big_integer().not_null())
                    .col(
                        ColumnDef::new(People::BalanceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(People::CreatedSeq).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-people-name_norm-unique")
                    .table(People::Table)
                    .col(People::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Daily entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(DailyEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyEntries::Date).date().not_null())
                    .col(
                        ColumnDef::new(DailyEntries::EggPriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyEntries::TotalEggs)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyEntries::TotalCostMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyEntries::CreatedSeq)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-daily_entries-created_seq")
                    .table(DailyEntries::Table)
                    .col(DailyEntries::CreatedSeq)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Allocations
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Allocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Allocations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Allocations::EntryId).string().not_null())
                    .col(ColumnDef::new(Allocations::PersonId).string().not_null())
                    .col(
                        ColumnDef::new(Allocations::EggCount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Allocations::CostMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-allocations-entry_id")
                            .from(Allocations::Table, Allocations::EntryId)
                            .to(DailyEntries::Table, DailyEntries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-allocations-person_id")
                            .from(Allocations::Table, Allocations::PersonId)
                            .to(People::Table, People::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-allocations-entry_id")
                    .table(Allocations::Table)
                    .col(Allocations::EntryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-allocations-person_id")
                    .table(Allocations::Table)
                    .col(Allocations::PersonId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Payments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::PersonId).string().not_null())
                    .col(
                        ColumnDef::new(Payments::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::CreatedAt).timestamp().not_null())
                    .col(
                        ColumnDef::new(Payments::CreatedSeq)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payments-person_id")
                            .from(Payments::Table, Payments::PersonId)
                            .to(People::Table, People::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payments-person_id")
                    .table(Payments::Table)
                    .col(Payments::PersonId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Allocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(People::Table).to_owned())
            .await?;

        Ok(())
    }
}
