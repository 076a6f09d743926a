//! Creates the `sales` table holding income/expense entries.
//!
//! `amount` is a fixed-point value with two fractional digits, stored as
//! integer cents. Both `type` and `amount` are guarded by check constraints so
//! rows written outside the engine still respect the entry invariants.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Sales {
    Table,
    Id,
    Type,
    Amount,
    Date,
    Category,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sales::Type)
                            .string_len(10)
                            .not_null()
                            .check(Expr::col(Sales::Type).is_in(["income", "expense"])),
                    )
                    .col(
                        ColumnDef::new(Sales::Amount)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(Sales::Amount).gt(0)),
                    )
                    .col(
                        ColumnDef::new(Sales::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sales::Category).string().not_null())
                    .col(
                        ColumnDef::new(Sales::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sales::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sales-date")
                    .table(Sales::Table)
                    .col(Sales::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sales-category")
                    .table(Sales::Table)
                    .col(Sales::Category)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-sales-category")
                    .table(Sales::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-sales-date")
                    .table(Sales::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}
