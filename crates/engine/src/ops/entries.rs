use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, prelude::*, sea_query::Expr};

use crate::{Entry, NewEntry, ResultEngine, entries, error::OpContext};

use super::Engine;

impl Engine {
    /// Insert a new entry and return it with the id assigned by the database.
    pub async fn create_entry(&self, entry: NewEntry) -> ResultEngine<Entry> {
        entry.validate()?;

        let model = entries::ActiveModel::for_insert(&entry, Utc::now())
            .insert(&self.database)
            .await
            .op("store.create")?;

        tracing::debug!("created entry {} ({} {})", model.id, entry.kind.as_str(), entry.amount);
        Ok(Entry::from_new(model.id, entry))
    }

    /// All entries, most recent first. Entries sharing a timestamp are
    /// returned newest id first.
    pub async fn list_entries(&self) -> ResultEngine<Vec<Entry>> {
        entries::Entity::find()
            .order_by_desc(entries::Column::OccurredAt)
            .order_by_desc(entries::Column::Id)
            .all(&self.database)
            .await
            .op("store.list")?
            .into_iter()
            .map(Entry::try_from)
            .collect()
    }

    /// Overwrite every mutable field of entry `id`.
    ///
    /// Updating an id that does not exist is not an error: nothing is written
    /// and the echo is returned all the same.
    pub async fn update_entry(&self, id: i32, entry: NewEntry) -> ResultEngine<Entry> {
        entry.validate()?;

        let result = entries::Entity::update_many()
            .col_expr(entries::Column::Kind, Expr::value(entry.kind.as_str()))
            .col_expr(entries::Column::Amount, Expr::value(entry.amount.cents()))
            .col_expr(entries::Column::OccurredAt, Expr::value(entry.occurred_at))
            .col_expr(entries::Column::Category, Expr::value(entry.category.clone()))
            .col_expr(entries::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entries::Column::Id.eq(id))
            .exec(&self.database)
            .await
            .op("store.update")?;

        if result.rows_affected == 0 {
            tracing::debug!("update of entry {id} matched no rows");
        }
        Ok(Entry::from_new(id, entry))
    }

    /// Remove entry `id`. Deleting a missing id is a no-op.
    pub async fn delete_entry(&self, id: i32) -> ResultEngine<()> {
        let result = entries::Entity::delete_by_id(id)
            .exec(&self.database)
            .await
            .op("store.delete")?;

        if result.rows_affected == 0 {
            tracing::debug!("delete of entry {id} matched no rows");
        }
        Ok(())
    }
}
