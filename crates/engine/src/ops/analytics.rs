use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{MoneyCents, ResultEngine, Summary, entries, error::OpContext};

use super::Engine;

impl Engine {
    /// Summary statistics of the entries with `occurred_at` in `[from, to]`.
    ///
    /// Income and expense amounts are aggregated together, as positive
    /// values. A window with `from > to` matches nothing.
    pub async fn analytics(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> ResultEngine<Summary> {
        let amounts: Vec<i64> = entries::Entity::find()
            .select_only()
            .column(entries::Column::Amount)
            .filter(entries::Column::OccurredAt.between(from, to))
            .order_by_asc(entries::Column::Amount)
            .into_tuple()
            .all(&self.database)
            .await
            .op("store.analytics")?;

        let amounts: Vec<MoneyCents> = amounts.into_iter().map(MoneyCents::new).collect();
        Ok(Summary::from_sorted(&amounts))
    }
}
