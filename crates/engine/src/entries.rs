//! Entry primitives.
//!
//! An `Entry` is a single income or expense record persisted in the `sales`
//! table. Amounts live in integer cents (see [`MoneyCents`]) and timestamps are
//! normalized to UTC before they reach the database.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, MoneyCents, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(format!(
                "kind must be income or expense, got '{other}'"
            ))),
        }
    }
}

/// A validated entry waiting to be written.
///
/// Used for both create and update: an update replaces every field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub kind: EntryKind,
    pub amount: MoneyCents,
    pub occurred_at: DateTime<Utc>,
    pub category: String,
}

impl NewEntry {
    pub fn new(
        kind: EntryKind,
        amount: MoneyCents,
        occurred_at: DateTime<Utc>,
        category: impl Into<String>,
    ) -> ResultEngine<Self> {
        let entry = Self {
            kind,
            amount,
            occurred_at,
            category: category.into(),
        };
        entry.validate()?;
        Ok(entry)
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if !self.amount.is_positive() {
            return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(EngineError::InvalidCategory(
                "category must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub id: i32,
    pub kind: EntryKind,
    pub amount: MoneyCents,
    pub occurred_at: DateTime<Utc>,
    pub category: String,
}

impl Entry {
    pub(crate) fn from_new(id: i32, entry: NewEntry) -> Self {
        Self {
            id,
            kind: entry.kind,
            amount: entry.amount,
            occurred_at: entry.occurred_at,
            category: entry.category,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    /// Fixed-point amount in cents.
    pub amount: i64,
    #[sea_orm(column_name = "date")]
    pub occurred_at: DateTimeUtc,
    pub category: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Active model for an insert: `id` is left to the database sequence.
    pub(crate) fn for_insert(entry: &NewEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: ActiveValue::NotSet,
            kind: ActiveValue::Set(entry.kind.as_str().to_string()),
            amount: ActiveValue::Set(entry.amount.cents()),
            occurred_at: ActiveValue::Set(entry.occurred_at),
            category: ActiveValue::Set(entry.category.clone()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

impl TryFrom<Model> for Entry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            kind: EntryKind::try_from(model.kind.as_str())?,
            amount: MoneyCents::new(model.amount),
            occurred_at: model.occurred_at,
            category: model.category,
        })
    }
}
