//! Entry store of the finance tracker.
//!
//! [`Engine`] owns the CRUD operations over income/expense entries and the
//! analytics aggregate. It is built around a pooled
//! [`DatabaseConnection`](sea_orm::DatabaseConnection) and holds no other
//! state, so it can be shared freely behind an `Arc`.

pub use entries::{Entry, EntryKind, NewEntry};
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use stats::{Percentile, Summary, percentile_cont};

pub mod entries;
mod error;
mod money;
mod ops;
pub mod stats;

type ResultEngine<T> = Result<T, EngineError>;
