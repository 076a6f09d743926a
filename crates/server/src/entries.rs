//! Entries API endpoints

use api_types::entry::{EntryKind as ApiKind, EntryNew, EntryView};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use engine::{EngineError, EntryKind, MoneyCents, NewEntry};

use crate::{ServerError, server::ServerState};

fn map_kind(kind: EntryKind) -> ApiKind {
    match kind {
        EntryKind::Income => ApiKind::Income,
        EntryKind::Expense => ApiKind::Expense,
    }
}

fn map_entry(entry: engine::Entry) -> EntryView {
    EntryView {
        id: entry.id.into(),
        kind: map_kind(entry.kind),
        amount: entry.amount.to_major(),
        occurred_at: entry.occurred_at.fixed_offset(),
        category: entry.category,
    }
}

/// Echo of an update aimed at an id no row can have.
fn map_unstored(id: i64, entry: NewEntry) -> EntryView {
    EntryView {
        id,
        kind: map_kind(entry.kind),
        amount: entry.amount.to_major(),
        occurred_at: entry.occurred_at.fixed_offset(),
        category: entry.category,
    }
}

fn new_entry(payload: EntryNew) -> Result<NewEntry, EngineError> {
    let kind = match payload.kind {
        ApiKind::Income => EntryKind::Income,
        ApiKind::Expense => EntryKind::Expense,
    };
    NewEntry::new(
        kind,
        MoneyCents::from_major(payload.amount)?,
        payload.occurred_at.with_timezone(&Utc),
        payload.category,
    )
}

fn body(payload: Result<Json<EntryNew>, JsonRejection>) -> Result<EntryNew, ServerError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| ServerError::Generic(rejection.body_text()))
}

fn entry_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ServerError> {
    id.map(|Path(id)| id)
        .map_err(|_| ServerError::Generic("invalid id".to_string()))
}

/// Ids are `i32` in the store; anything wider cannot match a row.
fn stored_id(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<EntryNew>, JsonRejection>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let entry = new_entry(body(payload)?)?;
    let created = state.engine.create_entry(entry).await?;

    Ok((StatusCode::CREATED, Json(map_entry(created))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<EntryView>>, ServerError> {
    let entries = state
        .engine
        .list_entries()
        .await?
        .into_iter()
        .map(map_entry)
        .collect();

    Ok(Json(entries))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EntryNew>, JsonRejection>,
) -> Result<Json<EntryView>, ServerError> {
    let id = entry_id(id)?;
    let entry = new_entry(body(payload)?)?;

    let view = match stored_id(id) {
        Some(stored) => map_entry(state.engine.update_entry(stored, entry).await?),
        None => {
            tracing::debug!("update of entry {id} matched no rows");
            map_unstored(id, entry)
        }
    };

    Ok(Json(view))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let id = entry_id(id)?;
    match stored_id(id) {
        Some(stored) => state.engine.delete_entry(stored).await?,
        None => tracing::debug!("delete of entry {id} matched no rows"),
    }

    Ok(StatusCode::NO_CONTENT)
}
