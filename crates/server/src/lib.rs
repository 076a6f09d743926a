use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

mod analytics;
mod entries;
mod export;
mod server;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    NotImplemented(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidKind(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
        EngineError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    if let EngineError::Database { .. } = &err {
        tracing::error!("database error: {err}");
    }
    err.to_string()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::NotImplemented(err) => (StatusCode::NOT_IMPLEMENTED, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_validation_maps_to_400() {
        for err in [
            EngineError::InvalidKind("x".to_string()),
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidCategory("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn engine_database_maps_to_500() {
        let err = EngineError::Database {
            op: "store.create",
            source: sea_orm_err(),
        };
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_implemented_maps_to_501() {
        let res = ServerError::NotImplemented("later".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);
    }

    fn sea_orm_err() -> sea_orm::DbErr {
        sea_orm::DbErr::Custom("CHECK constraint failed: amount > 0".to_string())
    }
}
