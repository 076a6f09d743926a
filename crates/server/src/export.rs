//! Export API endpoint

use crate::ServerError;

/// CSV export is not offered: the endpoint exists so clients get an explicit
/// `501 Not Implemented` instead of a 404.
pub async fn export_csv() -> Result<(), ServerError> {
    Err(ServerError::NotImplemented("not implemented".to_string()))
}
