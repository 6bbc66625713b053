//! Shared types for the API layer.

use std::sync::Arc;

use uuid::Uuid;

use crate::api::error::ApiError;
use crate::core_state::CoreState;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Parse a session id from a path segment.
pub fn parse_session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| ApiError::BadRequest(format!("Invalid session ID: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_session_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_session_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_garbage_session_id() {
        assert!(matches!(
            parse_session_id("not-a-uuid"),
            Err(ApiError::BadRequest(_))
        ));
    }
}
