//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes. The error `data` carries
//! the HTTP status a REST client would have seen.

use jsonrpsee::types::ErrorObjectOwned;
use serde_json::json;
use slotboard_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4004;
    pub const CONFLICT: i32 = 4009;
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    let status = err.http_status();
    let code = match status {
        400 => code::VALIDATION_ERROR,
        404 => code::NOT_FOUND,
        409 => code::CONFLICT,
        _ => code::INTERNAL_ERROR,
    };

    if code == code::INTERNAL_ERROR {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, status, "Request rejected");
    }

    ErrorObjectOwned::owned(code, err.message(), Some(json!({ "status": status })))
}

/// Validation error raised in the transport layer itself
pub fn invalid_params(msg: impl Into<String>) -> ErrorObjectOwned {
    to_rpc_error(AppError::Validation(msg.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_error_kind() {
        let conflict = to_rpc_error(AppError::Conflict("slot taken".into()));
        assert_eq!(conflict.code(), code::CONFLICT);
        assert_eq!(conflict.message(), "slot taken");
        assert_eq!(conflict.data().unwrap().get(), r#"{"status":409}"#);

        assert_eq!(to_rpc_error(AppError::NotFound("x".into())).code(), code::NOT_FOUND);
        assert_eq!(
            to_rpc_error(AppError::Validation("name required".into())).code(),
            code::VALIDATION_ERROR
        );
        assert_eq!(to_rpc_error(AppError::Storage("disk".into())).code(), code::INTERNAL_ERROR);
    }
}
