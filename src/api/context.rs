//! Per-request caller identity.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::error::PayrollError;
use crate::models::Employee;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// The authenticated caller of a request.
///
/// Extracted from an `Authorization: Bearer <token>` header. The token is
/// looked up in the session store and mapped to the employee directory.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation id for log lines of this request.
    pub correlation_id: Uuid,
    /// The acting employee.
    pub employee: Employee,
    /// The bearer token, kept so logout can revoke it.
    pub token: String,
}

impl RequestContext {
    /// Fails with `Forbidden` unless the caller may view `other`.
    pub fn ensure_can_view(&self, other: &Employee) -> Result<(), PayrollError> {
        if self.employee.can_view(other) {
            Ok(())
        } else {
            Err(PayrollError::Forbidden {
                message: format!("{} may not view {}", self.employee.id, other.id),
            })
        }
    }

    /// Fails with `Forbidden` unless the caller may review `other`'s assignments.
    pub fn ensure_can_review(&self, other: &Employee) -> Result<(), PayrollError> {
        if self.employee.can_review(other) {
            Ok(())
        } else {
            Err(PayrollError::Forbidden {
                message: format!("{} may not review {}", self.employee.id, other.id),
            })
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| PayrollError::Unauthorized {
            message: "missing bearer token".to_string(),
        })?;
        let username = state
            .sessions()
            .resolve(token)
            .ok_or_else(|| PayrollError::Unauthorized {
                message: "invalid or expired session".to_string(),
            })?;
        // A session can outlive a directory entry after a config reload.
        let employee = state
            .config()
            .get_employee(&username)
            .map_err(|_| PayrollError::Unauthorized {
                message: format!("unknown user '{}'", username),
            })?
            .clone();

        Ok(Self {
            correlation_id: Uuid::new_v4(),
            employee,
            token: token.to_string(),
        })
    }
}
