//! Error taxonomy shared by every registry.
//!
//! Each rejected operation maps to exactly one of four domain kinds. The
//! `Storage` variant only carries failures of the persistence substrate.

use crate::principal::Principal;

/// Top-level error returned by every registry operation.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The caller is not the configured authority.
    #[error(transparent)]
    Unauthorized(#[from] UnauthorizedError),

    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A record with the same identity already exists.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// A state-machine precondition does not hold.
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LedgerError {
    /// Numeric result code, following the ledger's original contract codes.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::Unauthorized(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::InvalidState(_) => 400,
            Self::Storage(_) => 500,
        }
    }
}

/// A mutating call was made by someone other than the authority.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("caller {caller} is not the ledger authority")]
pub struct UnauthorizedError {
    pub caller: Principal,
}

/// A referenced record was not found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A record with a caller-supplied identity already exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub id: String,
}

/// The record is not in the status an operation requires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} is {actual}, expected {expected}")]
pub struct InvalidStateError {
    pub entity: &'static str,
    pub id: String,
    pub expected: String,
    pub actual: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_each_kind_to_its_contract_code() {
        let unauthorized: LedgerError = UnauthorizedError {
            caller: Principal::new("intruder"),
        }
        .into();
        let not_found: LedgerError = NotFoundError {
            entity: "Device",
            id: "999".to_string(),
        }
        .into();
        let conflict: LedgerError = ConflictError {
            entity: "Hospital",
            id: "1".to_string(),
        }
        .into();
        let invalid: LedgerError = InvalidStateError {
            entity: "ServiceOrder",
            id: "1".to_string(),
            expected: "in-progress".to_string(),
            actual: "scheduled".to_string(),
        }
        .into();

        assert_eq!(unauthorized.code(), 403);
        assert_eq!(not_found.code(), 404);
        assert_eq!(conflict.code(), 409);
        assert_eq!(invalid.code(), 400);
    }

    #[test]
    fn should_describe_invalid_state_with_both_statuses() {
        let err = InvalidStateError {
            entity: "ServiceOrder",
            id: "7".to_string(),
            expected: "in-progress".to_string(),
            actual: "scheduled".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ServiceOrder 7 is scheduled, expected in-progress"
        );
    }

    #[test]
    fn should_display_inner_message_for_domain_kinds() {
        let err: LedgerError = NotFoundError {
            entity: "Technician",
            id: "3".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Technician 3 not found");
    }
}
