//! Access control: the single-authority capability check.

use medtrack_domain::error::{LedgerError, UnauthorizedError};
use medtrack_domain::principal::Principal;

/// Holds the one identity allowed to mutate the ledger.
///
/// Configured once when the ledger is assembled and never reassigned.
#[derive(Debug, Clone)]
pub struct AccessControl {
    authority: Principal,
}

impl AccessControl {
    #[must_use]
    pub fn new(authority: Principal) -> Self {
        Self { authority }
    }

    #[must_use]
    pub fn authority(&self) -> &Principal {
        &self.authority
    }

    #[must_use]
    pub fn is_authorized(&self, caller: &Principal) -> bool {
        *caller == self.authority
    }

    /// Admit `caller` or reject it. Runs before any other validation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] when `caller` is not the
    /// authority.
    pub fn authorize(&self, caller: &Principal) -> Result<(), LedgerError> {
        if self.is_authorized(caller) {
            return Ok(());
        }
        tracing::warn!(%caller, "rejected mutation from non-authority caller");
        Err(UnauthorizedError {
            caller: caller.clone(),
        }
        .into())
    }
}
