//! Technician registry: technicians, their qualifications, and the
//! qualification check.

use std::future::Future;

use medtrack_domain::error::{LedgerError, NotFoundError};
use medtrack_domain::id::TechnicianId;
use medtrack_domain::principal::Principal;
use medtrack_domain::qualification::Qualification;
use medtrack_domain::status::TechnicianStatus;
use medtrack_domain::technician::{NewTechnician, Technician};

use crate::access_control::AccessControl;
use crate::ports::{TechnicianDirectory, TechnicianRepository};
use crate::write_gate::WriteGate;

/// Application service for technician certification.
pub struct TechnicianRegistry<R> {
    repo: R,
    access: AccessControl,
    gate: WriteGate,
}

fn technician_not_found(id: TechnicianId) -> LedgerError {
    NotFoundError {
        entity: "Technician",
        id: id.to_string(),
    }
    .into()
}

impl<R: TechnicianRepository> TechnicianRegistry<R> {
    /// Create a new registry backed by the given repository.
    pub fn new(repo: R, access: AccessControl, gate: WriteGate) -> Self {
        Self { repo, access, gate }
    }

    /// Register a technician and return the new id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller, or a
    /// storage error.
    #[tracing::instrument(skip(self, technician), fields(technician_name = %technician.name))]
    pub async fn register_technician(
        &self,
        technician: NewTechnician,
        caller: &Principal,
    ) -> Result<TechnicianId, LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        let technician = self.repo.create(technician).await?;
        tracing::debug!(technician_id = %technician.id, "technician registered");
        Ok(technician.id)
    }

    /// Add, or replace, the qualification of a technician for a device type.
    ///
    /// The stored qualification is always unverified, including when it
    /// replaces a verified one.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller,
    /// [`LedgerError::NotFound`] when the technician does not exist, or a
    /// storage error.
    #[tracing::instrument(skip_all, fields(%technician_id))]
    pub async fn add_qualification(
        &self,
        technician_id: TechnicianId,
        device_type: impl Into<String>,
        certification_level: impl Into<String>,
        caller: &Principal,
    ) -> Result<(), LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        if self.repo.get_by_id(technician_id).await?.is_none() {
            return Err(technician_not_found(technician_id));
        }
        let qualification = Qualification::new(technician_id, device_type, certification_level);
        self.repo.save_qualification(qualification).await?;
        tracing::debug!("qualification added");
        Ok(())
    }

    /// Mark a qualification as verified. Verification never reverts.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller,
    /// [`LedgerError::NotFound`] when no qualification exists for the pair,
    /// or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn verify_qualification(
        &self,
        technician_id: TechnicianId,
        device_type: &str,
        caller: &Principal,
    ) -> Result<(), LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        let mut qualification = self
            .repo
            .get_qualification(technician_id, device_type)
            .await?
            .ok_or_else(|| {
                LedgerError::from(NotFoundError {
                    entity: "Qualification",
                    id: format!("{technician_id}/{device_type}"),
                })
            })?;
        qualification.verify();
        self.repo.save_qualification(qualification).await?;
        tracing::debug!("qualification verified");
        Ok(())
    }

    /// Overwrite the status of a technician. Qualifications are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] for a non-authority caller,
    /// [`LedgerError::NotFound`] when the technician does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn update_technician_status(
        &self,
        technician_id: TechnicianId,
        status: TechnicianStatus,
        caller: &Principal,
    ) -> Result<(), LedgerError> {
        self.access.authorize(caller)?;
        let _guard = self.gate.enter().await;

        let mut technician = self
            .repo
            .get_by_id(technician_id)
            .await?
            .ok_or_else(|| technician_not_found(technician_id))?;
        technician.status = status;
        self.repo.update(technician).await?;
        tracing::debug!("technician status updated");
        Ok(())
    }

    /// Whether the technician may service `device_type`: a verified
    /// qualification exists for the pair and the technician is `active`.
    ///
    /// Missing records yield `false`, never an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn is_qualified(
        &self,
        technician_id: TechnicianId,
        device_type: &str,
    ) -> Result<bool, LedgerError> {
        let Some(qualification) = self.repo.get_qualification(technician_id, device_type).await?
        else {
            return Ok(false);
        };
        let Some(technician) = self.repo.get_by_id(technician_id).await? else {
            return Ok(false);
        };
        Ok(qualification.qualifies(&technician))
    }

    /// Look up a technician.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_technician(
        &self,
        technician_id: TechnicianId,
    ) -> Result<Option<Technician>, LedgerError> {
        self.repo.get_by_id(technician_id).await
    }

    /// Look up the qualification of a technician for a device type.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_qualification(
        &self,
        technician_id: TechnicianId,
        device_type: &str,
    ) -> Result<Option<Qualification>, LedgerError> {
        self.repo.get_qualification(technician_id, device_type).await
    }

    /// All qualifications of a technician, ordered by device type.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_qualifications(
        &self,
        technician_id: TechnicianId,
    ) -> Result<Vec<Qualification>, LedgerError> {
        self.repo.find_qualifications(technician_id).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn technician_count(&self) -> Result<u64, LedgerError> {
        self.repo.count().await
    }
}

impl<R: TechnicianRepository> TechnicianDirectory for TechnicianRegistry<R> {
    fn find_technician(
        &self,
        id: TechnicianId,
    ) -> impl Future<Output = Result<Option<Technician>, LedgerError>> + Send {
        self.repo.get_by_id(id)
    }
}
