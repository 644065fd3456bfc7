//! End-to-end tests for the wired ledger.
//!
//! Each test opens a complete ledger (in-memory `SQLite`, real repositories,
//! real registries sharing one authority and one write gate) and drives it
//! through the public service API.

use std::sync::Arc;

use medtrack_app::ports::ManualClock;
use medtrack_domain::device::NewDevice;
use medtrack_domain::error::LedgerError;
use medtrack_domain::hospital::Hospital;
use medtrack_domain::id::{DeviceId, HospitalId, ServiceId, TechnicianId};
use medtrack_domain::principal::Principal;
use medtrack_domain::service_history::ServiceCompletion;
use medtrack_domain::service_order::NewServiceOrder;
use medtrack_domain::status::{DeviceStatus, ServiceStatus, TechnicianStatus};
use medtrack_domain::technician::NewTechnician;
use medtrack_ledger::config::LedgerConfig;
use medtrack_ledger::{Ledger, LedgerSummary};

const OWNER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
const STRANGER: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";
const BLOCK_HEIGHT: u64 = 1_625_270_400;

fn owner() -> Principal {
    Principal::new(OWNER)
}

fn stranger() -> Principal {
    Principal::new(STRANGER)
}

/// Open a ledger over a fresh in-memory database with a controllable clock.
async fn ledger() -> (Ledger<Arc<ManualClock>>, Arc<ManualClock>) {
    let mut config = LedgerConfig::with_authority(OWNER);
    config.database.url = "sqlite::memory:".to_string();
    let clock = Arc::new(ManualClock::new(BLOCK_HEIGHT));

    let ledger = Ledger::open(&config, Arc::clone(&clock))
        .await
        .expect("in-memory ledger should open");

    (ledger, clock)
}

fn general_hospital() -> Hospital {
    Hospital::new(
        HospitalId::FIRST,
        "General Hospital",
        "New York",
        "contact@hospital.com",
    )
}

fn mri_scanner(hospital_id: HospitalId) -> NewDevice {
    NewDevice::builder(hospital_id)
        .name("MRI Scanner")
        .model("Siemens MAGNETOM")
        .serial_number("SN123456")
        .manufacturer("Siemens")
        .purchase_date(1_609_459_200)
        .warranty_expiry(1_672_531_200)
        .build()
}

fn john_doe() -> NewTechnician {
    NewTechnician::new("John Doe", "john@example.com", 1_609_459_200, 1_672_531_200)
}

fn maintenance(device_id: DeviceId, technician_id: TechnicianId) -> NewServiceOrder {
    NewServiceOrder::builder(device_id, technician_id)
        .scheduled_date(1_625_184_000)
        .service_type("Maintenance")
        .notes("Regular checkup")
        .build()
}

/// Register one hospital, one device and one technician.
async fn seeded() -> (Ledger<Arc<ManualClock>>, Arc<ManualClock>) {
    let (ledger, clock) = ledger().await;
    ledger
        .devices()
        .register_hospital(general_hospital(), &owner())
        .await
        .unwrap();
    ledger
        .devices()
        .register_device(mri_scanner(HospitalId::FIRST), &owner())
        .await
        .unwrap();
    ledger
        .technicians()
        .register_technician(john_doe(), &owner())
        .await
        .unwrap();
    (ledger, clock)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_registered_hospital_exactly() {
    let (ledger, _) = ledger().await;

    let registered = ledger
        .devices()
        .register_hospital(general_hospital(), &owner())
        .await
        .unwrap();

    let fetched = ledger.devices().get_hospital(HospitalId::FIRST).await.unwrap();
    assert_eq!(fetched, Some(general_hospital()));
    assert_eq!(registered, general_hospital());
}

#[tokio::test]
async fn should_reject_device_for_unknown_hospital_without_storing_it() {
    let (ledger, _) = ledger().await;

    let result = ledger
        .devices()
        .register_device(mri_scanner(HospitalId::new(999)), &owner())
        .await;

    assert!(matches!(result, Err(LedgerError::NotFound(_))));
    assert_eq!(ledger.devices().device_count().await.unwrap(), 0);
}

#[tokio::test]
async fn should_reject_duplicate_hospital_and_keep_original() {
    let (ledger, _) = ledger().await;
    ledger
        .devices()
        .register_hospital(general_hospital(), &owner())
        .await
        .unwrap();

    let result = ledger
        .devices()
        .register_hospital(
            Hospital::new(HospitalId::FIRST, "Impostor", "Nowhere", "none"),
            &owner(),
        )
        .await;

    assert!(matches!(result, Err(LedgerError::Conflict(_))));
    let stored = ledger.devices().get_hospital(HospitalId::FIRST).await.unwrap();
    assert_eq!(stored, Some(general_hospital()));
}

#[tokio::test]
async fn should_reject_every_mutation_from_non_authority_without_side_effects() {
    let (ledger, _) = seeded().await;
    ledger
        .technicians()
        .add_qualification(TechnicianId::FIRST, "MRI Scanner", "Expert", &owner())
        .await
        .unwrap();
    let scheduled = ledger
        .scheduler()
        .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::FIRST), &owner())
        .await
        .unwrap();
    let in_progress = ledger
        .scheduler()
        .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::FIRST), &owner())
        .await
        .unwrap();
    ledger
        .scheduler()
        .update_service_status(in_progress, ServiceStatus::InProgress, &owner())
        .await
        .unwrap();
    let before = ledger.summary().await.unwrap();

    let results = [
        ledger
            .devices()
            .register_hospital(
                Hospital::new(HospitalId::new(2), "Other", "Boston", "x"),
                &stranger(),
            )
            .await
            .map(|_| ()),
        ledger
            .devices()
            .register_device(mri_scanner(HospitalId::FIRST), &stranger())
            .await
            .map(|_| ()),
        ledger
            .devices()
            .update_device_status(DeviceId::FIRST, DeviceStatus::Retired, &stranger())
            .await,
        ledger
            .technicians()
            .register_technician(john_doe(), &stranger())
            .await
            .map(|_| ()),
        ledger
            .technicians()
            .add_qualification(TechnicianId::FIRST, "CT Scanner", "Expert", &stranger())
            .await,
        ledger
            .technicians()
            .verify_qualification(TechnicianId::FIRST, "MRI Scanner", &stranger())
            .await,
        ledger
            .technicians()
            .update_technician_status(TechnicianId::FIRST, TechnicianStatus::Inactive, &stranger())
            .await,
        ledger
            .scheduler()
            .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::FIRST), &stranger())
            .await
            .map(|_| ()),
        ledger
            .scheduler()
            .update_service_status(scheduled, ServiceStatus::InProgress, &stranger())
            .await,
        ledger
            .scheduler()
            .complete_service(in_progress, ServiceCompletion::new("done", 0), &stranger())
            .await
            .map(|_| ()),
    ];

    for result in results {
        let err = result.unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized(_)));
        assert_eq!(err.code(), 403);
    }
    assert_eq!(ledger.summary().await.unwrap(), before);
    let device = ledger.devices().get_device(DeviceId::FIRST).await.unwrap().unwrap();
    assert_eq!(device.status, DeviceStatus::Active);
    let technician = ledger
        .technicians()
        .get_technician(TechnicianId::FIRST)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(technician.status, TechnicianStatus::Active);
    let qualifications = ledger
        .technicians()
        .list_qualifications(TechnicianId::FIRST)
        .await
        .unwrap();
    assert_eq!(qualifications.len(), 1);
    assert!(!qualifications[0].verified);
    let scheduled = ledger.scheduler().get_service(scheduled).await.unwrap().unwrap();
    assert_eq!(scheduled.status, ServiceStatus::Scheduled);
    let in_progress = ledger
        .scheduler()
        .get_service(in_progress)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(in_progress.status, ServiceStatus::InProgress);
    assert!(
        ledger
            .scheduler()
            .list_service_history(DeviceId::FIRST)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn should_not_consume_ids_on_failed_registration() {
    let (ledger, _) = seeded().await;

    let failed = ledger
        .devices()
        .register_device(mri_scanner(HospitalId::new(999)), &owner())
        .await;
    let next = ledger
        .devices()
        .register_device(mri_scanner(HospitalId::FIRST), &owner())
        .await
        .unwrap();

    assert!(failed.is_err());
    assert_eq!(next, DeviceId::new(2));
}

#[tokio::test]
async fn should_list_devices_for_hospital_in_id_order() {
    let (ledger, _) = seeded().await;
    ledger
        .devices()
        .register_device(mri_scanner(HospitalId::FIRST), &owner())
        .await
        .unwrap();

    let ids: Vec<DeviceId> = ledger
        .devices()
        .list_devices_for_hospital(HospitalId::FIRST)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();

    assert_eq!(ids, vec![DeviceId::new(1), DeviceId::new(2)]);
}

// ---------------------------------------------------------------------------
// Qualification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_track_qualification_through_verification_and_deactivation() {
    let (ledger, _) = ledger().await;
    let technicians = ledger.technicians();

    let id = technicians
        .register_technician(john_doe(), &owner())
        .await
        .unwrap();
    assert_eq!(id, TechnicianId::FIRST);

    technicians
        .add_qualification(id, "MRI Scanner", "Expert", &owner())
        .await
        .unwrap();
    let added = technicians
        .get_qualification(id, "MRI Scanner")
        .await
        .unwrap()
        .unwrap();
    assert!(!added.verified);
    assert!(!technicians.is_qualified(id, "MRI Scanner").await.unwrap());

    technicians
        .verify_qualification(id, "MRI Scanner", &owner())
        .await
        .unwrap();
    assert!(technicians.is_qualified(id, "MRI Scanner").await.unwrap());

    technicians
        .update_technician_status(id, TechnicianStatus::Inactive, &owner())
        .await
        .unwrap();
    assert!(!technicians.is_qualified(id, "MRI Scanner").await.unwrap());
    let kept = technicians
        .get_qualification(id, "MRI Scanner")
        .await
        .unwrap()
        .unwrap();
    assert!(kept.verified);
}

#[tokio::test]
async fn should_report_missing_qualification_on_verify() {
    let (ledger, _) = seeded().await;

    let result = ledger
        .technicians()
        .verify_qualification(TechnicianId::FIRST, "CT Scanner", &owner())
        .await;

    assert!(matches!(result, Err(LedgerError::NotFound(_))));
    assert!(
        !ledger
            .technicians()
            .is_qualified(TechnicianId::FIRST, "CT Scanner")
            .await
            .unwrap()
    );
}

// ---------------------------------------------------------------------------
// Service lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_in_progress_service_and_record_history() {
    let (ledger, clock) = seeded().await;
    let scheduler = ledger.scheduler();

    let service_id = scheduler
        .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::FIRST), &owner())
        .await
        .unwrap();
    assert_eq!(service_id, ServiceId::FIRST);
    let scheduled = scheduler.get_service(service_id).await.unwrap().unwrap();
    assert_eq!(scheduled.status, ServiceStatus::Scheduled);

    scheduler
        .update_service_status(service_id, ServiceStatus::InProgress, &owner())
        .await
        .unwrap();
    let completed_at = clock.advance(600);
    scheduler
        .complete_service(
            service_id,
            ServiceCompletion::new("No issues found", 1_625_097_600)
                .parts(["filter", "lubricant"]),
            &owner(),
        )
        .await
        .unwrap();

    let entry = scheduler
        .get_service_history(DeviceId::FIRST, service_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.completion_date, completed_at);
    assert_eq!(entry.findings, "No issues found");
    assert_eq!(entry.parts_replaced, vec!["filter", "lubricant"]);
    assert_eq!(entry.next_service_date, 1_625_097_600);
    let order = scheduler.get_service(service_id).await.unwrap().unwrap();
    assert_eq!(order.status, ServiceStatus::Completed);
    assert_eq!(
        scheduler.list_service_history(DeviceId::FIRST).await.unwrap(),
        vec![entry]
    );
}

#[tokio::test]
async fn should_refuse_to_complete_scheduled_service() {
    let (ledger, _) = seeded().await;
    let scheduler = ledger.scheduler();
    let service_id = scheduler
        .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::FIRST), &owner())
        .await
        .unwrap();

    let result = scheduler
        .complete_service(service_id, ServiceCompletion::new("done", 0), &owner())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidState(_)));
    assert_eq!(err.code(), 400);
    let order = scheduler.get_service(service_id).await.unwrap().unwrap();
    assert_eq!(order.status, ServiceStatus::Scheduled);
    assert!(
        scheduler
            .get_service_history(DeviceId::FIRST, service_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn should_reject_second_completion_of_same_service() {
    let (ledger, _) = seeded().await;
    let scheduler = ledger.scheduler();
    let service_id = scheduler
        .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::FIRST), &owner())
        .await
        .unwrap();
    scheduler
        .update_service_status(service_id, ServiceStatus::InProgress, &owner())
        .await
        .unwrap();
    scheduler
        .complete_service(service_id, ServiceCompletion::new("first", 0), &owner())
        .await
        .unwrap();

    let retry = scheduler
        .complete_service(service_id, ServiceCompletion::new("second", 0), &owner())
        .await;

    assert!(matches!(retry, Err(LedgerError::InvalidState(_))));
    let history = scheduler.list_service_history(DeviceId::FIRST).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].findings, "first");
}

#[tokio::test]
async fn should_keep_first_history_when_reopened_service_is_completed_again() {
    let (ledger, _) = seeded().await;
    let scheduler = ledger.scheduler();
    let service_id = scheduler
        .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::FIRST), &owner())
        .await
        .unwrap();
    scheduler
        .update_service_status(service_id, ServiceStatus::InProgress, &owner())
        .await
        .unwrap();
    scheduler
        .complete_service(service_id, ServiceCompletion::new("first", 0), &owner())
        .await
        .unwrap();
    scheduler
        .update_service_status(service_id, ServiceStatus::InProgress, &owner())
        .await
        .unwrap();

    let err = scheduler
        .complete_service(service_id, ServiceCompletion::new("second", 0), &owner())
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::InvalidState(_)));
    assert_eq!(err.code(), 400);
    let order = scheduler.get_service(service_id).await.unwrap().unwrap();
    assert_eq!(order.status, ServiceStatus::InProgress);
    let history = scheduler.list_service_history(DeviceId::FIRST).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].findings, "first");
}

#[tokio::test]
async fn should_reject_schedule_for_unknown_technician() {
    let (ledger, _) = seeded().await;

    let result = ledger
        .scheduler()
        .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::new(7)), &owner())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
    assert_eq!(err.code(), 404);
    assert_eq!(ledger.scheduler().service_count().await.unwrap(), 0);
}

#[tokio::test]
async fn should_schedule_with_unqualified_technician() {
    let (ledger, _) = seeded().await;

    let service_id = ledger
        .scheduler()
        .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::FIRST), &owner())
        .await
        .unwrap();

    assert_eq!(service_id, ServiceId::FIRST);
}

#[tokio::test]
async fn should_summarise_registry_sizes() {
    let (ledger, _) = seeded().await;
    ledger
        .scheduler()
        .schedule_service(maintenance(DeviceId::FIRST, TechnicianId::FIRST), &owner())
        .await
        .unwrap();

    let summary = ledger.summary().await.unwrap();

    assert_eq!(
        summary,
        LedgerSummary {
            hospitals: 1,
            devices: 1,
            technicians: 1,
            services: 1,
        }
    );
}

#[tokio::test]
async fn should_serialise_concurrent_registrations_into_distinct_ids() {
    let (ledger, _) = seeded().await;
    let ledger = Arc::new(ledger);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let ledger = Arc::clone(&ledger);
        handles.push(tokio::spawn(async move {
            ledger
                .devices()
                .register_device(mri_scanner(HospitalId::FIRST), &owner())
                .await
                .unwrap()
        }));
    }
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().get());
    }
    ids.sort_unstable();

    assert_eq!(ids, (2..=9).collect::<Vec<u64>>());
}
