use uuid::Uuid;

use crate::{
    db::enums::WorkerStatus,
    db::models::WorkerCapacity,
    db::store::ResourceStore,
    error::AppError,
};

/// Hours a worker can commit across all projects in one week.
pub const WEEKLY_CAPACITY: i32 = 40;
/// Committed hours above which a worker with spare time is `Partial`.
pub const PARTIAL_THRESHOLD: i32 = 20;
/// Weekly commitment at which an assignment counts as Full-Time.
pub const FULL_TIME_THRESHOLD: i32 = 35;

/// The only writer of `user_details.total_available_hours` and `status`.
pub struct CapacityLedger;

impl CapacityLedger {
    pub fn status_for(available: i32) -> WorkerStatus {
        let committed = WEEKLY_CAPACITY - available;
        if available <= 0 {
            WorkerStatus::Busy
        } else if committed > PARTIAL_THRESHOLD {
            WorkerStatus::Partial
        } else {
            WorkerStatus::Available
        }
    }

    pub fn available_hours<S: ResourceStore + ?Sized>(
        store: &mut S,
        worker: Uuid,
    ) -> Result<i32, AppError> {
        Ok(Self::load(store, worker)?.total_available_hours)
    }

    pub fn commit<S: ResourceStore + ?Sized>(
        store: &mut S,
        worker: Uuid,
        hours: i32,
    ) -> Result<WorkerCapacity, AppError> {
        Self::check_hours(hours)?;
        let current = Self::load(store, worker)?;
        if hours > current.total_available_hours {
            return Err(AppError::InsufficientCapacity {
                worker_id: worker,
                requested: hours,
                available: current.total_available_hours,
            });
        }
        let updated = Self::store_available(store, worker, current.total_available_hours - hours)?;
        tracing::info!(
            worker_id = %worker,
            hours,
            available = updated.total_available_hours,
            status = %updated.status,
            "Committed hours"
        );
        Ok(updated)
    }

    /// Gives hours back, never raising availability above the weekly capacity.
    pub fn release<S: ResourceStore + ?Sized>(
        store: &mut S,
        worker: Uuid,
        hours: i32,
    ) -> Result<WorkerCapacity, AppError> {
        Self::check_hours(hours)?;
        let current = Self::load(store, worker)?;
        let restored = current.total_available_hours.saturating_add(hours);
        if restored > WEEKLY_CAPACITY {
            tracing::warn!(
                worker_id = %worker,
                hours,
                available = current.total_available_hours,
                "Release exceeds weekly capacity, clamping"
            );
        }
        let updated = Self::store_available(store, worker, restored.min(WEEKLY_CAPACITY))?;
        tracing::info!(
            worker_id = %worker,
            hours,
            available = updated.total_available_hours,
            status = %updated.status,
            "Released hours"
        );
        Ok(updated)
    }

    /// Overwrites availability from the authoritative committed total.
    pub fn reconcile<S: ResourceStore + ?Sized>(
        store: &mut S,
        worker: Uuid,
        committed: i64,
    ) -> Result<WorkerCapacity, AppError> {
        if committed < 0 {
            return Err(AppError::validation_field(
                "committed",
                "Committed hours cannot be negative",
            ));
        }
        Self::load(store, worker)?;
        let committed = committed.min(WEEKLY_CAPACITY as i64) as i32;
        Self::store_available(store, worker, WEEKLY_CAPACITY - committed)
    }

    fn load<S: ResourceStore + ?Sized>(store: &mut S, worker: Uuid) -> Result<WorkerCapacity, AppError> {
        store
            .worker_capacity(worker)?
            .ok_or_else(|| AppError::not_found("Worker"))
    }

    fn store_available<S: ResourceStore + ?Sized>(
        store: &mut S,
        worker: Uuid,
        available: i32,
    ) -> Result<WorkerCapacity, AppError> {
        let status = Self::status_for(available);
        store.update_worker_capacity(worker, available, status)?;
        Ok(WorkerCapacity {
            user_id: worker,
            total_available_hours: available,
            status,
        })
    }

    fn check_hours(hours: i32) -> Result<(), AppError> {
        if hours < 0 {
            return Err(AppError::validation_field("hours", "Hours cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::InMemoryStore;

    #[test]
    fn status_follows_committed_hours() {
        assert_eq!(CapacityLedger::status_for(40), WorkerStatus::Available);
        assert_eq!(CapacityLedger::status_for(20), WorkerStatus::Available);
        assert_eq!(CapacityLedger::status_for(19), WorkerStatus::Partial);
        assert_eq!(CapacityLedger::status_for(1), WorkerStatus::Partial);
        assert_eq!(CapacityLedger::status_for(0), WorkerStatus::Busy);
    }

    #[test]
    fn commit_decrements_and_persists_once() {
        let mut store = InMemoryStore::new();
        let worker = store.add_worker(40);

        let updated = CapacityLedger::commit(&mut store, worker, 24).unwrap();

        assert_eq!(updated.total_available_hours, 16);
        assert_eq!(updated.status, WorkerStatus::Partial);
        assert_eq!(store.capacity(worker), Some(updated));
        assert_eq!(store.capacity_writes(), 1);
    }

    #[test]
    fn commit_over_available_leaves_ledger_untouched() {
        let mut store = InMemoryStore::new();
        let worker = store.add_worker(10);

        let err = CapacityLedger::commit(&mut store, worker, 11).unwrap_err();

        assert!(err.is_insufficient_capacity());
        assert_eq!(CapacityLedger::available_hours(&mut store, worker).unwrap(), 10);
        assert_eq!(store.capacity_writes(), 0);
    }

    #[test]
    fn commit_everything_makes_worker_busy() {
        let mut store = InMemoryStore::new();
        let worker = store.add_worker(40);

        let updated = CapacityLedger::commit(&mut store, worker, 40).unwrap();

        assert_eq!(updated.total_available_hours, 0);
        assert_eq!(updated.status, WorkerStatus::Busy);
    }

    #[test]
    fn release_is_clamped_to_weekly_capacity() {
        let mut store = InMemoryStore::new();
        let worker = store.add_worker(30);

        let updated = CapacityLedger::release(&mut store, worker, 25).unwrap();

        assert_eq!(updated.total_available_hours, WEEKLY_CAPACITY);
        assert_eq!(updated.status, WorkerStatus::Available);
    }

    #[test]
    fn unknown_worker_and_negative_hours_are_rejected() {
        let mut store = InMemoryStore::new();
        let worker = store.add_worker(40);

        let missing = CapacityLedger::commit(&mut store, Uuid::new_v4(), 5).unwrap_err();
        assert!(matches!(missing, AppError::NotFound { .. }));

        let negative = CapacityLedger::release(&mut store, worker, -3).unwrap_err();
        assert!(negative.is_validation());
        assert_eq!(store.capacity_writes(), 0);
    }

    #[test]
    fn reconcile_rewrites_drifted_counter() {
        let mut store = InMemoryStore::new();
        let worker = store.add_worker(40);

        let updated = CapacityLedger::reconcile(&mut store, worker, 32).unwrap();
        assert_eq!(updated.total_available_hours, 8);
        assert_eq!(updated.status, WorkerStatus::Partial);

        let overbooked = CapacityLedger::reconcile(&mut store, worker, 55).unwrap();
        assert_eq!(overbooked.total_available_hours, 0);
        assert_eq!(overbooked.status, WorkerStatus::Busy);
    }
}
