use clap::{Arg, Command};
use diesel::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

use resource_planner::{
    config::Config,
    db::{
        self,
        enums::WorkerStatus,
        models::WorkerCapacity,
        repositories::{AssignmentsRepo, UsersRepo},
        store::PgStore,
    },
    error::AppError,
    init_tracing,
    services::ledger::{CapacityLedger, WEEKLY_CAPACITY},
};

#[derive(Debug, PartialEq)]
struct Drift {
    user_id: Uuid,
    stored: i32,
    stored_status: WorkerStatus,
    expected: i32,
    expected_status: WorkerStatus,
    committed: i64,
}

/// A row drifts when either its hours or its status disagree with the assignment total.
fn drift_for(capacity: &WorkerCapacity, committed: i64) -> Option<Drift> {
    let expected = (WEEKLY_CAPACITY as i64 - committed).max(0) as i32;
    let expected_status = CapacityLedger::status_for(expected);
    (capacity.total_available_hours != expected || capacity.status != expected_status).then_some(Drift {
        user_id: capacity.user_id,
        stored: capacity.total_available_hours,
        stored_status: capacity.status,
        expected,
        expected_status,
        committed,
    })
}

fn find_drift(conn: &mut PgConnection) -> Result<Vec<Drift>, AppError> {
    let committed: HashMap<Uuid, i64> = AssignmentsRepo::committed_by_worker(conn)?
        .into_iter()
        .map(|(worker, hours)| (worker, hours.unwrap_or(0)))
        .collect();

    Ok(UsersRepo::all_capacities(conn)?
        .iter()
        .filter_map(|capacity| {
            drift_for(capacity, committed.get(&capacity.user_id).copied().unwrap_or(0))
        })
        .collect())
}

fn main() -> Result<(), AppError> {
    let matches = Command::new("ledger-audit")
        .about("Compares stored worker availability with assigned hours")
        .arg(
            Arg::new("apply")
                .long("apply")
                .help("Rewrite drifted availability from the assignment totals")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();
    let apply = matches.get_flag("apply");

    let config = Config::from_env()?;
    init_tracing(&config);
    let pool = db::build_pool(&config.database())?;
    let mut conn = pool.get()?;

    let drift = find_drift(&mut conn)?;
    if drift.is_empty() {
        println!("Ledger is consistent");
        return Ok(());
    }

    for d in &drift {
        println!(
            "{}  stored={}h ({}) expected={}h ({}) committed={}h",
            d.user_id, d.stored, d.stored_status, d.expected, d.expected_status, d.committed
        );
    }
    println!("{} worker(s) drifted", drift.len());

    if !apply {
        println!("Run with --apply to repair");
        return Ok(());
    }

    conn.transaction::<_, AppError, _>(|conn| {
        let mut store = PgStore::new(conn);
        for d in &drift {
            let repaired = CapacityLedger::reconcile(&mut store, d.user_id, d.committed)?;
            tracing::info!(
                user_id = %d.user_id,
                from = d.stored,
                to = repaired.total_available_hours,
                status = %repaired.status,
                "Availability reconciled"
            );
        }
        Ok(())
    })?;
    println!("Repaired {} worker(s)", drift.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(available: i32, status: WorkerStatus) -> WorkerCapacity {
        WorkerCapacity {
            user_id: Uuid::new_v4(),
            total_available_hours: available,
            status,
        }
    }

    #[test]
    fn consistent_rows_are_not_reported() {
        assert_eq!(drift_for(&capacity(40, WorkerStatus::Available), 0), None);
        assert_eq!(drift_for(&capacity(8, WorkerStatus::Partial), 32), None);
        assert_eq!(drift_for(&capacity(0, WorkerStatus::Busy), 55), None);
    }

    #[test]
    fn stale_status_is_drift_even_when_hours_match() {
        let row = capacity(0, WorkerStatus::Available);

        let drift = drift_for(&row, 40).unwrap();

        assert_eq!(drift.stored, drift.expected);
        assert_eq!(drift.stored_status, WorkerStatus::Available);
        assert_eq!(drift.expected_status, WorkerStatus::Busy);
    }

    #[test]
    fn hour_mismatch_is_drift() {
        let drift = drift_for(&capacity(40, WorkerStatus::Available), 16).unwrap();

        assert_eq!(drift.expected, 24);
        assert_eq!(drift.expected_status, WorkerStatus::Available);
        assert_eq!(drift.committed, 16);
    }
}
