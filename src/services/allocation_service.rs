use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::{
        AvailableMember, CurrentUser, DashboardStats, UtilizationLevel, WeekOption,
        WeeklyAllocationRow, WorkLog,
    },
    db::repositories::{AssignmentsRepo, ProjectsRepo, UsersRepo, WorkLogsRepo},
    db::enums::ProjectStatus,
    error::AppError,
    services::ledger::WEEKLY_CAPACITY,
    utils::AvatarUrlHelper,
};

/// Past weeks offered by the week picker, besides the current one.
pub const PAST_WEEKS: usize = 10;

pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Monday..Friday totals per worker; weekend rows and rows outside the week are dropped.
/// Any date inside the week selects it.
pub fn weekly_grid(week_start: NaiveDate, logs: &[WorkLog]) -> BTreeMap<Uuid, [f64; 5]> {
    let week_start = week_start_for(week_start);
    let mut grid: BTreeMap<Uuid, [f64; 5]> = BTreeMap::new();
    for log in logs {
        let offset = (log.log_date - week_start).num_days();
        if !(0..5).contains(&offset) {
            continue;
        }
        grid.entry(log.user_id).or_insert([0.0; 5])[offset as usize] += log.hours;
    }
    grid
}

/// The current week followed by the `past` previous ones, newest first.
pub fn recent_weeks(today: NaiveDate, past: usize) -> Vec<WeekOption> {
    let current = week_start_for(today);
    (0..=past)
        .map(|i| {
            let week_start = current - Duration::weeks(i as i64);
            let week_end = week_start + Duration::days(4);
            WeekOption {
                week_start,
                week_end,
                label: format!(
                    "{} - {}",
                    week_start.format("%b %d"),
                    week_end.format("%b %d, %Y")
                ),
                is_current: i == 0,
            }
        })
        .collect()
}

/// `round(committed / (members * 40) * 100)`, zero for an empty team.
pub fn team_utilization(committed: i64, members: i64) -> i64 {
    if members <= 0 {
        return 0;
    }
    ((committed as f64 / (members * WEEKLY_CAPACITY as i64) as f64) * 100.0).round() as i64
}

pub fn utilization_level(committed: i32) -> UtilizationLevel {
    if committed >= 40 {
        UtilizationLevel::High
    } else if committed >= 20 {
        UtilizationLevel::Medium
    } else {
        UtilizationLevel::Low
    }
}

pub struct AllocationService;

impl AllocationService {
    /// The weekly grid for every worker staffed on the manager's open projects.
    pub fn weekly_view(
        conn: &mut PgConnection,
        user: &CurrentUser,
        avatars: &AvatarUrlHelper,
        week_start: NaiveDate,
    ) -> Result<Vec<WeeklyAllocationRow>, AppError> {
        let week_start = week_start_for(week_start);
        let project_ids = ProjectsRepo::open_ids_for_creator(conn, user.id)?;
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let assignments = AssignmentsRepo::assigned_for_projects(conn, &project_ids)?;
        let worker_ids: Vec<Uuid> = assignments
            .iter()
            .map(|a| a.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let workers = UsersRepo::workers_by_ids(conn, &worker_ids)?;
        let logs = WorkLogsRepo::for_projects_between(
            conn,
            &project_ids,
            week_start,
            week_start + Duration::days(4),
        )?;
        let grid = weekly_grid(week_start, &logs);

        Ok(workers
            .into_iter()
            .map(|(worker, details)| {
                let days = grid.get(&worker.id).copied().unwrap_or([0.0; 5]);
                WeeklyAllocationRow {
                    user_id: worker.id,
                    avatar_url: avatars
                        .resolve(details.profile_pic.as_deref(), &worker.name)
                        .into_owned(),
                    employee: worker.name,
                    role: details.job_title.unwrap_or_else(|| "Team Member".to_string()),
                    total: days.iter().sum(),
                    days,
                }
            })
            .collect())
    }

    pub fn dashboard_stats(
        conn: &mut PgConnection,
        user: &CurrentUser,
        today: NaiveDate,
    ) -> Result<DashboardStats, AppError> {
        let active_projects = ProjectsRepo::count_by_creator(conn, user.id, &ProjectStatus::OPEN, None)?;
        let project_ids = ProjectsRepo::open_ids_for_creator(conn, user.id)?;
        if project_ids.is_empty() {
            return Ok(DashboardStats {
                active_projects,
                ..DashboardStats::default()
            });
        }

        let assignments = AssignmentsRepo::assigned_for_projects(conn, &project_ids)?;
        let members = assignments
            .iter()
            .map(|a| a.user_id)
            .collect::<HashSet<_>>()
            .len() as i64;
        let committed: i64 = assignments.iter().map(|a| a.assigned_hours as i64).sum();

        let week_start = week_start_for(today);
        let logs = WorkLogsRepo::for_projects_between(
            conn,
            &project_ids,
            week_start,
            week_start + Duration::days(4),
        )?;
        let total_hours: f64 = weekly_grid(week_start, &logs)
            .values()
            .flat_map(|days| days.iter())
            .sum();

        Ok(DashboardStats {
            active_projects,
            team_members: members,
            total_hours: total_hours.round() as i64,
            team_utilization: team_utilization(committed, members),
        })
    }

    /// Team members with spare capacity, most available first.
    pub fn available_members(
        conn: &mut PgConnection,
        user: &CurrentUser,
        avatars: &AvatarUrlHelper,
    ) -> Result<Vec<AvailableMember>, AppError> {
        let project_ids = ProjectsRepo::open_ids_for_creator(conn, user.id)?;
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let assignments = AssignmentsRepo::assigned_for_projects(conn, &project_ids)?;
        let mut committed_here: HashMap<Uuid, i32> = HashMap::new();
        for a in &assignments {
            *committed_here.entry(a.user_id).or_insert(0) += a.assigned_hours;
        }
        let ids: Vec<Uuid> = committed_here.keys().copied().collect();

        let mut members: Vec<AvailableMember> = UsersRepo::workers_by_ids(conn, &ids)?
            .into_iter()
            .filter(|(_, details)| details.total_available_hours > 0)
            .map(|(worker, details)| {
                let available = details.total_available_hours.clamp(0, WEEKLY_CAPACITY);
                let committed = WEEKLY_CAPACITY - available;
                AvailableMember {
                    user_id: worker.id,
                    avatar_url: avatars
                        .resolve(details.profile_pic.as_deref(), &worker.name)
                        .into_owned(),
                    name: worker.name,
                    role: details.job_title.unwrap_or_else(|| "Team Member".to_string()),
                    assigned_hours: committed,
                    available_hours: available,
                    utilization: ((committed as f64 / WEEKLY_CAPACITY as f64) * 100.0).round() as i32,
                    utilization_level: utilization_level(committed),
                    status: details.status,
                }
            })
            .collect();

        members.sort_by(|a, b| {
            b.available_hours
                .cmp(&a.available_hours)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::enums::WorkLogStatus;

    fn log(user: Uuid, date: NaiveDate, hours: f64) -> WorkLog {
        WorkLog {
            id: Uuid::new_v4(),
            user_id: user,
            project_id: Uuid::new_v4(),
            log_date: date,
            hours,
            work_type: "development".to_string(),
            work_description: None,
            status: WorkLogStatus::Completed,
            created_at: chrono::Utc::now(),
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn weekend_rows_are_dropped_from_grid() {
        let worker = Uuid::new_v4();
        let logs = vec![log(worker, d(4), 3.0), log(worker, d(6), 5.0), log(worker, d(9), 2.0)];

        let grid = weekly_grid(d(4), &logs);

        assert_eq!(grid[&worker], [3.0, 0.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn grid_sums_per_worker_and_ignores_other_weeks() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let logs = vec![
            log(a, d(8), 4.0),
            log(a, d(8), 2.5),
            log(b, d(5), 1.0),
            log(b, d(11), 8.0),
            log(b, d(1), 8.0),
        ];

        let grid = weekly_grid(d(4), &logs);

        assert_eq!(grid[&a], [0.0, 0.0, 0.0, 0.0, 6.5]);
        assert_eq!(grid[&b], [0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn grid_buckets_by_weekday_when_given_a_midweek_date() {
        let worker = Uuid::new_v4();
        let logs = vec![log(worker, d(4), 1.0), log(worker, d(7), 2.0), log(worker, d(9), 4.0)];

        let grid = weekly_grid(d(6), &logs);

        assert_eq!(grid[&worker], [1.0, 0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn sunday_belongs_to_the_preceding_week() {
        assert_eq!(week_start_for(d(10)), d(4));
        assert_eq!(week_start_for(d(4)), d(4));
        assert_eq!(week_start_for(d(8)), d(4));
    }

    #[test]
    fn week_picker_lists_current_and_past_weeks() {
        let weeks = recent_weeks(d(6), PAST_WEEKS);

        assert_eq!(weeks.len(), PAST_WEEKS + 1);
        assert!(weeks[0].is_current);
        assert_eq!(weeks[0].week_start, d(4));
        assert_eq!(weeks[0].week_end, d(8));
        assert_eq!(weeks[1].week_start, NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
        assert!(weeks.iter().skip(1).all(|w| !w.is_current));
        assert_eq!(weeks[0].label, "Mar 04 - Mar 08, 2024");
    }

    #[test]
    fn utilization_rounds_and_handles_empty_team() {
        assert_eq!(team_utilization(0, 0), 0);
        assert_eq!(team_utilization(60, 2), 75);
        assert_eq!(team_utilization(50, 3), 42);
    }

    #[test]
    fn utilization_levels() {
        assert_eq!(utilization_level(0), UtilizationLevel::Low);
        assert_eq!(utilization_level(19), UtilizationLevel::Low);
        assert_eq!(utilization_level(20), UtilizationLevel::Medium);
        assert_eq!(utilization_level(39), UtilizationLevel::Medium);
        assert_eq!(utilization_level(40), UtilizationLevel::High);
    }
}
