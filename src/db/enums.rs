use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Stores an enum as its text value, matching the strings the dashboards
/// have always written into these columns.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(format!(
                        "Unrecognized {} variant: {}",
                        stringify!($name),
                        other
                    )),
                }
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                s.parse::<$name>().map_err(Into::into)
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Employee,
    ProjectManager,
    ResourceManager,
}

text_enum!(UserRole {
    Employee => "employee",
    ProjectManager => "project_manager",
    ResourceManager => "resource_manager",
});

/// Derived from committed hours by the capacity ledger; never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum WorkerStatus {
    Available,
    Partial,
    Busy,
}

text_enum!(WorkerStatus {
    Available => "Available",
    Partial => "Partial",
    Busy => "Busy",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Pending,
    Ongoing,
    Active,
    #[serde(rename = "on-hold")]
    OnHold,
    Completed,
    Cancelled,
}

text_enum!(ProjectStatus {
    Pending => "pending",
    Ongoing => "ongoing",
    Active => "active",
    OnHold => "on-hold",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl ProjectStatus {
    pub const OPEN: [ProjectStatus; 4] = [
        ProjectStatus::Pending,
        ProjectStatus::Ongoing,
        ProjectStatus::Active,
        ProjectStatus::OnHold,
    ];

    pub const CLOSED: [ProjectStatus; 2] = [ProjectStatus::Completed, ProjectStatus::Cancelled];

    pub fn is_closed(&self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum ProjectPriority {
    Low,
    Medium,
    High,
}

text_enum!(ProjectPriority {
    Low => "low",
    Medium => "medium",
    High => "high",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Assigned,
    Completed,
    Removed,
}

text_enum!(AssignmentStatus {
    Assigned => "assigned",
    Completed => "completed",
    Removed => "removed",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum AssignmentType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    Contract,
}

text_enum!(AssignmentType {
    FullTime => "Full-Time",
    PartTime => "Part-Time",
    Contract => "Contract",
});

impl AssignmentType {
    /// Type implied by a weekly commitment when the caller does not pick one.
    pub fn for_hours(hours_per_week: i32) -> Self {
        if hours_per_week >= crate::services::ledger::FULL_TIME_THRESHOLD {
            AssignmentType::FullTime
        } else {
            AssignmentType::PartTime
        }
    }

    /// Most hours one worker may log per project per day under this type.
    pub fn daily_capacity(&self) -> f64 {
        match self {
            AssignmentType::PartTime => 4.0,
            AssignmentType::FullTime | AssignmentType::Contract => 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum WorkLogStatus {
    Pending,
    #[serde(rename = "in progress")]
    InProgress,
    Completed,
    Blocked,
}

text_enum!(WorkLogStatus {
    Pending => "pending",
    InProgress => "in progress",
    Completed => "completed",
    Blocked => "blocked",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

text_enum!(ExperienceLevel {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

text_enum!(RequestStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});
