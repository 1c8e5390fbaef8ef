pub mod allocation_service;
pub mod assignments_service;
pub mod auth_service;
pub mod ledger;
pub mod projects_service;
pub mod recommendations;
pub mod requests_service;
pub mod workers_service;
pub mod worklogs_service;

pub use allocation_service::AllocationService;
pub use assignments_service::AssignmentsService;
pub use auth_service::AuthService;
pub use ledger::CapacityLedger;
pub use projects_service::ProjectsService;
pub use recommendations::{RecommendationApi, RecommendationsService, SkillServiceClient};
pub use requests_service::RequestsService;
pub use workers_service::WorkersService;
pub use worklogs_service::WorkLogsService;
