pub mod assignments;
pub mod projects;
pub mod requests;
pub mod users;
pub mod worklogs;

pub use assignments::AssignmentsRepo;
pub use projects::ProjectsRepo;
pub use requests::RequestsRepo;
pub use users::UsersRepo;
pub use worklogs::WorkLogsRepo;
