pub mod allocation;
pub mod assignments;
pub mod auth;
pub mod projects;
pub mod requests;
pub mod workers;
pub mod worklogs;

use crate::AppState;
use crate::middleware::{auth::auth_middleware, request_tracking_middleware};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(auth::health))
        .route("/auth/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Projects
        .route("/projects", post(projects::create_project))
        .route("/projects/active", get(projects::active_projects))
        .route("/projects/history", get(projects::project_history))
        .route("/projects/stats", get(projects::project_stats))
        .route(
            "/projects/:project_id/team",
            get(projects::project_team).put(projects::save_selection),
        )
        .route("/projects/:project_id/candidates", get(projects::project_candidates))
        .route("/projects/:project_id/complete", post(projects::complete_project))
        .route("/projects/:project_id/drop", post(projects::drop_project))
        // Assignments
        .route("/assignments", post(assignments::assign_worker))
        .route(
            "/projects/:project_id/assignments/:user_id",
            delete(assignments::remove_worker),
        )
        // Work logs and the weekly grid
        .route("/worklogs", post(worklogs::log_hours))
        .route("/worklogs/today", get(worklogs::today_tasks))
        .route("/allocation/weekly", get(allocation::weekly_allocation))
        .route("/allocation/weeks", get(allocation::week_options))
        .route("/allocation/hours", post(worklogs::allocate_hours))
        .route("/dashboard/stats", get(allocation::dashboard_stats))
        .route("/dashboard/available-members", get(allocation::available_members))
        // Resource requests
        .route("/requests", get(requests::list_requests))
        .route("/requests/:request_id/decision", post(requests::decide_request))
        // Workers and skills
        .route("/workers", get(workers::worker_directory))
        .route("/workers/me/skills", put(workers::update_skills))
        .route("/workers/me/extract-skills", post(workers::extract_skills))
        .route("/workers/me/cv", post(workers::upload_cv).delete(workers::delete_cv))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn(request_tracking_middleware))
        .with_state(state)
}
