//! HTTP API handlers for formdrop-web

pub mod auth;
pub mod export;
pub mod health;
pub mod projects;
pub mod submit;
pub mod table;
pub mod ui;

pub use auth::auth_middleware;
pub use export::export_submissions;
pub use health::health_routes;
pub use projects::{create_project, delete_project, get_project, list_projects};
pub use submit::{submit, submit_missing_id, submit_options};
pub use table::get_submissions;
pub use ui::{serve_app_js, serve_index};
