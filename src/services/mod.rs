pub mod auth_service;
pub mod dashboard_service;

pub use auth_service::{AuthError, AuthService};
pub use dashboard_service::{DashboardError, DashboardService};
