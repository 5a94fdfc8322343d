pub mod dashboard;
pub mod user;

pub use dashboard::{DashboardPayload, DashboardView};
pub use user::{RegisterRequest, TokenForm, TokenResponse, UserView};
