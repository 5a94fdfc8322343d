pub mod dashboard;
pub mod user;

pub use dashboard::{DashboardRow, NewDashboard};
pub use user::{NewUser, User};
