pub mod manager;
pub mod models;
pub mod repository;
pub mod service;
pub mod transaction;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{DashboardRepository, StoreError};
pub use transaction::WriteTransaction;
