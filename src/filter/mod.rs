pub mod error;
pub mod filter;
pub mod validate;

pub use error::FilterError;
pub use filter::{DashboardFilter, FilterQuery};
pub use validate::validate;
