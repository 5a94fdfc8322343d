// handlers/dashboards/mod.rs - CRUD over {url_path}/turnilo/dashboards

pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

pub use create::dashboard_post;
pub use delete::dashboard_delete;
pub use list::dashboards_get;
pub use show::dashboard_get;
pub use update::dashboard_put;
