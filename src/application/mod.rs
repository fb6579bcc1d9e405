pub mod dashboard_service;
pub mod view_registry;

pub use dashboard_service::*;
pub use view_registry::*;
