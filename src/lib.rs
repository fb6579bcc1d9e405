use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::{DashboardRender, DashboardService, ViewFilter, ViewRegistry};
pub use config::DashboardConfig;
pub use domain::errors::{DashboardError, DashboardResult};

/// Initialize logging and the panic hook once the module is loaded
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    let time_provider = Box::new(infrastructure::services::SystemTimeProvider::new());
    domain::logging::init_time_provider(time_provider);

    get_logger().info(LogComponent::Presentation("Initialize"), "Trade dashboard initialized");
}
