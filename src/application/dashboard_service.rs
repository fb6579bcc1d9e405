use super::view_registry::{ViewFilter, ViewRegistry};
use crate::{
    config::DashboardConfig,
    domain::{
        chart::{ChartDescriptor, ViewId},
        errors::{DashboardError, DashboardResult},
        logging::{LogComponent, LogLevel, get_logger},
        trade::{PartnerSummary, TradeSnapshot},
    },
    infrastructure::DatasetAccessor,
    log_info,
};
use std::sync::Arc;

/// Everything the page shows after one load
#[derive(Debug)]
pub struct DashboardRender {
    pub panels: Vec<(ViewId, DashboardResult<ChartDescriptor>)>,
    /// `None` hides the summary block
    pub key_partner: Option<PartnerSummary>,
}

impl DashboardRender {
    pub fn panel(&self, view: ViewId) -> Option<&DashboardResult<ChartDescriptor>> {
        self.panels.iter().find(|(id, _)| *id == view).map(|(_, result)| result)
    }

    pub fn failed_panels(&self) -> impl Iterator<Item = (ViewId, &DashboardError)> {
        self.panels.iter().filter_map(|(id, result)| result.as_ref().err().map(|e| (*id, e)))
    }
}

/// Сервис приложения - связывает загруженный датасет с реестром представлений
pub struct DashboardService {
    accessor: DatasetAccessor,
    registry: ViewRegistry,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(accessor: DatasetAccessor, config: DashboardConfig) -> Self {
        Self { registry: ViewRegistry::new(&config), accessor, config }
    }

    /// Load `config.data_path` from disk
    pub fn from_config(config: DashboardConfig) -> DashboardResult<Self> {
        let accessor = DatasetAccessor::load(&config.data_path)?;
        Ok(Self::new(accessor, config))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Arc<TradeSnapshot> {
        self.accessor.snapshot()
    }

    pub fn render_view(&self, view_id: &str) -> DashboardResult<ChartDescriptor> {
        self.registry.render(&self.accessor.snapshot(), view_id)
    }

    pub fn render_view_with(&self, view_id: &str, filter: &ViewFilter) -> DashboardResult<ChartDescriptor> {
        self.registry.render_with(&self.accessor.snapshot(), view_id, filter)
    }

    /// All panels plus the key partner summary, rendered from one snapshot
    pub fn render_dashboard(&self) -> DashboardRender {
        let snapshot = self.accessor.snapshot();
        let panels = self.registry.render_all(&snapshot);

        let key_partner = match self.registry.partner_summary(&snapshot, &self.config.key_partner) {
            Ok(summary) => Some(summary),
            Err(e @ DashboardError::EntityNotFound { .. }) => {
                get_logger().log_with_metadata(
                    LogLevel::Warn,
                    LogComponent::Application("DashboardService"),
                    "Key partner summary hidden",
                    &e.to_string(),
                );
                None
            }
            Err(e) => {
                get_logger().error(
                    LogComponent::Application("DashboardService"),
                    &format!("Key partner summary failed: {}", e),
                );
                None
            }
        };

        let failed = panels.iter().filter(|(_, r)| r.is_err()).count();
        log_info!(
            LogComponent::Application("DashboardService"),
            "Rendered {} panels ({} failed)",
            panels.len(),
            failed
        );
        DashboardRender { panels, key_partner }
    }

    /// Re-read the dataset; renders already in flight keep the old snapshot
    pub fn refresh(&self) -> DashboardResult<()> {
        let snapshot = self.accessor.refresh()?;
        log_info!(
            LogComponent::Application("DashboardService"),
            "Snapshot refreshed, {} views",
            snapshot.view_names().count()
        );
        Ok(())
    }
}
