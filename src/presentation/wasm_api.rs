use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::application::{DashboardRender, DashboardService, ViewFilter};
use crate::config::DashboardConfig;
use crate::domain::{
    chart::{ChartDescriptor, ViewId},
    errors::DashboardError,
    logging::{LogComponent, get_logger},
    trade::{PartnerSummary, PlotPoint},
};
use crate::infrastructure::DatasetAccessor;

/// WASM API для взаимодействия с JavaScript.
/// Только мост к application слою: JSON на входе, JSON на выходе.
#[wasm_bindgen]
pub struct DashboardApi {
    service: DashboardService,
}

#[wasm_bindgen]
impl DashboardApi {
    /// `json` is the snapshot; `config_json` overrides defaults field by field
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str, config_json: Option<String>) -> Result<DashboardApi, JsValue> {
        let config = match config_json {
            Some(raw) => DashboardConfig::from_json_str(&raw).map_err(to_js_error)?,
            None => DashboardConfig::default(),
        };
        let accessor = DatasetAccessor::from_json_str(json).map_err(|e| to_js_error(e.into()))?;
        get_logger().info(LogComponent::Presentation("DashboardApi"), "Dashboard API ready");
        Ok(Self { service: DashboardService::new(accessor, config) })
    }

    /// Descriptor JSON of one panel (dataset key or panel id)
    #[wasm_bindgen(js_name = renderView)]
    pub fn render_view(&self, view_id: &str) -> Result<String, JsValue> {
        let descriptor = self.service.render_view(view_id).map_err(to_js_error)?;
        to_json(&descriptor)
    }

    /// Same as `renderView`, narrowed to `[from, to]` years and/or one country
    #[wasm_bindgen(js_name = renderViewFiltered)]
    pub fn render_view_filtered(
        &self,
        view_id: &str,
        year_from: Option<i32>,
        year_to: Option<i32>,
        country: Option<String>,
    ) -> Result<String, JsValue> {
        let filter = ViewFilter { years: year_from.zip(year_to), country };
        let descriptor = self.service.render_view_with(view_id, &filter).map_err(to_js_error)?;
        to_json(&descriptor)
    }

    #[wasm_bindgen(js_name = renderDashboard)]
    pub fn render_dashboard(&self) -> Result<String, JsValue> {
        to_json(&DashboardDto::from(&self.service.render_dashboard()))
    }

    /// Panel ids in page order
    #[wasm_bindgen(js_name = viewIds)]
    pub fn view_ids(&self) -> js_sys::Array {
        ViewId::all().map(|view| JsValue::from_str(view.panel_id())).collect()
    }
}

/// JSON shape of `renderDashboard`
#[derive(Debug, Serialize)]
pub struct DashboardDto<'a> {
    pub panels: Vec<PanelDto<'a>>,
    pub key_partner: Option<PartnerSummaryDto>,
}

#[derive(Debug, Serialize)]
pub struct PanelDto<'a> {
    pub panel_id: &'static str,
    pub chart: Option<&'a ChartDescriptor>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoneyDto {
    pub value: f64,
    pub text: String,
}

impl From<&PlotPoint> for MoneyDto {
    fn from(point: &PlotPoint) -> Self {
        Self { value: point.value(), text: point.text().to_string() }
    }
}

#[derive(Debug, Serialize)]
pub struct PartnerSummaryDto {
    pub country: String,
    pub turnover: MoneyDto,
    pub export: MoneyDto,
    pub import: MoneyDto,
    pub balance: MoneyDto,
    pub approximate: bool,
}

impl From<&PartnerSummary> for PartnerSummaryDto {
    fn from(summary: &PartnerSummary) -> Self {
        Self {
            country: summary.country.clone(),
            turnover: (&summary.turnover).into(),
            export: (&summary.export).into(),
            import: (&summary.import).into(),
            balance: (&summary.balance).into(),
            approximate: summary.approximate,
        }
    }
}

impl<'a> From<&'a DashboardRender> for DashboardDto<'a> {
    fn from(render: &'a DashboardRender) -> Self {
        let panels = render
            .panels
            .iter()
            .map(|(view, result)| PanelDto {
                panel_id: view.panel_id(),
                chart: result.as_ref().ok(),
                error: result.as_ref().err().map(ToString::to_string),
            })
            .collect();
        Self { panels, key_partner: render.key_partner.as_ref().map(PartnerSummaryDto::from) }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("serialization failed: {}", e)))
}

fn to_js_error(error: DashboardError) -> JsValue {
    get_logger().error(LogComponent::Presentation("DashboardApi"), &error.to_string());
    JsValue::from_str(&error.to_string())
}
