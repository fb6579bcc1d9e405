use serde::{Serialize, Serializer};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// Value Object - dashboard panel identifier.
///
/// Parses both the dataset key (`trade_dynamics`) and the panel id the page
/// uses (`trade-dynamics-chart`); displays as the dataset key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay, EnumString, EnumIter, AsRefStr)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    #[strum(to_string = "trade_dynamics", serialize = "trade-dynamics-chart")]
    TradeDynamics,
    #[strum(to_string = "top_export_commodities", serialize = "top-commodities-export-chart")]
    TopExportCommodities,
    #[strum(to_string = "top_import_commodities", serialize = "top-commodities-import-chart")]
    TopImportCommodities,
    #[strum(to_string = "economic_sectors", serialize = "economic-sectors-chart")]
    EconomicSectors,
    #[strum(to_string = "trade_geography", serialize = "trade-geography-chart")]
    TradeGeography,
    #[strum(to_string = "top_partner_countries", serialize = "top-countries-chart")]
    TopPartnerCountries,
    #[strum(to_string = "russia_trade_dynamics", serialize = "russia-trade-chart")]
    RussiaTradeDynamics,
    #[strum(to_string = "declining_commodities", serialize = "structure-changes-chart")]
    DecliningCommodities,
    #[strum(to_string = "export_growth", serialize = "top-growth-export-chart")]
    ExportGrowth,
    #[strum(to_string = "import_growth", serialize = "top-growth-import-chart")]
    ImportGrowth,
}

impl ViewId {
    pub fn all() -> impl Iterator<Item = ViewId> {
        ViewId::iter()
    }

    /// Key of the view's records in the snapshot
    pub fn dataset_key(&self) -> &'static str {
        match self {
            ViewId::TradeDynamics => "trade_dynamics",
            ViewId::TopExportCommodities => "top_export_commodities",
            ViewId::TopImportCommodities => "top_import_commodities",
            ViewId::EconomicSectors => "economic_sectors",
            ViewId::TradeGeography => "trade_geography",
            ViewId::TopPartnerCountries => "top_partner_countries",
            ViewId::RussiaTradeDynamics => "russia_trade_dynamics",
            ViewId::DecliningCommodities => "declining_commodities",
            ViewId::ExportGrowth => "export_growth",
            ViewId::ImportGrowth => "import_growth",
        }
    }

    /// DOM id of the panel the shell renders into
    pub fn panel_id(&self) -> &'static str {
        match self {
            ViewId::TradeDynamics => "trade-dynamics-chart",
            ViewId::TopExportCommodities => "top-commodities-export-chart",
            ViewId::TopImportCommodities => "top-commodities-import-chart",
            ViewId::EconomicSectors => "economic-sectors-chart",
            ViewId::TradeGeography => "trade-geography-chart",
            ViewId::TopPartnerCountries => "top-countries-chart",
            ViewId::RussiaTradeDynamics => "russia-trade-chart",
            ViewId::DecliningCommodities => "structure-changes-chart",
            ViewId::ExportGrowth => "top-growth-export-chart",
            ViewId::ImportGrowth => "top-growth-import-chart",
        }
    }

    pub fn chart_kind(&self) -> ChartKind {
        match self {
            ViewId::TradeDynamics => ChartKind::DualAxisTimeSeries,
            ViewId::RussiaTradeDynamics => ChartKind::TimeSeries,
            ViewId::TopExportCommodities
            | ViewId::TopImportCommodities
            | ViewId::DecliningCommodities
            | ViewId::ExportGrowth
            | ViewId::ImportGrowth => ChartKind::HorizontalBar,
            ViewId::EconomicSectors => ChartKind::DualDonut,
            ViewId::TradeGeography | ViewId::TopPartnerCountries => ChartKind::GroupedBar,
        }
    }

    /// Text of the centered annotation shown when the view has no data
    pub fn placeholder(&self) -> &'static str {
        match self {
            ViewId::TradeDynamics => "Нет данных по динамике торговли",
            ViewId::TopExportCommodities => "Нет данных по товарным группам экспорта",
            ViewId::TopImportCommodities => "Нет данных по товарным группам импорта",
            ViewId::EconomicSectors => "Нет данных по экономическим секторам",
            ViewId::TradeGeography => "Нет данных по географии торговли",
            ViewId::TopPartnerCountries => "Нет данных по странам-партнёрам",
            ViewId::RussiaTradeDynamics => "Нет данных по торговле с Россией",
            ViewId::DecliningCommodities => "Недостаточно данных для анализа изменений структуры",
            ViewId::ExportGrowth => "Нет данных по приросту экспорта",
            ViewId::ImportGrowth => "Нет данных по приросту импорта",
        }
    }
}

/// Value Object - chart archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, StrumDisplay, AsRefStr)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[strum(serialize = "time_series")]
    TimeSeries,
    #[strum(serialize = "dual_axis_time_series")]
    DualAxisTimeSeries,
    #[strum(serialize = "horizontal_bar")]
    HorizontalBar,
    #[strum(serialize = "dual_donut")]
    DualDonut,
    #[strum(serialize = "grouped_bar")]
    GroupedBar,
}

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    LinesMarkers,
    Bar,
    Pie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Value axis a series is plotted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisRef {
    #[default]
    Primary,
    Secondary,
}

/// Value Object - x category of a data point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Category {
    Year(i32),
    Label(String),
}

impl From<i32> for Category {
    fn from(year: i32) -> Self {
        Category::Year(year)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::Label(label.to_string())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::Label(label)
    }
}

/// Value Object - Color, serialised as a CSS color string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn to_hex(&self) -> u32 {
        let (r, g, b) = self.channels();
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    /// `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06x}", self.to_hex())
        } else {
            let (r, g, b) = self.channels();
            format!("rgba({},{},{},{})", r, g, b, self.a)
        }
    }

    fn channels(&self) -> (u8, u8, u8) {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }

    pub const EXPORT: Color = Color::from_hex(0x27ae60);
    pub const IMPORT: Color = Color::from_hex(0xe74c3c);
    pub const BALANCE: Color = Color::from_hex(0x3498db);
    pub const IMPORT_VOLUME: Color = Color { r: 0.0, g: 123.0 / 255.0, b: 1.0, a: 0.8 };
    pub const EXPORT_GROWTH: Color = Color::from_hex(0x28a745);
    pub const IMPORT_GROWTH: Color = Color::from_hex(0xff5733);
    pub const PLACEHOLDER: Color = Color::from_hex(0x808080);
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_id_parses_dataset_key_and_panel_id() {
        for view in ViewId::all() {
            assert_eq!(view.dataset_key().parse::<ViewId>().unwrap(), view);
            assert_eq!(view.panel_id().parse::<ViewId>().unwrap(), view);
            assert_eq!(view.to_string(), view.dataset_key());
        }
        assert!("germany-summary".parse::<ViewId>().is_err());
    }

    #[test]
    fn color_css() {
        assert_eq!(Color::EXPORT.to_css(), "#27ae60");
        assert_eq!(Color::IMPORT_VOLUME.to_css(), "rgba(0,123,255,0.8)");
        assert_eq!(Color::from(0x3498db).to_hex(), 0x3498db);
    }
}
