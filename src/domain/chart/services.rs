use super::entities::{Axis, ChartDescriptor, Series};
use super::value_objects::{AxisRef, ChartKind, Color, Mark, ViewId};
use crate::domain::trade::services::AggregationSettings;
use crate::domain::trade::{
    FlowDirection, FlowSeries, PartnerTurnover, RankedValues, RankingKind, RegionShare, SectorShare,
    ViewData,
};

const DONUT_HOLE: f64 = 0.4;

/// Доменный сервис - собирает декларативное описание графика из агрегатов
#[derive(Debug, Clone)]
pub struct ChartSpecBuilder {
    top_commodities: usize,
    top_partners: usize,
    top_growth: usize,
    growth_years: (i32, i32),
}

impl Default for ChartSpecBuilder {
    fn default() -> Self {
        Self::new(&AggregationSettings::default())
    }
}

impl ChartSpecBuilder {
    /// Titles quote the same limits and year pair the aggregator uses
    pub fn new(settings: &AggregationSettings) -> Self {
        Self {
            top_commodities: settings.top_commodities,
            top_partners: settings.top_partners,
            top_growth: settings.top_growth,
            growth_years: settings.growth_years,
        }
    }

    /// Build the descriptor of `view`. `ViewData::NoData` yields the empty-state.
    pub fn build(&self, view: ViewId, data: &ViewData) -> ChartDescriptor {
        match data {
            ViewData::NoData => self.empty(view),
            ViewData::Flows(flows) => self.flows(view, flows),
            ViewData::Ranked(ranked) => self.ranked(view, ranked),
            ViewData::Sectors(sectors) => self.sectors(view, sectors),
            ViewData::Regions(regions) => self.regions(view, regions),
            ViewData::Partners(partners) => self.partners(view, partners),
        }
    }

    pub fn empty(&self, view: ViewId) -> ChartDescriptor {
        ChartDescriptor::empty(view, self.empty_title(view))
    }

    pub fn title(&self, view: ViewId) -> String {
        let (from, to) = self.growth_years;
        match view {
            ViewId::TradeDynamics => "Динамика экспорта, импорта и торгового сальдо".to_string(),
            ViewId::TopExportCommodities => format!("ТОП-{} товарных групп по экспорту", self.top_commodities),
            ViewId::TopImportCommodities => format!("ТОП-{} товарных групп по импорту", self.top_commodities),
            ViewId::EconomicSectors => "Распределение экспорта и импорта по секторам".to_string(),
            ViewId::TradeGeography => "Доля торговли по регионам мира".to_string(),
            ViewId::TopPartnerCountries => {
                format!("ТОП-{} стран-партнёров по общему объёму торговли", self.top_partners)
            }
            ViewId::RussiaTradeDynamics => "Торговля с Россией (5 лет)".to_string(),
            ViewId::DecliningCommodities => "Товарные группы с наибольшим снижением объёмов торговли".to_string(),
            ViewId::ExportGrowth => format!("Топ-{} прироста по экспорту ({}→{})", self.top_growth, from, to),
            ViewId::ImportGrowth => format!("Топ-{} прироста по импорту ({}→{})", self.top_growth, from, to),
        }
    }

    fn empty_title(&self, view: ViewId) -> String {
        match view {
            ViewId::DecliningCommodities => "Изменения структуры экспорта (10 лет)".to_string(),
            _ => self.title(view),
        }
    }

    fn flows(&self, view: ViewId, flows: &FlowSeries) -> ChartDescriptor {
        let unit = flows.scale.axis_unit();
        let dual_axis = view.chart_kind() == ChartKind::DualAxisTimeSeries;

        let mut export = Series::new("Экспорт", Mark::LinesMarkers, Color::EXPORT);
        let mut import = Series::new("Импорт", Mark::LinesMarkers, Color::IMPORT);
        let mut balance = Series::new("Сальдо", Mark::LinesMarkers, Color::BALANCE);
        if dual_axis {
            balance = balance.on_axis(AxisRef::Secondary);
        }

        for point in &flows.points {
            let year = point.year.value();
            export.push(year, &point.export, |text| format!("Год: {}<br>Экспорт: {}", year, text));
            import.push(year, &point.import, |text| format!("Год: {}<br>Импорт: {}", year, text));
            balance.push(year, &point.balance, |text| format!("Год: {}<br>Сальдо: {}", year, text));
        }

        let y_axis = Axis::titled(format!("Объём торговли ({})", unit)).with_tick_format(".1f");
        let mut descriptor = ChartDescriptor::new(view, self.title(view), Axis::titled("Год"), y_axis)
            .with_series(export)
            .with_series(import)
            .with_series(balance);
        if dual_axis {
            descriptor.y2_axis = Some(Axis::titled(format!("Торговое сальдо ({})", unit)).with_tick_format(".1f"));
        }
        descriptor
    }

    fn ranked(&self, view: ViewId, ranked: &RankedValues) -> ChartDescriptor {
        let unit = ranked.scale.axis_unit();
        let (name, color, hover_label, value_axis) = match ranked.kind {
            RankingKind::Volume(FlowDirection::Export) => ("Экспорт", Color::EXPORT, "Объём", "Объём"),
            RankingKind::Volume(FlowDirection::Import) => ("Импорт", Color::IMPORT_VOLUME, "Объём", "Объём"),
            RankingKind::Growth(FlowDirection::Export) => ("Экспорт", Color::EXPORT_GROWTH, "Прирост", "Прирост объёма"),
            RankingKind::Growth(FlowDirection::Import) => ("Импорт", Color::IMPORT_GROWTH, "Прирост", "Прирост объёма"),
            RankingKind::Decline => ("Изменение", Color::IMPORT, "Изменение", "Изменение объёма"),
        };

        let mut series = Series::new(name, Mark::Bar, color).horizontal();
        for item in &ranked.items {
            series.push(item.label.as_str(), &item.amount, |text| {
                let mut hover = format!("{}<br>{}: {}", item.full_label, hover_label, text);
                if item.precomputed {
                    hover.push_str("<br>Прирост: по сохранённой разнице");
                }
                hover
            });
        }

        ChartDescriptor::new(
            view,
            self.title(view),
            Axis::titled(format!("{} ({})", value_axis, unit)),
            Axis::titled("Товарная группа"),
        )
        .with_series(series)
    }

    fn sectors(&self, view: ViewId, sectors: &[SectorShare]) -> ChartDescriptor {
        let mut export = Series::new("Экспорт", Mark::Pie, Color::EXPORT).with_hole(DONUT_HOLE);
        let mut import = Series::new("Импорт", Mark::Pie, Color::IMPORT).with_hole(DONUT_HOLE);
        for sector in sectors {
            export.push(sector.label.as_str(), &sector.export_share, |text| {
                format!("{}<br>{}", sector.full_label, text)
            });
            import.push(sector.label.as_str(), &sector.import_share, |text| {
                format!("{}<br>{}", sector.full_label, text)
            });
        }

        let mut descriptor = ChartDescriptor::new(view, self.title(view), Axis::hidden(), Axis::hidden())
            .with_series(export)
            .with_series(import);
        descriptor.subplot_titles =
            vec!["Доля экспорта по секторам".to_string(), "Доля импорта по секторам".to_string()];
        descriptor
    }

    fn regions(&self, view: ViewId, regions: &[RegionShare]) -> ChartDescriptor {
        let mut export = Series::new("Экспорт", Mark::Bar, Color::EXPORT);
        let mut import = Series::new("Импорт", Mark::Bar, Color::IMPORT);
        for region in regions {
            export.push(region.region.as_str(), &region.export_share, |text| {
                format!("{}<br>Экспорт: {}<br>Доля: {}", region.region, region.export.text(), text)
            });
            import.push(region.region.as_str(), &region.import_share, |text| {
                format!("{}<br>Импорт: {}<br>Доля: {}", region.region, region.import.text(), text)
            });
        }

        ChartDescriptor::new(view, self.title(view), Axis::titled("Регион"), Axis::titled("Доля в торговле (%)"))
            .with_series(export)
            .with_series(import)
    }

    fn partners(&self, view: ViewId, partners: &[PartnerTurnover]) -> ChartDescriptor {
        // Цвет столбца - знак сальдо
        let colors = partners
            .iter()
            .map(|p| if p.balance.value() >= 0.0 { Color::EXPORT } else { Color::IMPORT })
            .collect();

        let mut series = Series::new("Товарооборот", Mark::Bar, Color::EXPORT).with_point_colors(colors);
        for partner in partners {
            series.push(partner.country.as_str(), &partner.turnover, |text| {
                let mut hover = format!("{}<br>Общий объём торговли: {}", partner.country, text);
                if partner.approximate {
                    hover.push_str("<br>Экспорт/импорт: оценка 60/40");
                }
                hover
            });
        }

        ChartDescriptor::new(
            view,
            self.title(view),
            Axis::titled("Страна").with_tick_angle(-45),
            Axis::titled("Объём торговли (млрд USD)"),
        )
        .with_series(series)
    }
}
