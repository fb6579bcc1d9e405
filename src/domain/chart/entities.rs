use super::value_objects::{AxisRef, Category, ChartKind, Color, Mark, Orientation, ViewId};
use crate::domain::trade::PlotPoint;
use serde::Serialize;

/// Axis configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Option<String>,
    pub visible: bool,
    pub tick_format: Option<String>,
    pub tick_angle: Option<i32>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), visible: true, tick_format: None, tick_angle: None }
    }

    pub fn hidden() -> Self {
        Self { title: None, visible: false, tick_format: None, tick_angle: None }
    }

    pub fn with_tick_format(mut self, format: &str) -> Self {
        self.tick_format = Some(format.to_string());
        self
    }

    pub fn with_tick_angle(mut self, angle: i32) -> Self {
        self.tick_angle = Some(angle);
        self
    }
}

/// Free-floating text in paper coordinates (0..1)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: u32,
    pub color: Color,
}

impl Annotation {
    pub fn centered(text: &str) -> Self {
        Self { text: text.to_string(), x: 0.5, y: 0.5, font_size: 16, color: Color::PLACEHOLDER }
    }
}

/// Per-series coloring
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesColors {
    Uniform(Color),
    PerPoint(Vec<Color>),
}

/// One data series.
///
/// Points are only added through [`Series::push`], which takes a
/// [`PlotPoint`]; the plotted value and its text therefore always match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub mark: Mark,
    pub orientation: Orientation,
    pub axis: AxisRef,
    categories: Vec<Category>,
    values: Vec<f64>,
    texts: Vec<String>,
    hover: Vec<String>,
    pub colors: SeriesColors,
    pub hole: Option<f64>,
}

impl Series {
    pub fn new(name: &str, mark: Mark, color: Color) -> Self {
        Self {
            name: name.to_string(),
            mark,
            orientation: Orientation::Vertical,
            axis: AxisRef::Primary,
            categories: Vec::new(),
            values: Vec::new(),
            texts: Vec::new(),
            hover: Vec::new(),
            colors: SeriesColors::Uniform(color),
            hole: None,
        }
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    pub fn on_axis(mut self, axis: AxisRef) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_hole(mut self, hole: f64) -> Self {
        self.hole = Some(hole);
        self
    }

    pub fn with_point_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = SeriesColors::PerPoint(colors);
        self
    }

    /// Append a point; `hover` receives the point's formatted text
    pub fn push(&mut self, category: impl Into<Category>, point: &PlotPoint, hover: impl FnOnce(&str) -> String) {
        self.categories.push(category.into());
        self.values.push(point.value());
        self.hover.push(hover(point.text()));
        self.texts.push(point.text().to_string());
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn hover(&self) -> &[String] {
        &self.hover
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Output of the pipeline: everything a renderer needs, no link back to the snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescriptor {
    pub view: ViewId,
    pub kind: ChartKind,
    pub title: String,
    pub subplot_titles: Vec<String>,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub y2_axis: Option<Axis>,
    pub is_empty: bool,
    pub placeholder: Option<Annotation>,
}

impl ChartDescriptor {
    pub fn new(view: ViewId, title: impl Into<String>, x_axis: Axis, y_axis: Axis) -> Self {
        Self {
            view,
            kind: view.chart_kind(),
            title: title.into(),
            subplot_titles: Vec::new(),
            series: Vec::new(),
            x_axis,
            y_axis,
            y2_axis: None,
            is_empty: false,
            placeholder: None,
        }
    }

    /// Empty-state: one centered annotation, hidden axes, no series
    pub fn empty(view: ViewId, title: impl Into<String>) -> Self {
        Self {
            is_empty: true,
            placeholder: Some(Annotation::centered(view.placeholder())),
            ..Self::new(view, title, Axis::hidden(), Axis::hidden())
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
