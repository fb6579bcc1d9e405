use std::fmt::{Display, Formatter, Result as FmtResult};

/// Root error type for the dashboard pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    DataLoad(DataLoadError),
    DataShape(DataShapeError),
    EntityNotFound { view: String, key: String },
    UnknownView(String),
    Config(String),
}

/// Snapshot could not be read or parsed. Nothing can render.
#[derive(Debug, Clone, PartialEq)]
pub enum DataLoadError {
    Io { path: String, reason: String },
    Parse(String),
}

/// Snapshot is valid but a view is missing or one of its records is malformed
#[derive(Debug, Clone, PartialEq)]
pub enum DataShapeError {
    MissingView(String),
    InvalidRecord {
        view: String,
        index: usize,
        reason: String,
    },
}

impl DashboardError {
    pub fn missing_view(view: &str) -> Self {
        DashboardError::DataShape(DataShapeError::MissingView(view.to_string()))
    }

    pub fn invalid_record(view: &str, index: usize, reason: impl Into<String>) -> Self {
        DashboardError::DataShape(DataShapeError::InvalidRecord {
            view: view.to_string(),
            index,
            reason: reason.into(),
        })
    }

    pub fn entity_not_found(view: &str, key: &str) -> Self {
        DashboardError::EntityNotFound { view: view.to_string(), key: key.to_string() }
    }

    /// Missing optional data: the panel falls back to its empty-state
    pub fn is_missing_view(&self) -> bool {
        matches!(self, DashboardError::DataShape(DataShapeError::MissingView(_)))
    }
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DashboardError::DataLoad(e) => write!(f, "Data load error: {}", e),
            DashboardError::DataShape(e) => write!(f, "Data shape error: {}", e),
            DashboardError::EntityNotFound { view, key } => {
                write!(f, "Entity '{}' not found in view '{}'", key, view)
            }
            DashboardError::UnknownView(id) => write!(f, "Unknown view: {}", id),
            DashboardError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Display for DataLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DataLoadError::Io { path, reason } => write!(f, "cannot read '{}': {}", path, reason),
            DataLoadError::Parse(msg) => write!(f, "invalid snapshot: {}", msg),
        }
    }
}

impl Display for DataShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DataShapeError::MissingView(view) => write!(f, "view '{}' is absent", view),
            DataShapeError::InvalidRecord { view, index, reason } => {
                write!(f, "record #{} of '{}': {}", index, view, reason)
            }
        }
    }
}

impl std::error::Error for DashboardError {}

impl From<DataLoadError> for DashboardError {
    fn from(error: DataLoadError) -> Self {
        DashboardError::DataLoad(error)
    }
}

impl From<DataShapeError> for DashboardError {
    fn from(error: DataShapeError) -> Self {
        DashboardError::DataShape(error)
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
