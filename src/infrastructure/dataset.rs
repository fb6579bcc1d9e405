use crate::domain::{
    errors::DataLoadError,
    logging::{LogComponent, LogLevel, get_logger},
    trade::{SnapshotSource, TradeSnapshot},
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Snapshot stored in a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn load_snapshot(&self) -> Result<TradeSnapshot, DataLoadError> {
        let json = fs::read_to_string(&self.path).map_err(|e| DataLoadError::Io {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        TradeSnapshot::from_json_str(&json)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Snapshot handed over as a JSON string (WASM shell, tests)
#[derive(Debug, Clone)]
pub struct InMemorySource {
    json: String,
}

impl InMemorySource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl SnapshotSource for InMemorySource {
    fn load_snapshot(&self) -> Result<TradeSnapshot, DataLoadError> {
        TradeSnapshot::from_json_str(&self.json)
    }

    fn describe(&self) -> String {
        format!("in-memory JSON ({} bytes)", self.json.len())
    }
}

/// Holds the current snapshot and swaps it atomically on refresh.
///
/// Readers get an `Arc` and keep seeing the snapshot they grabbed, even if a
/// refresh publishes a new one meanwhile.
pub struct DatasetAccessor {
    source: Box<dyn SnapshotSource>,
    current: RwLock<Arc<TradeSnapshot>>,
}

impl DatasetAccessor {
    /// Read the JSON file at `path` once
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        Self::from_source(Box::new(JsonFileSource::new(path)))
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataLoadError> {
        Self::from_source(Box::new(InMemorySource::new(json)))
    }

    pub fn from_source(source: Box<dyn SnapshotSource>) -> Result<Self, DataLoadError> {
        let snapshot = Self::read(source.as_ref())?;
        Ok(Self { source, current: RwLock::new(Arc::new(snapshot)) })
    }

    pub fn snapshot(&self) -> Arc<TradeSnapshot> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Re-read the source. The new snapshot is built completely before it is
    /// published; on failure the previous one stays in place.
    pub fn refresh(&self) -> Result<Arc<TradeSnapshot>, DataLoadError> {
        let fresh = match Self::read(self.source.as_ref()) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                get_logger().warn(
                    LogComponent::Infrastructure("Dataset"),
                    &format!("Refresh failed, keeping previous snapshot: {}", e),
                );
                return Err(e);
            }
        };

        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::clone(&fresh);
        Ok(fresh)
    }

    fn read(source: &dyn SnapshotSource) -> Result<TradeSnapshot, DataLoadError> {
        let snapshot = source.load_snapshot().inspect_err(|e| {
            get_logger().error(
                LogComponent::Infrastructure("Dataset"),
                &format!("Cannot load snapshot from {}: {}", source.describe(), e),
            );
        })?;
        get_logger().log_with_metadata(
            LogLevel::Info,
            LogComponent::Infrastructure("Dataset"),
            &format!("Loaded snapshot from {}", source.describe()),
            &format!("views={}", snapshot.view_names().collect::<Vec<_>>().join(",")),
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves the queued payloads in order
    struct ScriptedSource {
        payloads: Mutex<Vec<&'static str>>,
    }

    impl SnapshotSource for ScriptedSource {
        fn load_snapshot(&self) -> Result<TradeSnapshot, DataLoadError> {
            let json = self.payloads.lock().unwrap().remove(0);
            TradeSnapshot::from_json_str(json)
        }

        fn describe(&self) -> String {
            "script".to_string()
        }
    }

    fn scripted(payloads: Vec<&'static str>) -> Box<dyn SnapshotSource> {
        Box::new(ScriptedSource { payloads: Mutex::new(payloads) })
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DatasetAccessor::load("/definitely/not/here.json").err().unwrap();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn refresh_swaps_whole_snapshot() {
        let accessor =
            DatasetAccessor::from_source(scripted(vec![r#"{"trade_dynamics": []}"#, r#"{"export_growth": []}"#]))
                .unwrap();
        let before = accessor.snapshot();
        accessor.refresh().unwrap();
        let after = accessor.snapshot();

        assert!(before.has_view("trade_dynamics") && !before.has_view("export_growth"));
        assert!(after.has_view("export_growth") && !after.has_view("trade_dynamics"));
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let accessor = DatasetAccessor::from_source(scripted(vec![r#"{"trade_dynamics": []}"#, "{ broken"])).unwrap();
        assert!(matches!(accessor.refresh(), Err(DataLoadError::Parse(_))));
        assert!(accessor.snapshot().has_view("trade_dynamics"));
    }
}
