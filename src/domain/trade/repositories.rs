use super::snapshot::TradeSnapshot;
use crate::domain::errors::DataLoadError;

/// Where snapshots come from (a JSON file, an in-memory string, a test double)
pub trait SnapshotSource: Send + Sync {
    /// Read and parse a complete snapshot
    fn load_snapshot(&self) -> Result<TradeSnapshot, DataLoadError>;

    /// Human-readable origin for logs
    fn describe(&self) -> String;
}
