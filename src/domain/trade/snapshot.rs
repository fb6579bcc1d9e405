use super::entities::TradeRecord;
use crate::domain::errors::{DashboardError, DashboardResult, DataLoadError};
use serde_json::{Map, Value};

/// Aggregate root - the whole loaded dataset.
///
/// Immutable after construction; share it behind an `Arc`.
/// Top-level keys are kept as raw JSON; a view is checked only when read,
/// so metadata keys or one broken view do not block the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeSnapshot {
    views: Map<String, Value>,
}

impl TradeSnapshot {
    /// Parse `{"view": [{...}, ...], ...}`
    pub fn from_json_str(json: &str) -> Result<Self, DataLoadError> {
        let views: Map<String, Value> =
            serde_json::from_str(json).map_err(|e| DataLoadError::Parse(e.to_string()))?;
        Ok(Self { views })
    }

    pub fn from_views(views: Map<String, Value>) -> Self {
        Self { views }
    }

    pub fn has_view(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// `None` for an absent key or one that is not an array
    pub fn record_count(&self, name: &str) -> Option<usize> {
        self.views.get(name).and_then(Value::as_array).map(Vec::len)
    }

    /// Typed records of one view, in input order.
    ///
    /// Absent view -> `MissingView`; a view that is not an array, or a record
    /// that does not fit `T` or breaks its invariants -> `InvalidRecord`.
    pub fn view<T: TradeRecord>(&self, name: &str) -> DashboardResult<Vec<T>> {
        let raw = self.views.get(name).ok_or_else(|| DashboardError::missing_view(name))?;
        let records = raw
            .as_array()
            .ok_or_else(|| DashboardError::invalid_record(name, 0, "expected an array of records"))?;
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let typed =
                    T::deserialize(record).map_err(|e| DashboardError::invalid_record(name, index, e.to_string()))?;
                typed
                    .validate()
                    .map_err(|reason| DashboardError::invalid_record(name, index, reason))?;
                Ok(typed)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DataShapeError;
    use crate::domain::trade::entities::TradeFlowRecord;

    #[test]
    fn typed_view_keeps_input_order() {
        let snapshot = TradeSnapshot::from_json_str(
            r#"{"trade_dynamics": [{"year": 2023, "X": 1.0, "M": 2.0}, {"year": "2021", "X": 3.0, "M": 1.0}]}"#,
        )
        .unwrap();
        let records: Vec<TradeFlowRecord> = snapshot.view("trade_dynamics").unwrap();
        assert_eq!(records[0].year.value(), 2023);
        assert_eq!(records[1].year.value(), 2021);
    }

    #[test]
    fn absent_view_is_missing_view() {
        let snapshot = TradeSnapshot::from_json_str(r#"{"trade_dynamics": []}"#).unwrap();
        let err = snapshot.view::<TradeFlowRecord>("russia_trade_dynamics").unwrap_err();
        assert!(err.is_missing_view());
    }

    #[test]
    fn malformed_record_reports_index() {
        let snapshot =
            TradeSnapshot::from_json_str(r#"{"trade_dynamics": [{"year": 2021, "X": 1.0, "M": 1.0}, {"year": 2022}]}"#)
                .unwrap();
        match snapshot.view::<TradeFlowRecord>("trade_dynamics").unwrap_err() {
            DashboardError::DataShape(DataShapeError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_object_snapshot_is_parse_error() {
        assert!(matches!(TradeSnapshot::from_json_str("[1, 2]"), Err(DataLoadError::Parse(_))));
    }

    #[test]
    fn metadata_keys_do_not_block_loading() {
        let snapshot = TradeSnapshot::from_json_str(
            r#"{"generated_at": "2024-05-01", "trade_dynamics": [{"year": 2021, "X": 1.0, "M": 2.0}]}"#,
        )
        .unwrap();
        assert!(snapshot.has_view("generated_at"));
        assert_eq!(snapshot.record_count("generated_at"), None);
        assert_eq!(snapshot.view::<TradeFlowRecord>("trade_dynamics").unwrap().len(), 1);
    }

    #[test]
    fn non_array_view_fails_only_itself() {
        let snapshot = TradeSnapshot::from_json_str(
            r#"{"trade_dynamics": 5, "russia_trade_dynamics": [{"year": 2022, "X": 1.0, "M": 1.0}, 7]}"#,
        )
        .unwrap();
        match snapshot.view::<TradeFlowRecord>("trade_dynamics").unwrap_err() {
            DashboardError::DataShape(DataShapeError::InvalidRecord { view, reason, .. }) => {
                assert_eq!(view, "trade_dynamics");
                assert!(reason.contains("array"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
        match snapshot.view::<TradeFlowRecord>("russia_trade_dynamics").unwrap_err() {
            DashboardError::DataShape(DataShapeError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
