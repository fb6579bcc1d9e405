//! Trade data aggregate: snapshot, typed records, formatting and aggregation.

pub mod aggregates;
pub mod entities;
pub mod formatting;
pub mod repositories;
pub mod services;
pub mod snapshot;
pub mod value_objects;

pub use aggregates::*;
pub use entities::*;
pub use formatting::*;
pub use repositories::*;
pub use snapshot::*;
pub use value_objects::*;
