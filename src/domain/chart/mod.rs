//! Chart aggregate: descriptors, their value objects and the chart builder.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use value_objects::*;
