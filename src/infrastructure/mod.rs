pub mod dataset;
pub mod services;

pub use dataset::{DatasetAccessor, InMemorySource, JsonFileSource};
pub use services::{ConsoleLogger, MemoryLogger, SystemTimeProvider};
