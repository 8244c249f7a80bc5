pub mod snapshot_builder;
pub mod ticker_validator;

pub use snapshot_builder::SnapshotBuilder;
pub use ticker_validator::TickerValidator;
