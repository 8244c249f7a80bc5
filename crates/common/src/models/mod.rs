pub mod bar;
pub mod region;
pub mod snapshot;
pub mod ticker;

pub use bar::{Bar, Interval, Period};
pub use region::Region;
pub use snapshot::{NOT_AVAILABLE, PriceSnapshot, SnapshotRow};
pub use ticker::{QuoteInfo, ValidatedTicker};
