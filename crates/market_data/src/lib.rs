pub mod remote;
pub mod services;
pub mod traits;

pub use traits::QuoteSource;

#[cfg(any(test, feature = "mocks"))]
pub use traits::MockQuoteSource;
