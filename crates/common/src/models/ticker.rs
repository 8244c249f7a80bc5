
/// Current quote metadata as reported by the quote source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteInfo {
    pub price: Option<f64>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

impl QuoteInfo {
    /// Long-form name, falling back to the short-form one. Empty names count
    /// as missing; names are returned as the provider sent them.
    pub fn display_name(&self) -> Option<&str> {
        [&self.long_name, &self.short_name]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .find(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTicker {
    pub symbol: String,
    pub name: String,
}

impl ValidatedTicker {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}
