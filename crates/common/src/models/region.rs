use std::fmt;

/// Market grouping. Decides the fetch interval policy and the currency
/// label of the price column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    India,
    Usa,
}

impl Region {
    /// Intraday 5-minute bars for USA, daily bars everywhere else.
    pub fn uses_intraday(&self) -> bool {
        matches!(self, Self::Usa)
    }

    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Usa => "USA Stock Info",
            Self::India => "INDIA Stock Info",
        }
    }

    pub fn price_column(&self) -> &'static str {
        match self {
            Self::Usa => "Price (USD)",
            Self::India => "Price (INR)",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::India => write!(f, "India"),
            Self::Usa => write!(f, "USA"),
        }
    }
}
