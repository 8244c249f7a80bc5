//! Static candidate lists, ordered by index weight. The report only ever looks
//! at the first top-N entries of each list.

pub const NIFTY50_TICKERS: &[&str] = &[
    "RELIANCE.NS",
    "HDFCBANK.NS",
    "ICICIBANK.NS",
    "INFY.NS",
    "TCS.NS",
    "BHARTIARTL.NS",
    "ITC.NS",
    "LT.NS",
    "SBIN.NS",
    "AXISBANK.NS",
    "KOTAKBANK.NS",
    "HINDUNILVR.NS",
    "BAJFINANCE.NS",
    "M&M.NS",
    "MARUTI.NS",
    "SUNPHARMA.NS",
    "HCLTECH.NS",
    "TATAMOTORS.NS",
    "NTPC.NS",
    "ULTRACEMCO.NS",
    "TITAN.NS",
    "ASIANPAINT.NS",
];

pub const SP500_TICKERS: &[&str] = &[
    "AAPL",
    "MSFT",
    "NVDA",
    "AMZN",
    "META",
    "GOOGL",
    "GOOG",
    "BRK-B",
    "AVGO",
    "TSLA",
    "JPM",
    "LLY",
    "UNH",
    "V",
    "XOM",
    "MA",
    "COST",
    "HD",
    "PG",
    "JNJ",
    "WMT",
    "NFLX",
];

pub fn to_owned_list(tickers: &[&str]) -> Vec<String> {
    tickers.iter().map(|t| t.to_string()).collect()
}
