//! Bar sizes and lookback windows for historical requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity of historical bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BarSize {
    /// 5 second bars
    #[serde(rename = "5 secs")]
    Seconds5,
    /// 30 second bars
    #[serde(rename = "30 secs")]
    Seconds30,
    /// 1 minute bars
    #[serde(rename = "1 min")]
    #[default]
    Minute1,
    /// 5 minute bars
    #[serde(rename = "5 mins")]
    Minute5,
    /// 15 minute bars
    #[serde(rename = "15 mins")]
    Minute15,
    /// 30 minute bars
    #[serde(rename = "30 mins")]
    Minute30,
    /// 1 hour bars
    #[serde(rename = "1 hour")]
    Hour1,
    /// 4 hour bars
    #[serde(rename = "4 hours")]
    Hour4,
    /// Daily bars
    #[serde(rename = "1 day")]
    Daily,
    /// Weekly bars
    #[serde(rename = "1 week")]
    Weekly,
    /// Monthly bars
    #[serde(rename = "1 month")]
    Monthly,
}

impl fmt::Display for BarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BarSize::Seconds5 => "5 secs",
            BarSize::Seconds30 => "30 secs",
            BarSize::Minute1 => "1 min",
            BarSize::Minute5 => "5 mins",
            BarSize::Minute15 => "15 mins",
            BarSize::Minute30 => "30 mins",
            BarSize::Hour1 => "1 hour",
            BarSize::Hour4 => "4 hours",
            BarSize::Daily => "1 day",
            BarSize::Weekly => "1 week",
            BarSize::Monthly => "1 month",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BarSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        match normalized.as_str() {
            "5 secs" | "5 sec" | "5s" => Ok(BarSize::Seconds5),
            "30 secs" | "30 sec" | "30s" => Ok(BarSize::Seconds30),
            "1 min" | "1 minute" | "1m" => Ok(BarSize::Minute1),
            "5 mins" | "5 minutes" | "5m" => Ok(BarSize::Minute5),
            "15 mins" | "15 minutes" | "15m" => Ok(BarSize::Minute15),
            "30 mins" | "30 minutes" | "30m" => Ok(BarSize::Minute30),
            "1 hour" | "1h" => Ok(BarSize::Hour1),
            "4 hours" | "4h" => Ok(BarSize::Hour4),
            "1 day" | "1d" | "daily" => Ok(BarSize::Daily),
            "1 week" | "1w" | "weekly" => Ok(BarSize::Weekly),
            "1 month" | "monthly" => Ok(BarSize::Monthly),
            _ => Err(format!("Invalid bar size: {}", s)),
        }
    }
}

/// Unit of a lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowUnit {
    Seconds,
    Days,
    Weeks,
    Months,
    Years,
}

impl WindowUnit {
    fn code(&self) -> &'static str {
        match self {
            WindowUnit::Seconds => "S",
            WindowUnit::Days => "D",
            WindowUnit::Weeks => "W",
            WindowUnit::Months => "M",
            WindowUnit::Years => "Y",
        }
    }
}

/// Trailing duration of a historical request, e.g. `1 D` or `3 M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HistoryWindow {
    pub amount: u32,
    pub unit: WindowUnit,
}

impl HistoryWindow {
    pub fn new(amount: u32, unit: WindowUnit) -> Self {
        Self { amount, unit }
    }

    pub fn days(amount: u32) -> Self {
        Self::new(amount, WindowUnit::Days)
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::days(1)
    }
}

impl fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.code())
    }
}

impl FromStr for HistoryWindow {
    type Err = String;

    /// Accepts broker form (`5 D`) and long form (`5 days`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid history duration: {}", s);
        let mut parts = s.split_whitespace();
        let amount: u32 = parts
            .next()
            .and_then(|a| a.parse().ok())
            .filter(|a| *a > 0)
            .ok_or_else(invalid)?;
        let unit = match parts.next().ok_or_else(invalid)? {
            "S" | "s" | "sec" | "secs" | "second" | "seconds" => WindowUnit::Seconds,
            "D" | "d" | "day" | "days" => WindowUnit::Days,
            "W" | "w" | "week" | "weeks" => WindowUnit::Weeks,
            "M" | "month" | "months" => WindowUnit::Months,
            "Y" | "y" | "year" | "years" => WindowUnit::Years,
            _ => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { amount, unit })
    }
}

impl TryFrom<String> for HistoryWindow {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HistoryWindow> for String {
    fn from(window: HistoryWindow) -> Self {
        window.to_string()
    }
}

/// Price source for historical bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum WhatToShow {
    #[default]
    Midpoint,
    Trades,
    Bid,
    Ask,
}

impl fmt::Display for WhatToShow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WhatToShow::Midpoint => "MIDPOINT",
            WhatToShow::Trades => "TRADES",
            WhatToShow::Bid => "BID",
            WhatToShow::Ask => "ASK",
        };
        write!(f, "{}", s)
    }
}

/// Parameters of a historical bar request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub window: HistoryWindow,
    pub bar_size: BarSize,
    /// Regular trading hours only
    pub rth_only: bool,
    pub what_to_show: WhatToShow,
}

impl HistoryRequest {
    pub fn new(window: HistoryWindow, bar_size: BarSize) -> Self {
        Self {
            window,
            bar_size,
            ..Self::default()
        }
    }
}

impl Default for HistoryRequest {
    fn default() -> Self {
        Self {
            window: HistoryWindow::default(),
            bar_size: BarSize::default(),
            rth_only: true,
            what_to_show: WhatToShow::Midpoint,
        }
    }
}
