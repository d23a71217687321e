//! Market indicator domain entities
//!
//! Static indicator metadata, the mutable datapoint per indicator and the board
//! that folds polled snapshots into display-ready ticker entries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Changes smaller than this are shown as flat
pub const FLAT_EPSILON: f64 = 0.0001;

/// Latest raw values keyed by indicator id, as served by `GET /api/markets`
pub type MarketSnapshot = HashMap<String, serde_json::Value>;

/// Display unit class of an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Index,
    Dollar,
    Real,
    Crypto,
}

impl ValueFormat {
    pub fn decimals(self) -> usize {
        match self {
            ValueFormat::Index => 0,
            ValueFormat::Dollar | ValueFormat::Real | ValueFormat::Crypto => 2,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            ValueFormat::Index => "",
            ValueFormat::Dollar => "$ ",
            ValueFormat::Real => "R$ ",
            ValueFormat::Crypto => "₿ $ ",
        }
    }

    pub fn format(self, value: f64) -> String {
        format!("{:.*}", self.decimals(), value)
    }
}

/// Direction of the latest change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn from_change(change: f64) -> Self {
        if change.abs() < FLAT_EPSILON {
            Direction::Flat
        } else if change > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
            Direction::Flat => "•",
        }
    }
}

/// Explanatory text shown for each direction
#[derive(Debug, Clone, Serialize)]
pub struct Impacts {
    pub up: &'static str,
    pub down: &'static str,
    pub flat: &'static str,
}

impl Impacts {
    pub fn for_direction(&self, direction: Direction) -> &'static str {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Flat => self.flat,
        }
    }
}

/// Static description of a market metric
#[derive(Debug, Clone, Serialize)]
pub struct MarketIndicator {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub importance: &'static str,
    pub format: ValueFormat,
    /// Values at or above this are flagged
    pub threshold: Option<f64>,
    pub impacts: Impacts,
}

/// Latest polled value for an indicator; `None` means unavailable
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MarketDatapoint {
    pub value: Option<f64>,
    pub change: f64,
}

impl MarketDatapoint {
    /// Fold the next polled value into this datapoint
    pub fn update(&mut self, next: Option<f64>) {
        match (next, self.value) {
            (None, _) => {
                self.value = None;
                self.change = 0.0;
            }
            (Some(next), None) => {
                self.value = Some(next);
                self.change = 0.0;
            }
            (Some(next), Some(previous)) => {
                self.value = Some(next);
                self.change = next - previous;
            }
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::from_change(self.change)
    }
}

/// One rendered row of the ticker
#[derive(Debug, Clone, Serialize)]
pub struct TickerEntry {
    pub id: &'static str,
    pub label: String,
    pub available: bool,
    /// Formatted number without prefix, `None` when unavailable
    pub value: Option<String>,
    pub prefix: &'static str,
    /// Omitted when unavailable so no delta styling is applied
    pub direction: Option<Direction>,
    pub arrow: Option<&'static str>,
    pub alert: bool,
}

/// Explanation shown when an indicator is selected
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorDetail {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub importance: &'static str,
    pub impact: &'static str,
    pub direction: Direction,
    pub value: Option<f64>,
}

/// Indicators plus their current datapoints
#[derive(Debug, Clone)]
pub struct MarketBoard {
    indicators: Vec<MarketIndicator>,
    data: HashMap<&'static str, MarketDatapoint>,
    updated_at: Option<DateTime<Utc>>,
}

impl MarketBoard {
    pub fn new(indicators: Vec<MarketIndicator>) -> Self {
        let data = indicators
            .iter()
            .map(|ind| (ind.id, MarketDatapoint::default()))
            .collect();

        Self {
            indicators,
            data,
            updated_at: None,
        }
    }

    pub fn indicators(&self) -> &[MarketIndicator] {
        &self.indicators
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    #[cfg(test)]
    pub fn datapoint(&self, id: &str) -> Option<MarketDatapoint> {
        self.data.get(id).copied()
    }

    /// Apply a polled snapshot. A failed poll (`None`) marks everything unavailable;
    /// missing or unparseable values mark just that indicator.
    pub fn apply(&mut self, snapshot: Option<&MarketSnapshot>, at: DateTime<Utc>) {
        for indicator in &self.indicators {
            let next = snapshot
                .and_then(|s| s.get(indicator.id))
                .and_then(parse_quote);
            self.data.entry(indicator.id).or_default().update(next);
        }
        self.updated_at = Some(at);
    }

    pub fn entries(&self) -> Vec<TickerEntry> {
        self.indicators
            .iter()
            .map(|indicator| {
                let point = self.data.get(indicator.id).copied().unwrap_or_default();
                let label = indicator.name.to_uppercase();

                match point.value {
                    None => TickerEntry {
                        id: indicator.id,
                        label,
                        available: false,
                        value: None,
                        prefix: "",
                        direction: None,
                        arrow: None,
                        alert: false,
                    },
                    Some(value) => {
                        let direction = point.direction();
                        TickerEntry {
                            id: indicator.id,
                            label,
                            available: true,
                            value: Some(indicator.format.format(value)),
                            prefix: indicator.format.prefix(),
                            direction: Some(direction),
                            arrow: Some(direction.arrow()),
                            alert: indicator.threshold.is_some_and(|t| value >= t),
                        }
                    }
                }
            })
            .collect()
    }

    pub fn detail(&self, id: &str) -> Option<IndicatorDetail> {
        let indicator = self.indicators.iter().find(|i| i.id == id)?;
        let point = self.data.get(indicator.id).copied().unwrap_or_default();
        let direction = point.direction();

        Some(IndicatorDetail {
            id: indicator.id,
            name: indicator.name,
            description: indicator.description,
            importance: indicator.importance,
            impact: indicator.impacts.for_direction(direction),
            direction,
            value: point.value,
        })
    }
}

/// Accept JSON numbers and numeric strings (comma or dot decimal separator)
pub fn parse_quote(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }?;

    number.is_finite().then_some(number)
}

/// The indicators shown on the site
pub fn default_indicators() -> Vec<MarketIndicator> {
    vec![
        MarketIndicator {
            id: "brent",
            name: "Brent Crude",
            description: "Global benchmark for North Sea crude oil prices.",
            importance: "Drives energy and fuel costs and feeds inflation in many countries.",
            format: ValueFormat::Dollar,
            threshold: Some(100.0),
            impacts: Impacts {
                up: "A rising Brent pushes energy costs up and raises inflation risk.",
                down: "A falling Brent lowers energy costs and eases inflation pressure.",
                flat: "A steady Brent keeps energy market expectations unchanged.",
            },
        },
        MarketIndicator {
            id: "gold",
            name: "Gold Spot",
            description: "Spot price of gold on the international market.",
            importance: "Gold is a store of value; its price reflects perceived global risk.",
            format: ValueFormat::Dollar,
            threshold: None,
            impacts: Impacts {
                up: "Rising gold signals risk aversion and a flight to safe assets.",
                down: "Falling gold suggests more risk appetite and confidence in markets.",
                flat: "Steady gold points to neutral investor sentiment.",
            },
        },
        MarketIndicator {
            id: "usdbrl",
            name: "USD/BRL",
            description: "US dollar quoted against the Brazilian real.",
            importance: "Affects Brazilian imports, exports, inflation and investment.",
            format: ValueFormat::Real,
            threshold: Some(5.50),
            impacts: Impacts {
                up: "A stronger dollar makes imports dearer and pressures Brazilian inflation.",
                down: "A weaker dollar eases inflation and improves purchasing power.",
                flat: "A steady dollar keeps planning predictable.",
            },
        },
        MarketIndicator {
            id: "eurusd",
            name: "EUR/USD",
            description: "Euro quoted against the US dollar.",
            importance: "Gauges the relative strength of the European and US economies.",
            format: ValueFormat::Dollar,
            threshold: Some(1.20),
            impacts: Impacts {
                up: "A stronger euro points to a firmer European economy.",
                down: "A weaker euro suggests more confidence in the US economy.",
                flat: "A steady pair signals balance between the two currencies.",
            },
        },
        MarketIndicator {
            id: "natgas",
            name: "Natural Gas",
            description: "International natural gas price, a key energy input.",
            importance: "Moves production, heating and logistics costs.",
            format: ValueFormat::Dollar,
            threshold: Some(4.0),
            impacts: Impacts {
                up: "Rising gas raises production and heating costs.",
                down: "Falling gas lowers costs and can ease inflation.",
                flat: "Steady gas keeps consuming sectors predictable.",
            },
        },
        MarketIndicator {
            id: "sp500",
            name: "S&P 500",
            description: "Index of the 500 largest companies listed in the US.",
            importance: "Tracks the broad US economy and anchors global investment.",
            format: ValueFormat::Index,
            threshold: Some(5000.0),
            impacts: Impacts {
                up: "A rising S&P 500 shows confidence in the largest US companies.",
                down: "A falling S&P 500 reflects pessimism in equity markets.",
                flat: "A steady S&P 500 signals investor caution.",
            },
        },
        MarketIndicator {
            id: "nasdaq",
            name: "Nasdaq",
            description: "Equity index concentrated in technology and innovation companies.",
            importance: "Shows the pace of growth and confidence in global tech.",
            format: ValueFormat::Index,
            threshold: Some(16000.0),
            impacts: Impacts {
                up: "A rising Nasdaq signals growth in technology and innovation.",
                down: "A falling Nasdaq suggests a slowdown or risk aversion in tech.",
                flat: "A steady Nasdaq points to consolidation in the sector.",
            },
        },
        MarketIndicator {
            id: "bitcoin",
            name: "Bitcoin",
            description: "Leading cryptocurrency, used as digital reserve and speculative asset.",
            importance: "Its price reflects risk appetite and trust in crypto assets.",
            format: ValueFormat::Crypto,
            threshold: Some(60000.0),
            impacts: Impacts {
                up: "Rising bitcoin signals risk appetite and growing crypto interest.",
                down: "Falling bitcoin reflects caution or risk aversion.",
                flat: "Steady bitcoin suggests a consolidating crypto market.",
            },
        },
        MarketIndicator {
            id: "vix",
            name: "VIX",
            description: "Volatility index measuring expected market swings.",
            importance: "Known as the fear gauge; shows how much risk investors perceive.",
            format: ValueFormat::Index,
            threshold: Some(25.0),
            impacts: Impacts {
                up: "A rising VIX means more volatility and investor fear.",
                down: "A falling VIX suggests stability and confidence.",
                flat: "A steady VIX points to a calm, predictable market.",
            },
        },
    ]
}
