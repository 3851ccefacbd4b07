//! Brazilian economic indicators and their static configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IndexerError;
use crate::interest::{AdjustmentSpec, RateType};

/// A named monthly rate series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Indicator {
    /// Consumer price inflation index
    Ipca,
    /// Interbank deposit rate
    Cdi,
    /// Central bank policy rate
    Selic,
    /// Severance fund (FGTS) remuneration
    Fgts,
    /// Savings account (poupança) remuneration
    Poupanca,
}

/// Per-indicator constants
#[derive(Debug, Clone, Copy)]
pub struct IndicatorConfig {
    /// Display title, also the name accepted by the API
    pub title: &'static str,
    /// Collection/file stem the series is stored under
    pub collection: &'static str,
    /// Page the monthly figures are published on
    pub source_link: &'static str,
    /// Additional rate preselected on the dashboard
    pub default_adjustment: AdjustmentSpec,
}

const CONFIGS: [IndicatorConfig; 5] = [
    IndicatorConfig {
        title: "IPCA",
        collection: "ipca",
        source_link: "https://www.valor.srv.br/indices/ipca.php",
        default_adjustment: AdjustmentSpec { rate_type: RateType::Prefixed, rate_value: 6.0 },
    },
    IndicatorConfig {
        title: "CDI",
        collection: "cdi",
        source_link: "https://www.valor.srv.br/indices/cdi.php",
        default_adjustment: AdjustmentSpec { rate_type: RateType::Proportional, rate_value: 120.0 },
    },
    IndicatorConfig {
        title: "SELIC",
        collection: "selic",
        source_link: "https://www.valor.srv.br/indices/selic.php",
        default_adjustment: AdjustmentSpec { rate_type: RateType::Proportional, rate_value: 100.0 },
    },
    IndicatorConfig {
        title: "FGTS",
        collection: "fgts",
        source_link: "http://www.yahii.com.br/fgts03a06.html",
        default_adjustment: AdjustmentSpec { rate_type: RateType::None, rate_value: 0.0 },
    },
    IndicatorConfig {
        title: "POUPANCA",
        collection: "poupanca",
        source_link: "http://www.yahii.com.br/poupanca.html",
        default_adjustment: AdjustmentSpec { rate_type: RateType::None, rate_value: 0.0 },
    },
];

impl Indicator {
    /// All indicators in dashboard order
    pub const ALL: [Indicator; 5] = [
        Indicator::Ipca,
        Indicator::Cdi,
        Indicator::Selic,
        Indicator::Fgts,
        Indicator::Poupanca,
    ];

    pub fn config(&self) -> &'static IndicatorConfig {
        let idx = match self {
            Indicator::Ipca => 0,
            Indicator::Cdi => 1,
            Indicator::Selic => 2,
            Indicator::Fgts => 3,
            Indicator::Poupanca => 4,
        };
        &CONFIGS[idx]
    }

    pub fn title(&self) -> &'static str {
        self.config().title
    }

    pub fn collection(&self) -> &'static str {
        self.config().collection
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Indicator {
    type Err = IndexerError;

    /// Exact, case-sensitive match on the title; never falls back to a default series
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Indicator::ALL
            .iter()
            .copied()
            .find(|indicator| indicator.title() == s)
            .ok_or_else(|| IndexerError::InvalidIndicator(s.to_string()))
    }
}
