use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::leads::scoring::normalize_key;

/// Per-industry scaling applied to the baseline savings and cost formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryMultiplier {
    pub efficiency: f64,
    pub compliance: f64,
    pub integration: f64,
}

impl IndustryMultiplier {
    pub const NEUTRAL: IndustryMultiplier = IndustryMultiplier {
        efficiency: 1.0,
        compliance: 1.0,
        integration: 1.0,
    };

    const fn new(efficiency: f64, compliance: f64, integration: f64) -> Self {
        Self {
            efficiency,
            compliance,
            integration,
        }
    }
}

impl Default for IndustryMultiplier {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Lookup table keyed by normalized industry name.
///
/// Keys are normalized on the way in, so JSON tables may spell industries the way users type them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, IndustryMultiplier>",
    into = "BTreeMap<String, IndustryMultiplier>"
)]
pub struct IndustryMultiplierTable(BTreeMap<String, IndustryMultiplier>);

impl IndustryMultiplierTable {
    pub fn standard() -> Self {
        [
            ("manufacturing", IndustryMultiplier::new(1.3, 1.2, 1.2)),
            ("healthcare", IndustryMultiplier::new(1.1, 1.5, 1.3)),
            ("financial_services", IndustryMultiplier::new(1.2, 1.6, 1.3)),
            ("ecommerce", IndustryMultiplier::new(1.4, 1.0, 1.4)),
            ("retail", IndustryMultiplier::new(1.2, 1.0, 1.2)),
            ("technology", IndustryMultiplier::new(1.3, 1.0, 1.1)),
            ("professional_services", IndustryMultiplier::new(1.2, 1.1, 1.0)),
            ("construction", IndustryMultiplier::new(1.1, 1.2, 1.1)),
            ("nonprofit", IndustryMultiplier::new(1.0, 1.1, 0.9)),
        ]
        .into_iter()
        .collect()
    }

    /// Resolve `industry`, returning the matched key alongside its multipliers.
    pub fn resolve(&self, industry: Option<&str>) -> (Option<String>, IndustryMultiplier) {
        let Some(key) = industry.map(normalize_key).filter(|key| !key.is_empty()) else {
            return (None, IndustryMultiplier::NEUTRAL);
        };

        match self.0.get(&key) {
            Some(multiplier) => (Some(key), *multiplier),
            None => (None, IndustryMultiplier::NEUTRAL),
        }
    }

    pub fn lookup(&self, industry: &str) -> IndustryMultiplier {
        self.resolve(Some(industry)).1
    }

    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: AsRef<str>> FromIterator<(K, IndustryMultiplier)> for IndustryMultiplierTable {
    fn from_iter<T: IntoIterator<Item = (K, IndustryMultiplier)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, multiplier)| (normalize_key(key.as_ref()), multiplier))
                .collect(),
        )
    }
}

impl TryFrom<BTreeMap<String, IndustryMultiplier>> for IndustryMultiplierTable {
    type Error = String;

    /// Multipliers must be finite and non-negative.
    fn try_from(entries: BTreeMap<String, IndustryMultiplier>) -> Result<Self, Self::Error> {
        for (industry, multiplier) in &entries {
            let factors = [
                ("efficiency", multiplier.efficiency),
                ("compliance", multiplier.compliance),
                ("integration", multiplier.integration),
            ];
            for (factor, value) in factors {
                if !value.is_finite() || value < 0.0 {
                    return Err(format!(
                        "{industry}.{factor} must be a finite, non-negative multiplier (got {value})"
                    ));
                }
            }
        }
        Ok(entries.into_iter().collect())
    }
}

impl From<IndustryMultiplierTable> for BTreeMap<String, IndustryMultiplier> {
    fn from(table: IndustryMultiplierTable) -> Self {
        table.0
    }
}
