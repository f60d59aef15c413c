// src/price/mod.rs

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::record::RecordSet;

pub const PRICE_COLUMN: &str = "Price";

/// Item name → list price. `None` means the item is known but has no
/// published price; a name missing from the table is an unknown item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Option<f64>>")]
pub struct PriceTable {
    prices: BTreeMap<String, Option<f64>>,
}

impl PriceTable {
    pub fn new(prices: BTreeMap<String, Option<f64>>) -> Result<Self> {
        for (name, price) in &prices {
            if let Some(p) = price {
                if !p.is_finite() || *p <= 0.0 {
                    return Err(Error::Config(format!(
                        "price for `{}` must be a positive number, got {}",
                        name, p
                    )));
                }
            }
        }
        Ok(Self { prices })
    }

    /// `Some(None)` for a known unpriced item, `None` for an unknown one.
    pub fn lookup(&self, name: &str) -> Option<Option<f64>> {
        self.prices.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl TryFrom<BTreeMap<String, Option<f64>>> for PriceTable {
    type Error = Error;

    fn try_from(prices: BTreeMap<String, Option<f64>>) -> Result<Self> {
        PriceTable::new(prices)
    }
}

/// Result of [`join_prices`]: the priced rows plus the names that had no
/// entry in the price table, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceJoin {
    pub records: RecordSet,
    pub dropped: Vec<String>,
}

/// Inner join on exact `Name` equality.
///
/// Rows whose name is in `prices` gain a `Price` value (null when the item
/// is unpriced); rows whose name is not are dropped and reported, never
/// treated as an error.
#[instrument(level = "info", skip_all, fields(rows = records.len(), prices = prices.len()))]
pub fn join_prices(mut records: RecordSet, prices: &PriceTable) -> Result<PriceJoin> {
    let lookups: Vec<Option<Option<f64>>> = records
        .names()
        .iter()
        .map(|name| name.as_deref().and_then(|n| prices.lookup(n)))
        .collect();

    let dropped: Vec<String> = records
        .names()
        .iter()
        .zip(&lookups)
        .filter(|(_, hit)| hit.is_none())
        .map(|(name, _)| name.clone().unwrap_or_default())
        .collect();

    let keep: Vec<bool> = lookups.iter().map(Option::is_some).collect();
    records.retain_rows(&keep);

    let column = lookups
        .into_iter()
        .flatten()
        .map(|price| price.map(|p| p.to_string()))
        .collect();
    records.push_column(PRICE_COLUMN, column)?;

    info!(kept = records.len(), dropped = dropped.len(), "joined prices");
    Ok(PriceJoin { records, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices() -> PriceTable {
        PriceTable::new(BTreeMap::from([
            ("Jetson AGX Orin 64GB".to_string(), Some(1599.0)),
            ("Jetson Orin NX 8GB".to_string(), Some(399.5)),
            ("Jetson AGX Thor T5000".to_string(), None),
        ]))
        .unwrap()
    }

    #[test]
    fn unmatched_rows_are_dropped_not_errors() {
        let records = RecordSet::with_names([
            "Jetson AGX Orin 64GB",
            "Jetson TX2",
            "Jetson AGX Thor T5000",
            "Jetson Orin NX 8GB",
        ]);
        let joined = join_prices(records, &prices()).unwrap();

        assert_eq!(joined.records.len(), 3);
        assert_eq!(joined.dropped, vec!["Jetson TX2"]);
        assert_eq!(joined.records.get(0, PRICE_COLUMN), Some("1599"));
        assert_eq!(joined.records.get(1, "Name"), Some("Jetson AGX Thor T5000"));
        assert_eq!(joined.records.get(1, PRICE_COLUMN), None);
        assert_eq!(joined.records.get(2, PRICE_COLUMN), Some("399.5"));
    }

    #[test]
    fn names_are_matched_exactly() {
        let records = RecordSet::with_names(["jetson agx orin 64gb", "Jetson AGX Orin 64GB "]);
        let joined = join_prices(records, &prices()).unwrap();
        assert!(joined.records.is_empty());
        assert_eq!(joined.dropped.len(), 2);
        assert!(joined.records.column(PRICE_COLUMN).is_some());
    }

    #[test]
    fn known_unpriced_differs_from_unknown() {
        let table = prices();
        assert_eq!(table.lookup("Jetson AGX Thor T5000"), Some(None));
        assert_eq!(table.lookup("Jetson Nano"), None);
    }

    #[test]
    fn non_positive_prices_rejected() {
        let bad = BTreeMap::from([("x".to_string(), Some(0.0))]);
        assert!(matches!(PriceTable::new(bad), Err(Error::Config(_))));
        let yaml: std::result::Result<PriceTable, _> = serde_yaml::from_str("x: -3\n");
        assert!(yaml.is_err());
        let ok: PriceTable = serde_yaml::from_str("x: 12.5\ny: null\n").unwrap();
        assert_eq!(ok.lookup("y"), Some(None));
    }
}
