//! Price display ordering.
//!
//! Plans list their prices grouped by currency, with current (active) prices ahead of retired
//! ones.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::Price;

/// Prices sharing one currency, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurrencyGroup {
    /// ISO 4217 code, uppercase.
    pub currency: String,
    pub active_count: usize,
    pub prices: Vec<Price>,
}

/// Sorts active prices ahead of inactive ones, newest first within each.
///
/// The sort is stable, so prices created at the same instant keep their relative order.
pub fn sort_active_first(prices: &mut [Price]) {
    prices.sort_by(|a, b| {
        b.active
            .cmp(&a.active)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Groups prices by currency (case-insensitive), ordered by currency code.
pub fn group_prices_by_currency(prices: Vec<Price>) -> Vec<CurrencyGroup> {
    let mut by_currency: BTreeMap<String, Vec<Price>> = BTreeMap::new();
    for price in prices {
        by_currency
            .entry(price.currency.trim().to_ascii_uppercase())
            .or_default()
            .push(price);
    }

    by_currency
        .into_iter()
        .map(|(currency, mut prices)| {
            sort_active_first(&mut prices);
            let active_count = prices.iter().filter(|p| p.active).count();
            CurrencyGroup {
                currency,
                active_count,
                prices,
            }
        })
        .collect()
}
