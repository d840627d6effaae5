//! # Pricing Provider
//!
//! The engine never computes prices itself. On a calculation request it
//! hands the quote to a [`PricingProvider`] and stores what comes back.
//!
//! [`PriceList`] is a flat-rate provider driven by configuration; real
//! product pricing plugs in behind the same trait.

use shade_core::{AccessoriesSummary, AccessoryCounts, Money, ProductSummary, QuoteData, QuoteItem};

use crate::config::PricingSettings;

/// Computes prices for a quote.
pub trait PricingProvider {
    /// Summary for the current product.
    fn summarize(&self, quote: &QuoteData, counts: &AccessoryCounts) -> ProductSummary;

    /// Per-row prices for the current product, one entry per row.
    fn line_prices(&self, quote: &QuoteData) -> Vec<Option<i64>> {
        vec![None; quote.items().len()]
    }
}

/// Flat unit prices.
///
/// ## Formulas
/// ```text
/// line    = width_m × height_m × fabric_per_sqm   (rows with both dimensions)
/// winder  = rows with a winder × winder unit price
/// motor   = rows with a motor  × motor unit price
/// remote  = remote count × remote unit price      (likewise charger, cord)
/// total   = Σ line + Σ accessories
/// ```
#[derive(Debug, Clone)]
pub struct PriceList {
    settings: PricingSettings,
}

impl PriceList {
    pub fn new(settings: PricingSettings) -> Self {
        PriceList { settings }
    }

    fn line_price(&self, item: &QuoteItem) -> Option<i64> {
        let (w, h) = (item.width_mm?, item.height_mm?);
        let area_mm2 = i64::from(w) * i64::from(h);
        // mm² to m²: divide by 1_000_000, rounded to the nearest cent
        Some((area_mm2 * self.settings.fabric_per_sqm_cents + 500_000) / 1_000_000)
    }

    fn priced(unit: i64, count: usize) -> Option<i64> {
        (count > 0).then(|| Money::from_cents(unit).multiply_quantity(count as i64).cents())
    }
}

impl PricingProvider for PriceList {
    fn summarize(&self, quote: &QuoteData, counts: &AccessoryCounts) -> ProductSummary {
        let items = quote.items();
        let s = &self.settings;

        let accessories = AccessoriesSummary {
            winder_cents: Self::priced(s.winder_cents, items.iter().filter(|i| i.winder.is_some()).count()),
            motor_cents: Self::priced(s.motor_cents, items.iter().filter(|i| i.motor.is_some()).count()),
            remote_cents: Self::priced(s.remote_cents, counts.remote as usize),
            charger_cents: Self::priced(s.charger_cents, counts.charger as usize),
            cord_cents: Self::priced(s.cord_cents, counts.cord as usize),
        };

        let lines: Money = items
            .iter()
            .filter_map(|i| self.line_price(i))
            .map(Money::from_cents)
            .sum();
        let total = lines + accessories.total().unwrap_or_default();

        ProductSummary {
            total_cents: Some(total.cents()),
            accessories,
        }
    }

    fn line_prices(&self, quote: &QuoteData) -> Vec<Option<i64>> {
        quote.items().iter().map(|i| self.line_price(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_core::validation::EditLimits;
    use shade_core::{ItemField, DEFAULT_PRODUCT_KEY};

    fn settings() -> PricingSettings {
        PricingSettings {
            fabric_per_sqm_cents: 10_000,
            winder_cents: 3_000,
            motor_cents: 25_000,
            remote_cents: 7_000,
            charger_cents: 4_000,
            cord_cents: 1_000,
        }
    }

    #[test]
    fn test_line_price_from_area() {
        let mut quote = QuoteData::new(DEFAULT_PRODUCT_KEY);
        let limits = EditLimits::default();
        quote.update_item_field(0, ItemField::Width, "1000", &limits).unwrap();
        quote.update_item_field(0, ItemField::Height, "1500", &limits).unwrap();
        quote.insert_row(1).unwrap();

        let prices = PriceList::new(settings()).line_prices(&quote);

        assert_eq!(prices, vec![Some(15_000), None]);
    }

    #[test]
    fn test_summary_adds_accessories() {
        let mut quote = QuoteData::new(DEFAULT_PRODUCT_KEY);
        let limits = EditLimits::default();
        quote.update_item_field(0, ItemField::Width, "1000", &limits).unwrap();
        quote.update_item_field(0, ItemField::Height, "1000", &limits).unwrap();
        quote.update_item_field(0, ItemField::Motor, "M", &limits).unwrap();
        let counts = AccessoryCounts {
            remote: 2,
            ..Default::default()
        };

        let summary = PriceList::new(settings()).summarize(&quote, &counts);

        assert_eq!(summary.accessories.motor_cents, Some(25_000));
        assert_eq!(summary.accessories.remote_cents, Some(14_000));
        assert_eq!(summary.accessories.winder_cents, None);
        assert_eq!(summary.total_cents, Some(10_000 + 25_000 + 14_000));
    }
}
