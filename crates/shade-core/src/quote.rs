//! # Quote Data
//!
//! The canonical quote: a catalogue of products, each with a table of rows
//! and a summary block written by the pricing provider.
//!
//! ## Shape
//! ```text
//! QuoteData
//! ├── quote_id, created_at
//! ├── current_product ───────────────► key into products
//! ├── products: { "rollerBlind": ProductData }
//! │                 ├── items: [QuoteItem, QuoteItem, ...]   (table rows)
//! │                 └── summary: ProductSummary              (priced, external)
//! └── ui_metadata
//!       └── lf_modified_rows: {1, 4}   rows carrying an applied light filter
//! ```
//!
//! Every mutation here validates before it writes and returns a `CoreError`
//! on bad input. The engine always runs mutations on a private copy, so an
//! error never leaves a half-edited quote behind.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{BatchField, ItemField};
use crate::ui::{DriveAccessoryMode, DualChainMode};
use crate::validation::{self, EditLimits};
use crate::{LIGHT_FILTER_TYPE, MAX_QUOTE_ROWS};

// =============================================================================
// Rows
// =============================================================================

/// One row of a product table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub item_id: String,
    pub width_mm: Option<u32>,
    pub height_mm: Option<u32>,
    pub fabric_type: Option<String>,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub over_under: Option<String>,
    pub left_right: Option<String>,
    pub dual: Option<String>,
    pub chain_mm: Option<u32>,
    pub winder: Option<String>,
    pub motor: Option<String>,
    /// Written by the pricing provider.
    pub line_price_cents: Option<i64>,
}

impl QuoteItem {
    /// Creates an empty row with a fresh id.
    pub fn empty() -> Self {
        QuoteItem {
            item_id: Uuid::new_v4().to_string(),
            width_mm: None,
            height_mm: None,
            fabric_type: None,
            fabric: None,
            color: None,
            location: None,
            over_under: None,
            left_right: None,
            dual: None,
            chain_mm: None,
            winder: None,
            motor: None,
            line_price_cents: None,
        }
    }

    /// A row without width and height is a placeholder, not a blind.
    pub fn is_blank(&self) -> bool {
        self.width_mm.is_none() && self.height_mm.is_none()
    }

    pub fn line_price(&self) -> Option<Money> {
        self.line_price_cents.map(Money::from_cents)
    }

    /// Text shown in a table cell for the given column.
    pub fn cell_text(&self, field: ItemField) -> String {
        let num = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        match field {
            ItemField::Width => num(self.width_mm),
            ItemField::Height => num(self.height_mm),
            ItemField::FabricType => text(&self.fabric_type),
            ItemField::Fabric => text(&self.fabric),
            ItemField::Color => text(&self.color),
            ItemField::Location => text(&self.location),
            ItemField::OverUnder => text(&self.over_under),
            ItemField::LeftRight => text(&self.left_right),
            ItemField::Dual => text(&self.dual),
            ItemField::Chain => num(self.chain_mm),
            ItemField::Winder => text(&self.winder),
            ItemField::Motor => text(&self.motor),
        }
    }
}

// =============================================================================
// Summaries
// =============================================================================

/// Accessory prices for the K4/K5 summary, in cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AccessoriesSummary {
    pub winder_cents: Option<i64>,
    pub motor_cents: Option<i64>,
    pub remote_cents: Option<i64>,
    pub charger_cents: Option<i64>,
    pub cord_cents: Option<i64>,
}

impl AccessoriesSummary {
    /// Sum of every priced accessory, or `None` when nothing is priced.
    pub fn total(&self) -> Option<Money> {
        let prices = [
            self.winder_cents,
            self.motor_cents,
            self.remote_cents,
            self.charger_cents,
            self.cord_cents,
        ];
        if prices.iter().all(Option::is_none) {
            return None;
        }
        Some(prices.iter().flatten().copied().map(Money::from_cents).sum())
    }
}

/// Computed summary of one product. The store keeps it; it never computes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub total_cents: Option<i64>,
    pub accessories: AccessoriesSummary,
}

/// A catalogue entry: its rows plus its summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub items: Vec<QuoteItem>,
    pub summary: ProductSummary,
}

impl ProductData {
    /// A table with a single empty row, which is how every table starts.
    pub fn new() -> Self {
        ProductData {
            items: vec![QuoteItem::empty()],
            summary: ProductSummary::default(),
        }
    }
}

impl Default for ProductData {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Row Metadata
// =============================================================================

/// Per-row UI bookkeeping that lives with the quote, since it must follow
/// rows through inserts and deletes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UiMetadata {
    /// Rows whose fabric was set through the light-filter workflow.
    pub lf_modified_rows: BTreeSet<usize>,
}

impl UiMetadata {
    pub fn has_lf_modified(&self) -> bool {
        !self.lf_modified_rows.is_empty()
    }

    fn shift_for_insert(&mut self, at: usize) {
        self.lf_modified_rows = self
            .lf_modified_rows
            .iter()
            .map(|&r| if r >= at { r + 1 } else { r })
            .collect();
    }

    fn shift_for_delete(&mut self, row: usize) {
        self.lf_modified_rows = self
            .lf_modified_rows
            .iter()
            .filter(|&&r| r != row)
            .map(|&r| if r > row { r - 1 } else { r })
            .collect();
    }
}

// =============================================================================
// Quote Data
// =============================================================================

/// The whole quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    pub quote_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub current_product: String,
    pub products: BTreeMap<String, ProductData>,
    #[serde(default)]
    pub ui_metadata: UiMetadata,
}

impl QuoteData {
    /// Creates a quote with one product holding one empty row.
    pub fn new(product_key: &str) -> Self {
        let mut products = BTreeMap::new();
        products.insert(product_key.to_string(), ProductData::new());
        QuoteData {
            quote_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            current_product: product_key.to_string(),
            products,
            ui_metadata: UiMetadata::default(),
        }
    }

    /// Gives the quote a fresh identity, as a "new quote" does.
    pub fn renew_identity(&mut self) {
        self.quote_id = Uuid::new_v4().to_string();
        self.created_at = Utc::now();
    }

    /// Returns the current product.
    pub fn product(&self) -> CoreResult<&ProductData> {
        self.products
            .get(&self.current_product)
            .ok_or_else(|| CoreError::ProductNotFound(self.current_product.clone()))
    }

    fn product_mut(&mut self) -> CoreResult<&mut ProductData> {
        let key = self.current_product.clone();
        self.products
            .get_mut(&key)
            .ok_or(CoreError::ProductNotFound(key))
    }

    /// Rows of the current product (empty when the product is missing).
    pub fn items(&self) -> &[QuoteItem] {
        self.product().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    /// Summary of the current product.
    pub fn summary(&self) -> Option<&ProductSummary> {
        self.product().ok().map(|p| &p.summary)
    }

    fn row_mut(&mut self, row: usize) -> CoreResult<&mut QuoteItem> {
        let items = &mut self.product_mut()?.items;
        let len = items.len();
        items.get_mut(row).ok_or(CoreError::RowOutOfRange { row, len })
    }

    fn check_rows<'a>(&self, rows: impl IntoIterator<Item = &'a usize>) -> CoreResult<()> {
        let len = self.items().len();
        for &row in rows {
            if row >= len {
                return Err(CoreError::RowOutOfRange { row, len });
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Cell edits
    // -------------------------------------------------------------------------

    /// Writes one cell from raw text. Empty text clears the cell.
    ///
    /// Changing the fabric type of a light-filtered row away from `LF`
    /// drops its light-filter mark.
    pub fn update_item_field(
        &mut self,
        row: usize,
        field: ItemField,
        raw: &str,
        limits: &EditLimits,
    ) -> CoreResult<()> {
        let item = self.row_mut(row)?;
        match field {
            ItemField::Width => item.width_mm = validation::validate_dimension("width", raw)?,
            ItemField::Height => item.height_mm = validation::validate_dimension("height", raw)?,
            ItemField::FabricType => item.fabric_type = validation::validate_fabric_type(raw)?,
            ItemField::Fabric => item.fabric = validation::validate_name("fabric", raw)?,
            ItemField::Color => item.color = validation::validate_name("color", raw)?,
            ItemField::Location => {
                item.location = validation::validate_location(raw, limits.max_location_len)?
            }
            ItemField::OverUnder => {
                item.over_under = validation::validate_option("oi", raw, &["IN", "OUT"])?
            }
            ItemField::LeftRight => {
                item.left_right = validation::validate_option("lr", raw, &["L", "R"])?
            }
            ItemField::Dual => item.dual = validation::validate_option("dual", raw, &["D"])?,
            ItemField::Chain => item.chain_mm = validation::validate_chain(raw)?,
            ItemField::Winder => item.winder = validation::validate_option("winder", raw, &["HD"])?,
            ItemField::Motor => item.motor = validation::validate_option("motor", raw, &["M"])?,
        }

        let still_lf = item.fabric_type.as_deref() == Some(LIGHT_FILTER_TYPE);
        if field == ItemField::FabricType && !still_lf {
            self.ui_metadata.lf_modified_rows.remove(&row);
        }
        Ok(())
    }

    /// Writes `raw` into `field` for every row of the given fabric type that
    /// is not light-filtered. Returns how many rows were written.
    pub fn apply_batch(&mut self, fabric_type: &str, field: BatchField, raw: &str) -> CoreResult<usize> {
        let code = validation::validate_fabric_type(fabric_type)?.ok_or_else(|| {
            crate::ValidationError::Required {
                field: "fabricType".to_string(),
            }
        })?;
        let value = validation::validate_name(field.item_field().column_key(), raw)?;

        let lf_rows = self.ui_metadata.lf_modified_rows.clone();
        let items = &mut self.product_mut()?.items;
        let mut written = 0;
        for (row, item) in items.iter_mut().enumerate() {
            if item.fabric_type.as_deref() != Some(code.as_str()) || lf_rows.contains(&row) {
                continue;
            }
            match field {
                BatchField::Fabric => item.fabric = value.clone(),
                BatchField::Color => item.color = value.clone(),
            }
            written += 1;
        }
        Ok(written)
    }

    // -------------------------------------------------------------------------
    // Light filter
    // -------------------------------------------------------------------------

    /// Applies a light-filter fabric to the given rows and marks them.
    pub fn apply_light_filter(&mut self, rows: &BTreeSet<usize>, fabric: &str, color: &str) -> CoreResult<()> {
        if rows.is_empty() {
            return Err(CoreError::NoRowsSelected);
        }
        self.check_rows(rows)?;
        let fabric = validation::require_name("fabric", fabric)?;
        let color = validation::require_name("color", color)?;

        let items = &mut self.product_mut()?.items;
        for &row in rows {
            let item = &mut items[row];
            item.fabric_type = Some(LIGHT_FILTER_TYPE.to_string());
            item.fabric = Some(fabric.clone());
            item.color = Some(color.clone());
        }
        self.ui_metadata.lf_modified_rows.extend(rows.iter().copied());
        Ok(())
    }

    /// Removes the light filter from a marked row.
    pub fn remove_light_filter(&mut self, row: usize) -> CoreResult<()> {
        self.check_rows([&row])?;
        if !self.ui_metadata.lf_modified_rows.remove(&row) {
            return Err(CoreError::NotLightFiltered(row));
        }
        let item = self.row_mut(row)?;
        item.fabric_type = None;
        item.fabric = None;
        item.color = None;
        Ok(())
    }

    /// Sets the fabric type of the given rows (the SSet workflow).
    pub fn apply_fabric_type(&mut self, rows: &BTreeSet<usize>, fabric_type: &str) -> CoreResult<()> {
        if rows.is_empty() {
            return Err(CoreError::NoRowsSelected);
        }
        self.check_rows(rows)?;
        let code = validation::validate_fabric_type(fabric_type)?.ok_or_else(|| {
            crate::ValidationError::Required {
                field: "fabricType".to_string(),
            }
        })?;

        let is_lf = code == LIGHT_FILTER_TYPE;
        let items = &mut self.product_mut()?.items;
        for &row in rows {
            items[row].fabric_type = Some(code.clone());
        }
        if !is_lf {
            for row in rows {
                self.ui_metadata.lf_modified_rows.remove(row);
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // K4 / K5 row options
    // -------------------------------------------------------------------------

    /// Flips a drive option (winder `HD`, motor `M`) on a row. Accessory
    /// modes without a per-row option are rejected.
    pub fn toggle_drive_option(&mut self, row: usize, mode: DriveAccessoryMode) -> CoreResult<()> {
        let item = self.row_mut(row)?;
        match mode {
            DriveAccessoryMode::Winder => {
                item.winder = match item.winder {
                    Some(_) => None,
                    None => Some("HD".to_string()),
                };
                // A row is either hand-wound or motorised
                if item.winder.is_some() {
                    item.motor = None;
                }
            }
            DriveAccessoryMode::Motor => {
                item.motor = match item.motor {
                    Some(_) => None,
                    None => Some("M".to_string()),
                };
                if item.motor.is_some() {
                    item.winder = None;
                }
            }
            other => {
                return Err(crate::ValidationError::NotAllowed {
                    field: format!("{:?} row option", other),
                    allowed: vec!["Winder".to_string(), "Motor".to_string()],
                }
                .into())
            }
        }
        Ok(())
    }

    /// Writes the value of a dual/chain edit into its row.
    pub fn apply_dual_chain(
        &mut self,
        row: usize,
        mode: DualChainMode,
        raw: &str,
        limits: &EditLimits,
    ) -> CoreResult<()> {
        self.update_item_field(row, mode.field(), raw, limits)
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Inserts an empty row at `at` (0..=len).
    pub fn insert_row(&mut self, at: usize) -> CoreResult<()> {
        let items = &mut self.product_mut()?.items;
        let len = items.len();
        if at > len {
            return Err(CoreError::RowOutOfRange { row: at, len });
        }
        if len >= MAX_QUOTE_ROWS {
            return Err(CoreError::TableFull { max: MAX_QUOTE_ROWS });
        }
        items.insert(at, QuoteItem::empty());
        self.ui_metadata.shift_for_insert(at);
        Ok(())
    }

    /// Deletes a row, keeping the row metadata aligned.
    pub fn delete_row(&mut self, row: usize) -> CoreResult<()> {
        let items = &mut self.product_mut()?.items;
        let len = items.len();
        if row >= len {
            return Err(CoreError::RowOutOfRange { row, len });
        }
        if len == 1 {
            return Err(CoreError::LastRow);
        }
        items.remove(row);
        self.ui_metadata.shift_for_delete(row);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Stores a summary computed elsewhere.
    pub fn set_summary(&mut self, summary: ProductSummary) -> CoreResult<()> {
        self.product_mut()?.summary = summary;
        Ok(())
    }

    /// Stores per-row line prices computed elsewhere. The list must match the
    /// table length.
    pub fn set_line_prices(&mut self, prices: &[Option<i64>]) -> CoreResult<()> {
        let items = &mut self.product_mut()?.items;
        if prices.len() != items.len() {
            return Err(CoreError::InvariantViolated(format!(
                "{} line prices for {} rows",
                prices.len(),
                items.len()
            )));
        }
        for (item, price) in items.iter_mut().zip(prices) {
            item.line_price_cents = *price;
        }
        Ok(())
    }

    /// Sum of the line prices of the current product.
    pub fn line_total(&self) -> Money {
        self.items().iter().filter_map(QuoteItem::line_price).sum()
    }

    // -------------------------------------------------------------------------
    // Invariants
    // -------------------------------------------------------------------------

    /// Checks the structural invariants of the quote.
    ///
    /// ## Rules
    /// - `current_product` names a catalogue entry
    /// - every product has at least one row
    /// - every light-filter mark points at an existing `LF` row
    pub fn check_invariants(&self) -> CoreResult<()> {
        let product = self.product()?;

        if let Some((key, _)) = self.products.iter().find(|(_, p)| p.items.is_empty()) {
            return Err(CoreError::InvariantViolated(format!("product '{}' has no rows", key)));
        }

        for &row in &self.ui_metadata.lf_modified_rows {
            match product.items.get(row) {
                None => {
                    return Err(CoreError::InvariantViolated(format!(
                        "light-filter mark on missing row {}",
                        row
                    )))
                }
                Some(item) if item.fabric_type.as_deref() != Some(LIGHT_FILTER_TYPE) => {
                    return Err(CoreError::InvariantViolated(format!(
                        "light-filter mark on non-LF row {}",
                        row
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_PRODUCT_KEY;

    fn quote_with_rows(n: usize) -> QuoteData {
        let mut quote = QuoteData::new(DEFAULT_PRODUCT_KEY);
        for i in 1..n {
            quote.insert_row(i).unwrap();
        }
        quote
    }

    fn limits() -> EditLimits {
        EditLimits::default()
    }

    fn rows(list: &[usize]) -> BTreeSet<usize> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_new_quote_has_one_blank_row() {
        let quote = QuoteData::new(DEFAULT_PRODUCT_KEY);
        assert_eq!(quote.items().len(), 1);
        assert!(quote.items()[0].is_blank());
        assert!(quote.check_invariants().is_ok());
    }

    #[test]
    fn test_update_item_field() {
        let mut quote = quote_with_rows(2);
        quote.update_item_field(1, ItemField::Width, "1200", &limits()).unwrap();
        quote.update_item_field(1, ItemField::LeftRight, "r", &limits()).unwrap();

        assert_eq!(quote.items()[1].width_mm, Some(1200));
        assert_eq!(quote.items()[1].left_right.as_deref(), Some("R"));
    }

    #[test]
    fn test_update_item_field_rejects_bad_row_and_value() {
        let mut quote = quote_with_rows(2);
        assert!(matches!(
            quote.update_item_field(5, ItemField::Width, "1200", &limits()),
            Err(CoreError::RowOutOfRange { row: 5, len: 2 })
        ));
        assert!(quote.update_item_field(0, ItemField::Width, "12", &limits()).is_err());
    }

    #[test]
    fn test_batch_applies_to_matching_type_only() {
        let mut quote = quote_with_rows(3);
        quote.update_item_field(0, ItemField::FabricType, "B1", &limits()).unwrap();
        quote.update_item_field(1, ItemField::FabricType, "B2", &limits()).unwrap();
        quote.update_item_field(2, ItemField::FabricType, "b1", &limits()).unwrap();

        let written = quote.apply_batch("B1", BatchField::Color, "Red").unwrap();

        assert_eq!(written, 2);
        assert_eq!(quote.items()[0].color.as_deref(), Some("Red"));
        assert_eq!(quote.items()[1].color, None);
        assert_eq!(quote.items()[2].color.as_deref(), Some("Red"));
    }

    #[test]
    fn test_batch_skips_light_filtered_rows() {
        let mut quote = quote_with_rows(2);
        quote.apply_light_filter(&rows(&[0]), "Sheer", "White").unwrap();
        quote.update_item_field(1, ItemField::FabricType, "LF", &limits()).unwrap();

        let written = quote.apply_batch("LF", BatchField::Fabric, "Blockout").unwrap();

        assert_eq!(written, 1);
        assert_eq!(quote.items()[0].fabric.as_deref(), Some("Sheer"));
    }

    #[test]
    fn test_light_filter_apply_and_remove() {
        let mut quote = quote_with_rows(3);
        quote.apply_light_filter(&rows(&[0, 2]), "Sheer", "Ivory").unwrap();
        assert_eq!(quote.ui_metadata.lf_modified_rows, rows(&[0, 2]));
        assert!(quote.check_invariants().is_ok());

        quote.remove_light_filter(2).unwrap();
        assert_eq!(quote.ui_metadata.lf_modified_rows, rows(&[0]));
        assert_eq!(quote.items()[2].fabric, None);

        assert!(matches!(
            quote.remove_light_filter(1),
            Err(CoreError::NotLightFiltered(1))
        ));
    }

    #[test]
    fn test_light_filter_requires_selection_and_names() {
        let mut quote = quote_with_rows(2);
        assert!(matches!(
            quote.apply_light_filter(&BTreeSet::new(), "Sheer", "White"),
            Err(CoreError::NoRowsSelected)
        ));
        assert!(quote.apply_light_filter(&rows(&[0]), "Sheer", "").is_err());
        assert!(quote.apply_light_filter(&rows(&[9]), "Sheer", "White").is_err());
    }

    #[test]
    fn test_changing_type_clears_lf_mark() {
        let mut quote = quote_with_rows(2);
        quote.apply_light_filter(&rows(&[1]), "Sheer", "White").unwrap();

        quote.update_item_field(1, ItemField::FabricType, "B3", &limits()).unwrap();

        assert!(!quote.ui_metadata.has_lf_modified());
        assert!(quote.check_invariants().is_ok());
    }

    #[test]
    fn test_delete_row_reindexes_lf_marks() {
        let mut quote = quote_with_rows(4);
        quote.apply_light_filter(&rows(&[1, 3]), "Sheer", "White").unwrap();

        quote.delete_row(1).unwrap();

        assert_eq!(quote.items().len(), 3);
        assert_eq!(quote.ui_metadata.lf_modified_rows, rows(&[2]));
        assert!(quote.check_invariants().is_ok());
    }

    #[test]
    fn test_insert_row_reindexes_lf_marks() {
        let mut quote = quote_with_rows(2);
        quote.apply_light_filter(&rows(&[1]), "Sheer", "White").unwrap();

        quote.insert_row(0).unwrap();

        assert_eq!(quote.ui_metadata.lf_modified_rows, rows(&[2]));
        assert!(quote.check_invariants().is_ok());
    }

    #[test]
    fn test_cannot_delete_last_row() {
        let mut quote = quote_with_rows(1);
        assert!(matches!(quote.delete_row(0), Err(CoreError::LastRow)));
    }

    #[test]
    fn test_drive_options_are_exclusive_per_row() {
        let mut quote = quote_with_rows(1);
        quote.toggle_drive_option(0, DriveAccessoryMode::Winder).unwrap();
        quote.toggle_drive_option(0, DriveAccessoryMode::Motor).unwrap();

        assert_eq!(quote.items()[0].motor.as_deref(), Some("M"));
        assert_eq!(quote.items()[0].winder, None);
        assert!(quote.toggle_drive_option(0, DriveAccessoryMode::Remote).is_err());
    }

    #[test]
    fn test_invariants_detect_missing_product() {
        let mut quote = quote_with_rows(1);
        quote.current_product = "verticalBlind".to_string();
        assert!(matches!(
            quote.check_invariants(),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_invariants_detect_stale_lf_mark() {
        let mut quote = quote_with_rows(1);
        quote.ui_metadata.lf_modified_rows.insert(4);
        assert!(matches!(
            quote.check_invariants(),
            Err(CoreError::InvariantViolated(_))
        ));
    }

    #[test]
    fn test_accessories_total() {
        let summary = AccessoriesSummary {
            motor_cents: Some(25_000),
            remote_cents: Some(7_000),
            ..Default::default()
        };
        assert_eq!(summary.total(), Some(Money::from_cents(32_000)));
        assert_eq!(AccessoriesSummary::default().total(), None);
    }

    #[test]
    fn test_set_line_prices_length_must_match() {
        let mut quote = quote_with_rows(2);
        assert!(quote.set_line_prices(&[Some(100)]).is_err());
        quote.set_line_prices(&[Some(100), Some(250)]).unwrap();
        assert_eq!(quote.line_total().cents(), 350);
    }
}
