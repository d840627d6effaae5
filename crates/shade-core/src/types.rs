//! # Shared Identifiers
//!
//! Small value types shared by the quote model, the event vocabulary and the
//! render layer.
//!
//! ## Identifier Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TabId        K1..K5        ─► tab button "k2-tab", content "k2-content"│
//! │  ViewId       QuickQuote    ─► which main view the left panel serves    │
//! │  ItemField    width, color  ─► a column of the quote table              │
//! │  CellRef      (row, field)  ─► target cell of a focus-style mode        │
//! │  BatchField   fabric, color ─► column of the K2 batch-input table       │
//! │  AccessoryKind remote, ...  ─► K4 counters                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Tabs
// =============================================================================

/// One of the five left-panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TabId {
    /// Location entry.
    #[serde(rename = "k1-tab")]
    K1,
    /// Fabric, color, light filter, SSet.
    #[serde(rename = "k2-tab")]
    K2,
    /// Mounting options.
    #[serde(rename = "k3-tab")]
    K3,
    /// Drive and accessories.
    #[serde(rename = "k4-tab")]
    K4,
    /// Dual/chain and summary.
    #[serde(rename = "k5-tab")]
    K5,
}

impl TabId {
    /// All tabs in display order.
    pub const ALL: [TabId; 5] = [TabId::K1, TabId::K2, TabId::K3, TabId::K4, TabId::K5];

    /// Element id of the tab button.
    pub const fn button_id(&self) -> &'static str {
        match self {
            TabId::K1 => "k1-tab",
            TabId::K2 => "k2-tab",
            TabId::K3 => "k3-tab",
            TabId::K4 => "k4-tab",
            TabId::K5 => "k5-tab",
        }
    }

    /// Element id of the tab's content pane.
    pub const fn content_id(&self) -> &'static str {
        match self {
            TabId::K1 => "k1-content",
            TabId::K2 => "k2-content",
            TabId::K3 => "k3-content",
            TabId::K4 => "k4-content",
            TabId::K5 => "k5-content",
        }
    }

    /// Panel background color while this tab is active.
    pub const fn background(&self) -> &'static str {
        match self {
            TabId::K1 => "var(--k1-bg-color)",
            TabId::K2 => "var(--k2-bg-color)",
            TabId::K3 => "var(--k3-bg-color)",
            TabId::K4 => "var(--k4-bg-color)",
            TabId::K5 => "var(--k5-bg-color)",
        }
    }
}

impl Default for TabId {
    fn default() -> Self {
        TabId::K1
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.button_id())
    }
}

impl FromStr for TabId {
    type Err = ValidationError;

    /// Accepts button ids (`k2-tab`) and short names (`k2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "k1-tab" | "k1" => Ok(TabId::K1),
            "k2-tab" | "k2" => Ok(TabId::K2),
            "k3-tab" | "k3" => Ok(TabId::K3),
            "k4-tab" | "k4" => Ok(TabId::K4),
            "k5-tab" | "k5" => Ok(TabId::K5),
            _ => Err(ValidationError::NotAllowed {
                field: "tab".to_string(),
                allowed: TabId::ALL.iter().map(|t| t.button_id().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Views
// =============================================================================

/// Main view the left panel is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ViewId {
    /// Row table with quick inputs.
    #[default]
    QuickQuote,
    /// Tabbed detail configuration.
    DetailConfig,
}

impl ViewId {
    /// The other view.
    pub const fn toggled(&self) -> Self {
        match self {
            ViewId::QuickQuote => ViewId::DetailConfig,
            ViewId::DetailConfig => ViewId::QuickQuote,
        }
    }
}

// =============================================================================
// Table Columns
// =============================================================================

/// A column of the quote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Width,
    Height,
    FabricType,
    Fabric,
    Color,
    Location,
    OverUnder,
    LeftRight,
    Dual,
    Chain,
    Winder,
    Motor,
}

impl ItemField {
    /// Column key used by table cells (`data-column`).
    pub const fn column_key(&self) -> &'static str {
        match self {
            ItemField::Width => "width",
            ItemField::Height => "height",
            ItemField::FabricType => "fabricType",
            ItemField::Fabric => "fabric",
            ItemField::Color => "color",
            ItemField::Location => "location",
            ItemField::OverUnder => "oi",
            ItemField::LeftRight => "lr",
            ItemField::Dual => "dual",
            ItemField::Chain => "chain",
            ItemField::Winder => "winder",
            ItemField::Motor => "motor",
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_key())
    }
}

impl FromStr for ItemField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim() {
            "width" => ItemField::Width,
            "height" => ItemField::Height,
            "fabricType" | "type" => ItemField::FabricType,
            "fabric" => ItemField::Fabric,
            "color" => ItemField::Color,
            "location" => ItemField::Location,
            "oi" => ItemField::OverUnder,
            "lr" => ItemField::LeftRight,
            "dual" => ItemField::Dual,
            "chain" => ItemField::Chain,
            "winder" => ItemField::Winder,
            "motor" => ItemField::Motor,
            other => {
                return Err(ValidationError::InvalidFormat {
                    field: "column".to_string(),
                    reason: format!("unknown column '{}'", other),
                })
            }
        };
        Ok(field)
    }
}

/// Pointer to one cell of the current product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    pub row: usize,
    pub column: ItemField,
}

impl CellRef {
    pub const fn new(row: usize, column: ItemField) -> Self {
        CellRef { row, column }
    }
}

// =============================================================================
// Batch Input
// =============================================================================

/// Column of the K2 batch-input table. Each batch row stands for one fabric
/// type; committing a cell writes that value to every row of the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum BatchField {
    Fabric,
    Color,
}

impl BatchField {
    /// The quote-table column this batch column writes to.
    pub const fn item_field(&self) -> ItemField {
        match self {
            BatchField::Fabric => ItemField::Fabric,
            BatchField::Color => ItemField::Color,
        }
    }
}

impl FromStr for BatchField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fabric" | "fabricName" => Ok(BatchField::Fabric),
            "color" => Ok(BatchField::Color),
            other => Err(ValidationError::NotAllowed {
                field: format!("batch field '{}'", other),
                allowed: vec!["fabric".to_string(), "color".to_string()],
            }),
        }
    }
}

// =============================================================================
// Accessories
// =============================================================================

/// Countable K4 accessories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum AccessoryKind {
    Remote,
    Charger,
    Cord,
}

impl AccessoryKind {
    pub const ALL: [AccessoryKind; 3] = [AccessoryKind::Remote, AccessoryKind::Charger, AccessoryKind::Cord];

    pub const fn key(&self) -> &'static str {
        match self {
            AccessoryKind::Remote => "remote",
            AccessoryKind::Charger => "charger",
            AccessoryKind::Cord => "cord",
        }
    }
}

impl FromStr for AccessoryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccessoryKind::ALL
            .into_iter()
            .find(|k| k.key() == s.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "accessory".to_string(),
                allowed: AccessoryKind::ALL.iter().map(|k| k.key().to_string()).collect(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
