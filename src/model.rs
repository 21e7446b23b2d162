//! Input data model.
//!
//! Plain data objects supplied by the caller (typically deserialized from a
//! JSON request body). All values are immutable inputs; the engine derives
//! its own row/totals types from them and never writes back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The business document types the engine renders.
///
/// They differ only in which fields and sections a composer supplies, not
/// in core layout logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Tax invoice
    Invoice,
    /// Quote / estimate
    Quote,
    /// Purchase order sent to a supplier
    PurchaseOrder,
    /// Delivery note (quantities only, no prices)
    DeliveryNote,
    /// Credit note (negated amounts)
    CreditNote,
    /// Goods reception certificate
    ReceptionCertificate,
    /// Blank branded letterhead
    Letterhead,
}

impl DocumentKind {
    /// Short lowercase identifier used in derived filenames.
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "facture",
            DocumentKind::Quote => "devis",
            DocumentKind::PurchaseOrder => "bon-commande",
            DocumentKind::DeliveryNote => "bon-livraison",
            DocumentKind::CreditNote => "avoir",
            DocumentKind::ReceptionCertificate => "pv-reception",
            DocumentKind::Letterhead => "papier-entete",
        }
    }
}

/// A client or supplier identity block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Party {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// Postal code and city
    #[serde(default)]
    pub city: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Tax identifier shown on fiscal documents
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl Party {
    /// True when no identifying field is present.
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
    }
}

/// One line item of a document. Immutable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description
    pub designation: String,
    /// Quantity, must be >= 0
    pub quantity: f64,
    /// Unit label ("u", "m²", "h", ...)
    #[serde(default)]
    pub unit: Option<String>,
    /// Unit price before tax
    pub unit_price: f64,
    /// Optional per-item discount percent, applied to the unit price
    /// before the line total and before tax
    #[serde(default)]
    pub discount_percent: Option<f64>,
}

impl LineItem {
    /// Unit price after the per-item discount.
    pub fn net_unit_price(&self) -> f64 {
        match self.discount_percent {
            Some(d) => self.unit_price * (1.0 - d / 100.0),
            None => self.unit_price,
        }
    }
}

/// A document to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document type
    pub kind: DocumentKind,
    /// Document number ("FA-2026-0042")
    pub number: String,
    /// Issue date
    pub date: NaiveDate,
    /// Client (or supplier, for purchase orders)
    #[serde(default)]
    pub client: Party,
    /// Line items
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Tax rate as a fraction (0.20 = 20%)
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    /// Whether the tax row is drawn; when false an explicit
    /// "not applicable" note is drawn instead
    #[serde(default = "default_true")]
    pub show_tax: bool,
    /// Document-level discount percent, applied once to the subtotal
    #[serde(default)]
    pub discount_percent: Option<f64>,
    /// Payment due date (invoices)
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Related document reference (credit note -> invoice, ...)
    #[serde(default)]
    pub reference: Option<String>,
    /// Free-form note drawn under the totals
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_tax_rate() -> f64 {
    0.20
}

fn default_true() -> bool {
    true
}

impl Document {
    /// Issue date formatted the way the documents print it.
    pub fn date_string(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

/// A renderable table row derived from a [`LineItem`].
///
/// The unit price carries the sign of the document: credit-note composers
/// flip it before the table and totals ever see the row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Item description
    pub description: String,
    /// Quantity
    pub quantity: f64,
    /// Signed unit price after the per-item discount
    pub unit_price: f64,
    /// Unit label
    pub unit: String,
}

impl TableRow {
    /// Derive a row from an item; `sign` is `-1.0` for credit notes.
    pub fn from_item(item: &LineItem, sign: f64) -> Self {
        Self {
            description: item.designation.clone(),
            quantity: item.quantity,
            unit_price: sign * item.net_unit_price(),
            unit: item.unit.clone().unwrap_or_else(|| "u".to_string()),
        }
    }

    /// Line amount (quantity x signed net unit price).
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}
