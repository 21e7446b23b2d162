//! Totals arithmetic.
//!
//! Per-item discounts are already folded into each row's unit price by the
//! time rows reach this module; the document-level discount applies once to
//! the subtotal and is never compounded with them. Amounts are summed
//! unrounded and rounded once at display time.

use crate::model::TableRow;

/// The three amounts of a document's totals panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalsResult {
    /// Tax-exclusive total
    pub subtotal: f64,
    /// Tax amount; zero when tax display is disabled
    pub tax_amount: f64,
    /// Tax-inclusive total
    pub grand_total: f64,
}

/// Compute a document's totals. Sign-agnostic: credit-note rows carry
/// negated unit prices and everything follows.
pub fn compute_totals(
    rows: &[TableRow],
    tax_rate: f64,
    show_tax: bool,
    document_discount_percent: Option<f64>,
) -> TotalsResult {
    let mut subtotal: f64 = rows.iter().map(TableRow::amount).sum();
    if let Some(discount) = document_discount_percent {
        subtotal *= 1.0 - discount / 100.0;
    }
    let tax_amount = if show_tax { subtotal * tax_rate } else { 0.0 };
    TotalsResult {
        subtotal,
        tax_amount,
        grand_total: subtotal + tax_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;
    use proptest::prelude::*;

    fn row(qty: f64, price: f64) -> TableRow {
        TableRow {
            description: "Article".to_string(),
            quantity: qty,
            unit_price: price,
            unit: "u".to_string(),
        }
    }

    #[test]
    fn test_subtotal_and_tax() {
        let totals = compute_totals(&[row(2.0, 100.0), row(1.0, 50.0)], 0.20, true, None);
        assert!((totals.subtotal - 250.0).abs() < 1e-9);
        assert!((totals.tax_amount - 50.0).abs() < 1e-9);
        assert!((totals.grand_total - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_tax_disabled_is_zero_not_missing() {
        let totals = compute_totals(&[row(1.0, 100.0)], 0.20, false, None);
        assert_eq!(totals.tax_amount, 0.0);
        assert_eq!(totals.grand_total, totals.subtotal);
    }

    #[test]
    fn test_document_discount_applies_once_to_subtotal() {
        // Per-item discount folded into the row price, then 10% on top of
        // the subtotal: they never compound beyond that.
        let item = LineItem {
            designation: "Bureau".to_string(),
            quantity: 1.0,
            unit: None,
            unit_price: 200.0,
            discount_percent: Some(25.0),
        };
        let rows = vec![TableRow::from_item(&item, 1.0)];
        let totals = compute_totals(&rows, 0.20, true, Some(10.0));
        assert!((totals.subtotal - 135.0).abs() < 1e-9);
        assert!((totals.grand_total - 162.0).abs() < 1e-9);
    }

    #[test]
    fn test_credit_note_is_exact_negation() {
        let items: Vec<LineItem> = vec![
            LineItem {
                designation: "Chaise".to_string(),
                quantity: 4.0,
                unit: None,
                unit_price: 350.0,
                discount_percent: Some(5.0),
            },
            LineItem {
                designation: "Table".to_string(),
                quantity: 1.0,
                unit: None,
                unit_price: 4200.0,
                discount_percent: None,
            },
        ];
        let invoice_rows: Vec<TableRow> =
            items.iter().map(|i| TableRow::from_item(i, 1.0)).collect();
        let credit_rows: Vec<TableRow> =
            items.iter().map(|i| TableRow::from_item(i, -1.0)).collect();

        let invoice = compute_totals(&invoice_rows, 0.20, true, None);
        let credit = compute_totals(&credit_rows, 0.20, true, None);

        assert!((invoice.subtotal + credit.subtotal).abs() < 1e-9);
        assert!((invoice.tax_amount + credit.tax_amount).abs() < 1e-9);
        assert!((invoice.grand_total + credit.grand_total).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_grand_total_algebra(
            qty in 0.0f64..100.0,
            price in 0.0f64..10_000.0,
            rate in 0.0f64..0.5,
        ) {
            let rows = vec![row(qty, price)];
            let shown = compute_totals(&rows, rate, true, None);
            let hidden = compute_totals(&rows, rate, false, None);
            prop_assert!((shown.grand_total - shown.subtotal * (1.0 + rate)).abs() < 1e-6);
            prop_assert!((hidden.grand_total - hidden.subtotal).abs() < 1e-9);
        }
    }
}
