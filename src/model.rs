//! Invoice record types.
//!
//! The record is a plain data carrier: totals and line amounts are stored
//! exactly as provided and never recomputed by the export pipeline.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A party on the invoice (issuer, bill-to or ship-to).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartyInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Invoice number and dates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceMeta {
    pub number: String,
    pub date: NaiveDate,
    pub payment_date: NaiveDate,
}

/// One invoice line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub description: String,
    pub model: Option<String>,
    pub quantity: u32,
    /// Unit amount, currency precision.
    pub amount: f64,
    /// Line total as provided; not recomputed from quantity * amount.
    pub total: f64,
}

/// The canonical structured representation of one invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceRecord {
    pub issuer: PartyInfo,
    pub invoice: InvoiceMeta,
    pub bill_to: PartyInfo,
    pub ship_to: PartyInfo,
    pub items: Vec<LineItem>,
    pub sub_total: f64,
    pub tax_percentage: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    pub notes: String,
    pub currency: String,
}

impl InvoiceRecord {
    /// The fixed sample record the store starts from.
    pub fn sample() -> Self {
        let today = Utc::now().date_naive();
        Self {
            issuer: PartyInfo {
                name: "Sample Company".to_string(),
                address: "123 Main St".to_string(),
                phone: "555-1234".to_string(),
            },
            invoice: InvoiceMeta {
                number: "INV-001".to_string(),
                date: today,
                payment_date: today + Duration::days(30),
            },
            bill_to: PartyInfo {
                name: "John Doe".to_string(),
                address: "456 Elm St".to_string(),
                phone: "555-5678".to_string(),
            },
            ship_to: PartyInfo {
                name: "Jane Smith".to_string(),
                address: "789 Oak St".to_string(),
                phone: "555-9012".to_string(),
            },
            items: vec![LineItem {
                name: "Widget".to_string(),
                description: "A useful widget".to_string(),
                model: None,
                quantity: 2,
                amount: 10.0,
                total: 20.0,
            }],
            sub_total: 20.0,
            tax_percentage: 5.0,
            tax_amount: 1.0,
            grand_total: 21.0,
            notes: "Thank you for your business!".to_string(),
            currency: "USD".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_record_shape() {
        let r = InvoiceRecord::sample();
        assert_eq!(r.invoice.number, "INV-001");
        assert_eq!(r.items.len(), 1);
        assert_eq!(r.grand_total, 21.0);
        assert_eq!(r.invoice.payment_date - r.invoice.date, Duration::days(30));
    }

    #[test]
    fn record_round_trips_through_json() {
        let r = InvoiceRecord::sample();
        let json = serde_json::to_string(&r).unwrap();
        let back: InvoiceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
