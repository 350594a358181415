//! Output filename derivation.
//!
//! Each template id carries its own naming convention; unknown ids get a
//! generic timestamped pattern. Deterministic given the record and a clock.

use chrono::{DateTime, Utc};

use crate::model::InvoiceRecord;

/// Time source, split out so filename derivation is testable with a fixed
/// instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

fn underscored(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Derive the download filename for one export.
pub fn derive_filename(record: &InvoiceRecord, template_id: i32, clock: &dyn Clock) -> String {
    let now = clock.now();
    let timestamp = now.timestamp_millis();
    let date = now.format("%Y-%m-%d");
    let number = &record.invoice.number;
    let company = underscored(&record.issuer.name);
    let bill_to = underscored(&record.bill_to.name);

    match template_id {
        1 => format!("{}.pdf", number),
        2 => format!("{}_{}.pdf", company, number),
        3 => format!("{}_Invoice.pdf", company),
        4 => format!("Invoice_{}.pdf", date),
        5 => format!("{}_{}.pdf", number, date),
        6 => format!("invoice_{}.pdf", timestamp),
        7 => format!("Invoice_{}.pdf", number),
        8 => format!("Invoice_{}.pdf", bill_to),
        9 => format!("IN_{}.pdf", date),
        10 => format!("{}_Creative.pdf", number),
        11 => format!("{}_Bold.pdf", number),
        12 => format!("{}_Natural.pdf", number),
        _ => format!("invoice_template_{}_{}.pdf", template_id, timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap())
    }

    #[test]
    fn conventions_for_known_templates() {
        let r = InvoiceRecord::sample();
        let c = clock();
        assert_eq!(derive_filename(&r, 1, &c), "INV-001.pdf");
        assert_eq!(derive_filename(&r, 2, &c), "Sample_Company_INV-001.pdf");
        assert_eq!(derive_filename(&r, 3, &c), "Sample_Company_Invoice.pdf");
        assert_eq!(derive_filename(&r, 4, &c), "Invoice_2024-03-15.pdf");
        assert_eq!(derive_filename(&r, 5, &c), "INV-001_2024-03-15.pdf");
        assert_eq!(derive_filename(&r, 7, &c), "Invoice_INV-001.pdf");
        assert_eq!(derive_filename(&r, 8, &c), "Invoice_John_Doe.pdf");
        assert_eq!(derive_filename(&r, 9, &c), "IN_2024-03-15.pdf");
        assert_eq!(derive_filename(&r, 10, &c), "INV-001_Creative.pdf");
        assert_eq!(derive_filename(&r, 11, &c), "INV-001_Bold.pdf");
        assert_eq!(derive_filename(&r, 12, &c), "INV-001_Natural.pdf");
    }

    #[test]
    fn timestamp_conventions_use_the_clock() {
        let r = InvoiceRecord::sample();
        let c = clock();
        let millis = c.0.timestamp_millis();
        assert_eq!(derive_filename(&r, 6, &c), format!("invoice_{}.pdf", millis));
        assert_eq!(
            derive_filename(&r, 99, &c),
            format!("invoice_template_99_{}.pdf", millis)
        );
        // Catalog id without its own convention falls through too.
        assert_eq!(
            derive_filename(&r, 13, &c),
            format!("invoice_template_13_{}.pdf", millis)
        );
    }

    #[test]
    fn derivation_is_deterministic_for_a_fixed_clock() {
        let r = InvoiceRecord::sample();
        let c = clock();
        assert_eq!(derive_filename(&r, 5, &c), derive_filename(&r, 5, &c));
    }
}
