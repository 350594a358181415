use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use invoicepress::catalog::{self, PAGE_CONTAINER_ID};
use invoicepress::model::InvoiceRecord;
use invoicepress::{ExportConfig, ExportPipeline};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

/// Deterministic record so the capture digest is stable across runs.
fn fixed_record() -> InvoiceRecord {
    let mut record = InvoiceRecord::sample();
    record.invoice.date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    record.invoice.payment_date = chrono::NaiveDate::from_ymd_opt(2024, 4, 14).unwrap();
    record
}

async fn capture_digest(template_id: i32) -> String {
    let record = fixed_record();
    let page = catalog::render_page(&record, template_id);
    let artifact = ExportPipeline::new(ExportConfig::immediate())
        .export_pdf(&page, PAGE_CONTAINER_ID, &record, template_id)
        .await
        .expect("export");
    hex::encode(Sha256::digest(&artifact.screenshot.png_data))
}

#[tokio::test]
async fn golden_capture_matches_fixture() {
    let digest = capture_digest(1).await;

    let expected_path = golden_path("template1.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &digest).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !expected_path.exists() {
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let expected = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(digest, expected.trim());
}

#[tokio::test]
async fn capture_is_deterministic() {
    assert_eq!(capture_digest(4).await, capture_digest(4).await);
}

#[tokio::test]
async fn distinct_templates_produce_distinct_captures() {
    assert_ne!(capture_digest(1).await, capture_digest(6).await);
}
