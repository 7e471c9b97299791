use super::*;

fn req(kind: ReportType, format: ReportFormat) -> ReportRequest {
    ReportRequest::new(kind, format)
}

#[test]
fn sales_json_has_expected_keys_in_order() {
    let out = render_report(&req(ReportType::Sales, ReportFormat::Json));
    let parsed: Map<String, Value> = serde_json::from_str(&out).unwrap();
    let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
    assert_eq!(keys, ["revenue", "orders", "period"]);
    assert_eq!(parsed["revenue"], 45_000);
    assert_eq!(parsed["orders"], 1_200);
    assert_eq!(parsed["period"], "Last 30 days");
}

#[test]
fn json_is_pretty_printed_with_two_spaces() {
    let out = render_report(&req(ReportType::Revenue, ReportFormat::Json));
    assert_eq!(out, "{\n  \"total\": 328000,\n  \"growth\": 12.5\n}");
}

#[test]
fn sales_csv_is_three_lines() {
    let out = render_report(&req(ReportType::Sales, ReportFormat::Csv));
    assert_eq!(out, "revenue,45000\norders,1200\nperiod,Last 30 days");
}

#[test]
fn performance_csv_keeps_decimals() {
    let out = render_report(&req(ReportType::Performance, ReportFormat::Csv));
    assert_eq!(out, "lcp,1.9\nfid,41\ncls,0.07");
}

#[test]
fn pdf_wraps_json_in_placeholder() {
    let out = render_report(&req(ReportType::Custom, ReportFormat::Pdf));
    assert_eq!(out, "PDF Report: {\n  \"data\": \"Custom report data\"\n}");
}

#[test]
fn every_type_has_data() {
    for kind in ReportType::ALL {
        assert!(!report_data(kind).is_empty(), "{kind:?} has no data");
    }
}

#[test]
fn generated_report_metadata() {
    let report = GeneratedReport::render(&req(ReportType::Orders, ReportFormat::Csv));
    assert_eq!(report.filename, "orders_report.csv");
    assert_eq!(report.content_type, "text/csv");
    assert_eq!(report.content, "total,8800\naverage,149.99");
}

#[tokio::test]
async fn generate_report_with_zero_delay() {
    let report = generate_report(&req(ReportType::Customers, ReportFormat::Json), Duration::ZERO).await;
    assert!(report.content.contains("\"clv\": 18500"));
}

#[tokio::test(start_paused = true)]
async fn generate_report_waits_for_delay() {
    let started = tokio::time::Instant::now();
    let _ = generate_report(&req(ReportType::Sales, ReportFormat::Pdf), Duration::from_millis(500)).await;
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[test]
fn catalog_lists_dashboard_reports() {
    let kinds: Vec<ReportType> = catalog().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [ReportType::Sales, ReportType::Revenue, ReportType::Performance, ReportType::Customers]);
}
