use super::*;
use crate::assistant::types::{ReportFormat, ReportRequest, ReportType};
use crate::mail::test_server::TestServer;
use axum::http::StatusCode;

fn config() -> EmailJsConfig {
    EmailJsConfig {
        service_id: "svc_1".into(),
        template_id: "tpl_1".into(),
        public_key: "pk_1".into(),
        api_url: "https://emailjs.example.test/send".into(),
    }
}

fn email() -> EmailRequest {
    EmailRequest {
        to: "a@b.com".into(),
        subject: "Sales Report".into(),
        body: "Please find attached the sales report.".into(),
        attachments: vec![ReportRequest::new(ReportType::Sales, ReportFormat::Csv)],
    }
}

#[test]
fn report_text_single_report() {
    let reports = [GeneratedReport::render(&ReportRequest::new(ReportType::Sales, ReportFormat::Csv))];
    assert_eq!(report_text(&reports), "\n\nSales Report (CSV):\nrevenue,45000\norders,1200\nperiod,Last 30 days");
}

#[test]
fn report_text_separates_reports() {
    let reports = [
        GeneratedReport::render(&ReportRequest::new(ReportType::Revenue, ReportFormat::Csv)),
        GeneratedReport::render(&ReportRequest::new(ReportType::Orders, ReportFormat::Csv)),
    ];
    let text = report_text(&reports);
    assert_eq!(
        text,
        "\n\nRevenue Report (CSV):\ntotal,328000\ngrowth,12.5\n\n---\n\n\nOrders Report (CSV):\ntotal,8800\naverage,149.99"
    );
}

#[test]
fn payload_shape() {
    let cfg = config();
    let req = email();
    let reports: Vec<GeneratedReport> = req.attachments.iter().map(GeneratedReport::render).collect();
    let payload = serde_json::to_value(build_payload(&cfg, &req, &reports)).unwrap();

    assert_eq!(payload["service_id"], "svc_1");
    assert_eq!(payload["template_id"], "tpl_1");
    assert_eq!(payload["user_id"], "pk_1");
    let params = &payload["template_params"];
    assert_eq!(params["to_email"], "a@b.com");
    assert_eq!(params["subject"], "Sales Report");
    assert_eq!(params["from_name"], "E-Commerce Dashboard");
    assert_eq!(params["reply_to"], "dashboard@company.com");
    let message = params["message"].as_str().unwrap();
    assert!(message.starts_with("Please find attached the sales report.\n\nSales Report (CSV):\n"));
}

fn transport_for(server: &TestServer) -> EmailJsTransport {
    let cfg = EmailJsConfig { api_url: server.url.clone(), ..config() };
    EmailJsTransport::new(cfg, MailTimeouts { request_secs: 5, connect_secs: 5 }).unwrap()
}

#[tokio::test]
async fn success_posts_json_payload() {
    let server = TestServer::start(StatusCode::OK, "OK").await;
    let transport = transport_for(&server);
    let req = email();
    let reports: Vec<GeneratedReport> = req.attachments.iter().map(GeneratedReport::render).collect();

    assert_eq!(transport.name(), "emailjs");
    assert_eq!(transport.deliver(&req, &reports).await.unwrap(), Delivery::Sent);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].content_type.starts_with("application/json"));
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["user_id"], "pk_1");
    assert_eq!(body["service_id"], "svc_1");
    assert_eq!(body["template_params"]["to_email"], "a@b.com");
    assert_eq!(
        body["template_params"]["message"],
        "Please find attached the sales report.\n\nSales Report (CSV):\nrevenue,45000\norders,1200\nperiod,Last 30 days"
    );
}

#[tokio::test]
async fn rejection_becomes_emailjs_error_with_status_and_body() {
    let server = TestServer::start(StatusCode::BAD_REQUEST, "The user_id parameter is required\n").await;
    let transport = transport_for(&server);
    let req = email();
    let reports: Vec<GeneratedReport> = req.attachments.iter().map(GeneratedReport::render).collect();

    let err = transport.deliver(&req, &reports).await.unwrap_err();

    assert!(matches!(err, MailError::EmailJs(_)));
    assert!(crate::error::ErrorCode::retryable(&err));
    assert_eq!(err.to_string(), "EmailJS error: status 400: The user_id parameter is required");
}

#[tokio::test]
async fn server_error_is_emailjs_error() {
    let server = TestServer::start(StatusCode::BAD_GATEWAY, "").await;
    let req = email();
    let reports: Vec<GeneratedReport> = req.attachments.iter().map(GeneratedReport::render).collect();

    let err = transport_for(&server).deliver(&req, &reports).await.unwrap_err();

    assert_eq!(err.to_string(), "EmailJS error: status 502: ");
}
