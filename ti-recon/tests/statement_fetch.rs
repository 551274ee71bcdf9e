//! Statement fetches against a mock bank endpoint
//!
//! - CSV and XML bodies are both accepted
//! - 5xx and connection refused fall back to the synthetic feed
//! - fetched statements reconcile against invoices

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use ti_recon::{
    generate_mock_fti, reconcile, Confidence, Error, Invoice, Outcome, StatementKind, TiClient, TiConfig,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CSV_BODY: &str = "\
Statement Number,Date,Time,Balance,Transaction Type,Channel,Amount,Reference,Description,Transaction Key,Process Key
0101,2024-01-10,08:00:00,10500.00,07,EFT,500.00,INV-42,MEMBER PAYMENT,TK1,PK1
0101,2024-01-10,08:10:00,10999.00,03,INTERNET,499.00,ONLINE,ONLINE PAYMENT,TK2,PK2
0101,2024-01-10,09:00:00,10984.00,11,SYSTEM,-15.00,,BANK CHARGES,TK3,PK3
";

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

fn live_config(server: &MockServer) -> TiConfig {
    TiConfig {
        fti_endpoint: format!("{}/fti", server.uri()),
        pti_endpoint: format!("{}/pti", server.uri()),
        api_key: Some("secret".to_string()),
        timeout_seconds: 5,
        mock_mode: false,
        mock_transactions: 10,
    }
}

#[tokio::test]
async fn csv_statement_is_live() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fti"))
        .and(query_param("date", "2024-01-10"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CSV_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let client = TiClient::new(live_config(&server)).unwrap();
    let outcome = client.fetch_statement(StatementKind::Fti, day()).await.unwrap();
    let transactions = match outcome {
        Outcome::Live(transactions) => transactions,
        other => panic!("expected live outcome, got {other:?}"),
    };
    assert_eq!(transactions.len(), 3);

    let invoices = vec![
        Invoice {
            id: "INV-42".to_string(),
            member_id: "MEM-2".to_string(),
            amount: dec!(500.00),
            due_date: day(),
        },
        Invoice {
            id: "INV-43".to_string(),
            member_id: "MEM-3".to_string(),
            amount: dec!(499.00),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
        },
    ];
    let report = reconcile(&transactions, &invoices);
    assert_eq!(report.summary.total_transactions, 2);
    assert_eq!(report.matched[0].matched.confidence, Confidence::High);
    assert_eq!(report.matched[0].matched.invoice_id, "INV-42");
    // 499.00 is within 1% of both; the first invoice inside the date window wins
    assert_eq!(report.matched[1].matched.confidence, Confidence::Medium);
}

#[tokio::test]
async fn xml_statement_is_live() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pti"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<Statement><Transaction><Date>2024-01-10</Date><Amount>120.00</Amount><Channel>POS</Channel></Transaction></Statement>",
        ))
        .mount(&server)
        .await;

    let client = TiClient::new(live_config(&server)).unwrap();
    let outcome = client.fetch_statement(StatementKind::Pti, day()).await.unwrap();
    assert!(matches!(&outcome, Outcome::Live(t) if t.len() == 1));
}

#[tokio::test]
async fn server_error_degrades_to_mock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = TiClient::new(live_config(&server)).unwrap();
    match client.fetch_statement(StatementKind::Fti, day()).await.unwrap() {
        Outcome::Degraded { value, cause } => {
            assert_eq!(value, generate_mock_fti(10, day()));
            assert!(cause.contains("502"));
        }
        other => panic!("expected degraded outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_degrades_to_mock() {
    let config = TiConfig {
        fti_endpoint: "http://127.0.0.1:1/fti".to_string(),
        mock_mode: false,
        ..Default::default()
    };
    let client = TiClient::new(config).unwrap();
    let outcome = client.fetch_statement(StatementKind::Fti, day()).await.unwrap();
    assert!(matches!(outcome, Outcome::Degraded { .. }));
}

#[tokio::test]
async fn wrong_xml_root_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Error>maintenance</Error>"))
        .mount(&server)
        .await;

    let client = TiClient::new(live_config(&server)).unwrap();
    assert!(matches!(
        client.fetch_statement(StatementKind::Fti, day()).await,
        Err(Error::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn mock_mode_is_simulated() {
    let client = TiClient::new(TiConfig::default()).unwrap();
    let outcome = client.fetch_statement(StatementKind::Pti, day()).await.unwrap();
    match outcome {
        Outcome::Simulated(transactions) => assert_eq!(transactions.len(), 25),
        other => panic!("expected simulated outcome, got {other:?}"),
    }
}
