//! Import operation integration tests.

mod common;

use chartmogul_client::{
    ClientError, ListParams, NewCustomer, NewDataSource, NewInvoice, NewLineItem, NewPlan,
    NewTransaction, TransactionKind, TransactionResult,
};
use chrono::{TimeZone, Utc};
use common::{blocking, customer_json, TestHarness, ACCOUNT_TOKEN, SECRET_KEY};
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Data sources
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_data_source_round_trip() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/import/data_sources"))
        .and(basic_auth(ACCOUNT_TOKEN, SECRET_KEY))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "In-house billing"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "uuid": "ds_1",
            "name": "In-house billing",
            "created_at": "2016-01-10T15:34:05Z",
            "status": "never_imported"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let ds = blocking(move || client.create_data_source(&NewDataSource::new("In-house billing")))
        .await
        .unwrap();

    assert_eq!(ds.uuid, "ds_1");
    assert_eq!(ds.name, "In-house billing");
    assert_eq!(ds.created_at.as_deref(), Some("2016-01-10T15:34:05Z"));
    assert_eq!(ds.status.as_deref(), Some("never_imported"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_data_sources_single_request() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/import/data_sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data_sources": [
                {"uuid": "ds_1", "name": "Stripe"},
                {"uuid": "ds_2", "name": "Recurly"}
            ]
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let sources = blocking(move || client.list_data_sources()).await.unwrap();
    let names: Vec<_> = sources.iter().map(|ds| ds.name.as_str()).collect();
    assert_eq!(names, vec!["Stripe", "Recurly"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn purge_is_true_only_for_accepted() {
    for (status, expected) in [(202, true), (200, false), (204, false)] {
        let harness = TestHarness::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/import/data_sources/ds_1/erase_data"))
            .and(body_json(json!({"confirm": 1})))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&harness.server)
            .await;

        let client = harness.client();
        let purged = blocking(move || client.purge_data_source("ds_1"))
            .await
            .unwrap();
        assert_eq!(purged, expected, "status {status}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn purge_ignores_a_plain_text_accepted_body() {
    let harness = TestHarness::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/import/data_sources/ds_1/erase_data"))
        .respond_with(ResponseTemplate::new(202).set_body_string("Accepted"))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let purged = blocking(move || client.purge_data_source("ds_1"))
        .await
        .unwrap();
    assert!(purged);
}

#[tokio::test(flavor = "multi_thread")]
async fn purge_raises_for_failures() {
    let harness = TestHarness::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/import/data_sources/ds_1/erase_data"))
        .respond_with(ResponseTemplate::new(404).set_body_string("data source not found"))
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let err = blocking(move || client.purge_data_source("ds_1"))
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "data source not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// Customers and plans
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn import_customer_returns_server_echo() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/import/customers"))
        .and(basic_auth(ACCOUNT_TOKEN, SECRET_KEY))
        .and(body_json(json!({
            "data_source_uuid": "ds_1",
            "external_id": "X7",
            "name": "Customer 7",
            "email": "customer7@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(customer_json(7)))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let customer = blocking(move || {
        client.import_customer(
            &NewCustomer::new("ds_1", "X7", "Customer 7").with_email("customer7@example.com"),
        )
    })
    .await
    .unwrap();

    assert_eq!(customer.uuid, "cus_7");
    assert_eq!(customer.external_id, "X7");
    assert_eq!(customer.email.as_deref(), Some("customer7@example.com"));
    assert_eq!(customer.data_source_uuid, "ds_1");
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_mandatory_fields_never_reach_the_network() {
    let harness = TestHarness::start().await;
    for verb in ["GET", "POST", "PATCH", "DELETE"] {
        Mock::given(method(verb))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&harness.server)
            .await;
    }

    let client = harness.client();
    let errors = blocking(move || {
        let cancelled_at = Utc.with_ymd_and_hms(2016, 1, 15, 0, 0, 0).unwrap();
        vec![
            client.import_customer(&NewCustomer::new("ds_1", "", "Adam")).err(),
            client.import_customer(&NewCustomer::new(" ", "X1", "Adam")).err(),
            client.import_plan(&NewPlan::new("ds_1", "Gold", 0, "month")).err(),
            client.import_plan(&NewPlan::new("ds_1", "Gold", 1, "week")).err(),
            client.import_plan(&NewPlan::new("ds_1", "", 1, "day")).err(),
            client.import_plan(&NewPlan::new(" ", "Gold", 1, "day")).err(),
            client.create_data_source(&NewDataSource::new("\t")).err(),
            client.purge_data_source(" ").err(),
            client.cancel_subscription("", cancelled_at).err(),
            client.list_subscriptions_each(" ", &ListParams::default()).err(),
        ]
    })
    .await;

    for err in errors {
        assert!(matches!(err, Some(ClientError::Argument(_))), "{err:?}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn import_plan_sends_canonical_unit() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/import/plans"))
        .and(body_json(json!({
            "data_source_uuid": "ds_1",
            "name": "Gold",
            "interval_count": 12,
            "interval_unit": "month"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "uuid": "pl_1",
            "data_source_uuid": "ds_1",
            "name": "Gold",
            "interval_count": 12,
            "interval_unit": "month"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let plan = blocking(move || client.import_plan(&NewPlan::new("ds_1", "Gold", 12, "MONTH")))
        .await
        .unwrap();
    assert_eq!(plan.uuid, "pl_1");
    assert_eq!(plan.interval_count, 12);
}

// ============================================================================
// Invoices
// ============================================================================

fn invoice(external_id: &str) -> NewInvoice {
    let start = Utc.with_ymd_and_hms(2015, 11, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2015, 12, 1, 0, 0, 0).unwrap();
    NewInvoice::new(external_id, start, "USD")
        .with_line_item(NewLineItem::subscription("sub_0001", "pl_1", start, end, 5000))
        .with_transaction(NewTransaction::new(
            TransactionKind::Payment,
            Utc.with_ymd_and_hms(2015, 11, 5, 0, 14, 23).unwrap(),
            TransactionResult::Successful,
        ))
}

#[tokio::test(flavor = "multi_thread")]
async fn import_invoices_normalizes_dates() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/import/customers/cus_1/invoices"))
        .and(body_json(json!({
            "invoices": [{
                "external_id": "INV0001",
                "date": "2015-11-01T00:00:00Z",
                "currency": "USD",
                "line_items": [{
                    "type": "subscription",
                    "amount_in_cents": 5000,
                    "subscription_external_id": "sub_0001",
                    "plan_uuid": "pl_1",
                    "service_period_start": "2015-11-01T00:00:00Z",
                    "service_period_end": "2015-12-01T00:00:00Z"
                }],
                "transactions": [{
                    "type": "payment",
                    "date": "2015-11-05T00:14:23Z",
                    "result": "successful"
                }]
            }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "invoices": [{
                "uuid": "inv_1",
                "external_id": "INV0001",
                "date": "2015-11-01T00:00:00.000Z",
                "currency": "USD",
                "line_items": [{"uuid": "li_1", "type": "subscription", "amount_in_cents": 5000}],
                "transactions": [{"uuid": "tr_1", "type": "payment", "date": "2015-11-05T00:14:23.000Z", "result": "successful"}]
            }]
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let invoices = blocking(move || client.import_invoices("cus_1", &[invoice("INV0001")]))
        .await
        .unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].uuid.as_deref(), Some("inv_1"));
    assert_eq!(invoices[0].line_items[0].uuid.as_deref(), Some("li_1"));
    assert_eq!(invoices[0].transactions[0].result, "successful");
}

#[tokio::test(flavor = "multi_thread")]
async fn import_invoice_unwraps_positional_errors() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/import/customers/cus_1/invoices"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": {"invoices": [{"external_id": ["can't be blank"]}]}
        })))
        .expect(2)
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let (single, batch) = blocking(move || {
        (
            client.import_invoice("cus_1", &invoice("INV0001")).unwrap_err(),
            client.import_invoices("cus_1", &[invoice("INV0001")]).unwrap_err(),
        )
    })
    .await;

    let single = single.validation_errors().unwrap().clone();
    assert_eq!(
        serde_json::Value::Object(single),
        json!({"external_id": ["can't be blank"]})
    );
    let batch = batch.validation_errors().unwrap().clone();
    assert_eq!(
        serde_json::Value::Object(batch),
        json!({"invoices": [{"external_id": ["can't be blank"]}]})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_invoices_are_rejected_locally() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let errors = blocking(move || {
        let date = Utc.with_ymd_and_hms(2015, 11, 1, 0, 0, 0).unwrap();
        let mut no_currency = invoice("INV0002");
        no_currency.currency = String::new();
        vec![
            client.import_invoice("cus_1", &NewInvoice::new("INV0001", date, "USD")).err(),
            client.import_invoice("cus_1", &no_currency).err(),
            client.import_invoice("cus_1", &invoice("")).err(),
            client.import_invoice(" ", &invoice("INV0003")).err(),
            client.import_invoices("cus_1", &[]).err(),
        ]
    })
    .await;

    for err in errors {
        assert!(matches!(err, Some(ClientError::Argument(_))), "{err:?}");
    }
}

// ============================================================================
// Subscriptions and ping
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn cancel_subscription_patches_cancelled_at() {
    let harness = TestHarness::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/import/subscriptions/sub_1"))
        .and(body_json(json!({"cancelled_at": "2016-01-15T00:00:00Z"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "uuid": "sub_1",
            "external_id": "S1",
            "plan_uuid": "pl_1",
            "customer_uuid": "cus_1",
            "cancellation_dates": ["2016-01-15T00:00:00.000Z"]
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.client();
    let cancelled_at = Utc.with_ymd_and_hms(2016, 1, 15, 0, 0, 0).unwrap();
    let sub = blocking(move || client.cancel_subscription("sub_1", cancelled_at))
        .await
        .unwrap();
    assert_eq!(sub.cancellation_dates, vec!["2016-01-15T00:00:00.000Z"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn ping_checks_for_pong() {
    for (data, expected) in [("pong!", true), ("pong", false)] {
        let harness = TestHarness::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ping"))
            .and(basic_auth(ACCOUNT_TOKEN, SECRET_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": data})))
            .expect(1)
            .mount(&harness.server)
            .await;

        let client = harness.client();
        assert_eq!(blocking(move || client.ping()).await.unwrap(), expected);
    }
}
