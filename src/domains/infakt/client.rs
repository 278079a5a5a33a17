//! HTTP client for the inFakt REST API.
//!
//! One method per resource operation. Every request carries the API key
//! header and a JSON content type; create and update payloads are nested under
//! the singular resource name (`{"invoice": {...}}`). Calls are made once:
//! there is no retry, backoff or caching.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::core::config::ApiConfig;

use super::diagnostics::{DiagnosticEvent, DiagnosticsSink, NopSink};
use super::error::{InfaktError, InfaktResult};
use super::models::{
    BankAccountChanges, BankAccountListQuery, ClientChanges, DeliveryRequest, InvoiceChanges,
    InvoiceListQuery, ListEnvelope, ListQuery, NewBankAccount, NewClient, NewInvoice,
    NewPayment, NewProduct, Pagination, PaymentChanges, PaymentListQuery, ProductChanges, Record,
};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.infakt.pl/v3";

/// Authentication header expected by the API.
pub const API_KEY_HEADER: &str = "x-infakt-apikey";

/// inFakt API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct InfaktClient {
    http: Client,
    base_url: String,
    default_page_size: u32,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl InfaktClient {
    /// Create a client from API configuration, with diagnostics disabled.
    pub fn new(config: &ApiConfig) -> InfaktResult<Self> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| InfaktError::Config("API key contains invalid characters".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_page_size: config.default_page_size,
            diagnostics: Arc::new(NopSink),
        })
    }

    /// Replace the diagnostics sink.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Base URL all paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Invoices
    // ========================================================================

    pub async fn list_invoices(&self, query: InvoiceListQuery) -> InfaktResult<Vec<Record>> {
        self.list("/invoices.json", query).await
    }

    pub async fn get_invoice(&self, id: u64) -> InfaktResult<Record> {
        self.get(&format!("/invoices/{}.json", id)).await
    }

    /// Create an invoice. Line items are normalized before anything is sent.
    pub async fn create_invoice(&self, invoice: NewInvoice) -> InfaktResult<Record> {
        let invoice = invoice.normalize()?;
        debug!(services = invoice.services.len(), "Creating invoice");
        self.trace(
            "create_invoice",
            json!({ "services": serde_json::to_value(&invoice.services).unwrap_or_default() }),
        );

        let record: Record = self
            .post("/invoices.json", &wrapped("invoice", &invoice))
            .await?;

        info!(
            "Invoice created: id={} net_price={}",
            record.get("id").unwrap_or(&serde_json::Value::Null),
            record.get("net_price").unwrap_or(&serde_json::Value::Null)
        );
        Ok(record)
    }

    /// Update an invoice. Line items are normalized only when present;
    /// omitted fields are left to the backend.
    pub async fn update_invoice(&self, id: u64, changes: InvoiceChanges) -> InfaktResult<Record> {
        let changes = changes.normalize()?;
        if let Some(services) = &changes.services {
            self.trace(
                "update_invoice",
                json!({
                    "id": id,
                    "services": serde_json::to_value(services).unwrap_or_default(),
                }),
            );
        }

        self.put(&format!("/invoices/{}.json", id), &wrapped("invoice", &changes))
            .await
    }

    pub async fn delete_invoice(&self, id: u64) -> InfaktResult<()> {
        self.delete(&format!("/invoices/{}.json", id)).await
    }

    /// Email an invoice. Without `email` the client's recorded address is used.
    pub async fn send_invoice(&self, id: u64, email: Option<String>) -> InfaktResult<()> {
        let path = format!("/invoices/{}/deliver_via_email.json", id);
        let request = self.http.post(self.url(&path)).json(&DeliveryRequest { email });
        self.execute(request, "POST", &path).await?;
        Ok(())
    }

    // ========================================================================
    // Clients
    // ========================================================================

    pub async fn list_clients(&self, query: Pagination) -> InfaktResult<Vec<Record>> {
        self.list("/clients.json", query).await
    }

    pub async fn get_client(&self, id: u64) -> InfaktResult<Record> {
        self.get(&format!("/clients/{}.json", id)).await
    }

    pub async fn create_client(&self, client: NewClient) -> InfaktResult<Record> {
        self.post("/clients.json", &wrapped("client", &client)).await
    }

    pub async fn update_client(&self, id: u64, changes: ClientChanges) -> InfaktResult<Record> {
        self.put(&format!("/clients/{}.json", id), &wrapped("client", &changes))
            .await
    }

    pub async fn delete_client(&self, id: u64) -> InfaktResult<()> {
        self.delete(&format!("/clients/{}.json", id)).await
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub async fn list_products(&self, query: Pagination) -> InfaktResult<Vec<Record>> {
        self.list("/products.json", query).await
    }

    pub async fn get_product(&self, id: u64) -> InfaktResult<Record> {
        self.get(&format!("/products/{}.json", id)).await
    }

    pub async fn create_product(&self, product: NewProduct) -> InfaktResult<Record> {
        let product = product.normalize()?;
        self.post("/products.json", &wrapped("product", &product)).await
    }

    pub async fn update_product(&self, id: u64, changes: ProductChanges) -> InfaktResult<Record> {
        let changes = changes.normalize()?;
        self.put(&format!("/products/{}.json", id), &wrapped("product", &changes))
            .await
    }

    pub async fn delete_product(&self, id: u64) -> InfaktResult<()> {
        self.delete(&format!("/products/{}.json", id)).await
    }

    // ========================================================================
    // Bank accounts
    // ========================================================================

    pub async fn list_bank_accounts(&self, query: BankAccountListQuery) -> InfaktResult<Vec<Record>> {
        self.list("/bank_accounts.json", query).await
    }

    pub async fn get_bank_account(&self, id: u64) -> InfaktResult<Record> {
        self.get(&format!("/bank_accounts/{}.json", id)).await
    }

    pub async fn create_bank_account(&self, account: NewBankAccount) -> InfaktResult<Record> {
        self.post("/bank_accounts.json", &wrapped("bank_account", &account))
            .await
    }

    pub async fn update_bank_account(
        &self,
        id: u64,
        changes: BankAccountChanges,
    ) -> InfaktResult<Record> {
        self.put(
            &format!("/bank_accounts/{}.json", id),
            &wrapped("bank_account", &changes),
        )
        .await
    }

    pub async fn delete_bank_account(&self, id: u64) -> InfaktResult<()> {
        self.delete(&format!("/bank_accounts/{}.json", id)).await
    }

    // ========================================================================
    // Payments
    // ========================================================================

    pub async fn list_payments(&self, query: PaymentListQuery) -> InfaktResult<Vec<Record>> {
        self.list("/payments.json", query).await
    }

    pub async fn get_payment(&self, id: u64) -> InfaktResult<Record> {
        self.get(&format!("/payments/{}.json", id)).await
    }

    pub async fn create_payment(&self, payment: NewPayment) -> InfaktResult<Record> {
        let payment = payment.normalize()?;
        self.post("/payments.json", &wrapped("payment", &payment)).await
    }

    pub async fn update_payment(&self, id: u64, changes: PaymentChanges) -> InfaktResult<Record> {
        let changes = changes.normalize()?;
        self.put(&format!("/payments/{}.json", id), &wrapped("payment", &changes))
            .await
    }

    pub async fn delete_payment(&self, id: u64) -> InfaktResult<()> {
        self.delete(&format!("/payments/{}.json", id)).await
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn trace(&self, operation: &str, detail: serde_json::Value) {
        self.diagnostics.record(DiagnosticEvent::new(operation, detail));
    }

    /// Send a request and map non-2xx responses to [`InfaktError::Backend`].
    async fn execute(
        &self,
        request: RequestBuilder,
        method: &str,
        path: &str,
    ) -> InfaktResult<Response> {
        debug!("{} {}", method, path);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} failed: {}", method, path, e);
                self.trace(
                    &format!("{} {}", method, path),
                    json!({ "error": e.to_string() }),
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = InfaktError::from_response(status.as_u16(), &body);
        warn!("{} {} returned {}: {}", method, path, status, error);
        self.trace(
            &format!("{} {}", method, path),
            json!({ "status": status.as_u16(), "error": error.to_string() }),
        );
        Err(error)
    }

    async fn list<Q: ListQuery>(&self, path: &str, mut query: Q) -> InfaktResult<Vec<Record>> {
        query.apply_default_limit(self.default_page_size);
        let request = self.http.get(self.url(path)).query(&query);
        let envelope: ListEnvelope = decode(self.execute(request, "GET", path).await?).await?;
        Ok(envelope.into_records())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> InfaktResult<T> {
        let request = self.http.get(self.url(path));
        decode(self.execute(request, "GET", path).await?).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> InfaktResult<T> {
        let request = self.http.post(self.url(path)).json(body);
        decode(self.execute(request, "POST", path).await?).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> InfaktResult<T> {
        let request = self.http.put(self.url(path)).json(body);
        decode(self.execute(request, "PUT", path).await?).await
    }

    async fn delete(&self, path: &str) -> InfaktResult<()> {
        let request = self.http.delete(self.url(path));
        self.execute(request, "DELETE", path).await?;
        Ok(())
    }
}

/// Read a successful response as JSON. An empty body (e.g. 204) reads as `null`.
async fn decode<T: DeserializeOwned>(response: Response) -> InfaktResult<T> {
    let body = response.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Nest a payload under its resource name.
fn wrapped<'a, B: Serialize>(resource: &'a str, body: &'a B) -> BTreeMap<&'a str, &'a B> {
    BTreeMap::from([(resource, body)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::infakt::models::{Amount, LineItem, TaxSymbol};
    use serde_json::{Map, Value, json};
    use std::sync::Mutex;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Default)]
    struct RecordingSink {
        events: Mutex<Vec<DiagnosticEvent>>,
    }

    impl DiagnosticsSink for RecordingSink {
        fn record(&self, event: DiagnosticEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn create_config(base_url: &str) -> ApiConfig {
        ApiConfig {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            default_page_size: 25,
        }
    }

    fn create_client(server: &MockServer) -> InfaktClient {
        InfaktClient::new(&create_config(&server.uri())).unwrap()
    }

    fn consulting_item() -> LineItem {
        LineItem {
            name: "Consulting".to_string(),
            tax_symbol: TaxSymbol::Rate(23u32.into()),
            quantity: Some(1),
            unit_net_price: Amount::from("500.00"),
            unit: None,
            extra: Map::new(),
        }
    }

    fn new_invoice(services: Vec<LineItem>) -> NewInvoice {
        NewInvoice {
            invoice_date: "2025-01-10".to_string(),
            sale_date: "2025-01-10".to_string(),
            payment_date: "2025-01-24".to_string(),
            payment_method: "transfer".to_string(),
            client_id: 42,
            services,
            notes: None,
            currency: None,
            kind: None,
        }
    }

    async fn received_body(server: &MockServer) -> Value {
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        serde_json::from_slice(&requests[0].body).unwrap()
    }

    #[tokio::test]
    async fn test_requests_carry_api_key_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/invoices/7.json"))
            .and(header("X-inFakt-ApiKey", "test-key"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .expect(1)
            .mount(&server)
            .await;

        let invoice = create_client(&server).get_invoice(7).await.unwrap();
        assert_eq!(invoice["id"], 7);
    }

    #[tokio::test]
    async fn test_list_applies_default_page_size() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/invoices.json"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let invoices = create_client(&server)
            .list_invoices(InvoiceListQuery::default())
            .await
            .unwrap();
        assert!(invoices.is_empty());
    }

    #[tokio::test]
    async fn test_list_forwards_filters_and_unwraps_entities() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/payments.json"))
            .and(query_param("limit", "5"))
            .and(query_param("invoice_id", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "metainfo": { "count": 1, "total_count": 1 },
                "entities": [{ "id": 3, "invoice_id": 12 }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let payments = create_client(&server)
            .list_payments(PaymentListQuery {
                limit: Some(5),
                offset: None,
                invoice_id: Some(12),
            })
            .await
            .unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0]["invoice_id"], 12);
    }

    #[tokio::test]
    async fn test_bank_accounts_list_uses_default_page_size() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bank_accounts.json"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
            .expect(1)
            .mount(&server)
            .await;

        let accounts = create_client(&server)
            .list_bank_accounts(BankAccountListQuery::default())
            .await
            .unwrap();
        assert_eq!(accounts.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_record_surfaces_backend_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/clients/999.json"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Not found" })))
            .mount(&server)
            .await;

        let err = create_client(&server).get_client(999).await.unwrap_err();
        match err {
            InfaktError::Backend { status, ref message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("Expected Backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_invoice_sends_normalized_services() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/invoices.json"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1001,
                "net_price": "500.00",
                "tax_price": "115.00",
                "gross_price": "615.00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = create_client(&server)
            .create_invoice(new_invoice(vec![consulting_item()]))
            .await
            .unwrap();
        assert_eq!(created["id"], 1001);

        let body = received_body(&server).await;
        let service = &body["invoice"]["services"][0];
        assert_eq!(service["name"], "Consulting");
        assert_eq!(service["unit_net_price"], "500.00");
        assert_eq!(service["net_price"], created["net_price"]);
        assert_eq!(service["tax_price"], created["tax_price"]);
        assert_eq!(service["gross_price"], created["gross_price"]);
        assert_eq!(body["invoice"]["client_id"], 42);
        assert!(body["invoice"].get("notes").is_none());
    }

    #[tokio::test]
    async fn test_create_invoice_with_invalid_price_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let mut item = consulting_item();
        item.unit_net_price = Amount::from("five hundred");

        let err = create_client(&server)
            .create_invoice(new_invoice(vec![item]))
            .await
            .unwrap_err();
        assert!(matches!(err, InfaktError::InvalidAmount { .. }));
    }

    #[tokio::test]
    async fn test_partial_update_omits_services() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/invoices/5.json"))
            .and(body_json(json!({ "invoice": { "notes": "Paid in cash" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
            .expect(1)
            .mount(&server)
            .await;

        let changes = InvoiceChanges {
            notes: Some("Paid in cash".to_string()),
            ..Default::default()
        };
        create_client(&server).update_invoice(5, changes).await.unwrap();

        let body = received_body(&server).await;
        assert!(body["invoice"].get("services").is_none());
    }

    #[tokio::test]
    async fn test_update_with_services_normalizes_them() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/invoices/5.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
            .mount(&server)
            .await;

        let mut item = consulting_item();
        item.unit_net_price = Amount::Number(150.0);
        item.quantity = Some(8);

        let changes = InvoiceChanges {
            services: Some(vec![item]),
            ..Default::default()
        };
        create_client(&server).update_invoice(5, changes).await.unwrap();

        let body = received_body(&server).await;
        let service = &body["invoice"]["services"][0];
        assert_eq!(service["net_price"], "1200.00");
        assert_eq!(service["tax_price"], "276.00");
        assert_eq!(service["gross_price"], "1476.00");
    }

    #[tokio::test]
    async fn test_create_client_wraps_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/clients.json"))
            .and(body_json(json!({
                "client": {
                    "company_name": "ACME Sp. z o.o.",
                    "street": "Prosta",
                    "city": "Warszawa",
                    "country": "PL",
                    "postal_code": "00-001"
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = NewClient {
            company_name: "ACME Sp. z o.o.".to_string(),
            first_name: None,
            last_name: None,
            street: "Prosta".to_string(),
            street_number: None,
            flat_number: None,
            city: "Warszawa".to_string(),
            country: "PL".to_string(),
            postal_code: "00-001".to_string(),
            nip: None,
            email: None,
            phone: None,
            bank_account: None,
            note: None,
        };
        let created = create_client(&server).create_client(client).await.unwrap();
        assert_eq!(created["id"], 9);
    }

    #[tokio::test]
    async fn test_delete_succeeds_on_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/products/3.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        create_client(&server).delete_product(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_succeeds_on_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/clients/4.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let changes = ClientChanges {
            email: Some("biuro@acme.pl".to_string()),
            ..Default::default()
        };
        let updated = create_client(&server).update_client(4, changes).await.unwrap();
        assert_eq!(updated, Value::Null);
    }

    #[tokio::test]
    async fn test_unreadable_success_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/clients/4.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let err = create_client(&server).get_client(4).await.unwrap_err();
        assert!(matches!(err, InfaktError::Decode(_)));
        assert!(err.to_string().starts_with("inFakt API returned an unreadable response"));
    }

    #[tokio::test]
    async fn test_create_product_renders_price_and_tax_rate() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/products.json"))
            .and(body_json(json!({
                "product": {
                    "name": "Audyt",
                    "quantity": 1,
                    "net_price": "1800.50",
                    "tax_symbol": "23"
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 12 })))
            .expect(1)
            .mount(&server)
            .await;

        let product = NewProduct {
            name: "Audyt".to_string(),
            description: None,
            quantity: 1,
            unit: None,
            net_price: Amount::from("1800,5"),
            tax_symbol: TaxSymbol::Code("23%".to_string()),
        };
        let created = create_client(&server).create_product(product).await.unwrap();
        assert_eq!(created["id"], 12);
    }

    #[tokio::test]
    async fn test_update_product_renders_price() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/products/12.json"))
            .and(body_json(json!({ "product": { "net_price": "99.99" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 12 })))
            .expect(1)
            .mount(&server)
            .await;

        let changes = ProductChanges {
            net_price: Some(Amount::Number(99.985)),
            ..Default::default()
        };
        create_client(&server).update_product(12, changes).await.unwrap();
    }

    #[tokio::test]
    async fn test_payment_amounts_are_rendered() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/payments.json"))
            .and(body_json(json!({
                "payment": {
                    "invoice_id": 5,
                    "paid_date": "2025-02-01",
                    "paid_price": "500.00",
                    "payment_method": "transfer"
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 30 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/payments/30.json"))
            .and(body_json(json!({ "payment": { "paid_price": "1234.57" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 30 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server);
        let payment = NewPayment {
            invoice_id: 5,
            paid_date: "2025-02-01".to_string(),
            paid_price: Amount::Number(500.0),
            payment_method: "transfer".to_string(),
            description: None,
        };
        client.create_payment(payment).await.unwrap();

        let changes = PaymentChanges {
            paid_price: Some(Amount::from("1 234,565")),
            ..Default::default()
        };
        client.update_payment(30, changes).await.unwrap();
    }

    #[tokio::test]
    async fn test_unrepresentable_amounts_send_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = create_client(&server);

        let payment = NewPayment {
            invoice_id: 5,
            paid_date: "2025-02-01".to_string(),
            paid_price: Amount::Number(f64::NAN),
            payment_method: "transfer".to_string(),
            description: None,
        };
        let err = client.create_payment(payment).await.unwrap_err();
        assert!(matches!(err, InfaktError::InvalidAmount { ref field, .. } if field == "paid_price"));

        let product = NewProduct {
            name: "Audyt".to_string(),
            description: None,
            quantity: 1,
            unit: None,
            net_price: Amount::Number(1e30),
            tax_symbol: TaxSymbol::Rate(23u32.into()),
        };
        let err = client.create_product(product).await.unwrap_err();
        assert!(matches!(err, InfaktError::InvalidAmount { ref field, .. } if field == "net_price"));

        let mut item = consulting_item();
        item.unit_net_price = Amount::from("79228162514264337593543950335");
        item.quantity = Some(2);
        let err = client
            .create_invoice(new_invoice(vec![item]))
            .await
            .unwrap_err();
        assert!(matches!(err, InfaktError::InvalidAmount { .. }));
    }

    #[tokio::test]
    async fn test_update_invoice_forwards_kind() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/invoices/5.json"))
            .and(body_json(json!({ "invoice": { "kind": "proforma" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
            .expect(1)
            .mount(&server)
            .await;

        let changes = InvoiceChanges {
            kind: Some("proforma".to_string()),
            ..Default::default()
        };
        create_client(&server).update_invoice(5, changes).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_invoice_with_and_without_email() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/invoices/11/deliver_via_email.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(2)
            .mount(&server)
            .await;

        let client = create_client(&server);
        client.send_invoice(11, None).await.unwrap();
        client
            .send_invoice(11, Some("billing@example.com".to_string()))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let first: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let second: Value = serde_json::from_slice(&requests[1].body).unwrap();
        assert_eq!(first, json!({}));
        assert_eq!(second, json!({ "email": "billing@example.com" }));
    }

    #[tokio::test]
    async fn test_unstructured_error_body_falls_back_to_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/payments/1.json"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = create_client(&server).get_payment(1).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "inFakt API error (500): Request failed with status code 500"
        );
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_transport_error() {
        // Nothing listens on port 1.
        let client = InfaktClient::new(&create_config("http://127.0.0.1:1")).unwrap();
        let err = client.get_invoice(1).await.unwrap_err();
        assert!(matches!(err, InfaktError::Transport(_)));
    }

    #[tokio::test]
    async fn test_diagnostics_record_services_and_failures() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/invoices.json"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "error": "bad client" })))
            .mount(&server)
            .await;

        let sink = Arc::new(RecordingSink::default());
        let client = create_client(&server).with_diagnostics(sink.clone());

        let err = client
            .create_invoice(new_invoice(vec![consulting_item()]))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(422));

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].operation, "create_invoice");
        assert_eq!(events[0].detail["services"][0]["gross_price"], "615.00");
        assert_eq!(events[1].operation, "POST /invoices.json");
        assert_eq!(events[1].detail["status"], 422);
    }

    #[test]
    fn test_invalid_api_key_is_rejected() {
        let mut config = create_config(DEFAULT_BASE_URL);
        config.api_key = "bad\nkey".to_string();
        assert!(matches!(
            InfaktClient::new(&config),
            Err(InfaktError::Config(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = InfaktClient::new(&create_config("https://api.infakt.pl/v3/")).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }
}
