//! Request payloads and query filters for the inFakt API.
//!
//! Records returned by the API are passed through untouched as JSON
//! (see [`Record`]); only what this server sends is typed here. Every payload
//! type doubles as a tool parameter, so the JSON Schema shown to MCP clients
//! is derived from the same struct that is serialized to the backend.

use std::str::FromStr;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::InfaktResult;
use super::pricing;

/// A resource record as returned by the API.
pub type Record = Value;

/// Page size applied to list calls that do not specify `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

// ============================================================================
// Amounts and tax symbols
// ============================================================================

/// A monetary amount as supplied by a caller: a JSON number or a decimal string.
///
/// Strings may use either `.` or `,` as the decimal separator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Parse the amount into an exact decimal.
    pub fn to_decimal(&self, field: &str) -> InfaktResult<Decimal> {
        pricing::parse_amount(self, field)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// VAT rate of a line item or product.
///
/// Either a percentage (`23`, `"8"`) or a non-numeric exemption code such as
/// `"zw"` (exempt) or `"np"` (not subject to VAT). Numeric codes such as
/// `"23%"` are sent as the bare rate (see [`TaxSymbol::canonical`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum TaxSymbol {
    Rate(serde_json::Number),
    Code(String),
}

impl TaxSymbol {
    /// Percentage rate, or `None` for an exemption code.
    pub fn rate(&self) -> Option<Decimal> {
        match self {
            Self::Rate(rate) => Decimal::from_str(&rate.to_string()).ok(),
            Self::Code(code) => {
                let code = code.trim().trim_end_matches('%');
                pricing::parse_amount(&Amount::from(code), "tax_symbol").ok()
            }
        }
    }

    /// The symbol as sent to the API.
    ///
    /// A code that parses as a rate (`"23%"`, `" 8 "`, `"5,5"`) becomes that
    /// rate as a plain string, so the backend sees the same rate the totals
    /// were computed with. Numbers and exemption codes pass through.
    pub fn canonical(self) -> Self {
        match (matches!(self, Self::Code(_)), self.rate()) {
            (true, Some(rate)) => Self::Code(rate.normalize().to_string()),
            _ => self,
        }
    }

    /// Whether this symbol is an exemption sentinel rather than a rate.
    pub fn is_exempt(&self) -> bool {
        self.rate().is_none()
    }
}

// ============================================================================
// Line items
// ============================================================================

/// One billable entry on an invoice, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineItem {
    /// Service/product name.
    pub name: String,

    /// Tax rate (e.g. 23 for 23% VAT) or exemption code ("zw", "np").
    pub tax_symbol: TaxSymbol,

    /// Quantity (default: 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Unit net price as a decimal string (e.g. "1800.00") or number.
    pub unit_net_price: Amount,

    /// Unit of measurement (e.g. szt, usł).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Any further service fields accepted by the API, forwarded untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A line item with prices rendered in the API's numeric format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedLineItem {
    pub name: String,
    pub tax_symbol: TaxSymbol,
    pub quantity: u32,
    pub unit_net_price: String,
    pub net_price: String,
    pub tax_price: String,
    pub gross_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Invoices
// ============================================================================

/// Filters for listing invoices.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct InvoiceListQuery {
    /// Number of results to return (default: 25).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip (default: 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Search query string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Filter by invoice date from (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date_from: Option<String>,
    /// Filter by invoice date to (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date_to: Option<String>,
    /// Filter by sale date from (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_date_from: Option<String>,
    /// Filter by sale date to (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_date_to: Option<String>,
    /// Filter by status (e.g. draft, sent, paid).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Filter by paid status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
}

/// A new invoice. `S` is the line item type: raw on input, normalized on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewInvoice<S = LineItem> {
    /// Invoice date (YYYY-MM-DD).
    pub invoice_date: String,
    /// Sale date (YYYY-MM-DD).
    pub sale_date: String,
    /// Payment due date (YYYY-MM-DD).
    pub payment_date: String,
    /// Payment method (e.g. transfer, cash, card).
    pub payment_method: String,
    /// Client ID.
    pub client_id: u64,
    /// Services/products on the invoice.
    pub services: Vec<S>,
    /// Additional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Currency code (default: PLN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Invoice kind (e.g. vat, proforma).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl NewInvoice<LineItem> {
    /// Run every line item through the price normalizer.
    pub fn normalize(self) -> InfaktResult<NewInvoice<NormalizedLineItem>> {
        Ok(NewInvoice {
            services: pricing::normalize(self.services)?,
            invoice_date: self.invoice_date,
            sale_date: self.sale_date,
            payment_date: self.payment_date,
            payment_method: self.payment_method,
            client_id: self.client_id,
            notes: self.notes,
            currency: self.currency,
            kind: self.kind,
        })
    }
}

/// Partial invoice update. Omitted fields are not sent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InvoiceChanges<S = LineItem> {
    /// Invoice date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    /// Sale date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<String>,
    /// Payment due date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    /// Payment method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Client ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    /// Replacement services/products. Leave out to keep the current ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<S>>,
    /// Additional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Invoice kind (e.g. vat, proforma).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

// Derived Default would require `S: Default`.
impl<S> Default for InvoiceChanges<S> {
    fn default() -> Self {
        Self {
            invoice_date: None,
            sale_date: None,
            payment_date: None,
            payment_method: None,
            client_id: None,
            services: None,
            notes: None,
            currency: None,
            kind: None,
        }
    }
}

impl InvoiceChanges<LineItem> {
    /// Normalize line items if the update carries any.
    pub fn normalize(self) -> InfaktResult<InvoiceChanges<NormalizedLineItem>> {
        let services = self.services.map(pricing::normalize).transpose()?;
        Ok(InvoiceChanges {
            services,
            invoice_date: self.invoice_date,
            sale_date: self.sale_date,
            payment_date: self.payment_date,
            payment_method: self.payment_method,
            client_id: self.client_id,
            notes: self.notes,
            currency: self.currency,
            kind: self.kind,
        })
    }
}

/// Body of the email delivery action.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeliveryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ============================================================================
// Clients
// ============================================================================

/// Generic list filters (clients, products).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Pagination {
    /// Number of results to return (default: 25).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Search query string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

/// A new client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewClient {
    /// Company name.
    pub company_name: String,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Street name.
    pub street: String,
    /// Street number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    /// Flat number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_number: Option<String>,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub postal_code: String,
    /// Tax ID (NIP).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nip: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Bank account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    /// Additional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Partial client update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClientChanges {
    /// Company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Street name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Street number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    /// Flat number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_number: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Tax ID (NIP).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nip: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Bank account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    /// Additional notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Products
// ============================================================================

/// A new product.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewProduct {
    /// Product name.
    pub name: String,
    /// Product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Quantity.
    pub quantity: u32,
    /// Unit of measurement (e.g. szt, kg, usł).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Net price.
    pub net_price: Amount,
    /// Tax rate (e.g. 23 for 23% VAT) or exemption code.
    pub tax_symbol: TaxSymbol,
}

/// Partial product update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProductChanges {
    /// Product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Unit of measurement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Net price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_price: Option<Amount>,
    /// Tax rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_symbol: Option<TaxSymbol>,
}

impl NewProduct {
    /// Render the price in the API's amount format.
    pub fn normalize(self) -> InfaktResult<Self> {
        Ok(Self {
            net_price: pricing::normalize_amount(&self.net_price, "net_price")?,
            tax_symbol: self.tax_symbol.canonical(),
            ..self
        })
    }
}

impl ProductChanges {
    /// Render the price, if present, in the API's amount format.
    pub fn normalize(self) -> InfaktResult<Self> {
        let net_price = self
            .net_price
            .as_ref()
            .map(|price| pricing::normalize_amount(price, "net_price"))
            .transpose()?;
        Ok(Self {
            net_price,
            tax_symbol: self.tax_symbol.map(TaxSymbol::canonical),
            ..self
        })
    }
}

// ============================================================================
// Bank accounts
// ============================================================================

/// Filters for listing bank accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BankAccountListQuery {
    /// Number of results to return (default: 25).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// A new bank account.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewBankAccount {
    /// Bank name.
    pub bank_name: String,
    /// Bank account number (IBAN).
    pub account_number: String,
    /// SWIFT code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift: Option<String>,
    /// Set as default account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

/// Partial bank account update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BankAccountChanges {
    /// Bank name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    /// Bank account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    /// SWIFT code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift: Option<String>,
    /// Set as default account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

// ============================================================================
// Payments
// ============================================================================

/// Filters for listing payments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PaymentListQuery {
    /// Number of results to return (default: 25).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of results to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Filter by invoice ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<u64>,
}

/// A new payment record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewPayment {
    /// Invoice ID this payment is for.
    pub invoice_id: u64,
    /// Payment date (YYYY-MM-DD).
    pub paid_date: String,
    /// Amount paid.
    pub paid_price: Amount,
    /// Payment method (e.g. transfer, cash, card).
    pub payment_method: String,
    /// Payment description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial payment update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PaymentChanges {
    /// Payment date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    /// Amount paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_price: Option<Amount>,
    /// Payment method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Payment description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewPayment {
    /// Render the paid amount in the API's amount format.
    pub fn normalize(self) -> InfaktResult<Self> {
        Ok(Self {
            paid_price: pricing::normalize_amount(&self.paid_price, "paid_price")?,
            ..self
        })
    }
}

impl PaymentChanges {
    /// Render the paid amount, if present, in the API's amount format.
    pub fn normalize(self) -> InfaktResult<Self> {
        let paid_price = self
            .paid_price
            .as_ref()
            .map(|price| pricing::normalize_amount(price, "paid_price"))
            .transpose()?;
        Ok(Self { paid_price, ..self })
    }
}

// ============================================================================
// List handling
// ============================================================================

/// A list filter that carries a page size.
pub trait ListQuery: Serialize + Send + Sync {
    /// Mutable access to the `limit` field.
    fn limit_mut(&mut self) -> &mut Option<u32>;

    /// Fill in `limit` when the caller left it out.
    fn apply_default_limit(&mut self, page_size: u32) {
        self.limit_mut().get_or_insert(page_size);
    }
}

impl ListQuery for InvoiceListQuery {
    fn limit_mut(&mut self) -> &mut Option<u32> {
        &mut self.limit
    }
}

impl ListQuery for Pagination {
    fn limit_mut(&mut self) -> &mut Option<u32> {
        &mut self.limit
    }
}

impl ListQuery for BankAccountListQuery {
    fn limit_mut(&mut self) -> &mut Option<u32> {
        &mut self.limit
    }
}

impl ListQuery for PaymentListQuery {
    fn limit_mut(&mut self) -> &mut Option<u32> {
        &mut self.limit
    }
}

/// List responses come either as a bare array or wrapped with paging metadata.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope {
    Records(Vec<Record>),
    Paged { entities: Vec<Record> },
}

impl ListEnvelope {
    pub(crate) fn into_records(self) -> Vec<Record> {
        match self {
            Self::Records(records) | Self::Paged { entities: records } => records,
        }
    }
}
