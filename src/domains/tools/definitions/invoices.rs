//! Invoice tools.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use crate::domains::infakt::InfaktClient;
use crate::domains::infakt::models::{InvoiceChanges, InvoiceListQuery, NewInvoice};
use crate::domains::tools::{ToolDefinition, ToolOutput, ToolResult};

use super::common::{IdParams, UpdateParams};

pub const LIST_INVOICES: &str = "list_invoices";
pub const GET_INVOICE: &str = "get_invoice";
pub const CREATE_INVOICE: &str = "create_invoice";
pub const UPDATE_INVOICE: &str = "update_invoice";
pub const DELETE_INVOICE: &str = "delete_invoice";
pub const SEND_INVOICE: &str = "send_invoice";

const RESOURCE: &str = "Invoice";

const CREATE_DESCRIPTION: &str = "Create a new invoice in inFakt. net_price, tax_price and \
    gross_price of every service are calculated from unit_net_price, quantity and tax_symbol. \
    IMPORTANT: unit_net_price must be a decimal amount such as \"1800.00\" for 1800 PLN.";

/// Parameters for `send_invoice`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendInvoiceParams {
    /// Invoice ID to send.
    pub id: u64,

    /// Email address (optional, uses client email if not provided).
    #[serde(default)]
    pub email: Option<String>,
}

/// All invoice tools.
pub fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            LIST_INVOICES,
            "List all invoices with optional filters. Returns a list of invoices from inFakt.",
            list_invoices,
        ),
        ToolDefinition::new(
            GET_INVOICE,
            "Get details of a specific invoice by ID",
            get_invoice,
        ),
        ToolDefinition::new(CREATE_INVOICE, CREATE_DESCRIPTION, create_invoice),
        ToolDefinition::new(UPDATE_INVOICE, "Update an existing invoice", update_invoice),
        ToolDefinition::new(DELETE_INVOICE, "Delete an invoice by ID", delete_invoice),
        ToolDefinition::new(SEND_INVOICE, "Send an invoice via email", send_invoice),
    ]
}

async fn list_invoices(
    client: Arc<InfaktClient>,
    params: InvoiceListQuery,
) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::records(client.list_invoices(params).await?))
}

async fn get_invoice(client: Arc<InfaktClient>, params: IdParams) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::Json(client.get_invoice(params.id).await?))
}

#[instrument(skip_all, fields(client_id = params.client_id, services = params.services.len()))]
async fn create_invoice(client: Arc<InfaktClient>, params: NewInvoice) -> ToolResult<ToolOutput> {
    let record = client.create_invoice(params).await?;
    Ok(ToolOutput::Created {
        resource: RESOURCE,
        record,
    })
}

#[instrument(skip_all, fields(id = params.id))]
async fn update_invoice(
    client: Arc<InfaktClient>,
    params: UpdateParams<InvoiceChanges>,
) -> ToolResult<ToolOutput> {
    let record = client.update_invoice(params.id, params.changes).await?;
    Ok(ToolOutput::Updated {
        resource: RESOURCE,
        record,
    })
}

async fn delete_invoice(client: Arc<InfaktClient>, params: IdParams) -> ToolResult<ToolOutput> {
    client.delete_invoice(params.id).await?;
    Ok(ToolOutput::Deleted {
        resource: RESOURCE,
        id: params.id,
    })
}

async fn send_invoice(
    client: Arc<InfaktClient>,
    params: SendInvoiceParams,
) -> ToolResult<ToolOutput> {
    client.send_invoice(params.id, params.email).await?;
    Ok(ToolOutput::Sent { id: params.id })
}
