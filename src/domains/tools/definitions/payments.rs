//! Payment tools.

use std::sync::Arc;

use crate::domains::infakt::InfaktClient;
use crate::domains::infakt::models::{NewPayment, PaymentChanges, PaymentListQuery};
use crate::domains::tools::{ToolDefinition, ToolOutput, ToolResult};

use super::common::{IdParams, UpdateParams};

pub const LIST_PAYMENTS: &str = "list_payments";
pub const GET_PAYMENT: &str = "get_payment";
pub const CREATE_PAYMENT: &str = "create_payment";
pub const UPDATE_PAYMENT: &str = "update_payment";
pub const DELETE_PAYMENT: &str = "delete_payment";

const RESOURCE: &str = "Payment";

/// All payment tools.
pub fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(LIST_PAYMENTS, "List all payments from inFakt", list_payments),
        ToolDefinition::new(
            GET_PAYMENT,
            "Get details of a specific payment by ID",
            get_payment,
        ),
        ToolDefinition::new(
            CREATE_PAYMENT,
            "Create a new payment record in inFakt",
            create_payment,
        ),
        ToolDefinition::new(UPDATE_PAYMENT, "Update an existing payment", update_payment),
        ToolDefinition::new(DELETE_PAYMENT, "Delete a payment by ID", delete_payment),
    ]
}

async fn list_payments(
    client: Arc<InfaktClient>,
    params: PaymentListQuery,
) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::records(client.list_payments(params).await?))
}

async fn get_payment(client: Arc<InfaktClient>, params: IdParams) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::Json(client.get_payment(params.id).await?))
}

async fn create_payment(client: Arc<InfaktClient>, params: NewPayment) -> ToolResult<ToolOutput> {
    let record = client.create_payment(params).await?;
    Ok(ToolOutput::Created {
        resource: RESOURCE,
        record,
    })
}

async fn update_payment(
    client: Arc<InfaktClient>,
    params: UpdateParams<PaymentChanges>,
) -> ToolResult<ToolOutput> {
    let record = client.update_payment(params.id, params.changes).await?;
    Ok(ToolOutput::Updated {
        resource: RESOURCE,
        record,
    })
}

async fn delete_payment(client: Arc<InfaktClient>, params: IdParams) -> ToolResult<ToolOutput> {
    client.delete_payment(params.id).await?;
    Ok(ToolOutput::Deleted {
        resource: RESOURCE,
        id: params.id,
    })
}
