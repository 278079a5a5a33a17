//! Client (contractor) tools.

use std::sync::Arc;

use crate::domains::infakt::InfaktClient;
use crate::domains::infakt::models::{ClientChanges, NewClient, Pagination};
use crate::domains::tools::{ToolDefinition, ToolOutput, ToolResult};

use super::common::{IdParams, UpdateParams};

pub const LIST_CLIENTS: &str = "list_clients";
pub const GET_CLIENT: &str = "get_client";
pub const CREATE_CLIENT: &str = "create_client";
pub const UPDATE_CLIENT: &str = "update_client";
pub const DELETE_CLIENT: &str = "delete_client";

const RESOURCE: &str = "Client";

/// All client tools.
pub fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(LIST_CLIENTS, "List all clients from inFakt", list_clients),
        ToolDefinition::new(
            GET_CLIENT,
            "Get details of a specific client by ID",
            get_client,
        ),
        ToolDefinition::new(CREATE_CLIENT, "Create a new client in inFakt", create_client),
        ToolDefinition::new(UPDATE_CLIENT, "Update an existing client", update_client),
        ToolDefinition::new(DELETE_CLIENT, "Delete a client by ID", delete_client),
    ]
}

async fn list_clients(client: Arc<InfaktClient>, params: Pagination) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::records(client.list_clients(params).await?))
}

async fn get_client(client: Arc<InfaktClient>, params: IdParams) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::Json(client.get_client(params.id).await?))
}

async fn create_client(client: Arc<InfaktClient>, params: NewClient) -> ToolResult<ToolOutput> {
    let record = client.create_client(params).await?;
    Ok(ToolOutput::Created {
        resource: RESOURCE,
        record,
    })
}

async fn update_client(
    client: Arc<InfaktClient>,
    params: UpdateParams<ClientChanges>,
) -> ToolResult<ToolOutput> {
    let record = client.update_client(params.id, params.changes).await?;
    Ok(ToolOutput::Updated {
        resource: RESOURCE,
        record,
    })
}

async fn delete_client(client: Arc<InfaktClient>, params: IdParams) -> ToolResult<ToolOutput> {
    client.delete_client(params.id).await?;
    Ok(ToolOutput::Deleted {
        resource: RESOURCE,
        id: params.id,
    })
}
