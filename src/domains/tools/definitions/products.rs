//! Product catalog tools.

use std::sync::Arc;

use crate::domains::infakt::InfaktClient;
use crate::domains::infakt::models::{NewProduct, Pagination, ProductChanges};
use crate::domains::tools::{ToolDefinition, ToolOutput, ToolResult};

use super::common::{IdParams, UpdateParams};

pub const LIST_PRODUCTS: &str = "list_products";
pub const GET_PRODUCT: &str = "get_product";
pub const CREATE_PRODUCT: &str = "create_product";
pub const UPDATE_PRODUCT: &str = "update_product";
pub const DELETE_PRODUCT: &str = "delete_product";

const RESOURCE: &str = "Product";

/// All product tools.
pub fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(LIST_PRODUCTS, "List all products from inFakt", list_products),
        ToolDefinition::new(
            GET_PRODUCT,
            "Get details of a specific product by ID",
            get_product,
        ),
        ToolDefinition::new(CREATE_PRODUCT, "Create a new product in inFakt", create_product),
        ToolDefinition::new(UPDATE_PRODUCT, "Update an existing product", update_product),
        ToolDefinition::new(DELETE_PRODUCT, "Delete a product by ID", delete_product),
    ]
}

async fn list_products(client: Arc<InfaktClient>, params: Pagination) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::records(client.list_products(params).await?))
}

async fn get_product(client: Arc<InfaktClient>, params: IdParams) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::Json(client.get_product(params.id).await?))
}

async fn create_product(client: Arc<InfaktClient>, params: NewProduct) -> ToolResult<ToolOutput> {
    let record = client.create_product(params).await?;
    Ok(ToolOutput::Created {
        resource: RESOURCE,
        record,
    })
}

async fn update_product(
    client: Arc<InfaktClient>,
    params: UpdateParams<ProductChanges>,
) -> ToolResult<ToolOutput> {
    let record = client.update_product(params.id, params.changes).await?;
    Ok(ToolOutput::Updated {
        resource: RESOURCE,
        record,
    })
}

async fn delete_product(client: Arc<InfaktClient>, params: IdParams) -> ToolResult<ToolOutput> {
    client.delete_product(params.id).await?;
    Ok(ToolOutput::Deleted {
        resource: RESOURCE,
        id: params.id,
    })
}
