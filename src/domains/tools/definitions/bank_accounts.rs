//! Bank account tools.

use std::sync::Arc;

use crate::domains::infakt::InfaktClient;
use crate::domains::infakt::models::{BankAccountChanges, BankAccountListQuery, NewBankAccount};
use crate::domains::tools::{ToolDefinition, ToolOutput, ToolResult};

use super::common::{IdParams, UpdateParams};

pub const LIST_BANK_ACCOUNTS: &str = "list_bank_accounts";
pub const GET_BANK_ACCOUNT: &str = "get_bank_account";
pub const CREATE_BANK_ACCOUNT: &str = "create_bank_account";
pub const UPDATE_BANK_ACCOUNT: &str = "update_bank_account";
pub const DELETE_BANK_ACCOUNT: &str = "delete_bank_account";

const RESOURCE: &str = "Bank account";

/// All bank account tools.
pub fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            LIST_BANK_ACCOUNTS,
            "List all bank accounts from inFakt",
            list_bank_accounts,
        ),
        ToolDefinition::new(
            GET_BANK_ACCOUNT,
            "Get details of a specific bank account by ID",
            get_bank_account,
        ),
        ToolDefinition::new(
            CREATE_BANK_ACCOUNT,
            "Create a new bank account in inFakt",
            create_bank_account,
        ),
        ToolDefinition::new(
            UPDATE_BANK_ACCOUNT,
            "Update an existing bank account",
            update_bank_account,
        ),
        ToolDefinition::new(
            DELETE_BANK_ACCOUNT,
            "Delete a bank account by ID",
            delete_bank_account,
        ),
    ]
}

async fn list_bank_accounts(
    client: Arc<InfaktClient>,
    params: BankAccountListQuery,
) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::records(client.list_bank_accounts(params).await?))
}

async fn get_bank_account(client: Arc<InfaktClient>, params: IdParams) -> ToolResult<ToolOutput> {
    Ok(ToolOutput::Json(client.get_bank_account(params.id).await?))
}

async fn create_bank_account(
    client: Arc<InfaktClient>,
    params: NewBankAccount,
) -> ToolResult<ToolOutput> {
    let record = client.create_bank_account(params).await?;
    Ok(ToolOutput::Created {
        resource: RESOURCE,
        record,
    })
}

async fn update_bank_account(
    client: Arc<InfaktClient>,
    params: UpdateParams<BankAccountChanges>,
) -> ToolResult<ToolOutput> {
    let record = client.update_bank_account(params.id, params.changes).await?;
    Ok(ToolOutput::Updated {
        resource: RESOURCE,
        record,
    })
}

async fn delete_bank_account(
    client: Arc<InfaktClient>,
    params: IdParams,
) -> ToolResult<ToolOutput> {
    client.delete_bank_account(params.id).await?;
    Ok(ToolOutput::Deleted {
        resource: RESOURCE,
        id: params.id,
    })
}
