//! Tool definitions module.
//!
//! One file per inFakt resource. Each exposes its tool names as constants and
//! a `tools()` function returning the resource's definitions.

pub mod bank_accounts;
pub mod clients;
pub mod common;
pub mod invoices;
pub mod payments;
pub mod products;

use super::ToolDefinition;

/// Every tool this server exposes.
pub fn all_tools() -> Vec<ToolDefinition> {
    let mut tools = invoices::tools();
    tools.extend(clients::tools());
    tools.extend(products::tools());
    tools.extend(bank_accounts::tools());
    tools.extend(payments::tools());
    tools
}
