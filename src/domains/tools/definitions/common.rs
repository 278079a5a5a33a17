//! Parameter shapes shared by several tools.

use schemars::JsonSchema;
use serde::Deserialize;

/// Parameters of tools addressing one record.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IdParams {
    /// Record ID.
    pub id: u64,
}

/// Parameters of update tools: the record ID plus the fields to change.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateParams<T> {
    /// Record ID.
    pub id: u64,

    #[serde(flatten)]
    pub changes: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::infakt::models::ClientChanges;
    use serde_json::json;

    #[test]
    fn test_update_params_split_id_from_changes() {
        let params: UpdateParams<ClientChanges> =
            serde_json::from_value(json!({ "id": 4, "city": "Kraków" })).unwrap();
        assert_eq!(params.id, 4);
        assert_eq!(params.changes.city.as_deref(), Some("Kraków"));
        assert!(params.changes.email.is_none());
    }

    #[test]
    fn test_id_is_required() {
        let err = serde_json::from_value::<IdParams>(json!({})).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));

        assert!(serde_json::from_value::<IdParams>(json!({ "id": "abc" })).is_err());
        assert!(serde_json::from_value::<IdParams>(json!({ "id": -1 })).is_err());
    }
}
