//! Role domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named role that can be attached to a user.
///
/// Roles carry no sensitive data, so the entity doubles as its own
/// response representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    /// Role identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Unique role name
    #[schema(example = "user")]
    pub name: String,
    /// Free-form description
    #[schema(example = "Regular registered user")]
    pub description: Option<String>,
}
