use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_name;
use crate::entity::attribute;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateAttributeRequest {
    #[schema(example = "Size")]
    pub name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AttributeResponse {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<attribute::Model> for AttributeResponse {
    fn from(m: attribute::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_attribute(req: &CreateAttributeRequest) -> Result<(), AppError> {
    validate_name(&req.name)
}
