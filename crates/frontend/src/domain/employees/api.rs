use contracts::domain::{MutationResponse, NewEmployee};
use contracts::error::ApiError;

use crate::shared::api::ScopedClient;
use crate::shared::list_controller::EndpointPolicy;

pub const REFRESH_KEY: &str = "employees";

pub fn endpoint_policy() -> EndpointPolicy {
    EndpointPolicy::plain("/api/employees", "employees")
}

pub async fn create_employee(dto: &NewEmployee) -> Result<MutationResponse, ApiError> {
    ScopedClient::new().post("/api/employees", dto).await
}

pub async fn delete_employee(id: &str) -> Result<MutationResponse, ApiError> {
    ScopedClient::new()
        .delete(&format!("/api/employees/{}", id))
        .await
}
