//! OpenAPI Documentation
//!
//! OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::benefit::{Benefit, NewBenefit};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{BenefitUpdate, TransferResponseData};
use crate::transfer::TransferRequest;

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Benefit Ledger API",
        version = "1.0.0",
        description = "Benefit balances with optimistic-concurrency transfers.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::benefit::list_benefits,
        crate::gateway::handlers::benefit::get_benefit,
        crate::gateway::handlers::benefit::create_benefit,
        crate::gateway::handlers::benefit::update_benefit,
        crate::gateway::handlers::benefit::delete_benefit,
        crate::gateway::handlers::transfer::create_transfer,
    ),
    components(
        schemas(
            Benefit,
            NewBenefit,
            BenefitUpdate,
            TransferRequest,
            TransferResponseData,
            HealthResponse,
        )
    ),
    tags(
        (name = "System", description = "Health"),
        (name = "Benefit", description = "Benefit records"),
        (name = "Transfer", description = "Transfers between benefits"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_transfer_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/benefits/transfer"));
        assert!(doc.paths.paths.contains_key("/api/v1/benefits/{id}"));
    }
}
