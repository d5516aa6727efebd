//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler, the health probes, the shared
//! error schemas and the session cookie security scheme. Swagger UI serves it
//! in debug builds and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::Transcription;
use crate::domain::{Ticket, TicketCategory, TicketStatus, User};
use crate::inbound::http::auth::{
    AccountResponse, FaceLoginRequest, LoginRequest, LoginResponse, RegisterRequest,
    SignupRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::tickets::{
    CreateTicketBody, MessageResponse, TicketCreatedResponse, UpdateTicketBody,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/auth/login or /api/auth/face-login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "bankdesk API",
        description = "Customer support tickets with automatic triage, account registration and session login.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::face_login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::tickets::create_ticket,
        crate::inbound::http::tickets::update_ticket,
        crate::inbound::http::tickets::delete_ticket,
        crate::inbound::http::transcription::transcribe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        Ticket,
        TicketCategory,
        TicketStatus,
        User,
        Transcription,
        CreateTicketBody,
        UpdateTicketBody,
        TicketCreatedResponse,
        MessageResponse,
        RegisterRequest,
        SignupRequest,
        LoginRequest,
        FaceLoginRequest,
        AccountResponse,
        LoginResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login and logout"),
        (name = "users", description = "Signed-in user profile"),
        (name = "tickets", description = "Support tickets"),
        (name = "transcription", description = "Demo voice transcription"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("Ticket", &["id", "owner", "category", "query", "status", "priority", "topic", "createdAt"])]
    #[case("User", &["id", "name", "email", "createdAt"])]
    #[case("Transcription", &["transcription", "demo", "note"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).unwrap_or_else(|| panic!("{name} schema"));
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn user_schema_never_mentions_credentials() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let RefOr::T(Schema::Object(user)) = schemas.get("User").expect("User schema") else {
            panic!("expected Object schema");
        };
        assert!(!user.properties.contains_key("password"));
        assert!(!user.properties.contains_key("faceData"));
    }

    #[rstest]
    #[case("/api/auth/register")]
    #[case("/api/auth/face-login")]
    #[case("/api/users/me")]
    #[case("/api/tickets")]
    #[case("/api/tickets/{id}")]
    #[case("/api/transcribe")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
