//! Support ticket HTTP handlers.
//!
//! ```text
//! GET    /api/tickets?name=Bob
//! POST   /api/tickets        {"name":"Bob","category":"Loan","query":"Need a loan"}
//! PUT    /api/tickets/{id}   {"status":"Resolved"}
//! DELETE /api/tickets/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateTicketRequest, UpdateTicketStatusRequest};
use crate::domain::{Error, OwnerName, QueryText, Ticket, TicketCategory, TicketId, TicketStatus, Urgency};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, require_text, ticket_validation_error,
};

const NAME: FieldName = FieldName::new("name");
const CATEGORY: FieldName = FieldName::new("category");
const QUERY: FieldName = FieldName::new("query");
const URGENCY: FieldName = FieldName::new("urgency");
const STATUS: FieldName = FieldName::new("status");

/// Query string for `GET /api/tickets`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTicketsParams {
    /// Exact owner name; blank or absent lists every ticket.
    pub name: Option<String>,
}

/// Request payload for raising a ticket. The owner may arrive as `name` or
/// `userName`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketBody {
    #[serde(default, alias = "userName")]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    /// `urgent`, `high`, `normal` (default) or `low`.
    #[serde(default)]
    pub urgency: Option<String>,
}

/// Request payload for changing a ticket's status.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateTicketBody {
    #[serde(default)]
    pub status: Option<String>,
}

/// Response to a successful ticket creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketCreatedResponse {
    pub message: String,
    pub ticket: Ticket,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn owner_filter(params: ListTicketsParams) -> Option<OwnerName> {
    params.name.and_then(|raw| OwnerName::new(raw).ok())
}

fn parse_create_body(body: CreateTicketBody) -> Result<CreateTicketRequest, Error> {
    let owner = OwnerName::new(require_text(body.name.as_deref(), NAME)?)
        .map_err(ticket_validation_error)?;
    let category: TicketCategory = require_text(body.category.as_deref(), CATEGORY)?
        .parse()
        .map_err(ticket_validation_error)?;
    let query =
        QueryText::new(require_text(body.query.as_deref(), QUERY)?).map_err(ticket_validation_error)?;
    let urgency = body
        .urgency
        .as_deref()
        .map(str::parse::<Urgency>)
        .transpose()
        .map_err(|err| invalid_value_error(URGENCY, err.to_string()))?
        .unwrap_or_default();

    Ok(CreateTicketRequest {
        owner,
        category,
        query,
        urgency,
    })
}

fn parse_update_body(id: String, body: UpdateTicketBody) -> Result<UpdateTicketStatusRequest, Error> {
    let id = TicketId::new(id).map_err(ticket_validation_error)?;
    let status: TicketStatus = require_text(body.status.as_deref(), STATUS)?
        .parse()
        .map_err(ticket_validation_error)?;
    Ok(UpdateTicketStatusRequest { id, status })
}

/// List tickets, newest first.
#[utoipa::path(
    get,
    path = "/api/tickets",
    params(ListTicketsParams),
    responses(
        (status = 200, description = "Tickets, newest first", body = [Ticket]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listTickets",
    security([])
)]
#[get("/tickets")]
pub async fn list_tickets(
    state: web::Data<HttpState>,
    params: web::Query<ListTicketsParams>,
) -> ApiResult<web::Json<Vec<Ticket>>> {
    let tickets = state
        .tickets_query
        .list(owner_filter(params.into_inner()))
        .await?;
    Ok(web::Json(tickets))
}

/// Raise a ticket. Triage assigns its topic and priority.
#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body = CreateTicketBody,
    responses(
        (status = 200, description = "Ticket created", body = TicketCreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "createTicket",
    security([])
)]
#[post("/tickets")]
pub async fn create_ticket(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTicketBody>,
) -> ApiResult<web::Json<TicketCreatedResponse>> {
    let request = parse_create_body(payload.into_inner())?;
    let ticket = state.tickets.create(request).await?;
    Ok(web::Json(TicketCreatedResponse {
        message: "Ticket created".to_owned(),
        ticket,
    }))
}

/// Change a ticket's status. `Resolved` tickets cannot be reopened.
#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket identifier")),
    request_body = UpdateTicketBody,
    responses(
        (status = 200, description = "Updated ticket", body = Ticket),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Ticket not found", body = ErrorSchema),
        (status = 409, description = "Status cannot move backwards", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "updateTicketStatus",
    security([])
)]
#[put("/tickets/{id}")]
pub async fn update_ticket(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTicketBody>,
) -> ApiResult<web::Json<Ticket>> {
    let request = parse_update_body(path.into_inner(), payload.into_inner())?;
    let ticket = state.tickets.update_status(request).await?;
    Ok(web::Json(ticket))
}

/// Remove a ticket.
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket identifier")),
    responses(
        (status = 200, description = "Ticket deleted", body = MessageResponse),
        (status = 404, description = "Ticket not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "deleteTicket",
    security([])
)]
#[delete("/tickets/{id}")]
pub async fn delete_ticket(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = TicketId::new(path.into_inner()).map_err(ticket_validation_error)?;
    state.tickets.delete(&id).await?;
    Ok(web::Json(MessageResponse {
        message: "Ticket deleted".to_owned(),
    }))
}

#[cfg(test)]
#[path = "tickets_tests.rs"]
mod tests;
