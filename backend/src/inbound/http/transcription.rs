//! Demo transcription handler.
//!
//! ```text
//! POST /api/transcribe
//! ```

use actix_web::{post, web};

use crate::domain::ports::Transcription;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Canned banking query flagged as a demo. No audio is processed.
#[utoipa::path(
    post,
    path = "/api/transcribe",
    responses(
        (status = 200, description = "Demo transcription", body = Transcription),
        (status = 501, description = "Transcription disabled", body = ErrorSchema)
    ),
    tags = ["transcription"],
    operation_id = "transcribe",
    security([])
)]
#[post("/transcribe")]
pub async fn transcribe(state: web::Data<HttpState>) -> ApiResult<web::Json<Transcription>> {
    let transcription = state.transcriber.transcribe().await?;
    Ok(web::Json(transcription))
}
