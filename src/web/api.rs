//! everything under /api/v1. json in the good case, `{"error", "message"}` in the bad one

use crate::bracket::{MatchNode, ProjectionError, ValidationReport};
use crate::constants::API_BASE;
use crate::models::tournaments::Tournament;
use crate::web::Projector;
use log::error;
use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::{get, Build, Request, Rocket, State};
use serde::Serialize;

#[derive(Serialize, Debug)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: Status,
    body: ErrorBody,
}

impl From<ProjectionError> for ApiError {
    fn from(e: ProjectionError) -> Self {
        let (status, kind) = match &e {
            ProjectionError::NotFound(_) => (Status::NotFound, "notFound"),
            ProjectionError::Inconsistent(_) => (Status::Conflict, "inconsistent"),
            ProjectionError::Timeout(_) => (Status::GatewayTimeout, "timeout"),
            ProjectionError::Store(_) => {
                error!("Store error serving API request: {e}");
                (Status::InternalServerError, "storeError")
            }
        };
        Self {
            status,
            body: ErrorBody {
                error: kind,
                message: e.to_string(),
            },
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        status::Custom(self.status, Json(self.body)).respond_to(request)
    }
}

#[get("/tournaments")]
async fn tournaments(projector: &State<Projector>) -> Result<Json<Vec<Tournament>>, ApiError> {
    Ok(Json(projector.tournaments().await?))
}

#[get("/tournaments/<id>/bracket")]
async fn bracket(
    id: &str,
    projector: &State<Projector>,
) -> Result<Json<Vec<MatchNode>>, ApiError> {
    Ok(Json(projector.project_bracket(id).await?))
}

#[get("/tournaments/<id>/validation")]
async fn validation(
    id: &str,
    projector: &State<Projector>,
) -> Result<Json<ValidationReport>, ApiError> {
    Ok(Json(projector.validate_bracket(id).await?))
}

pub fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount(API_BASE, rocket::routes![tournaments, bracket, validation])
}
