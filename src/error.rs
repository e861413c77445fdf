use log::info;
use rocket::Request;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::response::content::RawJson;
use serde_json::json;

/// Failure modes of the owner API.
///
/// Missing-field and invalid-update problems map to 400, an owner lookup
/// miss maps to 404, and everything else collapses to a 500 carrying the
/// raw error message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Pokemon owner not found")]
    OwnerNotFound,

    #[error("Invalid update for Pokemon owner: {0}")]
    InvalidUpdate(String),

    #[error("Error accessing Pokemon data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error parsing Pokemon data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    fn status(&self) -> Status {
        match self {
            Error::MissingField(_) | Error::InvalidUpdate(_) => Status::BadRequest,
            Error::OwnerNotFound => Status::NotFound,
            Error::Io(_) | Error::Parse(_) => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'o> {
        info!("Error while running request: {}", self);
        let status = self.status();
        let body = json!({ "message": self.to_string() }).to_string();
        let mut response = RawJson(body).respond_to(request)?;
        response.set_status(status);
        Ok(response)
    }
}

#[catch(404)]
fn not_found(req: &Request) -> RawJson<String> {
    RawJson(json!({ "message": format!("No route for {}", req.uri()) }).to_string())
}

#[catch(422)]
fn unprocessable(_req: &Request) -> RawJson<String> {
    RawJson(json!({ "message": "Malformed request body" }).to_string())
}

#[catch(500)]
fn internal(_req: &Request) -> RawJson<String> {
    RawJson(json!({ "message": "Internal server error" }).to_string())
}

pub fn catchers() -> Vec<rocket::Catcher> {
    catchers![not_found, unprocessable, internal]
}
