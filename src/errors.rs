use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};

#[derive(Debug, Display, Error)]
pub enum UserError {
    Unauthorized,
    InvalidPayload(#[error(not(source))] String),
}

impl web::error::WebResponseError for UserError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        error!("{:#?}", self);

        let detail = match self {
            UserError::Unauthorized => "unauthorized".to_string(),
            UserError::InvalidPayload(msg) => format!("invalid payload: {}", msg),
        };

        web::HttpResponse::build(self.status_code()).json(&serde_json::json!({
            "error": detail
        }))
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            UserError::Unauthorized => http::StatusCode::UNAUTHORIZED,
            UserError::InvalidPayload(_) => http::StatusCode::BAD_REQUEST,
        }
    }
}
