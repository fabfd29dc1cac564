use super::Error;
use rocket::{
    http::{ContentType, Status},
    request::Request,
    response::{self, Responder, Response},
    serde::{json, Serialize},
};
use std::io::Cursor;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing)]
    pub error: Option<Error>,
}

impl ApiError {
    pub fn status(&self) -> Status {
        Status::new(self.code)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        match &self.error {
            Some(e) if self.code >= 500 => error!(%e, code = self.code, "Error from controller"),
            Some(e) => warn!(%e, code = self.code, "Rejected request"),
            None => {}
        }

        let body = json::to_string(&self).map_err(|e| {
            error!(%e, "Unable to serialize error body");
            Status::InternalServerError
        })?;

        Response::build()
            .header(ContentType::JSON)
            .status(self.status())
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

impl From<Status> for ApiError {
    fn from(s: Status) -> Self {
        ApiError {
            code: s.code,
            message: s.reason().unwrap_or("").to_string(),
            error: None,
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = match e {
            Error::InvalidInput(_) => Status::BadRequest,
            Error::NotFound(_) => Status::NotFound,
            Error::Timeout(_) => Status::ServiceUnavailable,
            Error::StoreUnavailable(_) | Error::UpstreamFetchFailed(_) | Error::Internal(_) => {
                Status::InternalServerError
            }
        };

        // Server-side details stay in the log
        let message = match e {
            Error::InvalidInput(_) | Error::NotFound(_) => e.to_string(),
            _ => status.reason().unwrap_or("").to_string(),
        };

        ApiError {
            code: status.code,
            message,
            error: Some(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ApiError;
    use crate::model::{CurrencyCode, Error};
    use rocket::http::Status;

    #[test]
    fn from_error() {
        let code = CurrencyCode::new("EUR").unwrap();
        let e: ApiError = Error::NotFound(code).into();
        assert_eq!(Status::NotFound, e.status());
        assert_eq!("currency EUR not found", e.message);

        let e: ApiError = Error::InvalidInput("bad code".into()).into();
        assert_eq!(Status::BadRequest, e.status());

        let e: ApiError = Error::Internal("corrupt row 42".into()).into();
        assert_eq!(Status::InternalServerError, e.status());
        assert_eq!("Internal Server Error", e.message);
    }
}
