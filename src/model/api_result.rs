use super::{ApiError, Result};
use rocket::serde::json::Json;
use rocket::Responder;

#[derive(Responder)]
#[response(bound = "T: Serialize")]
pub enum ApiResult<T> {
    Ok(Json<T>),
    Err(ApiError),
}

impl<T> ApiResult<T> {
    pub fn new(result: Result<T>) -> ApiResult<T> {
        match result {
            Ok(val) => ApiResult::Ok(Json(val)),
            Err(e) => ApiResult::Err(e.into()),
        }
    }
}

impl<T> From<ApiError> for ApiResult<T> {
    fn from(e: ApiError) -> Self {
        ApiResult::Err(e)
    }
}
