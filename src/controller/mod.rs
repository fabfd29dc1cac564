use crate::model::ApiError;
use rocket::{catch, catchers, http::Status, routes, Catcher, Request, Route};

pub mod check;
pub mod convert;
pub mod history;
pub mod latest;
pub mod rate;

pub fn routes() -> Vec<Route> {
    routes![check::get, convert::get, history::get, latest::get, rate::get]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![error]
}

#[catch(default)]
fn error(status: Status, req: &Request) -> ApiError {
    let mut error = ApiError::from(status);
    error.message = format!("Failed to handle URI {}", req.uri().path());
    error
}

#[cfg(test)]
mod test {
    use crate::test::setup;
    use rocket::http::{ContentType, Status};
    use rocket::serde::json::Value;

    #[test]
    fn unknown_route() {
        let env = setup();
        let res = env.client.get("/exchange_rates").dispatch();
        assert_eq!(res.status(), Status::NotFound);
        assert_eq!(res.content_type(), Some(ContentType::JSON));
        let body = res.into_json::<Value>().unwrap();
        assert_eq!(404, body["code"]);
    }
}
