use crate::{context::AppContext, service::rates};
use chrono::SecondsFormat;
use rocket::{get, http::Status, serde::json::Json, State};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckOutput {
    pub status: String,
    pub database: String,
    pub timestamp: String,
}

#[get("/check")]
pub async fn get(ctx: &State<AppContext>) -> (Status, Json<CheckOutput>) {
    let health = match ctx.store.run(|store| Ok(rates::health(store))).await {
        Ok(health) => health,
        Err(_) => rates::Health {
            connected: false,
            checked_at: chrono::Utc::now(),
        },
    };

    let (status, body) = if health.connected {
        (Status::Ok, ("available", "connected"))
    } else {
        (Status::ServiceUnavailable, ("error", "disconnected"))
    };

    let output = CheckOutput {
        status: body.0.into(),
        database: body.1.into(),
        timestamp: health.checked_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    (status, Json(output))
}
