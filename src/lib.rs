pub mod conf;
pub mod context;
pub mod controller;
pub mod db;
pub mod migrations;
pub mod model;
pub mod provider;
pub mod repository;
pub mod service;

use context::AppContext;
use rocket::{Build, Rocket};

/// Mounts the HTTP surface and hands `ctx` to every handler.
pub fn prepare(rocket: Rocket<Build>, ctx: AppContext) -> Rocket<Build> {
    rocket
        .mount("/", controller::routes())
        .register("/", controller::catchers())
        .manage(ctx)
}
