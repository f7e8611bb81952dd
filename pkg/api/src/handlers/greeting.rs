use axum::{Json, extract::Query};
use pkg_types::greeting::Greeting;
use serde::Deserialize;

const DEFAULT_NAME: &str = "world";

#[derive(Debug, Deserialize)]
pub struct GreetingQuery {
    pub name: Option<String>,
}

/// GET /greeting?name= — greet `name`, or the world.
pub async fn greeting(Query(query): Query<GreetingQuery>) -> Json<Greeting> {
    let name = query.name.as_deref().unwrap_or(DEFAULT_NAME);
    Json(Greeting::for_name(name))
}
