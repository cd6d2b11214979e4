// src/handlers/pages.rs
//
// Rotas de página atrás do Gate. A renderização fica com o frontend: aqui só
// devolvemos qual página foi liberada.

use axum::{extract::Query, Json};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub error: Option<String>,
}

pub async fn home(Query(query): Query<HomeQuery>) -> Json<Value> {
    match query.error.as_deref() {
        Some("suspended") => Json(json!({
            "page": "home",
            "notice": "Sua conta está suspensa. Entre em contato com o administrador."
        })),
        _ => Json(json!({ "page": "home" })),
    }
}

pub async fn login() -> Json<Value> {
    Json(json!({ "page": "login" }))
}

pub async fn register() -> Json<Value> {
    Json(json!({ "page": "register" }))
}

pub async fn pending_approval() -> Json<Value> {
    Json(json!({ "page": "pending-approval" }))
}

pub async fn admin_dashboard() -> Json<Value> {
    Json(json!({ "page": "admin-dashboard" }))
}

pub async fn architect_dashboard() -> Json<Value> {
    Json(json!({ "page": "architect-dashboard" }))
}
