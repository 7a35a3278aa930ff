use actix_web::{HttpResponse, web};

use crate::state::app_state::AppState;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let users = state.users.len();
    let links = state.links.read().len();

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "users": users,
        "links": links,
    }))
}
