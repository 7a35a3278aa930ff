pub mod auth_handlers;
pub mod health_handlers;
pub mod url_handlers;

use actix_web::http::header;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, HttpResponseBuilder};

/// 302 to `location`; callers may still attach cookies before finishing.
pub(crate) fn redirect(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.append_header((header::LOCATION, location.to_string()));
    builder
}

pub(crate) fn html_page(page: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page)
}
