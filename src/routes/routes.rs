use actix_web::web;

use crate::handlers::auth_handlers::{login, login_form, logout, register, register_form};
use crate::handlers::health_handlers::health_check;
use crate::handlers::url_handlers::{
    create_short_url, delete_short_url, get_url, get_user_urls, index, new_url_form,
    redirect_to_url, update_short_url,
};
use crate::middlewares::res_owner::LinkOwnership;

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
    // Public redirect, no login required
    cfg.route("/u/{id}", web::get().to(redirect_to_url));
    cfg.route("/health", web::get().to(health_check));

    cfg.service(
        web::resource("/login")
            .route(web::get().to(login_form))
            .route(web::post().to(login)),
    );
    cfg.service(
        web::resource("/register")
            .route(web::get().to(register_form))
            .route(web::post().to(register)),
    );
    cfg.route("/logout", web::post().to(logout));

    cfg.service(
        web::resource("/urls")
            .route(web::get().to(get_user_urls))
            .route(web::post().to(create_short_url)),
    );
    cfg.route("/urls.json", web::get().to(get_user_urls));
    // Must be registered ahead of /urls/{id}
    cfg.route("/urls/new", web::get().to(new_url_form));
    cfg.service(
        web::resource("/urls/{id}")
            .wrap(LinkOwnership {
                param_name: "id".to_string(),
            })
            .route(web::get().to(get_url))
            .route(web::put().to(update_short_url))
            .route(web::post().to(update_short_url)),
    );
    cfg.service(
        web::resource("/urls/{id}/delete")
            .wrap(LinkOwnership {
                param_name: "id".to_string(),
            })
            .route(web::post().to(delete_short_url))
            .route(web::delete().to(delete_short_url)),
    );
}
