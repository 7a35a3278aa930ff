use actix_web::cookie::{Cookie, SameSite, time};

pub const SESSION_COOKIE: &str = "tinyapp_session";
pub const VISITOR_COOKIE: &str = "tinyapp_visitor";

#[derive(Debug, Clone)]
pub struct CookieBuilder {
    secure: bool,
    session_ttl: chrono::Duration,
}

impl CookieBuilder {
    pub fn new(secure: bool, session_ttl: chrono::Duration) -> Self {
        Self {
            secure,
            session_ttl,
        }
    }

    fn build_cookie_base(&self, name: &'static str, value: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(name, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        cookie
    }

    pub fn build_session_cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = self.build_cookie_base(SESSION_COOKIE, token);
        cookie.set_max_age(time::Duration::seconds(self.session_ttl.num_seconds()));
        cookie
    }

    pub fn build_expired_session_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.build_cookie_base(SESSION_COOKIE, String::new());
        cookie.make_removal();
        cookie
    }

    /// No Max-Age: the browser forgets the visitor when its session ends.
    pub fn build_visitor_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(VISITOR_COOKIE, token)
    }
}
