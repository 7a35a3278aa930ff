use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::url::Link;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UrlRequest {
    #[serde(rename = "longURL")]
    #[validate(
        url(message = "Please enter a valid URL, including http:// or https://"),
        custom(function = "no_control_characters")
    )]
    pub long_url: String,
}

// URL parsing silently drops tabs and newlines, but a Location header cannot
// carry them
fn no_control_characters(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(ValidationError::new("control_characters")
            .with_message(Cow::Borrowed("URL must not contain control characters")));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponse {
    pub id: String,
    pub long_url: String,
    pub short_url: String,
    pub created_at: i64,
    pub total_visits: u64,
    pub unique_visits: u64,
}

impl From<&Link> for UrlResponse {
    fn from(link: &Link) -> Self {
        Self {
            id: link.alias.clone(),
            long_url: link.long_url.clone(),
            short_url: format!("/u/{}", link.alias),
            created_at: link.created_at,
            total_visits: link.total_visits,
            unique_visits: link.unique_visits,
        }
    }
}
