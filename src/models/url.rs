#[derive(Debug, Clone)]
pub struct Link {
    pub alias: String,
    pub long_url: String,
    pub owner_id: String,
    pub created_at: i64,
    pub total_visits: u64,
    pub unique_visits: u64,
}

/// What a redirect through a link did to its counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitOutcome {
    pub long_url: String,
    pub first_visit: bool,
}

impl Link {
    pub fn new(alias: String, long_url: String, owner_id: String) -> Self {
        Self {
            alias,
            long_url,
            owner_id,
            created_at: chrono::Utc::now().timestamp_millis(),
            total_visits: 0,
            unique_visits: 0,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// Count a redirect. `first_visit` says whether the visitor is new to
    /// this link.
    pub fn register_visit(&mut self, first_visit: bool) {
        self.total_visits += 1;
        if first_visit {
            self.unique_visits += 1;
        }
    }
}
