use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Join between a user and a team id from the static team catalog.
#[derive(Debug, Clone)]
pub struct FavoriteTeam {
    pub id: Uuid,
    pub user_id: Uuid,
    pub team_id: String,
    pub created_at: DateTime<Utc>,
}

impl FavoriteTeam {
    pub fn new(user_id: Uuid, team_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            team_id,
            created_at: Utc::now(),
        }
    }
}
