use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{money, User};
use crate::ports::{RepositoryResult, UserRepository};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub username: String,
    #[schema(value_type = f64, example = 100.00)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub balance: BigDecimal,
    /// Same value as `balance`, under the name leaderboard clients read.
    #[schema(value_type = f64, example = 100.00)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub coins: BigDecimal,
}

/// Every user, lowest balance first. Ties keep the repository's order.
pub async fn sorted_by_balance(users: &dyn UserRepository) -> RepositoryResult<Vec<RankingEntry>> {
    let all = users.list_all().await?;
    Ok(rank(all))
}

fn rank(mut users: Vec<User>) -> Vec<RankingEntry> {
    users.sort_by(|a, b| a.balance.cmp(&b.balance));
    users
        .into_iter()
        .map(|u| RankingEntry {
            username: u.username,
            coins: u.balance.clone(),
            balance: u.balance,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn user(name: &str, balance: &str) -> User {
        let mut u = User::new(format!("{}@example.com", name), name.to_string(), "h".to_string());
        u.balance = BigDecimal::from_str(balance).unwrap();
        u
    }

    #[test]
    fn test_rank_ascending_and_stable() {
        let ranked = rank(vec![
            user("carol", "150.00"),
            user("alice", "20.50"),
            user("bob", "150.00"),
            user("dave", "0.00"),
        ]);

        let names: Vec<&str> = ranked.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["dave", "alice", "carol", "bob"]);
    }

    #[test]
    fn test_entries_only_expose_username_and_coins() {
        let ranked = rank(vec![user("alice", "20.50")]);
        assert_eq!(
            serde_json::to_string(&ranked[0]).unwrap(),
            r#"{"username":"alice","balance":20.50,"coins":20.50}"#
        );
    }
}
