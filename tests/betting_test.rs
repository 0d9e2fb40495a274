mod common;

use axum::http::StatusCode;
use common::{bet_slip, get, post, register, test_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_place_then_cash_out() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;

    let (status, bet) = post(&app, "/api/bets", Some(&token), bet_slip("50", "1.85", false)).await;
    assert_eq!(status, StatusCode::OK, "{}", bet);
    assert_eq!(bet["status"], "active");
    assert_eq!(bet["stake"], 50.00);
    assert_eq!(bet["odds"], 1.85);
    assert_eq!(bet["potentialWin"], 92.50);
    assert_eq!(bet["tournament"], "Premier League");
    assert!(bet["cashoutAmount"].is_null());

    let (_, me) = get(&app, "/api/users/me", Some(&token)).await;
    assert_eq!(me["balance"], 50.00);

    let bet_id = bet["id"].as_str().unwrap();
    let (status, body) = post(&app, &format!("/api/bets/{}/cashout", bet_id), Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["bet"]["status"], "cashout");
    assert_eq!(body["bet"]["cashoutAmount"], 69.38);
    assert!(body["bet"]["settledAt"].is_string());
    assert_eq!(body["user"]["balance"], 119.38);

    let (_, transactions) = get(&app, "/api/transactions/user", Some(&token)).await;
    let entries = transactions.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["type"], "cashout");
    assert_eq!(entries[0]["amount"], 69.38);
    assert_eq!(entries[0]["balanceAfter"], 119.38);
    assert_eq!(entries[1]["type"], "bet");
    assert_eq!(entries[1]["amount"], -50.00);
    assert_eq!(entries[1]["balanceAfter"], 50.00);
    assert_eq!(entries[1]["betId"], bet["id"]);
}

#[tokio::test]
async fn test_second_cashout_is_rejected() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;
    let (_, bet) = post(&app, "/api/bets", Some(&token), bet_slip("10", "2.00", false)).await;
    let uri = format!("/api/bets/{}/cashout", bet["id"].as_str().unwrap());

    let (status, _) = post(&app, &uri, Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, &uri, Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bet cannot be cashed out");

    let (_, me) = get(&app, "/api/users/me", Some(&token)).await;
    assert_eq!(me["balance"], 105.00);
}

#[tokio::test]
async fn test_live_bet_cannot_be_cashed_out() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;
    let (_, bet) = post(&app, "/api/bets", Some(&token), bet_slip("10", "2.00", true)).await;

    let (status, body) = post(
        &app,
        &format!("/api/bets/{}/cashout", bet["id"].as_str().unwrap()),
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Live bets cannot be cashed out");
}

#[tokio::test]
async fn test_cashout_of_someone_elses_bet() {
    let app = test_app().await;
    let (alice, _) = register(&app, "alice").await;
    let (bob, _) = register(&app, "bob").await;
    let (_, bet) = post(&app, "/api/bets", Some(&alice), bet_slip("10", "2.00", false)).await;

    let (status, body) = post(
        &app,
        &format!("/api/bets/{}/cashout", bet["id"].as_str().unwrap()),
        Some(&bob),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "You are not authorized to cashout this bet");

    let (_, me) = get(&app, "/api/users/me", Some(&bob)).await;
    assert_eq!(me["balance"], 100.00);
}

#[tokio::test]
async fn test_cashout_with_bad_ids() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;

    let (status, body) = post(&app, "/api/bets/not-a-uuid/cashout", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid bet ID format");

    let (status, body) = post(
        &app,
        "/api/bets/00000000-0000-0000-0000-000000000000/cashout",
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Bet not found");
}

#[tokio::test]
async fn test_insufficient_funds_leaves_no_trace() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;

    let (status, body) = post(&app, "/api/bets", Some(&token), bet_slip("100.01", "2.00", false)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient balance");

    let (_, me) = get(&app, "/api/users/me", Some(&token)).await;
    assert_eq!(me["balance"], 100.00);
    let (_, bets) = get(&app, "/api/bets/user", Some(&token)).await;
    assert_eq!(bets, json!([]));
    let (_, transactions) = get(&app, "/api/transactions/user", Some(&token)).await;
    assert_eq!(transactions, json!([]));
}

#[tokio::test]
async fn test_whole_balance_can_be_staked() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;

    let (status, _) = post(&app, "/api/bets", Some(&token), bet_slip("100", "1.50", false)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, me) = get(&app, "/api/users/me", Some(&token)).await;
    assert_eq!(me["balance"], 0.00);
}

#[tokio::test]
async fn test_slip_validation() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;

    let cases: Vec<(Value, &str)> = vec![
        (bet_slip("10", "1.00", false), "odds"),
        (bet_slip("10", "1.855", false), "odds"),
        (bet_slip("0", "2.00", false), "stake"),
        (bet_slip("10.001", "2.00", false), "stake"),
        (
            json!({"matchId": "", "matchName": "A vs B", "selection": "draw", "odds": "2", "stake": "1"}),
            "matchId",
        ),
        (
            json!({"matchId": "1", "matchName": "A vs B", "selection": "draw", "odds": "2"}),
            "stake",
        ),
    ];

    for (slip, field) in cases {
        let (status, body) = post(&app, "/api/bets", Some(&token), slip.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", slip);
        assert!(
            body["error"].as_str().unwrap().starts_with(field),
            "expected {} error, got {}",
            field,
            body
        );
    }

    let (_, me) = get(&app, "/api/users/me", Some(&token)).await;
    assert_eq!(me["balance"], 100.00);
}

#[tokio::test]
async fn test_bets_listed_newest_first() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;

    let (_, first) = post(&app, "/api/bets", Some(&token), bet_slip("1", "2.00", false)).await;
    let (_, second) = post(&app, "/api/bets", Some(&token), bet_slip("2", "2.00", false)).await;

    let (status, bets) = get(&app, "/api/bets/user", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&Value> = bets.as_array().unwrap().iter().map(|b| &b["id"]).collect();
    assert_eq!(ids, vec![&second["id"], &first["id"]]);
}

#[tokio::test]
async fn test_concurrent_placements_never_overdraw() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let app = app.clone();
        let token = token.clone();
        tasks.spawn(async move {
            post(&app, "/api/bets", Some(&token), bet_slip("10", "2.00", false)).await.0
        });
    }

    let mut accepted = 0;
    while let Some(status) = tasks.join_next().await {
        match status.unwrap() {
            StatusCode::OK => accepted += 1,
            StatusCode::BAD_REQUEST => {}
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(accepted, 10);

    let (_, me) = get(&app, "/api/users/me", Some(&token)).await;
    assert_eq!(me["balance"], 0.00);
    let (_, transactions) = get(&app, "/api/transactions/user", Some(&token)).await;
    assert_eq!(transactions.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_concurrent_cashouts_pay_once() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;
    let (_, bet) = post(&app, "/api/bets", Some(&token), bet_slip("50", "1.85", false)).await;
    let uri = format!("/api/bets/{}/cashout", bet["id"].as_str().unwrap());

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..10 {
        let app = app.clone();
        let token = token.clone();
        let uri = uri.clone();
        tasks.spawn(async move { post(&app, &uri, Some(&token), json!({})).await });
    }

    let mut paid = 0;
    while let Some(result) = tasks.join_next().await {
        let (status, body) = result.unwrap();
        match status {
            StatusCode::OK => paid += 1,
            StatusCode::BAD_REQUEST => assert_eq!(body["error"], "Bet cannot be cashed out"),
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(paid, 1);

    let (_, me) = get(&app, "/api/users/me", Some(&token)).await;
    assert_eq!(me["balance"], 119.38);
    let (_, transactions) = get(&app, "/api/transactions/user", Some(&token)).await;
    let cashouts = transactions
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["type"] == "cashout")
        .count();
    assert_eq!(cashouts, 1);
}

#[tokio::test]
async fn test_amounts_are_sent_as_numbers() {
    let app = test_app().await;
    let (token, user) = register(&app, "alice").await;
    assert!(user["balance"].is_number());

    let (_, bet) = post(&app, "/api/bets", Some(&token), bet_slip("50", "1.85", false)).await;
    for field in ["odds", "stake", "potentialWin"] {
        assert!(bet[field].is_number(), "{} should be a number", field);
    }

    let (_, transactions) = get(&app, "/api/transactions/user", Some(&token)).await;
    assert_eq!(transactions[0]["amount"], -50.0);
    assert_eq!(transactions[0]["balanceAfter"], 50.0);
}

#[tokio::test]
async fn test_rankings_sorted_ascending() {
    let app = test_app().await;
    let (alice, _) = register(&app, "alice").await;
    register(&app, "bob").await;
    let (carol, _) = register(&app, "carol").await;

    post(&app, "/api/bets", Some(&alice), bet_slip("30", "2.00", false)).await;
    post(&app, "/api/bets", Some(&carol), bet_slip("60", "2.00", false)).await;

    let (status, rankings) = get(&app, "/api/userrankings/sorted", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        rankings,
        json!([
            {"username": "carol", "balance": 40.0, "coins": 40.0},
            {"username": "alice", "balance": 70.0, "coins": 70.0},
            {"username": "bob", "balance": 100.0, "coins": 100.0}
        ])
    );
}
