//! Unit tests for LoggingMiddleware and AuthMiddleware.

use crate::{AuthMiddleware, LoggingMiddleware};
use chrono::Utc;
use gatebot_core::{
    AdminSet, Chat, CommandInvocation, CommandOutcome, Message, Middleware, User,
};

fn sample_invocation(user_id: i64, command: &str) -> CommandInvocation {
    let message = Message {
        id: "msg-1".to_string(),
        user: User {
            id: user_id,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
            is_bot: false,
        },
        chat: Chat::new(123, "private"),
        content: format!("/{}", command),
        created_at: Utc::now(),
    };
    CommandInvocation::parse(&message, None).expect("sample message must parse")
}

#[tokio::test]
async fn test_logging_middleware_before_continues() {
    let mw = LoggingMiddleware;
    let invocation = sample_invocation(1, "ping");
    let result = mw.before(&invocation).await;
    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[tokio::test]
async fn test_logging_middleware_after_ok() {
    let mw = LoggingMiddleware;
    let invocation = sample_invocation(1, "ping");
    let outcome = CommandOutcome::Reply("pong".to_string());
    let result = mw.after(&invocation, &outcome).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_auth_middleware_allows_admin() {
    let admins = AdminSet::new(100);
    admins.add(200);
    let mw = AuthMiddleware::new(admins);
    let result = mw.before(&sample_invocation(100, "ping")).await;
    assert!(result.unwrap());
}

#[tokio::test]
async fn test_auth_middleware_drops_non_admin() {
    let mw = AuthMiddleware::new(AdminSet::new(100));
    // Not an error, just a stopped chain.
    let result = mw.before(&sample_invocation(999, "ping")).await;
    assert!(result.is_ok());
    assert!(!result.unwrap());
}

#[tokio::test]
async fn test_auth_middleware_sees_admin_changes() {
    let admins = AdminSet::new(100);
    let mw = AuthMiddleware::new(admins.clone());

    assert!(!mw.before(&sample_invocation(300, "ping")).await.unwrap());
    admins.add(300);
    assert!(mw.before(&sample_invocation(300, "ping")).await.unwrap());
    admins.remove(300).unwrap();
    assert!(!mw.before(&sample_invocation(300, "ping")).await.unwrap());
}

#[tokio::test]
async fn test_auth_middleware_after_ok() {
    let mw = AuthMiddleware::new(AdminSet::new(100));
    let invocation = sample_invocation(100, "ping");
    let result = mw.after(&invocation, &CommandOutcome::Done).await;
    assert!(result.is_ok());
}
