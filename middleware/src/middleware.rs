use async_trait::async_trait;
use gatebot_core::{AdminSet, CommandInvocation, CommandOutcome, Middleware, Result};
use tracing::{debug, info, instrument, warn};

/// Logs each command invocation in before() and the outcome in after(); always continues.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, invocation))]
    async fn before(&self, invocation: &CommandInvocation) -> Result<bool> {
        info!(
            user_id = invocation.message.user.id,
            username = %invocation.message.user.username.as_deref().unwrap_or("unknown"),
            command = %invocation.command,
            args = %invocation.args,
            "Received command"
        );
        Ok(true)
    }

    #[instrument(skip(self, invocation, outcome))]
    async fn after(&self, invocation: &CommandInvocation, outcome: &CommandOutcome) -> Result<()> {
        debug!(
            message_id = %invocation.message.id,
            command = %invocation.command,
            outcome = ?outcome,
            "Processed command"
        );
        Ok(())
    }
}

/// Stops the chain for users that are not in the admin allow-list.
///
/// The invocation is dropped silently: no reply is sent and no error is
/// raised, only a single warning naming the requester and the attempted
/// command. Holds a live [`AdminSet`] view, so admins added or removed after
/// registration take effect immediately.
pub struct AuthMiddleware {
    admins: AdminSet,
}

impl AuthMiddleware {
    pub fn new(admins: AdminSet) -> Self {
        Self { admins }
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    #[instrument(skip(self, invocation))]
    async fn before(&self, invocation: &CommandInvocation) -> Result<bool> {
        let user = &invocation.message.user;
        if self.admins.contains(user.id) {
            debug!(user_id = user.id, command = %invocation.command, "User authorized");
            Ok(true)
        } else {
            warn!(
                user_id = user.id,
                username = %user.username.as_deref().unwrap_or("unknown"),
                first_name = %user.first_name.as_deref().unwrap_or(""),
                last_name = %user.last_name.as_deref().unwrap_or(""),
                is_bot = user.is_bot,
                command = %invocation.command,
                "Unauthorized access denied"
            );
            Ok(false)
        }
    }
}
