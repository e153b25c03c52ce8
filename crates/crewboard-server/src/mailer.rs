use async_trait::async_trait;
use crewboard_api::ApiError;
use tracing::info;

/// Outbound mail seam. Delivery is an external collaborator; the
/// default implementation writes the message to the operational log,
/// which is also how tests observe reset tokens.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError>;
}

pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError> {
        info!(to = %to, subject = %subject, body = %body, "outbound email");
        Ok(())
    }
}
