use clap::Args;

use quill::http_server::api::client::ApiError;
use quill::http_server::api::v0::auth::me::MeRequest;

#[derive(Args, Debug, Clone)]
pub struct Me;

#[derive(Debug, thiserror::Error)]
pub enum AuthMeError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Profile lookup failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Me {
    type Error = AuthMeError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(MeRequest).await?;
        let user = response
            .data
            .ok_or_else(|| AuthMeError::Failed("empty response".to_string()))?;

        Ok(format!(
            "{} <{}>\nid: {}",
            user.username, user.email, user.id
        ))
    }
}
