use clap::Args;

use quill::http_server::api::client::ApiError;
use quill::http_server::api::v0::auth::register::RegisterRequest;

#[derive(Args, Debug, Clone)]
pub struct Register {
    /// Email address for the new account
    #[arg(long)]
    pub email: String,

    /// Display name
    #[arg(long)]
    pub username: String,

    /// Password (at least 8 characters)
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthRegisterError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Registration failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Register {
    type Error = AuthRegisterError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = RegisterRequest {
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        };

        let response = ctx.client.call(request).await?;
        let data = response
            .data
            .ok_or_else(|| AuthRegisterError::Failed("empty response".to_string()))?;

        Ok(format!(
            "Registered {} <{}>\ntoken: {}",
            data.user.username, data.user.email, data.token
        ))
    }
}
