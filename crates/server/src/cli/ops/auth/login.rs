use clap::Args;

use quill::http_server::api::client::ApiError;
use quill::http_server::api::v0::auth::login::LoginRequest;

#[derive(Args, Debug, Clone)]
pub struct Login {
    /// Email address of the account
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthLoginError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Login failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Login {
    type Error = AuthLoginError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        };

        let response = ctx.client.call(request).await?;
        let data = response
            .data
            .ok_or_else(|| AuthLoginError::Failed("empty response".to_string()))?;

        Ok(format!("token: {}", data.token))
    }
}
