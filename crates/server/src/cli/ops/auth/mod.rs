use clap::{Args, Subcommand};

pub mod login;
pub mod me;
pub mod register;

use crate::cli::op::Op;

crate::command_enum! {
    (Register, register::Register),
    (Login, login::Login),
    (Me, me::Me),
}

pub type AuthCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Auth {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[async_trait::async_trait]
impl Op for Auth {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
