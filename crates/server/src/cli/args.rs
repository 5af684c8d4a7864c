pub use clap::Parser;

use url::Url;

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Note-taking service and API client")]
pub struct Args {
    /// Base URL of the API server
    #[arg(long, global = true, default_value = "http://localhost:3000")]
    pub remote: Url,

    /// Bearer token for authenticated commands
    #[arg(long, global = true, env = "QUILL_TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}
