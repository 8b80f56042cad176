use clap::Parser;
use tracing_subscriber::fmt;

use uploader::{cli::Args, log_filter, types::Environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let environment = Environment::from_env();

    // JSON logs for staging/production, plain text for development.
    // Logs go to stderr so stdout carries only the resulting URLs.
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(log_filter())
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(log_filter())
            .with_writer(std::io::stderr)
            .init();
    }

    let urls = uploader::run(args, &environment).await?;

    println!("{}", uploader::render_urls(&urls)?);

    Ok(())
}
