use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = api_relay_lib::Args::parse();
    api_relay_lib::run(args).await?;
    Ok(())
}
