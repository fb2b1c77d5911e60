use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = match docket_server::load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let ax = docket_server::build(&settings).await?;

    let addr = settings.addr();
    tracing::info!(%addr, bucket = %settings.s3.bucket, "[docket] starting");

    ax.listen(addr).await?;

    Ok(())
}
