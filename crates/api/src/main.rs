use anyhow::Context;

use storefront_infra::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    storefront_observability::init();

    let settings = Settings::from_env()?;
    let app = storefront_api::app::build_app(&settings);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        image_dir = %settings.image_dir().display(),
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
