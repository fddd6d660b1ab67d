use lava_server::utils::logger::init_logger_with_file;
use lava_server::{Config, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    if config.is_production() && config.base_url().contains("localhost") {
        tracing::warn!(
            base_url = %config.base_url(),
            "PUBLIC_BASE_URL points at localhost, short links will not resolve for others"
        );
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.database_url,
        work_dir = %config.work_dir,
        "Starting LAVA server"
    );

    Server::new(config).run().await
}
