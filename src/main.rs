use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bloodwork::config::AppConfig;
use bloodwork::crew::{AnalysisPipeline, CrewPipeline};
use bloodwork::{init_pool, routes, AppState, MIGRATOR};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let pool = init_pool(&config.database_url).await?;
    MIGRATOR.run(&pool).await?;
    info!(database_url = %config.database_url, "database ready");

    let pipeline: Arc<dyn AnalysisPipeline> = Arc::new(CrewPipeline::new(&config));

    let bind_addr = (config.host.clone(), config.port);
    let state = web::Data::new(AppState {
        pool,
        config,
        pipeline,
    });

    info!("listening on {}:{}", bind_addr.0, bind_addr.1);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
