use tracing_subscriber::EnvFilter;

mod actors;
mod capture;
mod config;
mod features;
mod pipeline;
mod runner;

use actors::{LogSink, OverlayActor, ProximityAlert, RecordActor};
use config::Config;
use features::{CameraDistance, ChainDistance, ClosestApproach};
use pipeline::Pipeline;
use runner::Runner;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("camflow=debug".parse()?))
        .init();

    let config = Config::load()?;

    let mut builder = Pipeline::builder()
        .feature(ChainDistance)
        .feature(CameraDistance)
        .feature(ClosestApproach);

    if config.overlay.enabled {
        builder = builder.actor(OverlayActor::new(Box::new(LogSink::default())));
    }
    if config.record.enabled {
        let file = std::fs::File::create(&config.record.path)?;
        builder = builder.actor(RecordActor::new(file, config.record.labels.clone()));
    }
    if config.alert.enabled {
        builder = builder.actor(ProximityAlert::new(config.alert.min_distance));
    }

    let pipeline = builder.build()?;
    tracing::info!(
        features = pipeline.feature_count(),
        actors = pipeline.actor_count(),
        tracking = pipeline.needs_tracking(),
        "pipeline validated"
    );

    let source = capture::open_source(&config.camera, pipeline.needs_tracking())?;

    let runner = Runner::new(pipeline, source);
    runner
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}
