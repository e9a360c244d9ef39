use aws_config::BehaviorVersion;
use aws_lambda_events::event::s3::S3Event;
use aws_sdk_s3::Client;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

use image_thumbnailer::config::Config;
use image_thumbnailer::pipeline;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        // CloudWatch records the ingestion time already.
        .without_time()
        .init();

    let config = Config::from_env()?;

    // One client for the lifetime of the process, shared across
    // invocations by reference.
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = Client::new(&aws_config);

    run(service_fn(|event: LambdaEvent<S3Event>| {
        pipeline::handle_event(event, &client, &config)
    }))
    .await
}
