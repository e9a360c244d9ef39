//! Per-record orchestration: a pure planning step that resolves keys and
//! eligibility, then the download → scale → upload sequence, fail-fast.

use aws_lambda_events::event::s3::S3Event;
use aws_sdk_s3::Client;
use lambda_runtime::LambdaEvent;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::PipelineError;
use crate::keys::{self, KeyClass, OutputFormat};
use crate::scale;
use crate::storage;

/// One eligible record, fully resolved: where to read, where to write,
/// what to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailJob {
    pub source_bucket: String,
    pub source_key: String,
    pub destination_bucket: String,
    pub destination_key: String,
    pub format: OutputFormat,
}

/// Outcome of planning one record. The skip variants end the record with
/// no storage calls at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Process(ThumbnailJob),
    SkipUnsupported { key: String, extension: String },
    SkipMissingExtension { key: String },
}

/// Resolves keys and eligibility for one record. Pure; no I/O.
pub fn plan(config: &Config, source_bucket: &str, raw_key: &str) -> Plan {
    let source_key = keys::decode_object_key(raw_key);
    match keys::classify(&source_key) {
        KeyClass::MissingExtension => Plan::SkipMissingExtension { key: source_key },
        KeyClass::Unsupported { extension } => Plan::SkipUnsupported {
            key: source_key,
            extension,
        },
        KeyClass::Image(format) => {
            // Thumbnails land in the source bucket; only the key changes.
            let destination_key = keys::destination_key(&source_key, &config.full_size_token);
            Plan::Process(ThumbnailJob {
                source_bucket: source_bucket.to_string(),
                source_key,
                destination_bucket: source_bucket.to_string(),
                destination_key,
                format,
            })
        }
    }
}

/// The three sequential steps. A failing step leaves everything after it
/// untouched; in particular the destination is never written when the
/// transform fails.
async fn execute(client: &Client, config: &Config, job: &ThumbnailJob) -> Result<(), PipelineError> {
    let fetched = storage::fetch_object(client, &job.source_bucket, &job.source_key).await?;

    let thumbnail =
        scale::scale_to_fit(&fetched.body, job.format, config.max_width, config.max_height)
            .map_err(|source| PipelineError::Transform {
                key: job.source_key.clone(),
                source,
            })?;

    storage::publish_object(
        client,
        &job.destination_bucket,
        &job.destination_key,
        thumbnail,
        fetched.content_type,
    )
    .await
}

/// Processes one record to completion, logging one consolidated line for
/// the terminal state.
pub async fn process_record(
    client: &Client,
    config: &Config,
    source_bucket: &str,
    raw_key: &str,
) -> Result<(), PipelineError> {
    match plan(config, source_bucket, raw_key) {
        Plan::SkipMissingExtension { key } => {
            warn!("unable to infer image type for key {key}");
            Ok(())
        }
        Plan::SkipUnsupported { key, extension } => {
            info!("skipping non-image {key} ({extension})");
            Ok(())
        }
        Plan::Process(job) => match execute(client, config, &job).await {
            Ok(()) => {
                info!(
                    "successfully resized {}/{} and uploaded to {}/{}",
                    job.source_bucket, job.source_key, job.destination_bucket, job.destination_key
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "unable to resize {}/{} and upload to {}/{}: {err}",
                    job.source_bucket, job.source_key, job.destination_bucket, job.destination_key
                );
                Err(err)
            }
        },
    }
}

/// Lambda handler body: fans out over every record in the batch. A failing
/// record does not stop the ones after it, but the first failure is
/// returned so the runtime's retry policy sees it.
pub async fn handle_event(
    event: LambdaEvent<S3Event>,
    client: &Client,
    config: &Config,
) -> Result<(), lambda_runtime::Error> {
    let mut first_failure: Option<PipelineError> = None;

    for record in event.payload.records {
        let Some(bucket) = record.s3.bucket.name else {
            warn!("event record is missing a bucket name");
            continue;
        };
        let Some(key) = record.s3.object.key else {
            warn!("event record is missing an object key");
            continue;
        };

        if let Err(err) = process_record(client, config, &bucket, &key).await {
            first_failure.get_or_insert(err);
        }
    }

    match first_failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
