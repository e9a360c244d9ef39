pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Terminal failure classes of a single thumbnail job. All of them stop
/// the pipeline at the failing step; classification skips are not errors
/// and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetching s3://{bucket}/{key} failed: {source}")]
    Fetch {
        bucket: String,
        key: String,
        source: BoxError,
    },

    #[error("transforming {key} failed: {source}")]
    Transform {
        key: String,
        source: image::ImageError,
    },

    #[error("publishing s3://{bucket}/{key} failed: {source}")]
    Publish {
        bucket: String,
        key: String,
        source: BoxError,
    },
}
