//! Thin wrappers over the S3 client: one blocking read, one blocking
//! write, each a single attempt.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;

use crate::error::{BoxError, PipelineError};

/// A fully buffered source object with its declared content-type.
pub struct FetchedObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Downloads the whole object into memory.
pub async fn fetch_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<FetchedObject, PipelineError> {
    let fetch_err = |source: BoxError| PipelineError::Fetch {
        bucket: bucket.to_string(),
        key: key.to_string(),
        source,
    };

    let response = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|err| fetch_err(Box::new(aws_sdk_s3::Error::from(err))))?;

    let content_type = response.content_type().map(str::to_string);
    let body = response
        .body
        .collect()
        .await
        .map_err(|err| fetch_err(Box::new(err)))?
        .into_bytes()
        .to_vec();

    Ok(FetchedObject { body, content_type })
}

/// Creates or overwrites the destination object with the passed-through
/// content-type and a public-read ACL.
pub async fn publish_object(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<String>,
) -> Result<(), PipelineError> {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .set_content_type(content_type)
        .acl(ObjectCannedAcl::PublicRead)
        .send()
        .await
        .map_err(|err| PipelineError::Publish {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: Box::new(aws_sdk_s3::Error::from(err)),
        })?;

    Ok(())
}
