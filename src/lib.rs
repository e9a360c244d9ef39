//! Thumbnails images dropped into an S3 bucket: each `*_full` upload is
//! downloaded, scaled to fit a bounding box, and written back next to the
//! original under the stripped key.

pub mod config;
pub mod error;
pub mod keys;
pub mod pipeline;
pub mod scale;
pub mod storage;
