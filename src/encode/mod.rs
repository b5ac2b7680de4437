//! JPEG output for strips and snapshots.

mod jpeg;

pub use jpeg::{STRIP_JPEG_QUALITY, StripArtifact, artifact_file_name, encode_rgb_jpeg};
