//! Pipeline services
//!
//! One module per stage of the linear pipeline:
//! ingest → decode → extract → normalize → classify.

pub mod audio_loader;
pub mod classifier;
pub mod features;
pub mod ingest;
pub mod scaler;
