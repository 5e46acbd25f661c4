//! Batch jobs: code images, scene screenshots, frame fitting, narration, assembly, slideshows.

pub(crate) mod assemble;
pub(crate) mod batch;
pub(crate) mod code;
pub(crate) mod fit;
pub(crate) mod manifest;
pub(crate) mod narrate;
pub(crate) mod scenes;
pub(crate) mod slides;
