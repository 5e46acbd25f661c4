//! Encoding: streaming frames into `ffmpeg`, still-image segments, and audio helpers.

pub(crate) mod audio;
pub(crate) mod ffmpeg;
pub(crate) mod segment;
pub(crate) mod sink;
pub(crate) mod tool;
