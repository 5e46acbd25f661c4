//! codereel turns source code into syntax-highlighted images and narrated demo videos.
//!
//! The core is a line tokenizer feeding a supersampled CPU canvas:
//!
//! - Tokenize each line with an ordered rule chain ([`Tokenizer`])
//! - Draw tokens in theme colors with a line-number gutter ([`CodeImageRenderer`])
//! - Downsample and encode to PNG/JPEG
//!
//! Around it sit batch jobs that drive `ffmpeg`, `ffprobe` and `say`: per-scene screenshots,
//! frame fitting, narration, still-image video assembly and gradient slideshows.
#![forbid(unsafe_code)]

mod assets;
mod encode;
mod foundation;
mod highlight;
mod pipeline;
mod render;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Fps, FrameIndex, FrameSize};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::assets::font::{FontFace, FontRole, LoadedFont, existing_candidates};
pub use crate::highlight::theme::{Theme, ThemeName};
pub use crate::highlight::token::{Token, TokenKind, join_tokens};
pub use crate::highlight::tokenizer::{PYTHON_BUILTINS, PYTHON_KEYWORDS, Rule, Tokenizer};

pub use crate::encode::audio::{SpeechOpts, probe_duration, synthesize_speech, transcode_to_mp3};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, validate_sink_config};
pub use crate::encode::segment::{StillSegment, VideoInfo, concat_segments, probe_video};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::tool::Tool;

pub use crate::render::code_image::CodeImageRenderer;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::layout::{CodeLayout, CodeStyle};
pub use crate::render::output::{
    FitGeometry, StillFormat, fit_geometry, fit_image, load_image, save_frame,
};
pub use crate::render::slide::{PreparedSlide, SlideKind, SlideRenderer};

pub use crate::pipeline::assemble::{AssembleOpts, assemble};
pub use crate::pipeline::batch::BatchReport;
pub use crate::pipeline::code::{
    DEFAULT_INPUT, image_title, output_file_name, parse_theme_selection, render_code_images,
};
pub use crate::pipeline::fit::{FitOpts, fit_directory};
pub use crate::pipeline::manifest::{
    Manifest, NarrationItem, NarrationManifest, SceneManifest, SceneSpec, SlideManifest,
    SlideSpec, VideoManifest, VideoScene,
};
pub use crate::pipeline::narrate::{NarrateOpts, NarrationClip, narrate};
pub use crate::pipeline::scenes::{render_scenes, scene_title, slice_lines};
pub use crate::pipeline::slides::{render_slides, render_slides_to_mp4};
