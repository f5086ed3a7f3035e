//! Wiremorph renders a seeded 3D point cloud as a wireframe that morphs onto a 2D silhouette.
//!
//! A run builds a nearest-neighbor graph over the cloud once, matches its vertices to points of
//! a bitmap silhouette by walking the graph, and then renders one frame per time sample through
//! a perspective camera that follows a cubic Bezier path:
//!
//! - Configure a [`SceneConfig`] (JSON via serde, every field defaulted)
//! - Drive a [`Generator`] through setup, pattern processing and per-sample rendering
//! - Render sequences with [`render_sequence`] or straight into an MP4 with [`render_to_mp4`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod camera;
pub(crate) mod cloud;
pub(crate) mod encode;
pub(crate) mod generator;
pub(crate) mod linalg;
pub(crate) mod morph;
pub(crate) mod pattern;
pub(crate) mod pipeline;
pub(crate) mod raster;
pub(crate) mod scene;

pub use crate::foundation::core::{Canvas, Color};
pub use crate::foundation::error::{WireError, WireResult};
pub use crate::foundation::math::{lerp, map_range};
pub use crate::foundation::rng::Rng64;

pub use crate::linalg::bezier::Bezier;
pub use crate::linalg::edge::Edge;
pub use crate::linalg::matrix::Matrix;
pub use crate::linalg::vector::{Vector2F, Vector3F};

pub use crate::camera::path::path_offset;
pub use crate::camera::projection::{CameraFrame, Projected};
pub use crate::cloud::builder::{CloudParams, EdgeRef, PointCloud};
pub use crate::encode::ffmpeg::{EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::generator::Generator;
pub use crate::morph::correspondence::{Correspondence, PatternProjector};
pub use crate::morph::interp::MorphState;
pub use crate::pattern::mask::PatternMask;
pub use crate::pattern::silhouette::Silhouette;
pub use crate::pipeline::{FrameClock, RenderToMp4Opts, render_sequence, render_to_mp4};
pub use crate::raster::clip::{clip_segment, rect_intersections, segment_intersection};
pub use crate::raster::draw::{RenderStats, draw_edges};
pub use crate::raster::line::bresenham;
pub use crate::raster::surface::{FrameRgb, PixelSurface};
pub use crate::scene::config::{BoundingBox, CameraConfig, PatternTarget, SceneConfig};
pub use crate::scene::ease::Ease;
pub use crate::scene::schedule::{MorphSchedule, MorphWindow};

/// Correspondence solver stages, exposed for inspection and testing.
pub mod correspondence {
    pub use crate::morph::correspondence::{condense, prune_edges, solve};
}
