#![allow(clippy::needless_range_loop, clippy::manual_range_contains)]

//! lineart: photo to fillable line art
//!
//! This library turns photos into clean binary outlines that a flood fill
//! can color without leaking, and merges separately generated subject and
//! background outlines along a detected saliency mask.
//!
//! # Quick Start
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use lineart::{LineArtOptions, LineArtPreprocessor};
//!
//! let photo = RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255]));
//! let preprocessor = LineArtPreprocessor::new(LineArtOptions::new().working_size(32));
//! let outline = preprocessor.process(&photo).unwrap();
//!
//! // Nothing to trace: the page stays blank
//! assert!(outline.pixels().all(|p| p.0 == [255, 255, 255, 255]));
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//!                          RGBA photo
//!                              |
//!                              v
//!                     luminance over white
//!                              |
//!                              v
//!             resize (longest edge = working size,
//!                darkest sample when reducing)
//!                              |
//!                              v
//!                        Gaussian blur
//!                              |
//!               +--------------+--------------+
//!               |                             |
//!               v                             v
//!        Sobel magnitude               blurred <= dark cutoff
//!        >= threshold(strength)               |
//!               |                             |
//!               +------------ OR -------------+
//!                              |
//!                              v
//!                  polarity (invert if lines > 2:1)
//!                              |
//!                              v
//!                  despeckle (< 2 line neighbors)
//!                              |
//!                              v
//!                  dilate one ring ──► black on white
//! ```
//!
//! # Closed Outlines
//!
//! A thin dark stroke produces two parallel gradient ridges, one on each
//! side, with a zero-gradient valley on the stroke itself. The final
//! dilation merges both ridges and the valley into a single band, which is
//! what keeps the outline watertight for a 4-connected flood fill.
//!
//! Large photos are reduced to the working size by taking the darkest
//! sample of each block rather than averaging, so a stroke thinner than the
//! reduction factor still arrives as a fully dark line.
//!
//! # Luminance
//!
//! Every stage uses the same Rec. 601 luminance
//! ([`color::luminance`]) and composites alpha over white first, so a
//! transparent pixel always reads as paper.
//!
//! # Subject Masking
//!
//! [`detect_subject`] finds the salient foreground with a center-biased
//! gradient, a closing pass and real connected-component labeling (the
//! largest component wins). [`composite_subject`] then pastes subject line
//! art over background line art wherever the mask marks subject, copying
//! pixels without blending.

pub mod api;
pub mod bitmap;
pub mod color;
pub mod edge;
pub mod morphology;
pub mod preprocess;
pub mod raster;
pub mod subject;


pub use api::LineArtError;
pub use bitmap::Bitmap;
pub use edge::{gradient_magnitude, threshold_for_strength, Gradient};
pub use preprocess::{LineArtOptions, LineArtPreprocessor, StagedLineArt};
pub use subject::{
    composite_subject, detect_subject, largest_component, BoundingBox, Components,
    SubjectDetection, SubjectOptions,
};
