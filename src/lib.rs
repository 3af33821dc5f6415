//! Parametric **hydrofoil wing** generation: an airfoil cross-section, a span-wise
//! chord-distribution law, washout/anhedral transforms, embedded spar channels,
//! hollow-shell cavities, and a build-volume splitter with self-aligning connectors.
//!
//! The crate produces ordered stacks of closed 3D [`Profile`]s and drives an opaque
//! solid-modeling backend through the [`SolidKernel`](traits::SolidKernel) trait
//! (loft, booleans, affine transforms). It performs no I/O and no meshing itself.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **offset**: use `geo-buf` for the inward offsets that carve hollow shells
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to evaluate wing slices concurrently

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod airfoil;
pub mod errors;
pub mod float_types;
pub mod profile;
pub mod spar;
pub mod split;
pub mod traits;
pub mod wing;

#[cfg(feature = "offset")]
pub mod shell;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use airfoil::{AirfoilPath, AirfoilTable};
pub use profile::Profile;
pub use wing::{WingConfig, build_wing_solid, wing_profiles};
