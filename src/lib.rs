//! # Galaxy Viewer
//!
//! An animated galaxy scene viewer built with Rust and wgpu.
//!
//! ## Features
//!
//! - **Procedural point fields**: a glowing particle core (sphere shell) and an
//!   orbiting dust ring (flattened annulus), 10 000 points each
//! - **Selectable update policies**: rigid rotation, shader-driven wave,
//!   direct per-point jitter
//! - **Rendering**: instanced point sprites with wgpu, bloom post-processing
//! - **Orbit controls**: pointer-drag orbit with inertial damping, wheel dolly
//! - **Ambience**: background starfield image and looping background music,
//!   unlocked on the first pointer gesture
//!
//! ## Architecture Design
//!
//! The generator/updater core is pure and never touches the GPU: the
//! [`scene::Scene`] context owns the point fields and advances them from a
//! single `tick(elapsed)` entry point, so everything below the render shell
//! is testable without a window or a display-refresh driver.
//!
//! ### Example
//!
//! ```no_run
//! use galaxy_viewer::core::Engine;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Engine::run()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: engine entry point, animation clock and error types
//! - [`particles`]: point-field generator and animation updaters
//! - [`scene`]: the application context tying both fields together
//! - [`render`]: wgpu renderer, orbit camera and bloom post-processing
//! - [`assets`]: background image loading
//! - [`audio`]: background music driver
//! - [`config`]: TOML configuration

/// Asset loading for the background starfield image
pub mod assets;
/// Background music playback
pub mod audio;
/// Configuration system
pub mod config;
/// Core functionality including the main loop and error types
pub mod core;
/// Procedural point-field generation and per-frame update policies
pub mod particles;
/// Rendering with wgpu: point pipelines, orbit camera, bloom
pub mod render;
/// The animated scene context
pub mod scene;
