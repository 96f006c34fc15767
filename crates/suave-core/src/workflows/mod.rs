//! # Workflows Module
//!
//! End-to-end analyses that combine the engines into the quantities usually
//! reported for one kind of system.
//!
//! ## Architecture
//!
//! - **Bilayer Workflow** ([`bilayer`]) - Area, order parameter, thickness and topography of a
//!   planar bilayer described by the Cartesian grids of its two leaflets
//! - **Vesicle Workflow** ([`vesicle`]) - Area, enclosed volume, order parameter, radial
//!   thickness, inertia tensors and an optional radial density profile of a spherical vesicle
//! - **Series Workflow** ([`series`]) - Statistical summary, density histogram, Gaussian overlay
//!   and autocorrelation of any scalar series
//!
//! Every workflow takes an [`AnalysisConfig`](crate::engine::config::AnalysisConfig) or one of
//! its sections, and returns a plain result struct that the caller is free to serialize or print.

pub mod bilayer;
pub mod series;
pub mod vesicle;
