//! Exoplanet survey: load an archive catalog, keep a curated set of planets,
//! summarise their physical columns and chart their distances.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod report;
pub mod state;
pub mod ui;
