//! Terminal dashboard for a Slurm job queue.
//!
//! Polls `squeue`, renders the jobs as an auto-sized scrollable table, and
//! cancels the selected job through a confirmation dialog.

pub mod app;
pub mod column;
pub mod dialog;
pub mod error;
pub mod export;
pub mod handlers;
pub mod jobs;
pub mod parser;
pub mod render;
pub mod state;
pub mod surface;
pub mod testing;
