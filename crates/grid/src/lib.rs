//! # pythia-grid
//!
//! Hyperparameter grids over candidate pipeline families.
//!
//! A [`ParamGrid`] holds [`FamilyDef`]s, each pairing a base
//! [`PipelineSpec`](pythia_pipeline::PipelineSpec) with parameter axes.
//! [`ParamGrid::expand`] enumerates every [`GridPoint`] in a deterministic
//! order (families in insertion order, first axis slowest), and
//! [`ParamGrid::realise`] turns a point back into the concrete pipeline it
//! names. Expansion never fits anything; it is cheap enough to run eagerly
//! before a search starts.

mod error;
mod grid;

pub use error::GridError;
pub use grid::{FamilyDef, GridPoint, ParamGrid};
