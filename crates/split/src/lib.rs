//! # pythia-split
//!
//! Cross-validation window generation for period-indexed series.
//!
//! [`make_splits`] carves one or more train/validation [`Split`]s out of a
//! series under a [`WindowPolicy`]:
//!
//! | Policy | Train window |
//! |--------|--------------|
//! | `Single` | everything before the final horizon |
//! | `Sliding` | fixed length, advancing by a step |
//! | `Expanding` | fixed start, end growing by a step |
//!
//! Splits hold index ranges only; the series values are never copied.

mod error;
mod windows;

pub use error::SplitError;
pub use windows::{Split, WindowPolicy, make_splits};
