//! Error types for the pythia-grid crate.

use pythia_pipeline::PipelineError;

/// Error type for all fallible operations in the pythia-grid crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GridError {
    /// Returned when the grid holds no candidate families.
    #[error("grid has no candidate families")]
    EmptyGrid,

    /// Returned when a parameter axis has no values to enumerate.
    #[error("family {family}: parameter {param} has an empty value list")]
    EmptyDomain {
        /// Name of the family.
        family: String,
        /// Qualified parameter name.
        param: String,
    },

    /// Returned when a grid point does not belong to this grid.
    #[error("grid point {family} does not belong to this grid")]
    ForeignPoint {
        /// Family name the point claims.
        family: String,
    },

    /// Returned when a grid value cannot be written into the family's
    /// pipeline.
    #[error("family {family}: parameter {param} rejected by pipeline")]
    Rejected {
        /// Name of the family.
        family: String,
        /// Qualified parameter name.
        param: String,
        /// The underlying pipeline error.
        #[source]
        source: PipelineError,
    },
}
