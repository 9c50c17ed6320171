//! Candidate families and grid expansion.

use std::fmt;

use pythia_pipeline::{ParamValue, PipelineSpec};

use crate::error::GridError;

/// One candidate family: a base pipeline plus parameter axes to sweep.
///
/// Axes expand as a Cartesian product in insertion order, the first axis
/// varying slowest. A family with no axes contributes exactly its base
/// pipeline.
#[derive(Clone, Debug)]
pub struct FamilyDef {
    name: String,
    base: PipelineSpec,
    params: Vec<(String, Vec<ParamValue>)>,
}

impl FamilyDef {
    /// Creates a family around a base pipeline.
    pub fn new(name: impl Into<String>, base: PipelineSpec) -> Self {
        Self {
            name: name.into(),
            base,
            params: Vec::new(),
        }
    }

    /// Appends a parameter axis; `name` is the `step__param` qualified name.
    pub fn with_param(
        mut self,
        name: impl Into<String>,
        values: Vec<ParamValue>,
    ) -> Self {
        self.params.push((name.into(), values));
        self
    }

    /// Returns the family's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn point_count(&self) -> usize {
        self.params.iter().map(|(_, v)| v.len()).product()
    }
}

/// One fully bound grid point: a family plus a value per axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GridPoint {
    family: String,
    family_index: usize,
    values: Vec<(String, ParamValue)>,
}

impl GridPoint {
    /// Returns the owning family's name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the bound parameter values in axis order.
    pub fn values(&self) -> &[(String, ParamValue)] {
        &self.values
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.family)?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}

/// A search grid over one or more candidate families.
#[derive(Clone, Debug, Default)]
pub struct ParamGrid {
    families: Vec<FamilyDef>,
}

impl ParamGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a candidate family.
    pub fn with_family(mut self, family: FamilyDef) -> Self {
        self.families.push(family);
        self
    }

    /// Total number of grid points without expanding.
    pub fn point_count(&self) -> usize {
        self.families.iter().map(FamilyDef::point_count).sum()
    }

    /// Expands the grid into its full, deterministic point sequence.
    ///
    /// Points are ordered family by family; within a family the first axis
    /// varies slowest, the last fastest. The same grid always expands to the
    /// same sequence.
    ///
    /// # Errors
    ///
    /// [`GridError::EmptyGrid`] when no families are defined,
    /// [`GridError::EmptyDomain`] when any axis has no values.
    pub fn expand(&self) -> Result<Vec<GridPoint>, GridError> {
        if self.families.is_empty() {
            return Err(GridError::EmptyGrid);
        }
        let mut points = Vec::with_capacity(self.point_count());
        for (family_index, family) in self.families.iter().enumerate() {
            for (name, values) in &family.params {
                if values.is_empty() {
                    return Err(GridError::EmptyDomain {
                        family: family.name.clone(),
                        param: name.clone(),
                    });
                }
            }
            // Odometer over the axes, last axis fastest.
            let mut odometer = vec![0usize; family.params.len()];
            loop {
                let values = family
                    .params
                    .iter()
                    .zip(&odometer)
                    .map(|((name, axis), &i)| (name.clone(), axis[i].clone()))
                    .collect();
                points.push(GridPoint {
                    family: family.name.clone(),
                    family_index,
                    values,
                });
                let mut pos = family.params.len();
                loop {
                    if pos == 0 {
                        break;
                    }
                    pos -= 1;
                    odometer[pos] += 1;
                    if odometer[pos] < family.params[pos].1.len() {
                        break;
                    }
                    odometer[pos] = 0;
                }
                if odometer.iter().all(|&i| i == 0) {
                    break;
                }
            }
        }
        Ok(points)
    }

    /// Builds the concrete pipeline a grid point describes.
    ///
    /// # Errors
    ///
    /// [`GridError::ForeignPoint`] when the point was expanded from a
    /// different grid, [`GridError::Rejected`] when the family's pipeline
    /// refuses one of the point's values.
    pub fn realise(&self, point: &GridPoint) -> Result<PipelineSpec, GridError> {
        let family = self
            .families
            .get(point.family_index)
            .filter(|f| f.name == point.family)
            .ok_or_else(|| GridError::ForeignPoint {
                family: point.family.clone(),
            })?;
        let mut spec = family.base.clone();
        for (name, value) in &point.values {
            spec.set_param(name, value)
                .map_err(|source| GridError::Rejected {
                    family: family.name.clone(),
                    param: name.clone(),
                    source,
                })?;
        }
        Ok(spec)
    }
}
