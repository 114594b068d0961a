use tracing::{debug, trace};

use super::{CoxeterMatrix, ReflectionTable};
use crate::ConfigError;

/// Controls the numerical enumeration of minimal roots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSystemOptions {
    /// Two coefficients closer than this are considered equal.
    pub tolerance: f64,
    /// Enumeration is aborted with [`ConfigError::TooManyRoots`] once more roots are found.
    pub max_roots: usize,
}

impl Default for RootSystemOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_roots: 10_000,
        }
    }
}

/// The minimal roots of a Coxeter group together with the action of the simple reflections
/// on them. A root is minimal if it does not dominate any other positive root; there are only
/// finitely many of them for every Coxeter group (Brink and Howlett), and for finite groups they
/// are exactly the positive roots.
///
/// Roots are stored as coefficient vectors with respect to the simple roots, the first `rank`
/// of them being the simple roots themselves.
#[derive(Debug, Clone)]
pub struct MinimalRoots {
    roots: Vec<Vec<f64>>,
    table: ReflectionTable,
}

impl MinimalRoots {
    /// Enumerates the minimal roots of `matrix` with default options.
    pub fn of(matrix: &CoxeterMatrix) -> Result<Self, ConfigError> {
        Self::enumerate(matrix, RootSystemOptions::default())
    }

    /// Enumerates the minimal roots breadth-first, starting from the simple roots. For a
    /// minimal root `β` and a simple root `α_i` the reflection `s_i(β)` is
    /// - negative if `β = α_i`,
    /// - not minimal if `B(β, α_i) <= -1`, since it then dominates `α_i`,
    /// - `β` itself if `B(β, α_i) = 0`,
    /// - the minimal root `β - 2 B(β, α_i) α_i` otherwise.
    pub fn enumerate(matrix: &CoxeterMatrix, options: RootSystemOptions) -> Result<Self, ConfigError> {
        let rank = matrix.rank();
        let tol = options.tolerance;

        let mut roots: Vec<Vec<f64>> = (0..rank)
            .map(|i| (0..rank).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        let mut rows = Vec::with_capacity(rank);

        let mut current = 0;
        while current < roots.len() {
            let mut row = Vec::with_capacity(rank);
            for i in 0..rank {
                if current == i {
                    row.push(None);
                    continue;
                }
                let beta = &roots[current];
                let product: f64 = (0..rank)
                    .map(|j| beta[j] * matrix.bilinear_form(j, i))
                    .sum();

                if product <= -1.0 + tol {
                    row.push(None);
                } else if product.abs() < tol {
                    row.push(Some(current));
                } else {
                    let mut image = beta.clone();
                    image[i] -= 2.0 * product;
                    let position = match roots
                        .iter()
                        .position(|root| approx_eq(root, &image, tol))
                    {
                        Some(known) => known,
                        None => {
                            if roots.len() >= options.max_roots {
                                return Err(ConfigError::TooManyRoots(options.max_roots));
                            }
                            trace!("found minimal root {image:?}");
                            roots.push(image);
                            roots.len() - 1
                        }
                    };
                    row.push(Some(position));
                }
            }
            rows.push(row);
            current += 1;
        }

        debug!("enumerated {} minimal roots for rank {rank}", roots.len());
        let table = ReflectionTable::new(rows, rank)?;
        Ok(Self { roots, table })
    }

    /// The coefficient vectors of the minimal roots.
    pub fn roots(&self) -> &[Vec<f64>] {
        &self.roots
    }

    /// The number of minimal roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Only true for the trivial group of rank 0.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// The action of the simple reflections on the minimal roots.
    pub fn table(&self) -> &ReflectionTable {
        &self.table
    }

    /// Consumes `self` and returns only the reflection table.
    pub fn into_table(self) -> ReflectionTable {
        self.table
    }
}

fn approx_eq(left: &[f64], right: &[f64], tolerance: f64) -> bool {
    left.iter()
        .zip(right)
        .all(|(l, r)| (l - r).abs() < tolerance)
}
