use crate::ConfigError;

use super::{CoxeterMatrix, MinimalRoots, RootSystemOptions};

/// The action of the simple reflections on a finite set of roots: entry `(root, generator)` is
/// the index of the image of `root` under the reflection `generator`, or `None` if the image
/// leaves the set. The first `rank` roots are the simple roots, so root `i` is `α_i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReflectionTable {
    rank: usize,
    rows: Vec<Vec<Option<usize>>>,
}

impl ReflectionTable {
    /// Validates the shape of `rows` against `rank` and wraps it. Every row needs exactly
    /// `rank` entries, there have to be at least `rank` rows and every entry has to name an
    /// existing row.
    pub fn new(rows: Vec<Vec<Option<usize>>>, rank: usize) -> Result<Self, ConfigError> {
        if rows.len() < rank {
            return Err(ConfigError::TooFewRoots {
                roots: rows.len(),
                rank,
            });
        }
        for (root, row) in rows.iter().enumerate() {
            if row.len() != rank {
                return Err(ConfigError::RaggedTable {
                    row: root,
                    len: row.len(),
                    rank,
                });
            }
            for (generator, target) in row.iter().enumerate() {
                match target {
                    Some(target) if *target >= rows.len() => {
                        return Err(ConfigError::RootOutOfRange {
                            root,
                            generator,
                            target: *target,
                            roots: rows.len(),
                        })
                    }
                    _ => {}
                }
            }
        }
        Ok(Self { rank, rows })
    }

    /// Computes the table of the minimal roots of the Coxeter group given by `matrix`.
    pub fn from_coxeter_matrix(matrix: &CoxeterMatrix) -> Result<Self, ConfigError> {
        Self::from_coxeter_matrix_with(matrix, RootSystemOptions::default())
    }

    /// Same as [`Self::from_coxeter_matrix`] with custom enumeration options.
    pub fn from_coxeter_matrix_with(
        matrix: &CoxeterMatrix,
        options: RootSystemOptions,
    ) -> Result<Self, ConfigError> {
        MinimalRoots::enumerate(matrix, options).map(MinimalRoots::into_table)
    }

    /// Number of generators.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of roots, i.e. rows.
    pub fn num_roots(&self) -> usize {
        self.rows.len()
    }

    /// The image of `root` under the reflection `generator`.
    pub fn reflect(&self, root: usize, generator: usize) -> Option<usize> {
        self.rows[root][generator]
    }

    /// The rows of the table.
    pub fn rows(&self) -> &[Vec<Option<usize>>] {
        &self.rows
    }
}
