use std::f64::consts::PI;

use itertools::Itertools;
use tracing::trace;

use crate::ConfigError;

mod roots;
pub use roots::{MinimalRoots, RootSystemOptions};

mod table;
pub use table::ReflectionTable;

/// Marks a pair of mirrors whose product of reflections has infinite order, i.e. the
/// mirrors are parallel or ultraparallel.
pub const INFINITY: u32 = 0;

/// A Coxeter matrix `M` describes a Coxeter group through the orders `m_ij` of the products
/// `s_i s_j` of its generating reflections. It is symmetric, has ones on the diagonal and
/// every off-diagonal entry is either at least 2 or [`INFINITY`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoxeterMatrix {
    orders: Vec<Vec<u32>>,
}

impl CoxeterMatrix {
    /// Validates the given rows and wraps them into a matrix.
    pub fn new(orders: Vec<Vec<u32>>) -> Result<Self, ConfigError> {
        let size = orders.len();
        for (row, entries) in orders.iter().enumerate() {
            if entries.len() != size {
                return Err(ConfigError::NotSquare {
                    row,
                    len: entries.len(),
                    size,
                });
            }
        }
        for i in 0..size {
            if orders[i][i] != 1 {
                return Err(ConfigError::Diagonal {
                    index: i,
                    value: orders[i][i],
                });
            }
            for j in (i + 1)..size {
                if orders[i][j] != orders[j][i] {
                    return Err(ConfigError::NotSymmetric { row: i, col: j });
                }
                if orders[i][j] == 1 {
                    return Err(ConfigError::InvalidOrder {
                        row: i,
                        col: j,
                        value: 1,
                    });
                }
            }
        }
        Ok(Self { orders })
    }

    /// Builds the matrix from the upper triangle of a Coxeter diagram, given row by row. For
    /// three generators this is `(m01, m02, m12)`, for four `(m01, m02, m03, m12, m13, m23)`.
    /// An empty diagram describes the group with a single generator.
    ///
    /// ```
    /// use coxeter_automata::coxeter::CoxeterMatrix;
    ///
    /// let m = CoxeterMatrix::from_diagram(&[3, 2, 3]).unwrap();
    /// assert_eq!(m.rank(), 3);
    /// assert_eq!(m.order(2, 1), 3);
    /// ```
    pub fn from_diagram(upper_triangle: &[u32]) -> Result<Self, ConfigError> {
        let len = upper_triangle.len();
        let rank = (1..)
            .find(|n: &usize| n * (n - 1) / 2 >= len)
            .filter(|n| n * (n - 1) / 2 == len)
            .ok_or(ConfigError::DiagramLength(len))?;

        let mut orders = vec![vec![1; rank]; rank];
        let pairs = (0..rank).tuple_combinations::<(usize, usize)>();
        for ((i, j), &m) in pairs.zip(upper_triangle) {
            orders[i][j] = m;
            orders[j][i] = m;
        }
        trace!("coxeter matrix {orders:?} from diagram {upper_triangle:?}");
        Self::new(orders)
    }

    /// Builds the matrix from a diagram whose entries are rational angles: the pair `(p, q)`
    /// stands for two mirrors meeting at angle `π q / p`. Star polytopes share their symmetry
    /// group with a convex one, so only the numerators enter the matrix.
    pub fn from_star_diagram(angles: &[(u32, u32)]) -> Result<Self, ConfigError> {
        let numerators = angles
            .iter()
            .map(|&(numerator, denominator)| {
                if denominator == 0 || (numerator != INFINITY && denominator >= numerator) {
                    Err(ConfigError::InvalidAngle {
                        numerator,
                        denominator,
                    })
                } else {
                    Ok(numerator)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_diagram(&numerators)
    }

    /// The number of generators.
    pub fn rank(&self) -> usize {
        self.orders.len()
    }

    /// The order of `s_i s_j`, which is [`INFINITY`] if it is not finite.
    pub fn order(&self, i: usize, j: usize) -> u32 {
        self.orders[i][j]
    }

    /// The rows of the matrix.
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.orders
    }

    /// The symmetric bilinear form on the simple roots, `B(α_i, α_j) = -cos(π / m_ij)`,
    /// which is `-1` for parallel mirrors.
    pub fn bilinear_form(&self, i: usize, j: usize) -> f64 {
        match self.orders[i][j] {
            1 => 1.0,
            INFINITY => -1.0,
            m => -(PI / m as f64).cos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoxeterMatrix, INFINITY};
    use crate::ConfigError;

    #[test]
    fn diagram_fills_symmetric_matrix() {
        let m = CoxeterMatrix::from_diagram(&[4, 2, 3]).unwrap();
        assert_eq!(
            m.rows(),
            &[vec![1, 4, 2], vec![4, 1, 3], vec![2, 3, 1]][..]
        );

        let m = CoxeterMatrix::from_diagram(&[3, 2, 2, 3, 2, 3]).unwrap();
        assert_eq!(m.rank(), 4);
        assert_eq!(m.order(3, 2), 3);
        assert_eq!(m.order(0, 3), 2);

        assert_eq!(CoxeterMatrix::from_diagram(&[]).unwrap().rank(), 1);
        assert_eq!(CoxeterMatrix::from_diagram(&[INFINITY]).unwrap().rank(), 2);
    }

    #[test]
    fn malformed_matrices_are_rejected() {
        assert_eq!(
            CoxeterMatrix::from_diagram(&[3, 3]),
            Err(ConfigError::DiagramLength(2))
        );
        assert_eq!(
            CoxeterMatrix::new(vec![vec![1, 3], vec![2, 1]]),
            Err(ConfigError::NotSymmetric { row: 0, col: 1 })
        );
        assert_eq!(
            CoxeterMatrix::new(vec![vec![1, 3], vec![3]]),
            Err(ConfigError::NotSquare {
                row: 1,
                len: 1,
                size: 2
            })
        );
        assert_eq!(
            CoxeterMatrix::new(vec![vec![2]]),
            Err(ConfigError::Diagonal { index: 0, value: 2 })
        );
        assert!(matches!(
            CoxeterMatrix::from_diagram(&[1, 2, 3]),
            Err(ConfigError::InvalidOrder { value: 1, .. })
        ));
    }

    #[test]
    fn star_diagram_keeps_numerators() {
        let star = CoxeterMatrix::from_star_diagram(&[(3, 1), (2, 1), (5, 2)]).unwrap();
        assert_eq!(star, CoxeterMatrix::from_diagram(&[3, 2, 5]).unwrap());
        assert!(CoxeterMatrix::from_star_diagram(&[(3, 0), (2, 1), (3, 1)]).is_err());
        assert!(CoxeterMatrix::from_star_diagram(&[(3, 4), (2, 1), (3, 1)]).is_err());
    }

    #[test]
    fn bilinear_form_values() {
        let m = CoxeterMatrix::from_diagram(&[INFINITY, 2, 3]).unwrap();
        assert_eq!(m.bilinear_form(1, 1), 1.0);
        assert_eq!(m.bilinear_form(0, 1), -1.0);
        assert!(m.bilinear_form(0, 2).abs() < 1e-12);
        assert!((m.bilinear_form(1, 2) + 0.5).abs() < 1e-12);
    }
}
