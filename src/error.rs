use thiserror::Error;

/// Errors that are reported when the input to an automaton construction is malformed. All of
/// them are detected before any state is created, so no partially built automaton is ever
/// observable.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("row {row} of the reflection table has {len} entries but the rank is {rank}")]
    RaggedTable { row: usize, len: usize, rank: usize },
    #[error("reflection table has {roots} roots, but the {rank} simple roots must come first")]
    TooFewRoots { roots: usize, rank: usize },
    #[error("reflection table maps root {root} under generator {generator} to {target}, but there are only {roots} roots")]
    RootOutOfRange {
        root: usize,
        generator: usize,
        target: usize,
        roots: usize,
    },
    #[error("reflection table has rank {table} but an automaton of rank {requested} was requested")]
    RankMismatch { table: usize, requested: usize },
    #[error("unknown automaton type \"{0}\", must be \"reduced\" or \"shortlex\"")]
    UnsupportedMode(String),
    #[error("coxeter matrix must be square, but row {row} has {len} entries instead of {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("coxeter matrix has entry {value} on the diagonal at position {index}, expected 1")]
    Diagonal { index: usize, value: u32 },
    #[error("coxeter matrix is not symmetric at ({row}, {col})")]
    NotSymmetric { row: usize, col: usize },
    #[error("mirror order {value} at ({row}, {col}) is invalid, orders must be at least 2")]
    InvalidOrder { row: usize, col: usize, value: u32 },
    #[error("a coxeter diagram needs n(n-1)/2 entries, {0} is not a triangular number")]
    DiagramLength(usize),
    #[error("mirror angle {numerator}/{denominator} is not a valid fraction")]
    InvalidAngle { numerator: u32, denominator: u32 },
    #[error("enumeration of minimal roots exceeded the limit of {0} roots")]
    TooManyRoots(usize),
}
