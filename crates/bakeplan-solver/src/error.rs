use thiserror::Error;

#[derive(Error, Debug)]
pub enum LpError {
    #[error("Shape mismatch in {what}: expected {expected} entries, found {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
    #[error("Invalid bounds on variable {variable}")]
    InvalidBound { variable: String },
    #[error("Non-finite coefficient in {location}")]
    NonFiniteCoefficient { location: String },
    #[error("Simplex did not converge within {0} iterations")]
    IterationLimit(usize),
    #[error("Constraint {constraint} is vertical and cannot be drawn as y(x)")]
    DegenerateConstraint { constraint: String },
    #[error("Feasible region plots need exactly 2 variables, problem has {0}")]
    UnsupportedDimension(usize),
    #[error("Invalid plot domain [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },
    #[error("Sample count must be at least 1, got {0}")]
    InvalidSampling(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LpError>;
