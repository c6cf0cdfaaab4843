use crate::error::{LpError, Result};
use crate::solution::ConstraintViolation;

/// A linear program in inequality form:
/// minimize `objective · x` subject to `A x <= b` and per-variable bounds.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearProgram {
    /// Variable names
    pub variables: Vec<String>,
    /// Objective function (always stored as the cost vector to minimize)
    pub objective: Objective,
    /// Constraints, each read as `coefficients · x <= upper_bound`
    pub constraints: Vec<Constraint>,
    /// Bounds for each variable
    pub bounds: Vec<Bound>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    /// Cost coefficients for each variable. Negated when maximizing.
    pub coefficients: Vec<f64>,
    /// Direction of the objective as stated by the caller
    pub sense: Sense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sense {
    Minimize,
    /// The stored costs are the negated profits
    Maximize,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// Name/label for the constraint (for diagnostics and plot legends)
    pub name: String,
    /// Coefficients for each variable
    pub coefficients: Vec<f64>,
    /// Right-hand side of the `<=`
    pub upper_bound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

impl Bound {
    /// `x >= 0`, no upper limit
    pub const NON_NEGATIVE: Bound = Bound {
        lower: 0.0,
        upper: f64::INFINITY,
    };

    pub const FREE: Bound = Bound {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn at_least(lower: f64) -> Self {
        Self {
            lower,
            upper: f64::INFINITY,
        }
    }

    fn is_valid(&self) -> bool {
        !self.lower.is_nan()
            && !self.upper.is_nan()
            && self.lower != f64::INFINITY
            && self.upper != f64::NEG_INFINITY
    }
}

impl Objective {
    /// Value of the objective as the caller stated it (profit when maximizing)
    pub fn true_value(&self, values: &[f64]) -> f64 {
        let cost: f64 = self.coefficients.iter().zip(values).map(|(c, v)| c * v).sum();
        match self.sense {
            Sense::Minimize => cost,
            Sense::Maximize => -cost,
        }
    }
}

impl LinearProgram {
    /// New problem over `variables`, each bounded to `x >= 0`, with a zero objective.
    pub fn new(variables: Vec<String>) -> Self {
        let n = variables.len();
        Self {
            variables,
            objective: Objective {
                coefficients: vec![0.0; n],
                sense: Sense::Minimize,
            },
            constraints: Vec::new(),
            bounds: vec![Bound::NON_NEGATIVE; n],
        }
    }

    pub fn minimize(&mut self, costs: Vec<f64>) {
        self.objective = Objective {
            coefficients: costs,
            sense: Sense::Minimize,
        };
    }

    /// Maximize `profits · x`; stored as the minimization of `-profits · x`.
    pub fn maximize(&mut self, profits: Vec<f64>) {
        self.objective = Objective {
            coefficients: profits.into_iter().map(|p| -p).collect(),
            sense: Sense::Maximize,
        };
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, coefficients: Vec<f64>, upper_bound: f64) {
        self.constraints.push(Constraint {
            name: name.into(),
            coefficients,
            upper_bound,
        });
    }

    pub fn set_bounds(&mut self, bounds: Vec<Bound>) {
        self.bounds = bounds;
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Check the dimensional invariant and that every number is usable.
    pub fn validate(&self) -> Result<()> {
        let n = self.num_variables();

        check_len("objective", n, self.objective.coefficients.len())?;
        check_len("bounds", n, self.bounds.len())?;
        for c in &self.constraints {
            check_len(&format!("constraint {}", c.name), n, c.coefficients.len())?;
        }

        if self.objective.coefficients.iter().any(|v| !v.is_finite()) {
            return Err(LpError::NonFiniteCoefficient {
                location: "objective".to_string(),
            });
        }
        for c in &self.constraints {
            if c.coefficients.iter().any(|v| !v.is_finite()) || !c.upper_bound.is_finite() {
                return Err(LpError::NonFiniteCoefficient {
                    location: format!("constraint {}", c.name),
                });
            }
        }
        for (name, bound) in self.variables.iter().zip(&self.bounds) {
            if !bound.is_valid() {
                return Err(LpError::InvalidBound {
                    variable: name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Every constraint and bound that `values` breaks by more than `tolerance`,
    /// worst first.
    pub fn violations(&self, values: &[f64], tolerance: f64) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();

        for c in &self.constraints {
            let lhs: f64 = c.coefficients.iter().zip(values).map(|(a, x)| a * x).sum();
            if lhs > c.upper_bound + tolerance {
                let amt = lhs - c.upper_bound;
                violations.push(ConstraintViolation {
                    constraint: c.name.clone(),
                    required: c.upper_bound,
                    actual: lhs,
                    violation_amount: amt,
                    description: format!("{} exceeds maximum of {:.2} by {:.2}", c.name, c.upper_bound, amt),
                });
            }
        }

        for ((name, bound), &x) in self.variables.iter().zip(&self.bounds).zip(values) {
            if x < bound.lower - tolerance {
                let amt = bound.lower - x;
                violations.push(ConstraintViolation {
                    constraint: format!("{} lower bound", name),
                    required: bound.lower,
                    actual: x,
                    violation_amount: amt,
                    description: format!("{} is below minimum of {:.2} by {:.2}", name, bound.lower, amt),
                });
            } else if x > bound.upper + tolerance {
                let amt = x - bound.upper;
                violations.push(ConstraintViolation {
                    constraint: format!("{} upper bound", name),
                    required: bound.upper,
                    actual: x,
                    violation_amount: amt,
                    description: format!("{} exceeds maximum of {:.2} by {:.2}", name, bound.upper, amt),
                });
            }
        }

        violations.sort_by(|a, b| b.violation_amount.total_cmp(&a.violation_amount));
        violations
    }
}

fn check_len(what: &str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(LpError::ShapeMismatch {
            what: what.to_string(),
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy() -> LinearProgram {
        LinearProgram::new(vec!["x".to_string(), "y".to_string()])
    }

    #[test]
    fn test_maximize_negates_costs() {
        let mut problem = xy();
        problem.maximize(vec![40.0, 50.0]);
        assert_eq!(problem.objective.coefficients, vec![-40.0, -50.0]);
        assert_eq!(problem.objective.sense, Sense::Maximize);
        assert_eq!(problem.objective.true_value(&[20.0, 30.0]), 2300.0);
    }

    #[test]
    fn test_validate_shape_mismatch() {
        let mut problem = xy();
        problem.add_constraint("short", vec![1.0], 3.0);
        match problem.validate() {
            Err(LpError::ShapeMismatch { expected, found, .. }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }

        let mut problem = xy();
        problem.set_bounds(vec![Bound::NON_NEGATIVE]);
        assert!(matches!(problem.validate(), Err(LpError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_validate_rejects_nan_and_inverted_infinities() {
        let mut problem = xy();
        problem.add_constraint("nan", vec![f64::NAN, 1.0], 3.0);
        assert!(matches!(problem.validate(), Err(LpError::NonFiniteCoefficient { .. })));

        let mut problem = xy();
        problem.set_bounds(vec![Bound::at_least(f64::INFINITY), Bound::NON_NEGATIVE]);
        assert!(matches!(problem.validate(), Err(LpError::InvalidBound { .. })));

        // lower > upper is a feasibility question, not a shape error
        let mut problem = xy();
        problem.set_bounds(vec![Bound::new(5.0, 1.0), Bound::FREE]);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_violations_sorted_worst_first() {
        let mut problem = xy();
        problem.add_constraint("a", vec![1.0, 0.0], 1.0);
        problem.add_constraint("b", vec![0.0, 1.0], 1.0);

        let violations = problem.violations(&[2.0, 5.0], 1e-9);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].constraint, "b");
        assert_eq!(violations[1].constraint, "a");

        let violations = problem.violations(&[-1.0, 0.5], 1e-9);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, "x lower bound");

        assert!(problem.violations(&[1.0, 1.0], 1e-9).is_empty());
    }
}
