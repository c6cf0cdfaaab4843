use crate::problem::{LinearProgram, Sense};

/// The result of solving an LP problem
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Optimal values for each variable (empty unless optimal)
    pub values: Vec<f64>,
    /// Objective value in the caller's sense (profit when maximizing)
    pub objective_value: f64,
    /// Slack analysis at the optimum
    pub analysis: Analysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The problem is infeasible (no solution exists)
    Infeasible,
    /// The problem is unbounded
    Unbounded,
}

/// Which resources are used up at the optimum
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Unused capacity per constraint, in constraint order
    pub slacks: Vec<Slack>,
    /// Constraints holding at equality (pinch points)
    pub binding_constraints: Vec<String>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slack {
    pub constraint: String,
    /// Left-hand side at the optimum
    pub usage: f64,
    pub capacity: f64,
    pub slack: f64,
}

/// Information about a violated constraint or bound
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintViolation {
    /// Constraint name
    pub constraint: String,
    /// Required value (from constraint RHS or bound)
    pub required: f64,
    /// Actual value achieved
    pub actual: f64,
    /// How much the constraint is violated by
    pub violation_amount: f64,
    /// Human-readable description of what's wrong
    pub description: String,
}

impl Solution {
    pub fn optimal(problem: &LinearProgram, values: Vec<f64>, tolerance: f64) -> Self {
        let objective_value = problem.objective.true_value(&values);
        let analysis = Analysis::at(problem, &values, tolerance);
        Self {
            status: SolutionStatus::Optimal,
            values,
            objective_value,
            analysis,
        }
    }

    pub fn infeasible(sense: Sense) -> Self {
        Self {
            status: SolutionStatus::Infeasible,
            values: Vec::new(),
            objective_value: match sense {
                Sense::Minimize => f64::INFINITY,
                Sense::Maximize => f64::NEG_INFINITY,
            },
            analysis: Analysis::default(),
        }
    }

    pub fn unbounded(sense: Sense) -> Self {
        Self {
            status: SolutionStatus::Unbounded,
            values: Vec::new(),
            objective_value: match sense {
                Sense::Minimize => f64::NEG_INFINITY,
                Sense::Maximize => f64::INFINITY,
            },
            analysis: Analysis::default(),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

impl Analysis {
    fn at(problem: &LinearProgram, values: &[f64], tolerance: f64) -> Self {
        let slacks: Vec<Slack> = problem
            .constraints
            .iter()
            .map(|c| {
                let usage: f64 = c.coefficients.iter().zip(values).map(|(a, x)| a * x).sum();
                Slack {
                    constraint: c.name.clone(),
                    usage,
                    capacity: c.upper_bound,
                    slack: c.upper_bound - usage,
                }
            })
            .collect();

        // Scale the tolerance so large right-hand sides are not reported as slack
        let binding_constraints = slacks
            .iter()
            .filter(|s| s.slack.abs() <= tolerance * (1.0 + s.capacity.abs()))
            .map(|s| s.constraint.clone())
            .collect();

        Self {
            slacks,
            binding_constraints,
        }
    }
}
