//! Conversion of a bounded inequality-form problem into the non-negative
//! standard form the tableau works on.

use crate::problem::LinearProgram;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowOp {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
}

#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub coefficients: Vec<f64>,
    pub op: RowOp,
    /// Always non-negative
    pub rhs: f64,
}

/// How an original variable is rebuilt from standard-form columns
#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    /// `x = offset + x'`
    Shifted { col: usize, offset: f64 },
    /// `x = offset - x'`
    Mirrored { col: usize, offset: f64 },
    /// `x = x⁺ - x⁻`
    Split { pos: usize, neg: usize },
}

/// minimize `costs · x'` subject to `rows`, `x' >= 0`
#[derive(Debug, Clone)]
pub(crate) struct StandardForm {
    pub costs: Vec<f64>,
    pub rows: Vec<Row>,
    columns: Vec<Column>,
}

impl StandardForm {
    /// Returns `None` when some variable has an empty bound interval.
    pub fn from_problem(problem: &LinearProgram) -> Option<Self> {
        let mut columns = Vec::with_capacity(problem.num_variables());
        let mut n_cols = 0;
        for bound in &problem.bounds {
            if bound.lower > bound.upper {
                return None;
            }
            let column = if bound.lower.is_finite() {
                Column::Shifted {
                    col: n_cols,
                    offset: bound.lower,
                }
            } else if bound.upper.is_finite() {
                Column::Mirrored {
                    col: n_cols,
                    offset: bound.upper,
                }
            } else {
                n_cols += 1;
                Column::Split {
                    pos: n_cols - 1,
                    neg: n_cols,
                }
            };
            n_cols += 1;
            columns.push(column);
        }

        let mut costs = vec![0.0; n_cols];
        for (column, &c) in columns.iter().zip(&problem.objective.coefficients) {
            column.scatter(c, &mut costs);
        }

        let mut rows = Vec::new();
        for constraint in &problem.constraints {
            let mut coefficients = vec![0.0; n_cols];
            let mut rhs = constraint.upper_bound;
            for (column, &a) in columns.iter().zip(&constraint.coefficients) {
                rhs -= column.scatter(a, &mut coefficients);
            }
            rows.push(Row::normalized(coefficients, rhs));
        }

        // Finite upper bounds on shifted variables become explicit rows
        for (column, bound) in columns.iter().zip(&problem.bounds) {
            if let Column::Shifted { col, offset } = *column {
                if bound.upper.is_finite() {
                    let mut coefficients = vec![0.0; n_cols];
                    coefficients[col] = 1.0;
                    rows.push(Row::normalized(coefficients, bound.upper - offset));
                }
            }
        }

        Some(Self { costs, rows, columns })
    }

    pub fn num_columns(&self) -> usize {
        self.costs.len()
    }

    /// Map standard-form column values back to the original variables.
    pub fn recover(&self, x: &[f64]) -> Vec<f64> {
        self.columns
            .iter()
            .map(|column| match *column {
                Column::Shifted { col, offset } => offset + x[col],
                Column::Mirrored { col, offset } => offset - x[col],
                Column::Split { pos, neg } => x[pos] - x[neg],
            })
            .collect()
    }
}

impl Column {
    /// Add coefficient `a` of the original variable into `target`, returning
    /// the constant term it contributes.
    fn scatter(&self, a: f64, target: &mut [f64]) -> f64 {
        match *self {
            Column::Shifted { col, offset } => {
                target[col] += a;
                a * offset
            }
            Column::Mirrored { col, offset } => {
                target[col] -= a;
                a * offset
            }
            Column::Split { pos, neg } => {
                target[pos] += a;
                target[neg] -= a;
                0.0
            }
        }
    }
}

impl Row {
    /// Flip the row if needed so the right-hand side is non-negative.
    fn normalized(mut coefficients: Vec<f64>, rhs: f64) -> Self {
        if rhs < 0.0 {
            for a in coefficients.iter_mut() {
                *a = -*a;
            }
            Self {
                coefficients,
                op: RowOp::Ge,
                rhs: -rhs,
            }
        } else {
            Self {
                coefficients,
                op: RowOp::Le,
                rhs,
            }
        }
    }
}
