use log::{debug, warn};

use crate::error::{LpError, Result};
use crate::problem::LinearProgram;
use crate::solution::Solution;
use crate::standard::{RowOp, StandardForm};

/// Points farther than this outside the region are reported as drift
const FEASIBILITY_TOLERANCE: f64 = 1e-7;

/// Simplex solver for linear programming problems
#[derive(Debug, Clone)]
pub struct Solver {
    /// Maximum iterations per phase before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Solve the LP problem using the two-phase simplex method
    pub fn solve(&self, problem: &LinearProgram) -> Result<Solution> {
        problem.validate()?;
        let sense = problem.objective.sense;

        let Some(form) = StandardForm::from_problem(problem) else {
            debug!("empty bound interval, problem is infeasible");
            return Ok(Solution::infeasible(sense));
        };
        debug!(
            "standard form: {} rows x {} columns",
            form.rows.len(),
            form.num_columns()
        );

        let mut tableau = Tableau::build(&form);

        // Phase 1: Find initial basic feasible solution
        if tableau.n_artificial > 0 && !self.phase1(&mut tableau)? {
            debug!("phase 1 left artificial variables positive, problem is infeasible");
            return Ok(Solution::infeasible(sense));
        }

        // Phase 2: Optimize
        if let SimplexResult::Unbounded = self.phase2(&mut tableau)? {
            debug!("no leaving row in phase 2, problem is unbounded");
            return Ok(Solution::unbounded(sense));
        }

        let values = form.recover(&self.column_values(&tableau));
        let solution = Solution::optimal(problem, values, self.tolerance);
        debug!("optimal objective {}", solution.objective_value);

        for violation in problem.violations(&solution.values, FEASIBILITY_TOLERANCE) {
            warn!("optimal point drifts outside the region: {}", violation.description);
        }

        Ok(solution)
    }

    /// Returns whether a feasible basis was found.
    fn phase1(&self, tableau: &mut Tableau) -> Result<bool> {
        // Auxiliary objective: maximize -sum(artificials)
        let n_constraints = tableau.n_rows();
        let n_cols = tableau.width();
        let art_start = tableau.artificial_start();

        let orig_obj = tableau.data[n_constraints].clone();

        tableau.data[n_constraints].fill(0.0);
        for j in art_start..(art_start + tableau.n_artificial) {
            tableau.data[n_constraints][j] = -1.0;
        }

        // Price out the basic artificials
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] += tableau.data[i][j];
                }
            }
        }

        let mut iterations = 0;
        while let Some(pivot_col) = self.find_pivot_column(tableau, n_cols - 1) {
            if iterations == self.max_iterations {
                return Err(LpError::IterationLimit(self.max_iterations));
            }
            let Some(pivot_row) = self.find_pivot_row(tableau, pivot_col) else {
                // The auxiliary objective is bounded above by zero
                break;
            };
            self.step(tableau, pivot_row, pivot_col);
            iterations += 1;
        }
        debug!("phase 1 finished after {} pivots", iterations);

        let rhs_col = n_cols - 1;
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start && tableau.data[i][rhs_col].abs() > self.tolerance {
                return Ok(false);
            }
        }

        // Artificials still basic sit at zero; swap them for a structural column
        for i in 0..n_constraints {
            if tableau.basic_vars[i] >= art_start {
                if let Some(j) = (0..art_start).find(|&j| tableau.data[i][j].abs() > self.tolerance) {
                    tableau.pivot(i, j);
                }
            }
        }

        // Restore original objective and adjust for basic variables
        tableau.data[n_constraints] = orig_obj;
        for i in 0..n_constraints {
            let basic = tableau.basic_vars[i];
            let ratio = tableau.data[n_constraints][basic];
            if ratio.abs() > self.tolerance {
                for j in 0..n_cols {
                    tableau.data[n_constraints][j] -= ratio * tableau.data[i][j];
                }
            }
        }

        Ok(true)
    }

    fn phase2(&self, tableau: &mut Tableau) -> Result<SimplexResult> {
        // Artificial columns never re-enter
        let exclude_from = tableau.artificial_start();

        for iteration in 0..self.max_iterations {
            let Some(pivot_col) = self.find_pivot_column(tableau, exclude_from) else {
                debug!("phase 2 finished after {} pivots", iteration);
                return Ok(SimplexResult::Optimal);
            };
            let Some(pivot_row) = self.find_pivot_row(tableau, pivot_col) else {
                return Ok(SimplexResult::Unbounded);
            };
            self.step(tableau, pivot_row, pivot_col);
        }

        if self.find_pivot_column(tableau, exclude_from).is_none() {
            Ok(SimplexResult::Optimal)
        } else {
            Err(LpError::IterationLimit(self.max_iterations))
        }
    }

    /// Pivot, switching to Bland's rule for good once a pivot makes no progress
    fn step(&self, tableau: &mut Tableau, row: usize, col: usize) {
        let rhs_col = tableau.width() - 1;
        if !tableau.bland && tableau.data[row][rhs_col] <= self.tolerance {
            debug!("degenerate pivot on column {}, using Bland's rule", col);
            tableau.bland = true;
        }
        tableau.pivot(row, col);
    }

    /// Most positive reduced cost among columns `0..end`, lowest index on ties.
    /// Under Bland's rule, the lowest index with a positive reduced cost.
    fn find_pivot_column(&self, tableau: &Tableau, end: usize) -> Option<usize> {
        let obj_row = tableau.n_rows();

        if tableau.bland {
            return (0..end).find(|&j| tableau.data[obj_row][j] > self.tolerance);
        }

        let mut max_val = self.tolerance;
        let mut max_col = None;

        for j in 0..end {
            if tableau.data[obj_row][j] > max_val {
                max_val = tableau.data[obj_row][j];
                max_col = Some(j);
            }
        }

        max_col
    }

    /// Minimum ratio test; ties go to the row whose basic variable has the lowest index
    fn find_pivot_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let rhs_col = tableau.width() - 1;

        let mut min_ratio = f64::INFINITY;
        let mut min_row: Option<usize> = None;

        for i in 0..tableau.n_rows() {
            let val = tableau.data[i][col];
            if val > self.tolerance {
                let ratio = (tableau.data[i][rhs_col] / val).max(0.0);
                let better = match min_row {
                    None => true,
                    Some(r) => {
                        ratio < min_ratio - self.tolerance
                            || (ratio <= min_ratio + self.tolerance
                                && tableau.basic_vars[i] < tableau.basic_vars[r])
                    }
                };
                if better {
                    min_ratio = ratio;
                    min_row = Some(i);
                }
            }
        }

        min_row
    }

    fn column_values(&self, tableau: &Tableau) -> Vec<f64> {
        let rhs_col = tableau.width() - 1;
        let mut values = vec![0.0; tableau.n_structural];
        for (i, &basic) in tableau.basic_vars.iter().enumerate() {
            if basic < tableau.n_structural {
                let v = tableau.data[i][rhs_col];
                // Keep "-0" out of rounded output
                values[basic] = if v.abs() <= self.tolerance { 0.0 } else { v };
            }
        }
        values
    }
}

/// Dense tableau: one row per constraint plus the objective row last,
/// columns are structural, slack/surplus, artificial, then the RHS.
struct Tableau {
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    n_structural: usize,
    n_slack: usize,
    n_artificial: usize,
    /// Anti-cycling entering rule in effect
    bland: bool,
}

enum SimplexResult {
    Optimal,
    Unbounded,
}

impl Tableau {
    fn build(form: &StandardForm) -> Self {
        let n_structural = form.num_columns();
        let n_constraints = form.rows.len();
        let n_slack = n_constraints;
        let n_artificial = form.rows.iter().filter(|r| r.op == RowOp::Ge).count();

        let total_cols = n_structural + n_slack + n_artificial + 1;
        let mut tableau = Tableau {
            data: vec![vec![0.0; total_cols]; n_constraints + 1],
            basic_vars: vec![0; n_constraints],
            n_structural,
            n_slack,
            n_artificial,
            bland: false,
        };

        let mut artificial_idx = n_structural + n_slack;
        for (i, row) in form.rows.iter().enumerate() {
            tableau.data[i][..n_structural].copy_from_slice(&row.coefficients);
            tableau.data[i][total_cols - 1] = row.rhs;

            let slack_idx = n_structural + i;
            match row.op {
                RowOp::Le => {
                    tableau.data[i][slack_idx] = 1.0;
                    tableau.basic_vars[i] = slack_idx;
                }
                RowOp::Ge => {
                    tableau.data[i][slack_idx] = -1.0; // surplus
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
            }
        }

        // The tableau maximizes, so the objective row holds the negated costs
        for (j, &cost) in form.costs.iter().enumerate() {
            tableau.data[n_constraints][j] = -cost;
        }

        tableau
    }

    fn n_rows(&self) -> usize {
        self.basic_vars.len()
    }

    fn width(&self) -> usize {
        self.data[0].len()
    }

    fn artificial_start(&self) -> usize {
        self.n_structural + self.n_slack
    }

    fn pivot(&mut self, row: usize, col: usize) {
        self.basic_vars[row] = col;

        let pivot_val = self.data[row][col];
        for v in self.data[row].iter_mut() {
            *v /= pivot_val;
        }

        let pivot_row = self.data[row].clone();
        for (i, r) in self.data.iter_mut().enumerate() {
            if i != row {
                let factor = r[col];
                if factor != 0.0 {
                    for (v, p) in r.iter_mut().zip(&pivot_row) {
                        *v -= factor * p;
                    }
                }
            }
        }
    }
}
