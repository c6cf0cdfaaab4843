//! The bakery instance: two bread types competing for kneading and baking time.

use bakeplan_solver::{Domain, LinearProgram, Renderer};

/// Profit per loaf, wholemeal then white
pub const PROFITS: [f64; 2] = [40.0, 50.0];

pub fn problem() -> LinearProgram {
    let mut problem = LinearProgram::new(vec!["Panes integrales".to_string(), "Panes blancos".to_string()]);
    problem.maximize(PROFITS.to_vec());
    problem.add_constraint("Amasado", vec![3.0, 2.0], 120.0);
    problem.add_constraint("Horneado", vec![2.0, 4.0], 160.0);
    problem
}

pub fn renderer(x_max: f64, samples: usize) -> Renderer {
    Renderer::new()
        .with_domain(Domain::new(0.0, x_max))
        .with_sample_count(samples)
        .with_title("Región factible y punto óptimo")
        .with_optimum_label("Óptimo")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bakeplan_solver::{Sense, SolutionStatus, Solver};

    #[test]
    fn test_instance_shape() {
        let problem = problem();
        assert!(problem.validate().is_ok());
        assert_eq!(problem.objective.coefficients, vec![-40.0, -50.0]);
        assert_eq!(problem.objective.sense, Sense::Maximize);
        assert_eq!(problem.num_constraints(), 2);
    }

    #[test]
    fn test_instance_optimum() {
        let solution = Solver::new().solve(&problem()).unwrap();
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_abs_diff_eq!(solution.values[0], 20.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.values[1], 30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.objective_value, 2300.0, epsilon = 1e-6);
    }
}
