use crate::error::{LpError, Result};
use crate::problem::LinearProgram;

/// Closed interval of x values to sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(LpError::InvalidDomain {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// `count` evenly spaced points, both endpoints included
    pub fn linspace(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = (self.max - self.min) / (count - 1) as f64;
                let mut xs: Vec<f64> = (0..count).map(|i| self.min + i as f64 * step).collect();
                xs[count - 1] = self.max;
                xs
            }
        }
    }
}

/// Sampled boundary lines of a two-variable problem and the upper
/// envelope of its feasible region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeasibleRegion {
    pub xs: Vec<f64>,
    /// `max(0, (b - a1*x) / a2)` per constraint, in constraint order
    pub boundaries: Vec<Vec<f64>>,
    /// Pointwise minimum of the boundaries, never below zero
    pub envelope: Vec<f64>,
}

impl FeasibleRegion {
    pub fn sample(program: &LinearProgram, domain: Domain, sample_count: usize) -> Result<Self> {
        program.validate()?;
        if program.num_variables() != 2 {
            return Err(LpError::UnsupportedDimension(program.num_variables()));
        }
        domain.validate()?;
        if sample_count == 0 {
            return Err(LpError::InvalidSampling(sample_count));
        }

        if let Some(c) = program.constraints.iter().find(|c| c.coefficients[1] == 0.0) {
            return Err(LpError::DegenerateConstraint {
                constraint: c.name.clone(),
            });
        }

        let xs = domain.linspace(sample_count);

        let boundaries: Vec<Vec<f64>> = program
            .constraints
            .iter()
            .map(|c| {
                let (a1, a2, b) = (c.coefficients[0], c.coefficients[1], c.upper_bound);
                xs.iter().map(|&x| ((b - a1 * x) / a2).max(0.0)).collect()
            })
            .collect();

        // Without constraints the region reaches the top of the plot
        let envelope = (0..xs.len())
            .map(|k| {
                let lowest = boundaries.iter().map(|ys| ys[k]).fold(f64::INFINITY, f64::min);
                if lowest.is_finite() { lowest.max(0.0) } else { domain.max }
            })
            .collect();

        Ok(Self {
            xs,
            boundaries,
            envelope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn bakery() -> LinearProgram {
        let mut problem = LinearProgram::new(vec!["x".to_string(), "y".to_string()]);
        problem.maximize(vec![40.0, 50.0]);
        problem.add_constraint("Amasado", vec![3.0, 2.0], 120.0);
        problem.add_constraint("Horneado", vec![2.0, 4.0], 160.0);
        problem
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = Domain::new(0.0, 50.0).linspace(200);
        assert_eq!(xs.len(), 200);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[199], 50.0);
        assert_abs_diff_eq!(xs[1], 50.0 / 199.0, epsilon = 1e-12);

        assert_eq!(Domain::new(2.0, 3.0).linspace(1), vec![2.0]);
        assert_eq!(Domain::new(0.0, 1.0).linspace(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_boundaries_and_envelope() {
        let region = FeasibleRegion::sample(&bakery(), Domain::new(0.0, 50.0), 11).unwrap();
        assert_eq!(region.boundaries.len(), 2);

        // x = 0: y1 = 60, y2 = 40
        assert_abs_diff_eq!(region.boundaries[0][0], 60.0);
        assert_abs_diff_eq!(region.boundaries[1][0], 40.0);
        assert_abs_diff_eq!(region.envelope[0], 40.0);

        // x = 20 is the crossing point
        assert_abs_diff_eq!(region.xs[4], 20.0);
        assert_abs_diff_eq!(region.boundaries[0][4], 30.0);
        assert_abs_diff_eq!(region.boundaries[1][4], 30.0);

        // x = 50: y1 clamps to 0
        assert_eq!(region.boundaries[0][10], 0.0);
        assert_abs_diff_eq!(region.boundaries[1][10], 15.0);

        for k in 0..region.xs.len() {
            let expected = region.boundaries[0][k].min(region.boundaries[1][k]).max(0.0);
            assert_eq!(region.envelope[k], expected);
        }
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let problem = bakery();
        let a = FeasibleRegion::sample(&problem, Domain::new(0.0, 50.0), 200).unwrap();
        let b = FeasibleRegion::sample(&problem, Domain::new(0.0, 50.0), 200).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_vertical_constraint_is_degenerate() {
        let mut problem = bakery();
        problem.add_constraint("x_cap", vec![5.0, 0.0], 10.0);
        match FeasibleRegion::sample(&problem, Domain::new(0.0, 50.0), 200) {
            Err(LpError::DegenerateConstraint { constraint }) => assert_eq!(constraint, "x_cap"),
            other => panic!("expected degenerate constraint, got {:?}", other),
        }
    }

    #[test]
    fn test_no_constraints_fills_domain() {
        let mut problem = bakery();
        problem.constraints.clear();
        let region = FeasibleRegion::sample(&problem, Domain::new(0.0, 10.0), 3).unwrap();
        assert!(region.boundaries.is_empty());
        assert_eq!(region.envelope, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let problem = bakery();
        assert!(matches!(
            FeasibleRegion::sample(&problem, Domain::new(5.0, 5.0), 10),
            Err(LpError::InvalidDomain { .. })
        ));
        assert!(matches!(
            FeasibleRegion::sample(&problem, Domain::new(0.0, f64::INFINITY), 10),
            Err(LpError::InvalidDomain { .. })
        ));
        assert!(matches!(
            FeasibleRegion::sample(&problem, Domain::new(0.0, 1.0), 0),
            Err(LpError::InvalidSampling(0))
        ));

        let three = LinearProgram::new(vec!["a".into(), "b".into(), "c".into()]);
        assert!(matches!(
            FeasibleRegion::sample(&three, Domain::new(0.0, 1.0), 10),
            Err(LpError::UnsupportedDimension(3))
        ));
    }
}
