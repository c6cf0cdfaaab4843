use crate::error::Result;
use crate::problem::LinearProgram;
use crate::region::{Domain, FeasibleRegion};
use crate::solution::Solution;

/// Everything needed to draw the feasible region, independent of the
/// surface it ends up on
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// One boundary line per constraint
    pub lines: Vec<LineSeries>,
    /// Shaded feasible region
    pub fill: FillBetween,
    /// Optimal point, when the solve found one
    pub marker: Option<Marker>,
    pub legend: bool,
    pub grid: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSeries {
    pub label: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillBetween {
    pub xs: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Something a [`Figure`] can be drawn on
pub trait PlotSurface {
    fn draw(&mut self, figure: &Figure) -> Result<()>;
}

/// Builds the feasible-region figure for two-variable problems
#[derive(Debug, Clone)]
pub struct Renderer {
    domain: Domain,
    sample_count: usize,
    title: String,
    optimum_label: String,
    axis_labels: Option<(String, String)>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            domain: Domain::new(0.0, 50.0),
            sample_count: 200,
            title: "Feasible region and optimal point".to_string(),
            optimum_label: "Optimum".to_string(),
            axis_labels: None,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = count;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_optimum_label(mut self, label: impl Into<String>) -> Self {
        self.optimum_label = label.into();
        self
    }

    /// Override the default `"<variable> (x)"` / `"<variable> (y)"` labels
    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.axis_labels = Some((x.into(), y.into()));
        self
    }

    pub fn render(&self, program: &LinearProgram, solution: &Solution) -> Result<Figure> {
        let region = FeasibleRegion::sample(program, self.domain, self.sample_count)?;

        let lines = program
            .constraints
            .iter()
            .zip(&region.boundaries)
            .map(|(c, ys)| LineSeries {
                label: inequality_label(&c.coefficients, c.upper_bound),
                xs: region.xs.clone(),
                ys: ys.clone(),
            })
            .collect();

        let marker = match solution.values.as_slice() {
            [x, y] if solution.is_optimal() => Some(Marker {
                label: format!("{} ({:.0}, {:.0})", self.optimum_label, x, y),
                x: *x,
                y: *y,
            }),
            _ => None,
        };

        let (x_label, y_label) = match &self.axis_labels {
            Some((x, y)) => (x.clone(), y.clone()),
            None => (
                format!("{} (x)", program.variables[0]),
                format!("{} (y)", program.variables[1]),
            ),
        };

        let FeasibleRegion { xs, envelope, .. } = region;
        Ok(Figure {
            title: self.title.clone(),
            x_label,
            y_label,
            x_range: (self.domain.min, self.domain.max),
            y_range: (self.domain.min, self.domain.max),
            lines,
            fill: FillBetween {
                lower: vec![0.0; xs.len()],
                xs,
                upper: envelope,
            },
            marker,
            legend: true,
            grid: true,
        })
    }

    /// Render and hand the figure to `surface`.
    pub fn render_to<S: PlotSurface>(&self, program: &LinearProgram, solution: &Solution, surface: &mut S) -> Result<()> {
        let figure = self.render(program, solution)?;
        surface.draw(&figure)
    }
}

/// `3x + 2y <= 120`
fn inequality_label(coefficients: &[f64], upper_bound: f64) -> String {
    let mut label = String::new();
    for (coef, symbol) in coefficients.iter().zip(["x", "y"]) {
        if *coef == 0.0 {
            continue;
        }
        let magnitude = coef.abs();
        let sign = if *coef < 0.0 { "-" } else { "+" };
        if label.is_empty() {
            if *coef < 0.0 {
                label.push('-');
            }
        } else {
            label.push_str(&format!(" {} ", sign));
        }
        if magnitude != 1.0 {
            label.push_str(&format!("{}", magnitude));
        }
        label.push_str(symbol);
    }
    if label.is_empty() {
        label.push('0');
    }
    format!("{} <= {}", label, upper_bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LpError;
    use crate::simplex::Solver;

    fn bakery() -> LinearProgram {
        let mut problem = LinearProgram::new(vec!["Panes integrales".to_string(), "Panes blancos".to_string()]);
        problem.maximize(vec![40.0, 50.0]);
        problem.add_constraint("Amasado", vec![3.0, 2.0], 120.0);
        problem.add_constraint("Horneado", vec![2.0, 4.0], 160.0);
        problem
    }

    #[derive(Default)]
    struct Recorder {
        figures: Vec<Figure>,
    }

    impl PlotSurface for Recorder {
        fn draw(&mut self, figure: &Figure) -> Result<()> {
            self.figures.push(figure.clone());
            Ok(())
        }
    }

    #[test]
    fn test_inequality_label() {
        assert_eq!(inequality_label(&[3.0, 2.0], 120.0), "3x + 2y <= 120");
        assert_eq!(inequality_label(&[1.0, -1.0], 0.5), "x - y <= 0.5");
        assert_eq!(inequality_label(&[-2.5, 4.0], -1.0), "-2.5x + 4y <= -1");
        assert_eq!(inequality_label(&[0.0, 1.0], 3.0), "y <= 3");
    }

    #[test]
    fn test_bakery_figure() {
        let problem = bakery();
        let solution = Solver::new().solve(&problem).unwrap();
        let figure = Renderer::new().render(&problem, &solution).unwrap();

        assert_eq!(figure.x_label, "Panes integrales (x)");
        assert_eq!(figure.y_label, "Panes blancos (y)");
        assert_eq!(figure.x_range, (0.0, 50.0));
        assert_eq!(figure.y_range, (0.0, 50.0));
        assert_eq!(figure.lines.len(), 2);
        assert_eq!(figure.lines[0].label, "3x + 2y <= 120");
        assert_eq!(figure.lines[1].label, "2x + 4y <= 160");
        assert_eq!(figure.fill.xs.len(), 200);
        assert!(figure.fill.lower.iter().all(|&v| v == 0.0));

        let marker = figure.marker.expect("optimal solution has a marker");
        assert_eq!(marker.label, "Optimum (20, 30)");
        assert!(figure.legend && figure.grid);
    }

    #[test]
    fn test_no_marker_without_optimum() {
        let problem = bakery();
        let solution = Solution::infeasible(problem.objective.sense);
        let figure = Renderer::new().render(&problem, &solution).unwrap();
        assert!(figure.marker.is_none());
    }

    #[test]
    fn test_render_to_surface_is_repeatable() {
        let problem = bakery();
        let solution = Solver::new().solve(&problem).unwrap();
        let renderer = Renderer::new()
            .with_title("Región factible y punto óptimo")
            .with_optimum_label("Óptimo");

        let mut recorder = Recorder::default();
        renderer.render_to(&problem, &solution, &mut recorder).unwrap();
        renderer.render_to(&problem, &solution, &mut recorder).unwrap();

        assert_eq!(recorder.figures.len(), 2);
        assert_eq!(recorder.figures[0], recorder.figures[1]);
        assert_eq!(recorder.figures[0].title, "Región factible y punto óptimo");
        assert_eq!(recorder.figures[0].marker.as_ref().unwrap().label, "Óptimo (20, 30)");
    }

    #[test]
    fn test_degenerate_constraint_reaches_caller() {
        let mut problem = bakery();
        problem.add_constraint("vertical", vec![5.0, 0.0], 10.0);
        let solution = Solver::new().solve(&problem).unwrap();
        let mut recorder = Recorder::default();
        let result = Renderer::new().render_to(&problem, &solution, &mut recorder);
        assert!(matches!(result, Err(LpError::DegenerateConstraint { .. })));
        assert!(recorder.figures.is_empty());
    }
}
