mod error;
mod problem;
mod region;
mod render;
mod simplex;
mod solution;
mod standard;
mod svg;

pub use error::{LpError, Result};
pub use problem::{Bound, Constraint, LinearProgram, Objective, Sense};
pub use region::{Domain, FeasibleRegion};
pub use render::{FillBetween, Figure, LineSeries, Marker, PlotSurface, Renderer};
pub use simplex::Solver;
pub use solution::{Analysis, ConstraintViolation, Slack, Solution, SolutionStatus};
pub use svg::SvgSurface;
