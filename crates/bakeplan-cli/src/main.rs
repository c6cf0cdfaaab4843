mod bakery;
mod report;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use bakeplan_solver::{Figure, LpError, PlotSurface, Solution, SolutionStatus, Solver, SvgSurface};
use clap::{Parser, ValueEnum};
use log::{debug, info};

#[derive(Parser)]
#[command(name = "bakeplan")]
#[command(about = "Plan the most profitable bread production and plot its feasible region", long_about = None)]
struct Cli {
    /// Write the feasible-region plot to this file [default: region.svg or region.json]
    #[arg(short, long)]
    plot: Option<PathBuf>,
    /// Plot output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,
    /// Number of sampled x values along the plot
    #[arg(long, default_value_t = 200)]
    samples: usize,
    /// Upper limit of both plot axes
    #[arg(long, default_value_t = 50.0)]
    x_max: f64,
    /// Show binding constraints and resource usage
    #[arg(short, long)]
    analysis: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Json,
}

impl Cli {
    fn plot_path(&self) -> PathBuf {
        self.plot.clone().unwrap_or_else(|| match self.format {
            Format::Svg => PathBuf::from("region.svg"),
            Format::Json => PathBuf::from("region.json"),
        })
    }
}

#[derive(serde::Serialize)]
struct JsonPlot<'a> {
    solution: &'a Solution,
    figure: &'a Figure,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), LpError> {
    let problem = bakery::problem();
    let solution = Solver::new().solve(&problem)?;
    debug!("solver returned {:?}", solution.status);

    match solution.status {
        SolutionStatus::Optimal => {
            println!("{}", report::summary(&solution));
            if cli.analysis {
                println!();
                print!("{}", report::analysis(&solution));
            }
        }
        SolutionStatus::Infeasible => {
            println!("Status: INFEASIBLE");
            println!("No solution exists that satisfies all constraints.");
            std::process::exit(1);
        }
        SolutionStatus::Unbounded => {
            println!("Status: UNBOUNDED");
            println!("The problem has no finite optimal solution.");
            std::process::exit(1);
        }
    }

    let figure = bakery::renderer(cli.x_max, cli.samples).render(&problem, &solution)?;
    let path = cli.plot_path();
    write_plot(BufWriter::new(File::create(&path)?), cli.format, &solution, &figure)?;
    info!("wrote plot to {}", path.display());

    Ok(())
}

fn write_plot<W: Write>(writer: W, format: Format, solution: &Solution, figure: &Figure) -> Result<(), LpError> {
    match format {
        Format::Svg => SvgSurface::new(writer).draw(figure),
        Format::Json => {
            let plot = JsonPlot { solution, figure };
            serde_json::to_writer_pretty(writer, &plot).map_err(|e| LpError::Io(e.into()))
        }
    }
}
