//! CLI: `<solverId> <instancePath>` (§4.10/§6), exit codes 0/1/2/3.

use std::path::Path;
use std::process::ExitCode;

use clap::{crate_version, App, Arg};

use arc_router::{Error, ParseError};

fn main() -> ExitCode {
	env_logger::init_from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"));

	let matches = App::new("Arc Router")
		.version(crate_version!())
		.about("Solve Chinese/Rural Postman arc-routing instances")
		.arg(Arg::with_name("solver-id").takes_value(true).required(true).index(1).help("Solver id, 1..7 (6 reserved)"))
		.arg(Arg::with_name("instance-path").takes_value(true).required(true).index(2).help("OARLIB-format instance file"))
		.get_matches();

	let solver_id: u8 = match matches.value_of("solver-id").unwrap().parse() {
		Ok(id) => id,
		Err(_) => {
			eprintln!("solver id must be a small non-negative integer");
			return ExitCode::from(1);
		}
	};
	let path = Path::new(matches.value_of("instance-path").unwrap());
	let text = match std::fs::read_to_string(path) {
		Ok(t) => t,
		Err(e) => {
			eprintln!("could not read {}: {}", path.display(), e);
			return ExitCode::from(1);
		}
	};

	log::info!("Solving {} with solver {}", path.display(), solver_id);
	match arc_router::solve(solver_id, &text) {
		Ok(report) => {
			print!("{}", report);
			ExitCode::from(0)
		}
		Err(Error::Parse(ParseError { line, reason })) => {
			eprintln!("parse error at line {}: {}", line, reason);
			ExitCode::from(1)
		}
		Err(Error::Solve(e)) => {
			use arc_router::SolveError::*;
			match e {
				InfeasibleInstance { .. } => {
					eprintln!("infeasible instance: {}", e);
					ExitCode::from(2)
				}
				UnsupportedSolver(_) => {
					eprintln!("{}", e);
					ExitCode::from(1)
				}
				Cancelled => {
					eprintln!("{}", e);
					ExitCode::from(3)
				}
				CostOverflow | InternalInvariantViolation(_) => {
					log::error!("{}", e);
					eprintln!("internal error");
					ExitCode::from(3)
				}
			}
		}
	}
}
