use clap::{App, Arg};
use log::debug;
use satdfs::problem::reader::{read, ReadError};
use satdfs::{Oracle, ParallelOracle, Problem, SatResult, SequentialOracle, Solver};
use std::fs::File;
use std::sync::Arc;

fn main() {
    env_logger::init();

    let matches = App::new("satdfs")
        .about("decides propositional satisfiability by depth-first search")
        .arg(
            Arg::with_name("workers")
                .short("w")
                .long("workers")
                .takes_value(true)
                .value_name("W")
                .help("fan the validity check out across this many worker threads"),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("problem file (N K M header, then K clauses of M literals)")
                .index(1),
        )
        .get_matches();

    let problem = match matches.value_of("INPUT") {
        Some(path) => read_from_file(path),
        None => read(std::io::stdin()),
    };

    let problem = match problem {
        Ok(problem) => Arc::new(problem),
        Err(e) => {
            eprintln!("cannot read problem: {}", e);
            std::process::exit(-1);
        }
    };
    debug!(
        "loaded problem: {} propositions, {} clauses of {} literals",
        problem.num_variables(),
        problem.num_clauses(),
        problem.clause_width()
    );
    debug!("the current problem:\n{}", problem);

    let workers = matches.value_of("workers").map(|w| match w.parse::<usize>() {
        Ok(w) if w >= 1 => w,
        _ => {
            eprintln!("workers must be a positive integer");
            std::process::exit(-1);
        }
    });

    let exit_code = match workers {
        Some(w) => {
            let oracle = ParallelOracle::new(Arc::clone(&problem), w);
            debug!("validating with {} workers", oracle.workers());
            run(problem, oracle)
        }
        None => {
            let oracle = SequentialOracle::new(Arc::clone(&problem));
            run(problem, oracle)
        }
    };
    std::process::exit(exit_code);
}

fn run<O: Oracle>(problem: Arc<Problem>, oracle: O) -> i32 {
    let mut solver = Solver::new(problem, oracle);

    let result = match solver.solve() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("validity check failed: {}", e);
            return 3;
        }
    };

    let exit_code = match &result {
        SatResult::Satisfiable(assignment) => {
            println!("solution found:");
            println!("{}", assignment);
            0
        }
        SatResult::Unsatisfiable => {
            println!("no solution exists");
            1
        }
        SatResult::OutOfMemory => {
            println!("memory exhausted before the search finished");
            2
        }
    };

    println!("search time: {:.3}s", solver.search_time().as_secs_f64());
    if let Some(stats) = solver.oracle().worker_stats() {
        println!("worker time: {:.3}s", stats.busy.as_secs_f64());
        println!("dispatch overhead: {:.3}s", stats.overhead.as_secs_f64());
    }

    exit_code
}

fn read_from_file(path: &str) -> Result<Problem, ReadError> {
    let file = File::open(path)?;
    read(file)
}
