use clap::Parser;
use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;
use tmsim::{
    analyze, ProgramFile, ProgramLoader, ProgramManager, Status, StepReport, TuringMachine,
    TuringMachineError, DEFAULT_HISTORY_CAPACITY, MAX_EXECUTION_STEPS,
};
use tracing_subscriber::EnvFilter;

/// Runs a Turing machine program document to completion.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tmsim-cli programs/bubble-sort.json
  tmsim-cli --builtin 'Binary increment' --input 111 --debug
  cat programs/unary-increment.json | tmsim-cli")]
struct Cli {
    /// Path to a program document (.json). Can also pipe program content via stdin.
    program: Option<PathBuf>,

    /// Run a built-in program by name instead of a file
    #[clap(short, long, conflicts_with = "program")]
    builtin: Option<String>,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,

    /// Replace the program's tape, with `_` for blank cells
    #[clap(short, long)]
    input: Option<String>,

    /// Head position for the tape given with --input
    #[clap(long, default_value_t = 0, allow_hyphen_values = true)]
    head: i64,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Give up after this many steps
    #[clap(short, long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Number of steps kept for undo
    #[clap(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history: usize,

    /// Report suspicious rules instead of running
    #[clap(short, long)]
    check: bool,

    /// Write the final machine to this file as a program document
    #[clap(short, long)]
    save: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if cli.list {
        for (i, name) in ProgramManager::names().iter().enumerate() {
            println!("{}: {}", i, name);
        }
        return Ok(());
    }

    let program = load_program(&cli)?;
    let mut machine = program.to_machine(cli.history)?;

    if let Some(input) = &cli.input {
        machine.create_tape_from_str(input, cli.head)?;
    }

    if cli.check {
        let warnings = analyze(&machine);
        if warnings.is_empty() {
            println!("No problems found.");
        }
        for warning in warnings {
            println!("warning: {}", warning);
        }
        return Ok(());
    }

    let result = if cli.debug {
        run_verbose(&mut machine, cli.max_steps)
    } else {
        machine.run_to_halt(cli.max_steps)
    };

    match &result {
        Ok(report) if report.status == Status::Halted => {
            println!("Machine halted after {} steps.", report.step_count)
        }
        Ok(report) => println!("Machine stopped: {}", report.status),
        Err(e) => println!("Machine error: {}", e),
    }
    println!("{}", machine.tape().content());

    if let Some(path) = &cli.save {
        let document = ProgramFile::from_machine(program.name.clone(), &machine);
        ProgramLoader::save_program(path, &document)?;
    }

    result?;
    Ok(())
}

/// Initializes logging to stderr. `RUST_LOG` overrides the default filter.
fn init_logging(debug: bool) {
    let default = if debug { "tmsim=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads a program document from a file, a built-in, or stdin, in that order.
fn load_program(cli: &Cli) -> Result<ProgramFile, Box<dyn Error>> {
    if let Some(path) = &cli.program {
        Ok(ProgramLoader::load_program(path)?)
    } else if let Some(name) = &cli.builtin {
        Ok(ProgramManager::get_by_name(name)?)
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(ProgramLoader::load_program_from_string(&buffer)?)
    } else {
        Err("No program given: pass a file, use --builtin, or pipe a document on stdin".into())
    }
}

/// Steps the machine like `run_to_halt`, printing every configuration.
fn run_verbose(
    machine: &mut TuringMachine,
    max_steps: usize,
) -> Result<StepReport, TuringMachineError> {
    print_state(machine);

    for _ in 0..max_steps {
        if machine.status().is_terminal() {
            break;
        }
        machine.step()?;
        print_state(machine);
    }

    if machine.status().is_terminal() {
        Ok(machine.report())
    } else {
        Err(TuringMachineError::StepBudgetExceeded(max_steps))
    }
}

fn print_state(machine: &TuringMachine) {
    println!(
        "Step: {}, State: {}, Head: {}, Tape: {}",
        machine.step_count(),
        machine.state(),
        machine.head(),
        render_tape(machine)
    );
}

/// Renders the written part of the tape, widened to include the head, with the head
/// cell in brackets.
fn render_tape(machine: &TuringMachine) -> String {
    let tape = machine.tape();
    let head = tape.head();
    let (first, last) = tape
        .bounds()
        .map(|(first, last)| (first.min(head), last.max(head)))
        .unwrap_or((head, head));

    (first..=last)
        .map(|position| {
            let symbol = tape.read(position);
            if position == head {
                format!("[{}]", symbol)
            } else {
                symbol.to_string()
            }
        })
        .collect()
}
