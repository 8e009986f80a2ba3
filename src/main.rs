//! cubewalk CLI
//!
//! Usage:
//!   cubewalk --scan U:WWWWWWWWW --scan R:... (6x) --solver kociemba   # Walk through a solve
//!   cubewalk --scramble "R U F'" --solution "F U' R'"                  # Practice without a scan
//!   cubewalk --serve --solver kociemba                                 # HTTP API server
//!   cubewalk ... --viewer 127.0.0.1:9999                               # Mirror state to a viewer

use std::io::{self, BufRead, Write};
use std::net::TcpStream;
use std::sync::Arc;

use clap::Parser;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use cubewalk::core::{
    apply_sequence, run_server, CommandOracle, FailingOracle, FanoutPublisher, JsonLinePublisher,
    LogPublisher, PressTracker, ScannedFaces, ScriptedOracle, SharedOracle, SolvePlan,
};
use cubewalk::types::{parse_moves, CubeError, Face, FaceletState, PressOutput, Step, TrackerPhase};
use cubewalk::{DEFAULT_ADDR, VERSION};

lazy_static! {
    /// `--scan` value: face letter, `:` or `=`, nine labels
    static ref RE_SCAN_ARG: Regex = Regex::new(r"^([UDFBLR])[:=](\S{9})$").unwrap();
}

#[derive(Parser, Debug)]
#[command(
    name = "cubewalk",
    version = VERSION,
    about = "Guided manual Rubik's Cube solving",
    long_about = "cubewalk walks you through solving a physical cube one turn at a time.\n\n\
                  Give it the six scanned faces (or a scramble to practice with) and a\n\
                  solver, then press Enter after every step you perform. Back-face moves\n\
                  are split into: rotate the cube, turn the front, rotate it back.\n\n\
                  Controls:\n  \
                  Enter   - step done\n  \
                  q       - abort (the last applied move stays applied)"
)]
struct Args {
    /// Scanned face as FACE:LABELS, e.g. U:WWWWWWWWW (repeat for all six faces)
    #[arg(long = "scan", value_parser = parse_scan_arg)]
    scans: Vec<(Face, String)>,

    /// Start from a solved cube scrambled with these moves instead of a scan
    #[arg(long, conflicts_with = "scans")]
    scramble: Option<String>,

    /// Use this move sequence as the solution instead of calling a solver
    #[arg(long, conflicts_with = "solver")]
    solution: Option<String>,

    /// External solver program; receives the 54-letter facelet string as last argument
    #[arg(long)]
    solver: Option<String>,

    /// Extra argument passed to the solver before the facelet string
    #[arg(long = "solver-arg", allow_hyphen_values = true)]
    solver_args: Vec<String>,

    /// Mirror every state snapshot as JSON lines to a viewer listening on this address
    #[arg(long)]
    viewer: Option<String>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, env = "CUBEWALK_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Output press results as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_scan_arg(value: &str) -> Result<(Face, String), String> {
    let caps = RE_SCAN_ARG
        .captures(value)
        .ok_or_else(|| format!("expected FACE:LABELS with 9 labels, got {:?}", value))?;
    let face = caps[1]
        .chars()
        .next()
        .and_then(Face::from_letter)
        .ok_or_else(|| format!("unknown face in {:?}", value))?;
    Ok((face, caps[2].to_string()))
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let result = if args.serve {
        run_serve(&args).await
    } else {
        run_walkthrough(&args)
    };

    if let Err(e) = result {
        error!(error = %e, "cubewalk failed");
        eprintln!("⚠️  {}", e);
        std::process::exit(1);
    }
}

/// Build the oracle from the arguments
fn build_oracle(args: &Args) -> SharedOracle {
    if let Some(ref solution) = args.solution {
        Arc::new(ScriptedOracle::new(solution.clone()))
    } else if let Some(ref program) = args.solver {
        Arc::new(CommandOracle::new(program.clone()).args(args.solver_args.clone()))
    } else {
        Arc::new(FailingOracle::new("no solver configured (use --solver or --solution)"))
    }
}

/// Collect the scanned faces, or fake a scan from a scramble
fn build_scan(args: &Args) -> Result<ScannedFaces, CubeError> {
    if let Some(ref scramble) = args.scramble {
        let moves = parse_moves(scramble)?;
        return Ok(ScannedFaces::from(apply_sequence(&FaceletState::solved(), &moves)));
    }
    let mut scan = ScannedFaces::new();
    for (face, labels) in &args.scans {
        scan.insert_str(*face, labels)?;
    }
    Ok(scan)
}

/// Publisher chain: log, plus an optional TCP viewer
fn build_publisher(args: &Args) -> FanoutPublisher {
    let mut publisher = FanoutPublisher::new().with(LogPublisher);
    if let Some(ref addr) = args.viewer {
        match TcpStream::connect(addr) {
            Ok(stream) => publisher = publisher.with(JsonLinePublisher::new(stream)),
            Err(e) => warn!(%addr, error = %e, "viewer not running, continuing without visual updates"),
        }
    }
    publisher
}

/// Interactive terminal walkthrough
fn run_walkthrough(args: &Args) -> Result<(), CubeError> {
    let scan = build_scan(args)?;
    let oracle = build_oracle(args);
    let mut publisher = build_publisher(args);

    print_header(args.no_color);
    let plan = SolvePlan::prepare(&scan, oracle.as_ref(), &mut publisher)?;
    println!("Cube string: {}", plan.facelets);
    println!("Solution:    {} ({} moves, {} steps)", plan.solution(), plan.moves.len(), plan.steps.len());
    println!();
    println!("Press Enter after each step. Type 'q' to abort.");
    println!();

    let mut tracker = plan.into_tracker();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    while let Some(step) = tracker.current_step() {
        print!("{}", format_prompt(&tracker, step, args.no_color));
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                tracker.abort();
                break;
            }
            Ok(_) => {}
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            let output = tracker.abort();
            print_output(&output, args);
            break;
        }

        let output = tracker.confirm(&mut publisher)?;
        print_output(&output, args);
    }

    print_final(&tracker, args.no_color);
    Ok(())
}

/// Prompt showing the step to perform
fn format_prompt(tracker: &PressTracker, step: Step, no_color: bool) -> String {
    let mv = tracker
        .current_move()
        .map(|m| m.to_string())
        .unwrap_or_default();
    let position = format!("{}/{}", tracker.step_cursor() + 1, tracker.steps().len());
    let instruction = tracker.current_instruction().unwrap_or_default();
    let instruction = match step {
        Step::Reorient => format!("🔄 {}", instruction),
        Step::Turn(_) => instruction,
    };

    if no_color {
        format!("[{} | move {}] {} > ", position, mv, instruction)
    } else {
        let phase = tracker.phase();
        format!(
            "{}{} [{} | move {}]{} {} > ",
            phase.color_code(),
            phase.emoji(),
            position,
            mv,
            TrackerPhase::color_reset(),
            instruction
        )
    }
}

/// Print a press result
fn print_output(output: &PressOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!(error = %e, "cannot encode press output"),
        }
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
        if let Some(mv) = output.committed {
            println!("\x1b[32m  ✓ Move {} completed and applied\x1b[0m", mv);
        }
    }
}

/// Print the end of the walkthrough
fn print_final(tracker: &PressTracker, no_color: bool) {
    let (color, reset) = if no_color {
        ("", "")
    } else {
        (tracker.phase().color_code(), TrackerPhase::color_reset())
    };

    println!();
    match tracker.phase() {
        TrackerPhase::Finished if tracker.state().is_solved() => {
            println!("{}🎉 Cube solved!{}", color, reset);
        }
        TrackerPhase::Finished => {
            println!("{}Sequence done, but the tracked cube is not solved. Rescan and try again.{}", color, reset);
        }
        _ => {
            println!(
                "{}Stopped after {} of {} moves. Last applied state:{}",
                color,
                tracker.logical_index(),
                tracker.moves().len(),
                reset
            );
        }
    }
    print!("{}", tracker.state());
}

/// Print header
fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  cubewalk v{}", VERSION);
        println!("========================================");
    } else {
        println!("\x1b[1m╔══════════════════════════════════════╗\x1b[0m");
        println!("\x1b[1m║          cubewalk v{}             ║\x1b[0m", VERSION);
        println!("\x1b[1m╚══════════════════════════════════════╝\x1b[0m");
    }
    println!();
}

/// Run HTTP API server
async fn run_serve(args: &Args) -> Result<(), CubeError> {
    let oracle = build_oracle(args);
    if let Err(e) = run_server(&args.addr, oracle).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
    Ok(())
}
