use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use makiaveli::{solve, validate_group, SolveRequest, SolveResponse};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "solve-cli", about = "Makiaveli hand solver")]
struct Args {
    /// Solve request JSON path; reads stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output format: machine JSON or a human-readable report
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Override the request's search deadline in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Validate a single group of card codes instead of solving
    #[arg(long, num_args = 1.., value_name = "CARD")]
    validate: Option<Vec<String>>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(codes) = args.validate {
        let report = validate_group(&codes).map_err(|e| format!("validate error: {e}"))?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let mut request: SolveRequest =
        serde_json::from_str(&raw).map_err(|e| format!("Invalid request JSON: {e}"))?;
    if args.deadline_ms.is_some() {
        request.deadline_ms = args.deadline_ms;
    }

    let response = solve(&request);
    match args.format {
        Format::Json => println!("{}", serde_json::to_string(&response)?),
        Format::Text => print_report(&request, &response),
    }

    Ok(())
}

fn print_report(request: &SolveRequest, response: &SolveResponse) {
    println!("=== Makiaveli Solver ===\n");
    println!("Hand: {}", request.hand.join(", "));
    if !request.cross.is_empty() {
        println!("Cross: {}", request.cross.join(", "));
    }
    println!("Floor:");
    if request.floor_groups.is_empty() {
        println!("  (empty)");
    }
    for (i, g) in request.floor_groups.iter().enumerate() {
        println!("  [{i}] {}", g.join(" "));
    }
    println!();

    if let Some(kind) = response.error {
        println!("Request failed: {kind:?}");
        return;
    }
    if !response.solvable {
        println!("No solution found. You cannot empty your hand from this state.");
        return;
    }

    println!("Solution found in {:.3}s!\n", response.elapsed_seconds);
    println!("Target layout:");
    for (i, group) in response.target_groups.iter().flatten().enumerate() {
        let cards: Vec<&str> = group.iter().map(|c| c.display.as_str()).collect();
        println!("  [{i}] [{}]", cards.join(", "));
    }

    if let Some(remaining) = &response.remaining_cross {
        if !remaining.is_empty() {
            let cards: Vec<&str> = remaining.iter().map(|c| c.display.as_str()).collect();
            println!("\nCross left as singles: {}", cards.join(", "));
        }
    }

    match &response.steps {
        Some(steps) if !steps.is_empty() => {
            println!("\nSteps ({}):", steps.len());
            for s in steps {
                println!("  {}. {}", s.step_number, s.description);
            }
        }
        _ => println!("\nNo rearrangement needed, just play your cards!"),
    }
}
