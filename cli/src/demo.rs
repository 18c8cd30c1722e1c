use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_BORDERS_ONLY, Cell, Color, Table};
use hashbreak_core::{run_demo, AdaptiveHasher, CrackResult};
use human_repr::HumanDuration;

use crate::Cli;

pub fn demo(args: Cli) -> Result<()> {
    let hasher = AdaptiveHasher::new(args.cost);
    let report = run_demo(&args.password, &hasher).context("Unable to run the crack demo")?;

    let mut display_table = Table::new();
    display_table.load_preset(UTF8_BORDERS_ONLY);
    display_table.set_header(vec![
        "Algorithm",
        "Hash",
        "Cracked",
        "Time",
        "Attempts",
        "Recovered password",
    ]);

    for result in &report.results {
        display_table.add_row(vec![
            Cell::new(&result.algorithm),
            Cell::new(&result.hash),
            cracked_cell(result),
            Cell::new((result.time_taken_ms as f64 / 1000.).human_duration()),
            Cell::new(result.attempts),
            recovered_cell(result),
        ]);
    }

    println!("{display_table}");

    Ok(())
}

/// A cracked hash is bad news for its owner, so the colors are flipped.
fn cracked_cell(result: &CrackResult) -> Cell {
    if result.cracked {
        Cell::new("yes").fg(Color::Red)
    } else {
        Cell::new("no").fg(Color::Green)
    }
}

fn recovered_cell(result: &CrackResult) -> Cell {
    result
        .cracked_password
        .as_deref()
        .map(|password| Cell::new(password).fg(Color::Red))
        .unwrap_or_else(|| Cell::new("Not recovered").fg(Color::Grey))
}
