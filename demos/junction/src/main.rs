//! junction: scripted run of the reference interlocking.
//!
//! A freight train crosses the passenger corridor at CROSS while two
//! passenger trains run through it.  The freight must wait for the zone
//! {5, 6, 9} to clear.  Every tick is journaled to `./output`.

mod logger;

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{error, info};

use il_core::EXITED;
use il_engine::{Interlocking, TickReport};
use il_output::{CsvWriter, JournalObserver};
use il_topology::Layout;

const OUTPUT_DIR: &str = "output";

// ── Script ────────────────────────────────────────────────────────────────────

// `add` rows take train,entry,exit; `move` rows take a `;`-separated batch.
const SCRIPT_CSV: &str = "\
op,train,entry,exit\n\
add,F1,3,11\n\
add,P1,1,9\n\
move,F1;P1,,\n\
add,P2,10,2\n\
move,F1;P1;P2,,\n\
move,F1;P1;P2,,\n\
move,F1;P2,,\n\
move,F1;P2,,\n\
move,F1,,\n\
";

enum Step {
    Add { id: String, entry: i64, exit: i64 },
    Move(Vec<String>),
}

fn load_script(text: &str) -> Result<Vec<Step>> {
    let mut rdr = csv::Reader::from_reader(Cursor::new(text));
    let mut steps = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("script row {}", line + 1))?;
        let field = |i: usize| record.get(i).unwrap_or("").trim();
        match field(0) {
            "add" => steps.push(Step::Add {
                id:    field(1).to_owned(),
                entry: field(2).parse().with_context(|| format!("row {}: entry", line + 1))?,
                exit:  field(3).parse().with_context(|| format!("row {}: exit", line + 1))?,
            }),
            "move" => steps.push(Step::Move(
                field(1).split(';').map(str::to_owned).collect(),
            )),
            other => bail!("row {}: unknown op {other:?}", line + 1),
        }
    }
    Ok(steps)
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn print_tick(report: &TickReport) {
    println!("{}  changed={}", report.tick, report.changed());
    for mv in &report.moves {
        println!("    {:<3} {} -> {}", mv.id, mv.from, mv.to);
    }
    for exit in &report.exits {
        println!("    {:<3} exits at {}", exit.id, exit.at);
    }
    for held in &report.held {
        println!("    {:<3} holds at {} ({})", held.id, held.at, held.reason);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logger::init();

    println!("=== junction: rail interlocking ===");
    let topology = Layout::junction().build()?;
    println!(
        "Topology: {} sections, {} tracks, {} crossing(s)",
        topology.section_count(),
        topology.track_count(),
        topology.crossings().len()
    );
    let mut interlocking = Interlocking::new(topology);

    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))
        .with_context(|| format!("opening journal in {OUTPUT_DIR}/"))?;
    let mut journal = JournalObserver::new(writer);

    let steps = load_script(SCRIPT_CSV)?;
    let mut names: Vec<String> = Vec::new();
    for step in steps {
        match step {
            Step::Add { id, entry, exit } => {
                let ok = interlocking.add_train(&id, entry, exit);
                println!("add {id} {entry} -> {exit}: {}", if ok { "admitted" } else { "rejected" });
                if ok {
                    names.push(id);
                }
            }
            Step::Move(batch) => {
                let report = interlocking.step(&batch, &mut journal)?;
                print_tick(&report);
            }
        }
    }

    journal.finish()?;
    if let Some(e) = journal.take_error() {
        error!(error = %e, "journal write failed");
    }
    info!(
        ticks = interlocking.current_tick().0,
        trains = names.len(),
        still_running = interlocking.active_trains().count(),
        "run complete"
    );

    println!();
    for id in &names {
        match interlocking.get_train(id) {
            EXITED => println!("{id}: exited"),
            section => println!("{id}: still at section {section}"),
        }
    }
    interlocking.check_consistency()?;
    println!("Journal written to {OUTPUT_DIR}/train_events.csv and {OUTPUT_DIR}/tick_summaries.csv");
    Ok(())
}
