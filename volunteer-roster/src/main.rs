use anyhow::{Context, Result};
use clap::Parser;

use volunteer_roster::cli::Cli;
use volunteer_roster::display::{print_summary, render_roster_text, summarize};
use volunteer_roster::export::write_roster;
use volunteer_roster::parser::load_signups;
use volunteer_roster::{allocate, logging};

fn run(cli: &Cli) -> Result<()> {
    println!("Loading signups from {}...", cli.input.display());
    let signups = load_signups(&cli.input, cli.variables.as_deref())
        .with_context(|| format!("reading {}", cli.input.display()))?;

    println!(
        "Loaded {} signups for {} parties and {} field trips across {} teachers",
        signups.volunteers.len(),
        signups.parties.len(),
        signups.field_trips.len(),
        signups.teachers.len()
    );

    let table = allocate(
        &signups.volunteers,
        &signups.parties,
        &signups.field_trips,
        &signups.teachers,
        cli.seed,
    );

    print_summary(&summarize(&table, &signups.parties, &signups.field_trips, &signups.teachers));
    if cli.print {
        println!("\n{}", render_roster_text(&table, &signups.parties, &signups.field_trips));
    }

    let written = write_roster(
        &cli.output,
        cli.format.selection(),
        &table,
        &signups.parties,
        &signups.field_trips,
        cli.seed,
    )
    .with_context(|| format!("writing roster to {}", cli.output.display()))?;

    println!("\nRoster saved to:");
    for path in &written {
        println!("  - {}", path.display());
    }

    Ok(())
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
