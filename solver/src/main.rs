use std::fs;

use anyhow::{Context, Result};
use clap::{App, Arg};
use gridlock::builder::PuzzleBuilder;
use gridlock::Solver;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("solver")
        .about("Fills a crossword structure from a word list")
        .arg(
            Arg::with_name("structure")
                .short("s")
                .long("structure")
                .value_name("FILE")
                .help("Path to the structure grid; `_` marks a fillable cell")
                .required(true),
        )
        .arg(
            Arg::with_name("words")
                .short("w")
                .long("words")
                .value_name("FILE")
                .help("Path to the word list, one candidate per line")
                .required(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Also write the filled grid to this path"),
        )
        .get_matches();

    let structure_path = matches.value_of("structure").expect("structure not included");
    let words_path = matches.value_of("words").expect("words not included");

    let structure = fs::read_to_string(structure_path)
        .with_context(|| format!("failed to read structure file {}", structure_path))?;
    let word_list = fs::read_to_string(words_path)
        .with_context(|| format!("failed to read word list {}", words_path))?;

    let puzzle = PuzzleBuilder::default()
        .structure(&structure)
        .word_list(&word_list)
        .build()
        .context("structure file does not describe a usable grid")?;

    info!(
        "loaded {} slots over a {}x{} grid, {} words",
        puzzle.slot_count(),
        puzzle.dims().0,
        puzzle.dims().1,
        puzzle.words().len()
    );

    match Solver::new(&puzzle).solve() {
        Some(assignment) => {
            let rendered = puzzle.filled(&assignment).to_string();
            print!("{}", rendered);

            if let Some(output) = matches.value_of("output") {
                fs::write(output, &rendered)
                    .with_context(|| format!("failed to write {}", output))?;
            }
        }
        None => println!("No solution."),
    }

    Ok(())
}
