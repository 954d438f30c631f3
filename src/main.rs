use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use text_io::read;

mod cli;
mod libkuizu;

use crate::libkuizu::clock::SystemClock;
use crate::libkuizu::session::Session;
use crate::libkuizu::{dataset, mondai, Error};

#[derive(Debug, PartialEq)]
enum Choice {
    Option(usize),
    DontKnow,
    Quit,
}

impl Choice {
    fn from_str(choices_count: usize, input: &str) -> Choice {
        match input.trim() {
            "q" => Choice::Quit,
            input => match input.parse::<usize>() {
                Ok(num) => {
                    if num == 0 || num > choices_count {
                        println!(
                            "{}",
                            format!("There are only {} options available!", choices_count)
                                .bright_red()
                        );
                        Choice::DontKnow
                    } else {
                        Choice::Option(num - 1)
                    }
                }
                Err(_) => Choice::DontKnow,
            },
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ドメインクイズ (Domeinkuizu)")]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "ccTLD_Data.json")]
    dataset: Option<PathBuf>,
    #[arg(short, long, default_value = "10")]
    question_count: usize,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level)).init();

    let dataset_path = args.dataset.unwrap_or(PathBuf::from("ccTLD_Data.json"));
    let entries = match dataset::load(&dataset_path) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("[Setup] Dataset load failed: {}", err);
            cli::render_load_error(&err);
            return Err(err);
        }
    };
    debug!(
        "[Setup] Loaded {} entries from {:?}.",
        entries.len(),
        dataset_path
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut session = Session::new(Arc::new(SystemClock));
    loop {
        let questions = match mondai::generate(&entries, args.question_count, &mut rng) {
            Ok(questions) => questions,
            Err(err) => {
                warn!("[Setup] Question generation failed: {}", err);
                cli::render_load_error(&err);
                return Err(err);
            }
        };
        println!(
            "{}",
            format!("==========> ccTLD クイズ ({} questions) <==========", questions.len()).cyan()
        );

        if !cli::quiz_loop(&mut session, questions)? {
            break;
        }

        print!("{} ", "Play again? (y/n):".cyan());
        let again: String = read!("{}\n");
        if again.trim() != "y" {
            break;
        }
    }

    Ok(())
}
