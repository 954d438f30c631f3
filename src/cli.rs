use colored::Colorize;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use text_io::read;

use crate::libkuizu::mondai::{Question, CHOICE_COUNT};
use crate::libkuizu::session::{Phase, Session, Summary};
use crate::libkuizu::Error;
use crate::Choice;

/// Runs one quiz from `start` to the result table. Returns false when the
/// user quit early instead of finishing.
pub fn quiz_loop(session: &mut Session, questions: Vec<Question>) -> Result<bool, Error> {
    let elapsed = Arc::new(AtomicU64::new(0));
    let published = Arc::clone(&elapsed);
    session.start(questions, move |seconds| {
        published.store(seconds, Ordering::Relaxed);
    })?;

    let total = session.total();
    while session.phase() == Phase::Running {
        let (prompt, options) = match session.current_question() {
            Some(question) => (question.prompt.clone(), question.options.clone()),
            None => break,
        };

        let leading = format!("{}/{}. ", session.position() + 1, total);
        println!(
            "{}{} {}",
            leading.cyan(),
            prompt.black().bold().on_white(),
            format!("[{}s]", elapsed.load(Ordering::Relaxed)).bright_black()
        );
        let indent = " ".repeat(leading.len());
        for (i, option) in options.iter().enumerate() {
            println!("{}{}. {}", indent, format!("{}", i + 1).bold(), option);
        }

        print!(
            "{} ",
            "Answer (1-4, q to quit prematurely and anything else if you don't know):".cyan()
        );
        let choice_string: String = read!("{}\n");
        let choice = Choice::from_str(CHOICE_COUNT, choice_string.as_str());
        debug!("choice: {:?}", choice);

        let chosen = match choice {
            Choice::Option(num) => options[num].clone(),
            Choice::DontKnow => String::new(),
            Choice::Quit => {
                println!("{}", "Quitting Early!".cyan());
                return Ok(false);
            }
        };

        let record = session.submit_answer(&chosen)?;
        if record.was_correct {
            println!(
                "{}",
                format!("Correct!: {} -> {}", session.score() - 1, session.score())
                    .bright_green()
            );
        } else {
            println!("{}", "Incorrect!".bright_red());
            println!(
                "{}",
                format!("The correct choice was {:?}.", record.correct).green()
            );
        }
    }

    render_result(&session.summarize()?);
    Ok(true)
}

pub fn render_result(summary: &Summary) {
    println!();
    println!(
        "{}",
        format!(
            "==========> 正解率 {}% | {}秒 <==========",
            summary.accuracy_percent, summary.total_seconds
        )
        .cyan()
    );
    for row in &summary.rows {
        let mark = if row.was_correct {
            "✓".bright_green()
        } else {
            "✗".bright_red()
        };
        let chosen = if row.chosen.is_empty() {
            "(no answer)"
        } else {
            row.chosen.as_str()
        };
        println!(
            "{} {:<8} {} {}",
            mark,
            row.prompt,
            chosen,
            format!("(correct: {})", row.correct).green()
        );
    }
}

pub fn render_load_error(err: &Error) {
    println!(
        "{}",
        format!("データの読み込みに失敗しました: {}", err).bright_red()
    );
}
