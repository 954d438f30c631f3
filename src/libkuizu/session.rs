use log::{debug, error};
use std::sync::Arc;
use std::time::Duration;

use crate::libkuizu::clock::Clock;
use crate::libkuizu::mondai::Question;
use crate::libkuizu::timer::Ticker;
use crate::libkuizu::Error;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub index: usize,
    pub prompt: String,
    pub chosen: String,
    pub correct: String,
    pub was_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub accuracy_percent: u32,
    pub total_seconds: u64,
    pub rows: Vec<AnswerRecord>,
}

/// One quiz run: Idle until `start`, Running while answers come in,
/// Finished once the last question is answered. `start` is re-entrant and
/// resets everything, including a still-running timer.
pub struct Session {
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
    phase: Phase,
    questions: Vec<Question>,
    position: usize,
    score: u32,
    answers: Vec<AnswerRecord>,
    started_at_millis: u64,
    finished_at_millis: Option<u64>,
    ticker: Option<Ticker>,
}

impl Session {
    pub fn new(clock: Arc<dyn Clock>) -> Session {
        Session::with_tick_interval(clock, TICK_INTERVAL)
    }

    pub fn with_tick_interval(clock: Arc<dyn Clock>, tick_interval: Duration) -> Session {
        Session {
            clock,
            tick_interval,
            phase: Phase::Idle,
            questions: Vec::new(),
            position: 0,
            score: 0,
            answers: Vec::new(),
            started_at_millis: 0,
            finished_at_millis: None,
            ticker: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != Phase::Running {
            return None;
        }
        self.questions.get(self.position)
    }

    /// Starts (or restarts) the session. The tick callback receives elapsed
    /// whole seconds once per tick interval until the session finishes.
    pub fn start<F>(&mut self, questions: Vec<Question>, on_tick: F) -> Result<(), Error>
    where
        F: FnMut(u64) + Send + 'static,
    {
        if questions.is_empty() {
            return Err(Error::EmptyQuiz);
        }
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
        if self.phase == Phase::Running {
            debug!(
                "[Session] Restarting mid-run; discarding {} answers.",
                self.answers.len()
            );
        }

        self.questions = questions;
        self.position = 0;
        self.score = 0;
        self.answers.clear();
        self.started_at_millis = self.clock.now_millis();
        self.finished_at_millis = None;
        self.phase = Phase::Running;

        let clock = Arc::clone(&self.clock);
        let started = self.started_at_millis;
        let mut publish = on_tick;
        self.ticker = Some(Ticker::spawn(self.tick_interval, move || {
            publish(whole_seconds(clock.now_millis(), started));
        }));

        debug!("[Session] Started with {} questions.", self.questions.len());
        Ok(())
    }

    pub fn submit_answer(&mut self, choice: &str) -> Result<AnswerRecord, Error> {
        if self.phase != Phase::Running {
            error!("[Session] submit_answer called while {:?}.", self.phase);
            return Err(Error::InvalidStateTransition("submit_answer outside Running"));
        }
        let question = &self.questions[self.position];
        let record = AnswerRecord {
            index: self.position,
            prompt: question.prompt.clone(),
            chosen: choice.to_string(),
            correct: question.correct_option.clone(),
            was_correct: choice == question.correct_option,
        };

        self.answers.push(record.clone());
        if record.was_correct {
            self.score += 1;
        }
        self.position += 1;

        if self.position == self.questions.len() {
            self.finished_at_millis = Some(self.clock.now_millis());
            if let Some(mut ticker) = self.ticker.take() {
                ticker.stop();
            }
            self.phase = Phase::Finished;
            debug!(
                "[Session] Finished with score {}/{}.",
                self.score,
                self.questions.len()
            );
        }

        Ok(record)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Running => whole_seconds(self.clock.now_millis(), self.started_at_millis),
            Phase::Finished => whole_seconds(
                self.finished_at_millis.unwrap_or(self.started_at_millis),
                self.started_at_millis,
            ),
        }
    }

    pub fn summarize(&self) -> Result<Summary, Error> {
        if self.phase != Phase::Finished {
            error!("[Session] summarize called while {:?}.", self.phase);
            return Err(Error::InvalidStateTransition("summarize outside Finished"));
        }
        let accuracy =
            (f64::from(self.score) / self.questions.len() as f64 * 100.0).round() as u32;
        Ok(Summary {
            accuracy_percent: accuracy,
            total_seconds: self.elapsed_seconds(),
            rows: self.answers.clone(),
        })
    }
}

fn whole_seconds(now_millis: u64, started_millis: u64) -> u64 {
    now_millis.saturating_sub(started_millis) / 1000
}
