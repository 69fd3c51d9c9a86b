use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::attempt::{run_attempt, AttemptError, Outcome};
use crate::catalog::PracticeList;
use crate::console::Console;
use crate::error::GameError;
use crate::keys::KeySource;
use crate::util::{mean_secs, std_dev_secs};

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ending {
    #[default]
    Completed,
    Quit,
    /// The key source failed; results are partial
    Aborted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    pub name: &'static str,
    pub matched: bool,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionResult {
    pub score: usize,
    /// Attempts that reached a verdict; a quit attempt is not counted
    pub attempts: usize,
    /// Spells whose header was shown, including one interrupted by a quit
    pub presented: usize,
    /// Size of the practice list
    pub total: usize,
    pub elapsed: Duration,
    pub ending: Ending,
    pub records: Vec<AttemptRecord>,
}

impl SessionResult {
    pub fn accuracy_percent(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.score as f64 / self.attempts as f64 * 100.0
        }
    }

    /// Mean time per judged attempt, `None` before any verdict
    pub fn average_attempt_secs(&self) -> Option<f64> {
        mean_secs(&self.durations())
    }

    pub fn attempt_std_dev_secs(&self) -> Option<f64> {
        std_dev_secs(&self.durations())
    }

    fn durations(&self) -> Vec<Duration> {
        self.records.iter().map(|r| r.duration).collect()
    }
}

/// Mutable scoring state, owned by [`Session`]
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub started_at: Option<Instant>,
    /// Set once, when the session is finalized
    pub finished_at: Option<Instant>,
    pub ending: Option<Ending>,
    pub attempts: usize,
    pub score: usize,
    pub presented: usize,
    pub records: Vec<AttemptRecord>,
}

/// Drives a practice list front to back, one attempt per combination
#[derive(Debug)]
pub struct Session {
    list: PracticeList,
    state: SessionState,
}

impl Session {
    pub fn new(list: PracticeList) -> Self {
        Self {
            list,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run every attempt in list order and print the summary.
    ///
    /// A session runs once. Calling `run` on a finished session returns its
    /// final result again without reading keys or writing to the console.
    ///
    /// # Errors
    ///
    /// [`GameError::InputRead`] carries the partial result when the key source
    /// fails. [`GameError::Output`] when the console cannot be written.
    pub fn run<K, W>(
        &mut self,
        keys: &mut K,
        console: &mut Console<W>,
    ) -> Result<SessionResult, GameError>
    where
        K: KeySource + ?Sized,
        W: Write,
    {
        if let Some(ending) = self.state.ending {
            debug!(?ending, "session already finished");
            return Ok(self.result(ending));
        }

        if self.list.is_empty() {
            console.nothing_to_practice().map_err(GameError::Output)?;
            let result = self.finish(Ending::Completed);
            console.summary(&result).map_err(GameError::Output)?;
            return Ok(result);
        }

        info!(spells = self.list.len(), "session started");
        self.state.started_at = Some(Instant::now());
        let total = self.list.len();
        let mut ending = Ending::Completed;
        let mut read_failure = None;

        for (index, combination) in self.list.iter().enumerate() {
            console
                .attempt_header(index, total, combination)
                .map_err(GameError::Output)?;
            self.state.presented += 1;
            let began = Instant::now();

            match run_attempt(combination, keys, console) {
                Ok(Outcome::Quit) => {
                    info!(spell = combination.name, "player quit");
                    ending = Ending::Quit;
                    break;
                }
                Ok(outcome) => {
                    let matched = outcome == Outcome::Matched;
                    self.state.attempts += 1;
                    if matched {
                        self.state.score += 1;
                    }
                    self.state.records.push(AttemptRecord {
                        name: combination.name,
                        matched,
                        duration: began.elapsed(),
                    });
                    info!(
                        spell = combination.name,
                        matched,
                        score = self.state.score,
                        attempts = self.state.attempts,
                        "attempt judged"
                    );
                }
                Err(AttemptError::Read(source)) => {
                    warn!(error = %source, "ending session early");
                    if let Err(e) = console.read_error(&source) {
                        warn!(error = %e, "could not report read error");
                    }
                    read_failure = Some(source);
                    break;
                }
                Err(AttemptError::Output(e)) => return Err(GameError::Output(e)),
            }
        }

        if let Some(source) = read_failure {
            return Err(GameError::InputRead {
                source,
                partial: self.finish(Ending::Aborted),
            });
        }

        let result = self.finish(ending);
        info!(
            score = result.score,
            attempts = result.attempts,
            elapsed_secs = result.elapsed.as_secs_f64(),
            "session finished"
        );
        console.summary(&result).map_err(GameError::Output)?;
        Ok(result)
    }

    fn finish(&mut self, ending: Ending) -> SessionResult {
        self.state.finished_at = Some(Instant::now());
        self.state.ending = Some(ending);
        self.result(ending)
    }

    fn result(&self, ending: Ending) -> SessionResult {
        SessionResult {
            score: self.state.score,
            attempts: self.state.attempts,
            presented: self.state.presented,
            total: self.list.len(),
            elapsed: match (self.state.started_at, self.state.finished_at) {
                (Some(start), Some(end)) => end.duration_since(start),
                _ => Duration::ZERO,
            },
            ending,
            records: self.state.records.clone(),
        }
    }
}
