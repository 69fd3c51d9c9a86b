//! Input state machine for a single spell attempt.
//!
//! [`Attempt`] is pure: it takes one raw character at a time and reports what
//! changed. [`run_attempt`] wires it to a [`KeySource`] and a [`Console`].

use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, error, trace};

use crate::catalog::Combination;
use crate::console::Console;
use crate::keys::{Command, KeySource};
use crate::orbs::{is_invocation_of, OrbQueue};
use crate::terminal;

/// Non-terminal result of a keystroke; the attempt is still collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    QueueChanged,
    /// Invoke pressed before the queue was full. Nothing changed.
    Insufficient {
        have: usize,
        need: usize,
    },
    Cleared,
    /// Ctrl+C arrived as a raw character
    Interrupt,
    Ignored,
}

/// How an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    Failed {
        got: OrbQueue,
    },
    /// Ends the whole session, not just this attempt
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue(Feedback),
    Done(Outcome),
}

#[derive(Debug)]
pub struct Attempt<'a> {
    target: &'a Combination,
    queue: OrbQueue,
    outcome: Option<Outcome>,
}

impl<'a> Attempt<'a> {
    pub fn new(target: &'a Combination) -> Self {
        Self {
            target,
            queue: OrbQueue::new(target.len()),
            outcome: None,
        }
    }

    pub fn queue(&self) -> &OrbQueue {
        &self.queue
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Dispatch one raw character. Once the attempt has ended every further
    /// character reports the same outcome and changes nothing.
    pub fn feed(&mut self, c: char) -> Step {
        if let Some(outcome) = self.outcome {
            return Step::Done(outcome);
        }

        match Command::from_char(c) {
            Command::Orb(orb) => {
                self.queue.push(orb);
                Step::Continue(Feedback::QueueChanged)
            }
            Command::Invoke => self.invoke(),
            Command::Clear => {
                self.queue.clear();
                Step::Continue(Feedback::Cleared)
            }
            Command::Quit => {
                self.queue.clear();
                self.finish(Outcome::Quit)
            }
            Command::Interrupt => Step::Continue(Feedback::Interrupt),
            Command::Ignored => Step::Continue(Feedback::Ignored),
        }
    }

    fn invoke(&mut self) -> Step {
        let need = self.target.len();
        if !self.queue.is_full() {
            return Step::Continue(Feedback::Insufficient {
                have: self.queue.len(),
                need,
            });
        }

        let got = self.queue;
        self.queue.clear();
        if is_invocation_of(got.as_slice(), &self.target.orbs) {
            self.finish(Outcome::Matched)
        } else {
            self.finish(Outcome::Failed { got })
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.outcome = Some(outcome);
        Step::Done(outcome)
    }
}

#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("key source failed: {0}")]
    Read(#[source] io::Error),
    #[error("console write failed: {0}")]
    Output(#[source] io::Error),
}

/// Read characters until the attempt is judged or quit.
///
/// # Errors
///
/// [`AttemptError::Read`] when the key source fails, which ends the session.
/// [`AttemptError::Output`] when the console cannot be written.
pub fn run_attempt<K, W>(
    target: &Combination,
    keys: &mut K,
    console: &mut Console<W>,
) -> Result<Outcome, AttemptError>
where
    K: KeySource + ?Sized,
    W: Write,
{
    let mut attempt = Attempt::new(target);

    loop {
        let c = keys.next_char().map_err(|e| {
            error!(spell = target.name, error = %e, "key source failed mid-attempt");
            AttemptError::Read(e)
        })?;
        let step = attempt.feed(c);
        trace!(key = ?c, ?step, "dispatched");

        let shown = match step {
            Step::Continue(Feedback::QueueChanged) => console.queue(attempt.queue()),
            Step::Continue(Feedback::Insufficient { have, need }) => {
                console.insufficient(have, need, attempt.queue())
            }
            Step::Continue(Feedback::Cleared) => console.cleared(),
            Step::Continue(Feedback::Interrupt) => {
                debug!("ctrl+c received in raw mode, raising SIGINT");
                if let Err(e) = terminal::request_interrupt() {
                    error!(error = %e, "could not raise SIGINT");
                }
                Ok(())
            }
            Step::Continue(Feedback::Ignored) => Ok(()),
            Step::Done(outcome) => {
                match outcome {
                    Outcome::Matched => console.success(target),
                    Outcome::Failed { got } => console.failure(target, &got),
                    Outcome::Quit => console.quitting(),
                }
                .map_err(AttemptError::Output)?;
                return Ok(outcome);
            }
        };
        shown.map_err(AttemptError::Output)?;
    }
}
