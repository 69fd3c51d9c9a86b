use std::fmt::Display;
use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};

use crate::catalog::Combination;
use crate::orbs::OrbQueue;
use crate::session::{Ending, SessionResult};

const ORB_PROMPT: &str = "Enter orbs: ";

/// Line-oriented output for a raw-mode terminal.
///
/// Raw mode disables output post-processing, so every line ends in `\r\n`.
/// The live queue is redrawn in place on the current line.
#[derive(Debug)]
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) -> io::Result<()> {
        queue!(
            self.out,
            Print("\r"),
            Clear(ClearType::UntilNewLine),
            Print(text),
            Print("\r\n")
        )
    }

    fn redraw(&mut self, text: impl Display) -> io::Result<()> {
        queue!(
            self.out,
            Print("\r"),
            Clear(ClearType::UntilNewLine),
            Print(text)
        )
    }

    fn newline(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\r\n"))
    }

    pub fn welcome(&mut self, countdown_secs: u64) -> io::Result<()> {
        self.line("Welcome to the Invoker drill!")?;
        if countdown_secs > 0 {
            self.line(format!(
                "Get ready. The drill begins in {countdown_secs} seconds..."
            ))?;
        }
        self.newline()?;
        self.line("--- Instructions ---")?;
        self.line("- Press 'Q', 'W', or 'E' to choose orbs.")?;
        self.line("- Your last 3 orbs will be used for invocation.")?;
        self.line("- Press 'R' to invoke the spell.")?;
        self.line("- Press 'C' to clear your current orb selection.")?;
        self.line("- Press 'X' to quit.")?;
        self.newline()?;
        self.out.flush()
    }

    pub fn countdown_tick(&mut self, remaining: u64) -> io::Result<()> {
        self.line(format!("{remaining}..."))?;
        self.out.flush()
    }

    pub fn attempt_header(
        &mut self,
        index: usize,
        total: usize,
        combination: &Combination,
    ) -> io::Result<()> {
        self.newline()?;
        self.line(format!(
            "--- Spell {} of {}: {} ---",
            index + 1,
            total,
            combination.name.bold()
        ))?;
        self.redraw(ORB_PROMPT)?;
        self.out.flush()
    }

    pub fn queue(&mut self, queue: &OrbQueue) -> io::Result<()> {
        self.redraw(format!("{ORB_PROMPT}{queue}"))?;
        self.out.flush()
    }

    pub fn insufficient(&mut self, have: usize, need: usize, queue: &OrbQueue) -> io::Result<()> {
        self.newline()?;
        self.line(format!(
            "[R] Invoke attempt: Not enough orbs ({have}/{need}). Current: {queue}"
        ))?;
        self.redraw(format!("{ORB_PROMPT}{queue}"))?;
        self.out.flush()
    }

    pub fn cleared(&mut self) -> io::Result<()> {
        self.redraw(format!("Orbs cleared. {ORB_PROMPT}"))?;
        self.out.flush()
    }

    pub fn success(&mut self, combination: &Combination) -> io::Result<()> {
        self.newline()?;
        queue!(
            self.out,
            Print("\r"),
            Clear(ClearType::UntilNewLine),
            Print("[R] Invoke attempt: "),
            PrintStyledContent("SUCCESS!".green().bold()),
            Print(format!(" You invoked {}.\r\n", combination.name))
        )?;
        self.out.flush()
    }

    pub fn failure(&mut self, combination: &Combination, got: &OrbQueue) -> io::Result<()> {
        self.newline()?;
        queue!(
            self.out,
            Print("\r"),
            Clear(ClearType::UntilNewLine),
            Print("[R] Invoke attempt: "),
            PrintStyledContent("FAILED.".red().bold()),
            Print(format!(
                " Expected anagram of {}, got {got}.\r\n",
                combination.keys()
            ))
        )?;
        self.out.flush()
    }

    pub fn quitting(&mut self) -> io::Result<()> {
        self.newline()?;
        self.line("Quitting the drill.")?;
        self.out.flush()
    }

    pub fn nothing_to_practice(&mut self) -> io::Result<()> {
        self.line("No spells available to practice.")?;
        self.out.flush()
    }

    pub fn read_error(&mut self, err: &io::Error) -> io::Result<()> {
        self.newline()?;
        self.line(format!("Error reading input: {err}"))?;
        self.out.flush()
    }

    pub fn summary(&mut self, result: &SessionResult) -> io::Result<()> {
        self.newline()?;
        match result.ending {
            Ending::Aborted => self.line("--- Game Over (incomplete) ---")?,
            Ending::Completed | Ending::Quit => self.line("--- Game Over! ---")?,
        }
        self.line(format!(
            "You attempted {} of {} spells.",
            result.attempts, result.total
        ))?;
        self.line(format!(
            "Your score: {} out of {} ({:.0}% accuracy).",
            result.score,
            result.attempts,
            result.accuracy_percent()
        ))?;
        self.line(format!(
            "Total time: {:.2} seconds.",
            result.elapsed.as_secs_f64()
        ))?;
        if let (Some(avg), Some(sd)) = (
            result.average_attempt_secs(),
            result.attempt_std_dev_secs(),
        ) {
            self.line(format!("Average per spell: {avg:.2} seconds (± {sd:.2})."))?;
        }
        self.out.flush()
    }
}
