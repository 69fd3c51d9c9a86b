use std::{
    io::{self, stdin, Write},
    process::ExitCode,
    thread,
    time::Duration,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::tty::IsTty;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info};

use invoker::{
    catalog::Catalog,
    config::{Config, ConfigStore, FileConfigStore},
    console::Console,
    keys::CrosstermKeySource,
    logging,
    session::Session,
    terminal::{spawn_interrupt_listener, RawModeGuard},
    GameError,
};

/// timed terminal drill for invoking three-orb spell combinations
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Spells are shown one at a time in random order. Type Q, W and E to fill the last three orb slots, R to invoke, C to clear and X to quit. Any ordering of the right orbs counts."
)]
pub struct Cli {
    /// number of spells to practice (stored default: 10)
    #[clap(short = 'n', long)]
    spells: Option<usize>,

    /// seconds to count down before the first spell (stored default: 5)
    #[clap(short = 'c', long)]
    countdown: Option<u64>,

    /// seed the shuffle for a reproducible spell order
    #[clap(long)]
    seed: Option<u64>,

    /// remember --spells and --countdown as the new defaults
    #[clap(long)]
    save: bool,
}

impl Cli {
    /// Flags override whatever the config store holds
    fn resolve(&self, stored: &Config) -> Config {
        Config {
            spells: self.spells.unwrap_or(stored.spells),
            countdown_secs: self.countdown.unwrap_or(stored.countdown_secs),
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = logging::init() {
        info!(path = %path.display(), "logging enabled");
    }

    let store = FileConfigStore::new();
    let settings = cli.resolve(&store.load());
    if cli.save {
        if let Err(e) = store.save(&settings) {
            eprintln!(
                "warning: could not save settings to {}: {e}",
                store.path().display()
            );
        }
    }

    exit_code(run(&cli, &settings))
}

/// Interrupts never get here; the listener thread exits with 130 itself.
fn exit_code(result: Result<(), GameError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "drill ended with an error");
            // The partial summary has already been printed for read failures
            if !matches!(e, GameError::InputRead { .. }) {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, settings: &Config) -> Result<(), GameError> {
    let _raw = RawModeGuard::enable()?;
    spawn_interrupt_listener()?;

    let mut console = Console::new(io::stdout());
    console
        .welcome(settings.countdown_secs)
        .map_err(GameError::Output)?;
    countdown(&mut console, settings.countdown_secs).map_err(GameError::Output)?;

    let list = Catalog::standard().practice_list(settings.spells, &mut cli.rng());
    let mut session = Session::new(list);

    match session.run(&mut CrosstermKeySource::new(), &mut console) {
        Ok(_) => Ok(()),
        Err(GameError::InputRead { source, partial }) => {
            console.summary(&partial).map_err(GameError::Output)?;
            Err(GameError::InputRead { source, partial })
        }
        Err(e) => Err(e),
    }
}

fn countdown<W: Write>(console: &mut Console<W>, secs: u64) -> io::Result<()> {
    for remaining in (1..=secs).rev() {
        console.countdown_tick(remaining)?;
        thread::sleep(Duration::from_secs(1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoker::session::SessionResult;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["invoker"]);

        assert_eq!(cli.spells, None);
        assert_eq!(cli.countdown, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.save);
    }

    #[test]
    fn test_cli_spells() {
        let cli = Cli::parse_from(["invoker", "-n", "3"]);
        assert_eq!(cli.spells, Some(3));

        let cli = Cli::parse_from(["invoker", "--spells", "7"]);
        assert_eq!(cli.spells, Some(7));
    }

    #[test]
    fn test_cli_countdown_and_seed() {
        let cli = Cli::parse_from(["invoker", "-c", "0", "--seed", "42", "--save"]);
        assert_eq!(cli.countdown, Some(0));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.save);
    }

    #[test]
    fn test_cli_rejects_negative_spells() {
        assert!(Cli::try_parse_from(["invoker", "-n", "-1"]).is_err());
    }

    #[test]
    fn test_resolve_prefers_flags() {
        let stored = Config {
            spells: 4,
            countdown_secs: 2,
        };
        let cli = Cli::parse_from(["invoker", "--spells", "6"]);
        assert_eq!(
            cli.resolve(&stored),
            Config {
                spells: 6,
                countdown_secs: 2,
            }
        );

        let cli = Cli::parse_from(["invoker"]);
        assert_eq!(cli.resolve(&stored), stored);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let cli = Cli::parse_from(["invoker", "--seed", "9"]);
        let catalog = Catalog::standard();
        let a = catalog.practice_list(10, &mut cli.rng());
        let b = catalog.practice_list(10, &mut cli.rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_exit_code_success() {
        assert_eq!(exit_code(Ok(())), ExitCode::SUCCESS);
    }

    #[test]
    fn test_exit_code_read_failure() {
        let err = GameError::InputRead {
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "tty closed"),
            partial: SessionResult::default(),
        };
        assert_eq!(exit_code(Err(err)), ExitCode::FAILURE);
    }

    #[test]
    fn test_exit_code_setup_failure() {
        let err = GameError::TerminalSetup(io::Error::other("no raw mode"));
        assert_eq!(exit_code(Err(err)), ExitCode::FAILURE);
    }

    #[test]
    fn test_countdown_zero_prints_nothing() {
        let mut console = Console::new(Vec::new());
        countdown(&mut console, 0).unwrap();
        assert!(console.into_inner().is_empty());
    }

    #[test]
    fn test_countdown_ticks_down() {
        let mut console = Console::new(Vec::new());
        countdown(&mut console, 1).unwrap();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.contains("1..."));
    }
}
