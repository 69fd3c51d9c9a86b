use std::io;

use thiserror::Error;

use crate::session::SessionResult;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("could not enable raw terminal mode: {0}")]
    TerminalSetup(#[source] io::Error),

    #[error("error reading input: {source}")]
    InputRead {
        #[source]
        source: io::Error,
        /// Progress made before the key source failed
        partial: SessionResult,
    },

    #[error("error writing to terminal: {0}")]
    Output(#[source] io::Error),

    #[error("could not install interrupt listener: {0}")]
    Signal(#[source] io::Error),
}
