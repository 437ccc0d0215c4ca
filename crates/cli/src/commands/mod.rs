pub mod account;
pub mod catalog;

use thiserror::Error;

/// Errors that can occur while running a command.
///
/// The details of a failed request have already been logged by the client.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command needs a session token.
    #[error("Not logged in, run `tomato login` first")]
    NotLoggedIn,

    /// The server rejected or could not complete the request.
    #[error("{0} failed")]
    Failed(&'static str),
}
