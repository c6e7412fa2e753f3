mod compile;
pub(crate) mod inspect;
pub(crate) mod schema_args;
mod validate;

use crate::Cli;
use crate::CommandResult;
use compile::CompileCmd;
use inspect::InspectCmd;
use validate::ValidateCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "sdl")]
pub(crate) enum CommandEnum {
    /// Parse and merge SDL files, optionally checking model bindings.
    Validate(Box<ValidateCmd>),

    /// Resolve model bindings and write the document as a cache file.
    Compile(Box<CompileCmd>),

    /// Summarize a cache file written by `compile`.
    Inspect(Box<InspectCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Validate(cmd) => cmd.run(cli).await,
            Self::Compile(cmd) => cmd.run(cli).await,
            Self::Inspect(cmd) => cmd.run(cli).await,
        }
    }
}
