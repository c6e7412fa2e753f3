use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use sdl_document::serializer;
use sdl_document::serializer::StoredState;
use sdl_document::Document;
use sdl_document::ResolvedDocument;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct InspectCmd {
    #[arg(
        help="Path to a file written by `sdl compile`.",
        name="CACHE_FILE",
    )]
    cache_file: PathBuf,
}

impl InspectCmd {
    async fn inspect(&self) -> anyhow::Result<String> {
        let bytes = tokio::fs::read(&self.cache_file)
            .await
            .with_context(|| format!("failed to read {:?}", self.cache_file))?;

        let state = serializer::peek_state(&bytes)?;
        log::debug!("{:?} holds a {state} document.", self.cache_file);
        let summary = match state {
            StoredState::Resolved => {
                summarize(&*ResolvedDocument::from_bytes(&bytes)?, state, bytes.len())
            },
            StoredState::Unresolved => {
                summarize(&sdl_document::deserialize(&bytes)?, state, bytes.len())
            },
        };
        Ok(summary)
    }
}

/// A short listing of what a decoded cache holds.
pub(crate) fn summarize(document: &Document, state: StoredState, num_bytes: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{num_bytes} bytes, {state}");
    let _ = writeln!(out, "  * {} type definitions.", document.types().len());
    let _ = writeln!(out, "  * {} directive definitions.", document.directives().len());
    let _ = writeln!(
        out,
        "  * {} type extensions.",
        document.all_type_extensions().values().map(Vec::len).sum::<usize>(),
    );
    let _ = write!(out, "  * {} model bindings", document.class_name_to_type_name().len());
    for (class_name, type_name) in document.class_name_to_type_name() {
        let _ = write!(out, "\n      {class_name} -> {type_name}");
    }
    out
}

#[inherent::inherent]
impl RunnableCommand for InspectCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match self.inspect().await {
            Ok(summary) => CommandResult::stdout(format_args!(
                "{} {}: {summary}",
                output_utils::GREEN_CHECK,
                self.cache_file.display(),
            )),
            Err(err) => CommandResult::stderr(format_args!(
                "{} Failed to inspect {}: {err:#}",
                output_utils::RED_X,
                self.cache_file.display(),
            )),
        }
    }
}
