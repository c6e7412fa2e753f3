use crate::commands::schema_args::SchemaArgs;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct CompileCmd {
    #[arg(
        help="Where to write the compiled document.",
        long,
        short='o',
    )]
    output: PathBuf,

    #[command(flatten)]
    schema: SchemaArgs,
}

impl CompileCmd {
    async fn compile(&self) -> anyhow::Result<(usize, usize)> {
        let found = self.schema.find_files()?;
        let document = self.schema.load_document(&found.file_paths)?;
        let registry = self.schema.class_registry()?;
        let resolved = sdl_document::resolve_bindings(document, &registry)?;
        let bytes = resolved.to_bytes()?;

        tokio::fs::write(&self.output, &bytes)
            .await
            .with_context(|| format!("failed to write {:?}", self.output))?;
        log::debug!("Wrote {} bytes to {:?}.", bytes.len(), self.output);
        Ok((resolved.types().len(), bytes.len()))
    }
}

#[inherent::inherent]
impl RunnableCommand for CompileCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match self.compile().await {
            Ok((num_types, num_bytes)) => CommandResult::stdout(format_args!(
                "{} Compiled {num_types} types into {} ({num_bytes} bytes).",
                output_utils::GREEN_CHECK,
                self.output.display(),
            )),
            Err(err) => CommandResult::stderr(format_args!(
                "{} Compilation failed: {err:#}",
                output_utils::RED_X,
            )),
        }
    }
}
