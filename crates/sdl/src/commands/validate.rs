use crate::commands::schema_args::SchemaArgs;
use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[command(flatten)]
    schema: SchemaArgs,
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let found = match self.schema.find_files() {
            Ok(found) => found,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} Failed to find SDL files: {err:#}",
                output_utils::RED_X,
            )),
        };

        let document = match self.schema.load_document(&found.file_paths) {
            Ok(document) => document,
            Err(err) => return CommandResult::stderr(format_args!(
                "{} SDL validation errors:\n{err:#}",
                output_utils::RED_X,
            )),
        };

        let registry = if self.schema.has_model_classes() {
            match self.schema.class_registry() {
                Ok(registry) => Some(registry),
                Err(err) => return CommandResult::stderr(format_args!(
                    "{} {err:#}",
                    output_utils::RED_X,
                )),
            }
        } else {
            None
        };

        let duplicates = match &registry {
            Some(registry) => document.duplicate_bindings_with(registry),
            None => document.duplicate_bindings(),
        };
        for duplicate in duplicates {
            log::warn!(
                "{} Model class `{}` is bound by several types ({}); `{}` wins.",
                output_utils::WARNING_SIGN,
                duplicate.class_name,
                duplicate.type_names.join(", "),
                duplicate.type_names.last().map_or("", String::as_str),
            );
        }

        let bindings_line = match &registry {
            Some(registry) => match sdl_document::resolve_bindings(document.clone(), registry) {
                Ok(resolved) => format!(
                    "Checked {} model bindings.",
                    resolved.class_name_to_type_name().len(),
                ),
                Err(err) => return CommandResult::stderr(format_args!(
                    "{} {err}",
                    output_utils::RED_X,
                )),
            },
            None => format!(
                "Indexed {} model bindings (pass --model-class to check them).",
                document.class_name_to_type_name().len(),
            ),
        };

        CommandResult::stdout(format_args!(
            concat!(
                "{} All SDL validated successfully:\n",
                "  * Analyzed {} files.\n",
                "  * Skipped {} non-SDL files.\n",
                "  * Found {} type definitions.\n",
                "  * Found {} directive definitions.\n",
                "  * {}",
            ),
            output_utils::GREEN_CHECK,
            found.file_paths.len(),
            found.num_skipped,
            document.types().len(),
            document.directives().len(),
            bindings_line,
        ))
    }
}
