use anyhow::Context;
use sdl_document::BindingOptions;
use sdl_document::Document;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Input options shared by commands that load SDL files.
#[derive(Debug, clap::Args)]
pub(crate) struct SchemaArgs {
    #[arg(
        default_value="model",
        help="Name of the directive that binds a type to a model class.",
        long,
    )]
    pub binding_directive: String,

    #[arg(
        default_value="class",
        help="Name of the binding directive's argument holding the class name.",
        long,
    )]
    pub binding_argument: String,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    pub graphql_file_exts: Vec<String>,

    #[arg(
        help="A model class known to the application. Either `Name`, or \
             `Name=Canonical\\Name` to index bindings of `Name` under a \
             fully qualified name. May be repeated.",
        long,
    )]
    pub model_class: Vec<String>,

    #[arg(
        help="A file listing model classes, one per line, in the same form \
             as --model-class. Blank lines and lines starting with `#` are \
             ignored.",
        long,
    )]
    pub model_class_file: Option<PathBuf>,

    #[arg(
        help="Paths to one or more SDL files or directories containing SDL \
             files.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    pub file_or_dir_paths: Vec<PathBuf>,
}

/// SDL files found under the input paths.
#[derive(Debug, Default)]
pub(crate) struct FoundFiles {
    pub file_paths: Vec<PathBuf>,
    pub num_skipped: usize,
}

impl SchemaArgs {
    pub fn binding_options(&self) -> BindingOptions {
        BindingOptions::new(&self.binding_directive, &self.binding_argument)
    }

    /// Whether any model classes were given. Without them, binding
    /// annotations are only indexed, not checked.
    pub fn has_model_classes(&self) -> bool {
        !self.model_class.is_empty() || self.model_class_file.is_some()
    }

    /// The class registry built from `--model-class` and
    /// `--model-class-file`, keyed by the name as written in SDL.
    pub fn class_registry(&self) -> anyhow::Result<HashMap<String, String>> {
        let mut registry = HashMap::new();
        for arg in &self.model_class {
            let (name, canonical) = parse_model_class(arg)?;
            registry.insert(name, canonical);
        }

        if let Some(path) = &self.model_class_file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read model class file {path:?}"))?;
            for (line_idx, line) in content.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let (name, canonical) = parse_model_class(line)
                    .with_context(|| format!("{}:{}", path.display(), line_idx + 1))?;
                registry.insert(name, canonical);
            }
        }

        log::debug!("Registered {} model classes.", registry.len());
        Ok(registry)
    }

    /// Finds every SDL file at or under the input paths, walking
    /// directories recursively.
    ///
    /// A single file argument is always included, even if its extension
    /// is not one of `--graphql-file-exts`.
    pub fn find_files(&self) -> anyhow::Result<FoundFiles> {
        let graphql_file_exts: HashSet<String> =
            self.graphql_file_exts.iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let mut found = FoundFiles::default();
        for path in &self.file_or_dir_paths {
            for entry in WalkDir::new(path.as_path()).follow_links(true).sort_by_file_name() {
                let entry = entry.with_context(|| {
                    format!("failed to scan {path:?}")
                })?;
                let path = entry.path();
                if !entry.file_type().is_file() {
                    log::trace!("Skipping non-file: {path:#?}.");
                    continue;
                }
                if has_extension(path, &graphql_file_exts) {
                    log::trace!("Found file at {path:#?}.");
                    found.file_paths.push(canonicalize(path)?);
                } else {
                    log::trace!("Skipping non-SDL file: {path:#?}.");
                    found.num_skipped += 1;
                }
            }
        }

        if found.file_paths.is_empty()
            && self.file_or_dir_paths.len() == 1
            && let Some(first_arg_path) = self.file_or_dir_paths.first()
            && first_arg_path.is_file() {
            let first_arg_path = canonicalize(first_arg_path)?;
            log::warn!(
                "Proceeding with {first_arg_path:#?} even though it doesn't \
                match any of the --graphql-file-exts ({}).",
                graphql_file_exts.iter()
                    .map(|ext| format!("`.{ext}`"))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            found.num_skipped = found.num_skipped.saturating_sub(1);
            found.file_paths.push(first_arg_path);
        }

        log::debug!("Found {} SDL files.", found.file_paths.len());
        Ok(found)
    }

    /// Loads and merges `file_paths` in order under this command's binding
    /// options.
    pub fn load_document(&self, file_paths: &[PathBuf]) -> anyhow::Result<Document> {
        let mut document = Document::new().with_binding_options(self.binding_options());
        for file_path in file_paths {
            match Document::from_file(file_path) {
                Ok(loaded) => document.merge(loaded),
                Err(sdl_document::LoadError::Syntax { file_path, source_text, err }) => {
                    anyhow::bail!(
                        "{}\n{}",
                        file_path.display(),
                        err.format_detailed(Some(&source_text)),
                    );
                },
                Err(err) => return Err(err.into()),
            }
        }
        Ok(document)
    }
}

/// Splits a `Name` or `Name=Canonical` model class argument.
pub(crate) fn parse_model_class(arg: &str) -> anyhow::Result<(String, String)> {
    let (name, canonical) = match arg.split_once('=') {
        Some((name, canonical)) => (name.trim(), canonical.trim()),
        None => (arg.trim(), arg.trim()),
    };
    if name.is_empty() || canonical.is_empty() {
        anyhow::bail!("invalid model class `{arg}`: expected `Name` or `Name=Canonical`");
    }
    Ok((name.to_string(), canonical.to_string()))
}

fn has_extension(path: &Path, exts: &HashSet<String>) -> bool {
    path.extension()
        .map(|ext| exts.contains(&*ext.to_string_lossy()))
        .unwrap_or(false)
}

fn canonicalize(path: &Path) -> anyhow::Result<PathBuf> {
    std::fs::canonicalize(path)
        .with_context(|| format!("failed to resolve {path:?}"))
}
