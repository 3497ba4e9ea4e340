use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::name_dictionary::NameDictionary;
use crate::subtitle_processor::{Dialect, SubtitleCollection};

// @module: Application controller for subtitle reformatting

/// Main application controller: load, transform and write subtitle files
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Names from the config and the dictionary file
    names: NameDictionary,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let names = config.resolve_names()?;
        if !names.is_empty() {
            debug!("Loaded {} name translation(s)", names.len());
        }
        Ok(Self { config, names })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline on a document: load in the configured dialect,
    /// reformat, translate names, renumber, then serialize.
    pub fn process_text(&self, text: &str) -> Result<String> {
        let dialect = self.config.dialect;
        let mut subtitles = SubtitleCollection::parse(text, dialect)
            .with_context(|| format!("Failed to parse {} subtitles", dialect))?;

        if self.config.reformat {
            subtitles = subtitles.reformat();
        }
        if !self.names.is_empty() {
            subtitles = subtitles.translate_names(&self.names);
        }
        if self.config.renumber {
            subtitles = subtitles.renumber();
        }

        Ok(subtitles.to_string())
    }

    /// Process a single file into `output_dir`. Returns the written path, or
    /// `None` when an existing output was kept.
    pub fn run(&self, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<Option<PathBuf>> {
        if !input_file.is_file() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::generate_output_path(
            input_file,
            output_dir,
            &self.config.output_suffix,
            &self.config.output_extension,
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(None);
        }

        let content = FileManager::read_to_string(input_file)?;
        let formatted = self
            .process_text(&content)
            .with_context(|| format!("Failed to process {:?}", input_file))?;
        FileManager::write_to_file(&output_path, &formatted)?;

        info!("Success: {:?}", output_path);
        Ok(Some(output_path))
    }

    /// Process every matching file beneath `input_dir`, writing next to each
    /// input. Failing files are logged and counted but do not stop the run.
    /// Returns the number of files written.
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<usize> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let own_suffix = format!(".{}", self.config.output_suffix);
        let files: Vec<PathBuf> = FileManager::find_files(input_dir, &self.config.output_extension)?
            .into_iter()
            // Outputs of earlier runs share the extension
            .filter(|path| {
                self.config.output_suffix.is_empty()
                    || !path
                        .file_stem()
                        .is_some_and(|stem| stem.to_string_lossy().ends_with(&own_suffix))
            })
            .collect();

        if files.is_empty() {
            warn!("No .{} files found in {:?}", self.config.output_extension, input_dir);
            return Ok(0);
        }

        let progress_bar = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("#>-"));

        let mut written = 0;
        let mut failed = 0;
        for path in &files {
            progress_bar.set_message(
                path.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            let output_dir = path.parent().unwrap_or(Path::new("."));
            match self.run(path, output_dir, force_overwrite) {
                Ok(Some(_)) => written += 1,
                Ok(None) => {}
                Err(e) => {
                    error!("Error processing file {:?}: {:#}", path, e);
                    failed += 1;
                }
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!("Finished processing {} files ({} written, {} failed)", files.len(), written, failed);
        Ok(written)
    }

    /// Dialect used for all documents handled by this controller
    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }
}
