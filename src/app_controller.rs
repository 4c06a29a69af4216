use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::html_extractor;
use crate::metadata::{scrape_metadata, BookMetadata};
use crate::paragraph_segmenter::segment_lines;
use crate::ruby::{
    extract_readings, reapply_readings, try_reapply_readings_strict, RubyStore, RUBY_PLACEHOLDER,
};

// @module: Application controller for document conversion

/// A paragraph consisting solely of one media reference
static MEDIA_PARAGRAPH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A!\[[^\]]*\]\([^)]*\)\z").unwrap());

/// Result of one document conversion
#[derive(Debug)]
pub struct Conversion {
    /// The final document text
    pub document: String,
    /// The reading store after reapplication; remaining entries are
    /// harvested readings that found no occurrence in the fresh text
    pub store: RubyStore,
    /// Bibliographic metadata scraped from the source page
    pub metadata: BookMetadata,
}

/// Main application controller for document conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Convert one source document.
    ///
    /// Runs the full pipeline: line extraction, paragraph segmentation,
    /// harvesting of readings from the prior output (when supplied), and
    /// reapplication over the fresh paragraphs. Without a prior output the
    /// store starts empty and every ideograph run receives a placeholder.
    pub fn convert_html(&self, html: &str, prior_output: Option<&str>) -> Result<Conversion> {
        let lines = html_extractor::extract_lines(html)?;
        let paragraphs = segment_lines(&lines, self.config.strip_leading_indent);

        let mut store = prior_output.map(extract_readings).unwrap_or_default();
        debug!(
            "Reapplying {} harvested readings over {} paragraphs",
            store.remaining(),
            paragraphs.len()
        );

        let mut annotated = Vec::with_capacity(paragraphs.len());
        for paragraph in &paragraphs {
            let text = if self.config.annotation.strict {
                try_reapply_readings_strict(paragraph, &mut store)
                    .context("Strict annotation mode failed")?
            } else {
                reapply_readings(paragraph, &mut store)
            };
            annotated.push(text);
        }

        let mut body = annotated.join("\n\n");

        if self.config.annotation.preserve_prior_media {
            if let Some(prior) = prior_output {
                body = Self::prepend_prior_media(prior, body);
            }
        }

        let metadata = scrape_metadata(html);
        let document = if self.config.output.emit_frontmatter && !metadata.is_empty() {
            format!("{}{}", Self::frontmatter(&metadata), body)
        } else {
            body
        };

        Ok(Conversion {
            document,
            store,
            metadata,
        })
    }

    /// Convert a single file, using its existing output (if any) as the
    /// prior document unless `fresh` is set.
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, fresh: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        FileManager::ensure_dir(&output_dir)?;

        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.config.output.extension,
        );

        let prior = if !fresh && FileManager::file_exists(&output_path) {
            info!("Refreshing {} with its annotations preserved", output_path.display());
            Some(FileManager::read_to_string(&output_path)?)
        } else {
            None
        };

        let html = FileManager::read_to_string(&input_file)?;
        let conversion = self.convert_html(&html, prior.as_deref())?;
        FileManager::write_to_file(&output_path, &conversion.document)?;

        if let Some(title) = &conversion.metadata.title {
            debug!("Converted '{}'", title);
        }

        let placeholders = conversion.document.matches(RUBY_PLACEHOLDER).count();
        if placeholders > 0 {
            warn!(
                "{} readings still required (search the output for {})",
                placeholders, RUBY_PLACEHOLDER
            );
        }
        let leftover = conversion.store.remaining();
        if leftover > 0 {
            warn!(
                "{} stored readings were not consumed; the source text may have changed",
                leftover
            );
        }

        info!(
            "Success: {} ({})",
            output_path.display(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Run the workflow in folder mode, converting every source file in a
    /// directory. Each document's pipeline run is fully independent.
    pub fn run_folder(&self, input_dir: PathBuf, output_dir: PathBuf, fresh: bool) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let mut source_files = Vec::new();
        for ext in &["html", "htm"] {
            let mut files = FileManager::find_files(&input_dir, ext)?;
            source_files.append(&mut files);
        }
        source_files.sort();

        if source_files.is_empty() {
            warn!("No source files found in {:?}", input_dir);
            return Ok(());
        }
        info!("Converting {} files", source_files.len());

        let progress_bar = ProgressBar::new(source_files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let mut failed = 0usize;
        for source_file in &source_files {
            progress_bar.set_message(
                source_file
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
            if let Err(e) = self.run(source_file.clone(), output_dir.clone(), fresh) {
                error!("Failed to convert {:?}: {}", source_file, e);
                failed += 1;
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        let converted = source_files.len() - failed;
        info!(
            "Converted {} of {} files in {}",
            converted,
            source_files.len(),
            Self::format_duration(start_time.elapsed())
        );
        if failed > 0 {
            return Err(anyhow::anyhow!("{} files failed to convert", failed));
        }

        Ok(())
    }

    /// Re-insert media-reference paragraphs from the head of the prior
    /// document ahead of the fresh body, when they are missing from it.
    /// Compatibility shim, not a core guarantee.
    fn prepend_prior_media(prior: &str, body: String) -> String {
        let prior_body = Self::strip_frontmatter(prior);

        let mut leading: Vec<&str> = Vec::new();
        for paragraph in prior_body.split("\n\n") {
            let trimmed = paragraph.trim();
            if trimmed.is_empty() {
                continue;
            }
            if MEDIA_PARAGRAPH_REGEX.is_match(trimmed) {
                leading.push(trimmed);
            } else {
                break;
            }
        }

        let missing: Vec<&str> = leading
            .into_iter()
            .filter(|media| !body.contains(media))
            .collect();
        if missing.is_empty() {
            return body;
        }

        debug!("Re-inserting {} preserved media references", missing.len());
        format!("{}\n\n{}", missing.join("\n\n"), body)
    }

    /// The document body without its YAML frontmatter block
    fn strip_frontmatter(document: &str) -> &str {
        if let Some(rest) = document.strip_prefix("---\n") {
            if let Some(end) = rest.find("\n---\n") {
                return rest[end + 5..].trim_start_matches('\n');
            }
        }
        document
    }

    fn frontmatter(metadata: &BookMetadata) -> String {
        let mut block = String::from("---\n");
        if let Some(title) = &metadata.title {
            block.push_str(&format!("title: \"{}\"\n", Self::escape_yaml(title)));
        }
        if let Some(author) = &metadata.author {
            block.push_str(&format!("author: \"{}\"\n", Self::escape_yaml(author)));
        }
        if let Some(translator) = &metadata.translator {
            block.push_str(&format!("translator: \"{}\"\n", Self::escape_yaml(translator)));
        }
        block.push_str("---\n\n");
        block
    }

    fn escape_yaml(value: &str) -> String {
        value.replace('\\', "\\\\").replace('"', "\\\"")
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
