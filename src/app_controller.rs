use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{info, warn, debug};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use indicatif::{ProgressBar, ProgressStyle, MultiProgress};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::scheduler::{FileProcessor, Scheduler};
use crate::subtitle_processor::SubtitleCollection;
use crate::text_decoder;
use crate::translation::{
    SentenceTranslator, TranslationService, group_fragments, merge_translations,
    sanitize_entries, segment_entries,
};

// @module: Application controller for subtitle processing

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Provider-backed translation service, shared by all files
    service: TranslationService,

    // @field: Progress bars of files being translated concurrently
    multi_progress: MultiProgress,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        let service = TranslationService::new(&config.translation);
        Self::with_service(config, service)
    }

    /// Create a controller around an existing translation service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self {
            config,
            service,
            multi_progress: MultiProgress::new(),
        }
    }

    /// Translate one subtitle file and write `<stem>[<lang>].srt` next to it
    ///
    /// Read, decode, parse, sanitize, segment, group, translate, merge and
    /// write. Every failure is returned to the caller for this file only.
    pub async fn translate_file(&self, input_file: &Path) -> Result<PathBuf, AppError> {
        let target_language = &self.config.target_language;

        let bytes = FileManager::read_bytes(input_file).await
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        let text = text_decoder::decode(&bytes, &self.config.source_encoding)?;
        let mut subtitles = SubtitleCollection::from_srt_string(input_file.to_path_buf(), &text)?;

        sanitize_entries(&mut subtitles.entries, &self.config.annotation_marker);
        let groups = group_fragments(segment_entries(&subtitles.entries));
        debug!("{}: {} cues, {} sentences", input_file.display(), subtitles.entries.len(), groups.len());

        let progress_bar = self.file_progress_bar(input_file, groups.len());
        let pb = progress_bar.clone();

        let translator = SentenceTranslator::new(self.service.clone());
        let translated = translator.translate_groups(&groups, target_language, move |completed, _total| {
            pb.set_position(completed as u64);
        }).await;

        // Cleared rather than finished so only active files stay visible
        progress_bar.finish_and_clear();
        merge_translations(&mut subtitles.entries, translated?);

        let output_path = FileManager::output_path_for(input_file, target_language);
        FileManager::write_to_file_async(output_path.clone(), subtitles.to_srt_string()).await
            .map_err(|e| AppError::Write {
                path: output_path.clone(),
                message: format!("{:#}", e),
            })?;

        info!("Saved: {}", output_path.display());
        Ok(output_path)
    }

    // @creates: Per-file progress bar inside the shared MultiProgress
    fn file_progress_bar(&self, input_file: &Path, total: usize) -> ProgressBar {
        let progress_bar = self.multi_progress.add(ProgressBar::new(total as u64));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sentences {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let file_name = input_file.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        progress_bar.set_message(file_name);
        progress_bar
    }

    // @returns: Target language for logs, e.g. "Chinese (zh-CN)"
    fn target_description(&self) -> String {
        let tag = &self.config.target_language;
        match language_utils::get_language_name(tag) {
            Ok(name) => format!("{} ({})", name, tag),
            Err(_) => tag.clone(),
        }
    }

    /// Single-file mode: translate one file, waiting out rate limits
    pub async fn run_file(&self, input_file: PathBuf) -> Result<()> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        info!("Translating {} to {} with {}",
            input_file.display(),
            self.target_description(),
            self.service.provider_name());

        loop {
            match self.translate_file(&input_file).await {
                Ok(_) => return Ok(()),
                Err(e) if e.is_rate_limited() => {
                    let cooldown = self.config.scheduler.cooldown();
                    warn!("{}; retrying in {}s", e, cooldown.as_secs());
                    tokio::time::sleep(cooldown).await;
                }
                Err(e) => return Err(anyhow!("Failed to process {}: {}", input_file.display(), e)),
            }
        }
    }

    /// Directory mode: translate every candidate subtitle below a directory
    pub async fn run_folder(self: Arc<Self>, input_dir: PathBuf) -> Result<()> {
        let files = FileManager::discover_subtitles(&input_dir, &self.config.target_language).await?;
        if files.is_empty() {
            warn!("No subtitle files to translate in {}", input_dir.display());
            return Ok(());
        }

        info!("Found {} subtitle files in {}, translating to {} with {}",
            files.len(),
            input_dir.display(),
            self.target_description(),
            self.service.provider_name());

        let scheduler = Scheduler::new(self.clone(), self.config.scheduler.clone());
        for file in files {
            scheduler.submit(file);
        }
        scheduler.run().await;

        Ok(())
    }
}

#[async_trait]
impl FileProcessor for Controller {
    async fn process_file(&self, path: &Path) -> Result<(), AppError> {
        self.translate_file(path).await.map(|_| ())
    }
}
