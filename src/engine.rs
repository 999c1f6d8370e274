use crate::alphabet::Alphabet;
use crate::classify::Classification;
use crate::config::RenameConfig;
use crate::error::Result;
use crate::files::{self, FileBuffer};
use crate::planner::{self, ReplacementPlan};
use crate::substitute::substitute;
use crate::tokenizer::tokens;
use std::path::PathBuf;

/// Runs the classify → alphabet → plan → substitute pipeline.
#[derive(Debug, Clone, Default)]
pub struct Renamer {
    config: RenameConfig,
}

impl Renamer {
    pub fn new(config: RenameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// Classifies every token of every buffer.
    pub fn classify(&self, files: &[FileBuffer]) -> Classification {
        let mut classification =
            Classification::new(self.config.target_rule, self.config.alphabet.is_none());
        classification.reserve(self.config.reserved.iter().cloned());
        classification.extend(files.iter().flat_map(|f| tokens(&f.content)));
        classification
    }

    /// Builds the configured alphabet, or derives one from `classification`.
    pub fn alphabet(&self, classification: &Classification) -> Result<Alphabet> {
        let alphabet = match &self.config.alphabet {
            Some(groups) => Alphabet::explicit(groups.as_slice())?,
            None => Alphabet::derived(classification.letters(), self.config.coverage_percent)?,
        };
        Ok(alphabet)
    }

    /// Computes replacements without touching any buffer.
    pub fn plan(&self, files: &[FileBuffer]) -> Result<ReplacementPlan> {
        let classification = self.classify(files);
        let alphabet = self.alphabet(&classification)?;
        tracing::info!(
            "{} tokens, {} target words, alphabet [{}]",
            classification.tokens_seen(),
            classification.target_count(),
            alphabet
        );

        let plan = planner::plan(&classification, &alphabet);
        tracing::info!(
            "planned {} replacements from {} candidates",
            plan.len(),
            plan.candidates_drawn()
        );
        Ok(plan)
    }

    /// Renames in memory. Buffers are only modified if planning succeeds.
    pub fn rename(&self, files: &mut [FileBuffer]) -> Result<RenameStats> {
        let bytes_before = content_bytes(files);
        let plan = self.plan(files)?;
        let report = substitute(&plan, files);

        let stats = RenameStats {
            files: files.len(),
            targets: plan.len(),
            replacements: report.total(),
            bytes_before,
            bytes_after: content_bytes(files),
        };
        tracing::info!(
            "{} replacements in {}/{} files, {} -> {} bytes",
            stats.replacements,
            report.files_changed(),
            stats.files,
            stats.bytes_before,
            stats.bytes_after
        );
        Ok(stats)
    }

    /// Reads every file, renames, then rewrites every file.
    ///
    /// Nothing is written unless all reads and planning succeed. Every input
    /// is rewritten, changed or not. A failed write leaves earlier files
    /// rewritten and later files untouched.
    pub fn rename_files(&self, paths: &[PathBuf]) -> Result<RenameStats> {
        let mut buffers = files::read_all(paths)?;
        let stats = self.rename(&mut buffers)?;
        files::write_all(&buffers)?;
        Ok(stats)
    }
}

fn content_bytes(files: &[FileBuffer]) -> usize {
    files.iter().map(|f| f.content.len()).sum()
}

/// Statistics about one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameStats {
    /// Files processed
    pub files: usize,
    /// Distinct Target words renamed
    pub targets: usize,
    /// Occurrences replaced
    pub replacements: usize,
    /// Text size before renaming, excluding byte-order marks
    pub bytes_before: usize,
    /// Text size after renaming
    pub bytes_after: usize,
}

impl RenameStats {
    /// Bytes removed as a percentage of input size.
    pub fn savings_ratio(&self) -> f64 {
        if self.bytes_before == 0 {
            0.0
        } else {
            (self.bytes_saved() as f64 / self.bytes_before as f64) * 100.0
        }
    }

    /// Bytes removed by renaming.
    pub fn bytes_saved(&self) -> usize {
        self.bytes_before.saturating_sub(self.bytes_after)
    }
}
