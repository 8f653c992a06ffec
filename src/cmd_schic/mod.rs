//! Subcommand modules for the `schic` binary.

pub mod binary;
pub mod bottom;
pub mod conserve;
pub mod pipeline;

/// Per-file outcomes of a stage that isolates failures
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub written: Vec<std::path::PathBuf>,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped + self.failed
    }

    /// Errors out when any file failed, after the whole batch has been attempted
    pub fn finish(&self, stage: &str) -> anyhow::Result<()> {
        log::info!(
            "{}: {} written, {} skipped, {} failed",
            stage,
            self.written.len(),
            self.skipped,
            self.failed
        );
        if self.failed > 0 {
            anyhow::bail!("{} of {} file(s) failed in {}", self.failed, self.total(), stage);
        }
        Ok(())
    }
}
