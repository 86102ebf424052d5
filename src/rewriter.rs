//! Load, back up, rewrite and save a single source file

use crate::error::{FixError, Result};
use crate::rules::{apply_rules, lice_rules, Rule, RuleOutcome, BACKUP_SUFFIX};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Backup location for `target`: the same path with `.backup` appended
pub fn backup_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Text after all rules ran, with per-rule counts
#[derive(Debug, Clone)]
pub struct Transformed {
    pub text: String,
    pub outcomes: Vec<RuleOutcome>,
}

impl Transformed {
    pub fn total_replacements(&self) -> usize {
        self.outcomes.iter().map(|o| o.replacements).sum()
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct FixReport {
    pub target: PathBuf,
    pub backup: PathBuf,
    pub outcomes: Vec<RuleOutcome>,
    /// Whether the saved text differs from what was loaded
    pub changed: bool,
}

impl fmt::Display for FixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fixed {}", self.target.display())?;
        write!(f, "Backup saved to {}", self.backup.display())
    }
}

/// Rewrites one file in place with an ordered rule set
pub struct Rewriter<'r> {
    target: PathBuf,
    rules: &'r [Rule],
}

impl Rewriter<'static> {
    /// Rewriter using the built-in LICE migration rules
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self::with_rules(target, lice_rules())
    }
}

impl<'r> Rewriter<'r> {
    pub fn with_rules(target: impl Into<PathBuf>, rules: &'r [Rule]) -> Self {
        Self {
            target: target.into(),
            rules,
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn backup_path(&self) -> PathBuf {
        backup_path(&self.target)
    }

    /// Read the whole target as text
    pub fn load(&self) -> Result<String> {
        let text = fs::read_to_string(&self.target)
            .map_err(|e| FixError::from_read(self.target.clone(), e))?;
        debug!("Loaded {} bytes from {}", text.len(), self.target.display());
        Ok(text)
    }

    /// Write `text` verbatim to the backup path, replacing any earlier backup
    pub fn backup(&self, text: &str) -> Result<PathBuf> {
        let path = self.backup_path();
        fs::write(&path, text).map_err(|source| FixError::Write {
            path: path.clone(),
            source,
        })?;
        info!("Backup written to {}", path.display());
        Ok(path)
    }

    /// Apply every rule in order; no filesystem access
    pub fn transform(&self, text: &str) -> Transformed {
        let (text, outcomes) = apply_rules(text, self.rules);
        for outcome in &outcomes {
            info!("{}: {} replacement(s)", outcome.rule, outcome.replacements);
        }
        Transformed { text, outcomes }
    }

    /// Overwrite the target with `text`
    pub fn save(&self, text: &str) -> Result<()> {
        fs::write(&self.target, text).map_err(|source| FixError::Write {
            path: self.target.clone(),
            source,
        })?;
        debug!("Wrote {} bytes to {}", text.len(), self.target.display());
        Ok(())
    }

    /// Full cycle: load, backup, transform, save.
    ///
    /// The target is written back even when no rule matched. If saving fails
    /// the backup is already on disk and the target still holds its original text.
    pub fn run(&self) -> Result<FixReport> {
        let original = self.load()?;
        let backup = self.backup(&original)?;
        let transformed = self.transform(&original);
        self.save(&transformed.text)?;

        let changed = transformed.text != original;
        info!(
            "Rewrote {} ({} replacement(s))",
            self.target.display(),
            transformed.total_replacements()
        );

        Ok(FixReport {
            target: self.target.clone(),
            backup,
            outcomes: transformed.outcomes,
            changed,
        })
    }
}
