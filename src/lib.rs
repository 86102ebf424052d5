//! lice-fixer - one-shot migration of legacy LICE text calls
//!
//! Rewrites calls in a single C++ source file from the old LICE text API to the
//! font-aware helpers, keeping a `.backup` copy of the original.
//!
//! # Pipeline
//!
//! 1. **Load** - Read the target file as UTF-8 text
//! 2. **Backup** - Copy it verbatim to `<target>.backup`
//! 3. **Draw calls** - `LICE_DrawText` (8 args) becomes `DrawTextWithFont` (6 args)
//! 4. **Measure calls** - `LICE_MeasureText(` is renamed to `MeasureTextWithFont(`
//! 5. **Save** - Overwrite the target with the result
//! 6. **Report** - Print the target and backup paths

pub mod error;
pub mod rewriter;
pub mod rules;

pub use error::{FixError, Result};
pub use rewriter::{backup_path, FixReport, Rewriter, Transformed};
pub use rules::{apply_rules, lice_rules, Rule, RuleKind, RuleOutcome, TARGET_FILE};
