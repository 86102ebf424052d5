//! Rewrite rules for the LICE text API migration
//!
//! Two rules run in order over the whole file:
//!
//! 1. `LICE_DrawText(bm, x, y, text, color, alpha, mode, font)` becomes
//!    `DrawTextWithFont(bm, x, y, text, color, font)`. Alpha and mode are dropped.
//! 2. `LICE_MeasureText(` becomes `MeasureTextWithFont(`. Arguments are not touched,
//!    the compiler is left to flag any call that no longer fits.
//!
//! ## Argument splitting
//!
//! Arguments are split on commas by pattern, not parsed. One argument is a run of
//! anything but `,`, `(` and `)`, and may contain single-level parenthesised groups:
//!
//! ```cpp
//! LICE_DrawText(bm, x, y, Label(i, j), col, 255, 0, GetFont())   // rewritten
//! LICE_DrawText(bm, x, y, f(g(i)), col, 255, 0, font)            // left as is
//! LICE_DrawText(bm, x, y, text, col, font)                       // left as is
//! ```
//!
//! A call that does not split into exactly eight arguments is skipped silently.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// File rewritten by the binary, relative to the working directory
pub const TARGET_FILE: &str = "SnM/SnM_ModernPlaylistUI.cpp";

/// Suffix appended to the target path for the backup copy
pub const BACKUP_SUFFIX: &str = ".backup";

/// Eight-argument draw call being removed
pub const LEGACY_DRAW: &str = "LICE_DrawText";
/// Six-argument replacement taking the font directly
pub const NEW_DRAW: &str = "DrawTextWithFont";
/// Measure call being renamed
pub const LEGACY_MEASURE: &str = "LICE_MeasureText";
/// Name the measure call is renamed to
pub const NEW_MEASURE: &str = "MeasureTextWithFont";

/// One call argument: no top-level commas, at most one level of nested parens
const ARG: &str = r"(?:[^,()]|\([^()]*\))+";

/// Passes for the draw rule. A draw call nested as an argument sits inside a
/// single-level paren group, so the outer match hides it for one pass only.
const DRAW_PASSES: usize = 2;

/// How a rule finds and rewrites its matches
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Regex match expanded through a `$n` replacement template
    Pattern { regex: Regex, template: String },
    /// Plain substring replacement
    Literal { needle: String, replacement: String },
}

/// A named text-to-text rewrite applied to every non-overlapping match
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    kind: RuleKind,
    /// Upper bound on passes over the text; extra passes stop once nothing matches
    max_passes: usize,
}

/// Result of applying a single rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: String,
    pub replacements: usize,
}

impl Rule {
    pub fn pattern(
        name: impl Into<String>,
        pattern: &str,
        template: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            kind: RuleKind::Pattern {
                regex: Regex::new(pattern)?,
                template: template.into(),
            },
            max_passes: 1,
        })
    }

    pub fn literal(
        name: impl Into<String>,
        needle: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: RuleKind::Literal {
                needle: needle.into(),
                replacement: replacement.into(),
            },
            max_passes: 1,
        }
    }

    /// Re-run the rule over its own output, up to `max_passes` times in total
    pub fn repeated(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Rewrite every match in `text`, returning the new text and the match count
    pub fn apply(&self, text: &str) -> (String, usize) {
        let (mut current, mut total) = self.apply_once(text);
        let mut passes = 1;

        while passes < self.max_passes {
            let (next, count) = self.apply_once(&current);
            if count == 0 || next == current {
                break;
            }
            total += count;
            current = next;
            passes += 1;
        }

        (current, total)
    }

    fn apply_once(&self, text: &str) -> (String, usize) {
        match &self.kind {
            RuleKind::Pattern { regex, template } => {
                let mut count = 0;
                let rewritten = regex.replace_all(text, |caps: &Captures| {
                    count += 1;
                    let mut out = String::new();
                    caps.expand(template, &mut out);
                    out
                });
                (rewritten.into_owned(), count)
            }
            RuleKind::Literal {
                needle,
                replacement,
            } => {
                if needle.is_empty() {
                    return (text.to_string(), 0);
                }
                let count = text.matches(needle.as_str()).count();
                (text.replace(needle.as_str(), replacement), count)
            }
        }
    }
}

/// Run `rules` in order, each over the previous rule's output
pub fn apply_rules(text: &str, rules: &[Rule]) -> (String, Vec<RuleOutcome>) {
    let mut current = text.to_string();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        let (next, replacements) = rule.apply(&current);
        outcomes.push(RuleOutcome {
            rule: rule.name().to_string(),
            replacements,
        });
        current = next;
    }

    (current, outcomes)
}

/// Pattern matching a legacy draw call with exactly eight arguments
pub fn draw_call_pattern() -> String {
    let name = regex::escape(LEGACY_DRAW);
    format!(
        r"{name}\(({ARG}),\s*({ARG}),\s*({ARG}),\s*({ARG}),\s*({ARG}),\s*{ARG},\s*{ARG},\s*({ARG})\)"
    )
}

/// Build the LICE migration rules, draw-call reduction first
pub fn build_lice_rules() -> Result<Vec<Rule>, regex::Error> {
    Ok(vec![
        Rule::pattern(
            "draw-text",
            &draw_call_pattern(),
            format!("{NEW_DRAW}(${{1}}, ${{2}}, ${{3}}, ${{4}}, ${{5}}, ${{6}})"),
        )?
        .repeated(DRAW_PASSES),
        Rule::literal(
            "measure-text",
            format!("{LEGACY_MEASURE}("),
            format!("{NEW_MEASURE}("),
        ),
    ])
}

/// The compiled LICE migration rules.
///
/// # Panics
///
/// Panics if the built-in draw-call pattern is invalid.
pub fn lice_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RULES.get_or_init(|| build_lice_rules().expect("Invalid LICE rewrite pattern"))
}
