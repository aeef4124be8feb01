//! Console-to-structured-logger rewriting.
//!
//! Applies an ordered list of regex rules to source text, turning
//! `console.log/warn/error` calls into `log.info/warn/error({ msg })` and
//! `logError(err, msg, { component })`, then adds the logger import when
//! anything changed.
//!
//! Template-literal messages that interpolate values (`${expr}`) lose the
//! interpolated part: the marker and its expression are removed from the
//! emitted message. In `'...'` and `"..."` strings `${...}` is plain text and
//! is kept.

mod file;
mod import;
mod message;
mod rules;

pub use file::rewrite_file;
pub use import::{has_import, insert_import};
pub use message::{strip_interpolation, QuoteStyle};
pub use rules::{apply_rules, Emit, Level, Rule, RuleSet};

pub const DEFAULT_IMPORT_PATH: &str = "@/lib/services/logger";

/// Knobs for a rewrite run. `Default` reproduces the stock console rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    pub rules: RuleSet,
    /// Module the logger is imported from.
    pub import_path: String,
    /// Value of the `component` metadata field.
    pub component: String,
    pub quote: QuoteStyle,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self::for_rules(RuleSet::Console)
    }
}

impl RewriteOptions {
    pub fn for_rules(rules: RuleSet) -> Self {
        RewriteOptions {
            rules,
            import_path: DEFAULT_IMPORT_PATH.to_string(),
            component: rules.default_component().to_string(),
            quote: QuoteStyle::default(),
        }
    }

    pub fn import_line(&self) -> String {
        format!(
            "import {{ log, logError }} from {};",
            self.quote.literal(&self.import_path)
        )
    }
}

/// Result of rewriting one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: String,
    /// Calls matched and replaced across all passes.
    pub replacements: usize,
    pub import_added: bool,
}

impl RewriteOutcome {
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Rewrite `text` with `options`. Pure: no I/O.
pub fn rewrite(text: &str, options: &RewriteOptions) -> RewriteOutcome {
    let (mut text, replacements) = apply_rules(options.rules.rules(), text, options);

    let import_added = replacements > 0 && !has_import(&text, &options.import_path);
    if import_added {
        text = insert_import(&text, &options.import_line());
    }

    RewriteOutcome {
        text,
        replacements,
        import_added,
    }
}

/// Rewrite with the default console rules.
pub fn rewrite_source(text: &str) -> (String, usize) {
    let outcome = rewrite(text, &RewriteOptions::default());
    (outcome.text, outcome.replacements)
}
