//! Ordered rewrite rules for console logging calls.
//!
//! Each rule pairs a pattern for one call shape with the shape it is
//! re-emitted as. Rules run in table order and each one sees the output of
//! the previous ones, so for any call name the compound shapes (message plus
//! a trailing argument, template literals) come before the bare literal shape
//! that would otherwise swallow them.

use regex::{Captures, Regex};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::LazyLock;

use super::message::{strip_brackets, strip_interpolation};
use super::RewriteOptions;
use crate::error::{Error, Result};

/// Which family of rules to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// `console.log/warn/error` with literal, template, or `(msg, err)` arguments.
    #[default]
    Console,
    /// `${ICONS.X}`-prefixed templates and `(msg, data)` calls.
    Icons,
}

impl RuleSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSet::Console => "console",
            RuleSet::Icons => "icons",
        }
    }

    /// Metadata tag emitted in `{ component: ... }` when none is configured.
    pub fn default_component(&self) -> &'static str {
        match self {
            RuleSet::Console => "refactored",
            RuleSet::Icons => "todo",
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        match self {
            RuleSet::Console => CONSOLE_RULES.as_slice(),
            RuleSet::Icons => ICON_RULES.as_slice(),
        }
    }
}

impl FromStr for RuleSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "console" => Ok(RuleSet::Console),
            "icons" => Ok(RuleSet::Icons),
            _ => Err(Error::validation_invalid_argument(
                "rules",
                format!("Unknown rule set '{}'. Use: console, icons", s),
                Some(vec!["console".to_string(), "icons".to_string()]),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn method(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

/// The call shape a matched console call is rewritten into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// `log.<level>({ msg })` from group 1.
    Structured(Level),
    /// `logError(<group 2>, msg, { component })` with bracket-stripped msg.
    LogError,
    /// `log.<level>({ msg, component[, data] });` from an icon template.
    IconStructured(Level),
    /// `logError(<data or new Error(msg)>, msg, { component });` from an icon template.
    IconLogError,
    /// `log.<level>({ msg, <data> });`
    DataStructured(Level),
    /// `logError(<data>, msg, { component });`
    DataLogError,
}

pub struct Rule {
    pub label: &'static str,
    pub pattern: Regex,
    pub emit: Emit,
}

impl Rule {
    fn new(label: &'static str, pattern: &str, emit: Emit) -> Self {
        Rule {
            label,
            pattern: Regex::new(pattern).unwrap(),
            emit,
        }
    }

    /// Render the replacement for one match.
    pub fn render(&self, caps: &Captures, options: &RewriteOptions) -> String {
        let quote = options.quote;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let data = group(2).trim();
        let component = quote.literal(&options.component);
        // `${...}` only interpolates inside backticks.
        let message = if is_template(caps) {
            strip_interpolation(group(1))
        } else {
            group(1).to_string()
        };

        match self.emit {
            Emit::Structured(level) => {
                let msg = quote.literal(&message);
                format!("log.{}({{ msg: {} }})", level.method(), msg)
            }
            Emit::LogError => {
                let msg = quote.literal(&strip_brackets(&message));
                format!("logError({}, {}, {{ component: {} }})", data, msg, component)
            }
            Emit::IconStructured(level) => {
                let msg = quote.literal(&strip_interpolation(group(1).trim()));
                let extra = if data.is_empty() {
                    String::new()
                } else {
                    format!(", {}", data)
                };
                format!(
                    "log.{}({{ msg: {}, component: {}{} }});",
                    level.method(),
                    msg,
                    component,
                    extra
                )
            }
            Emit::IconLogError => {
                let msg = quote.literal(&strip_interpolation(group(1).trim()));
                let error = if data.is_empty() {
                    format!("new Error({})", msg)
                } else {
                    data.to_string()
                };
                format!("logError({}, {}, {{ component: {} }});", error, msg, component)
            }
            Emit::DataStructured(level) => {
                let msg = quote.literal(&message);
                format!("log.{}({{ msg: {}, {} }});", level.method(), msg, data)
            }
            Emit::DataLogError => {
                let msg = quote.literal(&message);
                format!("logError({}, {}, {{ component: {} }});", data, msg, component)
            }
        }
    }
}

/// Whether the message captured in group 1 is delimited by backticks.
fn is_template(caps: &Captures) -> bool {
    match (caps.get(0), caps.get(1)) {
        (Some(whole), Some(msg)) => {
            whole.as_str()[..msg.start() - whole.start()].ends_with('`')
        }
        _ => false,
    }
}

// Literal argument: any of ' " ` as delimiter, body free of all three.
const LITERAL: &str = r#"['"`]([^'"`]+)['"`]"#;
const TEMPLATE: &str = r"`([^`]+)`";

fn call(name: &str, args: &str) -> String {
    format!(r"console\.{}\(\s*{}\s*\)", name, args)
}

fn with_identifier(name: &str) -> String {
    call(name, &format!(r"{}\s*,\s*(\w+)", LITERAL))
}

fn icon_call(name: &str) -> String {
    format!(
        r"console\.{}\(`\$\{{ICONS\.[A-Z_]+\}}\s*([^`]*)`(?:,\s*([^)]*))?\);",
        name
    )
}

fn data_call(name: &str) -> String {
    format!(r"console\.{}\('([^']*)',\s*([^)]*)\);", name)
}

static CONSOLE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new("error.with_error", &with_identifier("error"), Emit::LogError),
        Rule::new("error.template", &call("error", TEMPLATE), Emit::Structured(Level::Error)),
        Rule::new("error.literal", &call("error", LITERAL), Emit::Structured(Level::Error)),
        Rule::new("warn.template", &call("warn", TEMPLATE), Emit::Structured(Level::Warn)),
        Rule::new("warn.with_error", &with_identifier("warn"), Emit::LogError),
        Rule::new("warn.literal", &call("warn", LITERAL), Emit::Structured(Level::Warn)),
        Rule::new("log.template", &call("log", TEMPLATE), Emit::Structured(Level::Info)),
        Rule::new("log.literal", &call("log", LITERAL), Emit::Structured(Level::Info)),
    ]
});

static ICON_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new("log.icon", &icon_call("log"), Emit::IconStructured(Level::Info)),
        Rule::new("warn.icon", &icon_call("warn"), Emit::IconStructured(Level::Warn)),
        Rule::new("error.icon", &icon_call("error"), Emit::IconLogError),
        Rule::new("log.with_data", &data_call("log"), Emit::DataStructured(Level::Info)),
        Rule::new("error.with_data", &data_call("error"), Emit::DataLogError),
    ]
});

/// Run every rule of `rules` over `text` in order.
///
/// Returns the rewritten text and the number of matches replaced across all
/// passes.
pub fn apply_rules(rules: &[Rule], text: &str, options: &RewriteOptions) -> (String, usize) {
    let mut current = text.to_string();
    let mut total = 0;

    for rule in rules {
        let mut hits = 0;
        let replaced = rule.pattern.replace_all(&current, |caps: &Captures| {
            hits += 1;
            rule.render(caps, options)
        });
        if hits > 0 {
            current = replaced.into_owned();
            total += hits;
        }
    }

    (current, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(text: &str) -> (String, usize) {
        apply_rules(RuleSet::Console.rules(), text, &RewriteOptions::default())
    }

    fn icons(text: &str) -> (String, usize) {
        let options = RewriteOptions::for_rules(RuleSet::Icons);
        apply_rules(RuleSet::Icons.rules(), text, &options)
    }

    #[test]
    fn rule_set_parses() {
        assert_eq!("console".parse::<RuleSet>().unwrap(), RuleSet::Console);
        assert_eq!("icons".parse::<RuleSet>().unwrap(), RuleSet::Icons);
        let err = "pino".parse::<RuleSet>().unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn console_rules_are_ordered_most_specific_first() {
        let labels: Vec<&str> = RuleSet::Console.rules().iter().map(|r| r.label).collect();
        let pos = |l: &str| labels.iter().position(|x| *x == l).unwrap();
        assert!(pos("error.with_error") < pos("error.literal"));
        assert!(pos("error.template") < pos("error.literal"));
        assert!(pos("warn.with_error") < pos("warn.literal"));
        assert!(pos("warn.template") < pos("warn.literal"));
        assert!(pos("log.template") < pos("log.literal"));
    }

    #[test]
    fn error_with_identifier_becomes_log_error() {
        let (out, n) = console("console.error('[Api] Request failed:', error);");
        assert_eq!(
            out,
            "logError(error, \"Api Request failed:\", { component: \"refactored\" });"
        );
        assert_eq!(n, 1);
    }

    #[test]
    fn warn_with_identifier_becomes_log_error() {
        let (out, _) = console("console.warn(\"Retrying\", e)");
        assert_eq!(out, "logError(e, \"Retrying\", { component: \"refactored\" })");
    }

    #[test]
    fn literal_calls_map_to_levels() {
        let (out, n) = console("console.log('a'); console.warn('b'); console.error('c');");
        assert_eq!(
            out,
            "log.info({ msg: \"a\" }); log.warn({ msg: \"b\" }); log.error({ msg: \"c\" });"
        );
        assert_eq!(n, 3);
    }

    #[test]
    fn template_without_interpolation_is_kept_verbatim() {
        let (out, _) = console("console.error(` Boom `)");
        assert_eq!(out, "log.error({ msg: \" Boom \" })");
    }

    #[test]
    fn quoted_literal_keeps_dollar_braces() {
        let (out, n) = console("console.log('Price: ${price}');");
        assert_eq!(out, "log.info({ msg: \"Price: ${price}\" });");
        assert_eq!(n, 1);

        let (out, _) = console("console.error(\"Bad ${id}:\", err)");
        assert_eq!(
            out,
            "logError(err, \"Bad ${id}:\", { component: \"refactored\" })"
        );
    }

    #[test]
    fn backtick_literal_with_error_strips_interpolation() {
        let (out, _) = console("console.error(`Save ${id} failed`, err)");
        assert_eq!(
            out,
            "logError(err, \"Save  failed\", { component: \"refactored\" })"
        );
    }

    #[test]
    fn whitespace_inside_parens_is_accepted() {
        let (out, n) = console("console.log(  'spaced'  )");
        assert_eq!(out, "log.info({ msg: \"spaced\" })");
        assert_eq!(n, 1);
    }

    #[test]
    fn unsupported_shapes_are_left_alone() {
        let input = "console.log('count', a, b); console.debug('x'); console.log(value);";
        let (out, n) = console(input);
        assert_eq!(out, input);
        assert_eq!(n, 0);
    }

    #[test]
    fn single_quote_style_is_consistent() {
        let options = RewriteOptions {
            quote: super::super::QuoteStyle::Single,
            ..RewriteOptions::default()
        };
        let (out, _) = apply_rules(
            RuleSet::Console.rules(),
            "console.error('Failed:', err)",
            &options,
        );
        assert_eq!(out, "logError(err, 'Failed:', { component: 'refactored' })");
    }

    #[test]
    fn icon_log_with_and_without_data() {
        let (out, n) = icons("console.log(`${ICONS.SUCCESS} Saved`, { id });");
        assert_eq!(
            out,
            "log.info({ msg: \"Saved\", component: \"todo\", { id } });"
        );
        assert_eq!(n, 1);

        let (out, _) = icons("console.warn(`${ICONS.WARNING}   Slow query`);");
        assert_eq!(out, "log.warn({ msg: \"Slow query\", component: \"todo\" });");
    }

    #[test]
    fn icon_error_falls_back_to_new_error() {
        let (out, _) = icons("console.error(`${ICONS.ERROR} Sync failed`);");
        assert_eq!(
            out,
            "logError(new Error(\"Sync failed\"), \"Sync failed\", { component: \"todo\" });"
        );

        let (out, _) = icons("console.error(`${ICONS.ERROR} Sync failed`, err);");
        assert_eq!(out, "logError(err, \"Sync failed\", { component: \"todo\" });");
    }

    #[test]
    fn icon_message_interpolation_is_stripped() {
        let (out, _) = icons("console.log(`${ICONS.INFO} Loaded ${count} rows`);");
        assert_eq!(out, "log.info({ msg: \"Loaded  rows\", component: \"todo\" });");
    }

    #[test]
    fn data_calls_rewrite() {
        let (out, n) = icons("console.log('Payload', body);\nconsole.error('Boom', err);");
        assert_eq!(
            out,
            "log.info({ msg: \"Payload\", body });\nlogError(err, \"Boom\", { component: \"todo\" });"
        );
        assert_eq!(n, 2);

        let (out, _) = icons("console.log('Cost ${x}', row);");
        assert_eq!(out, "log.info({ msg: \"Cost ${x}\", row });");
    }
}
