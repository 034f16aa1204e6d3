//! Go-template-style rendering of the metric base name.
//!
//! Only field actions are supported: `{{ .Check.Name }}`, `{{- .Timestamp -}}`
//! and the like. Paths use the Go field names of the Sensu event
//! (`Entity.System.Hostname`) and are resolved against its JSON form.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::trace;

use crate::event::Event;

lazy_static! {
    static ref ACTION_REGEX: Regex =
        Regex::new(r"(?s)\{\{(-\s)?(.*?)(\s-)?\}\}").expect("failed creating regex");
    static ref FIELD_REGEX: Regex =
        Regex::new(r"^(\.[A-Za-z_][A-Za-z0-9_]*)+$").expect("failed creating regex");
}

/// Keys under which Sensu keeps string maps. A missing key inside one of
/// these renders as the empty string instead of failing.
const STRING_MAP_KEYS: [&str; 2] = ["labels", "annotations"];

/// Key holding the embedded object metadata of entities and checks.
const METADATA_KEY: &str = "metadata";

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template: unclosed action in {0:?}")]
    UnclosedAction(String),
    #[error("template: missing value for command")]
    EmptyAction,
    #[error("template: unsupported action {{{{{0}}}}}")]
    UnsupportedAction(String),
    #[error("template: can't evaluate field {field} in {path}")]
    UnresolvedField { path: String, field: String },
    #[error("template: {0} does not resolve to a printable value")]
    NotPrintable(String),
    #[error("template: failed to encode event: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(Vec<String>),
}

/// A parsed template, ready to be rendered against events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source` into literal text and field actions.
    ///
    /// # Errors
    ///
    /// Fails on an unterminated `{{`, an empty action, or an action that is
    /// not a plain field path.
    pub fn parse(source: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut last = 0;
        let mut trim_next = false;

        for captures in ACTION_REGEX.captures_iter(source) {
            let (Some(whole), Some(body)) = (captures.get(0), captures.get(2)) else {
                continue;
            };

            let mut text = &source[last..whole.start()];
            if trim_next {
                text = text.trim_start();
            }
            if captures.get(1).is_some() {
                text = text.trim_end();
            }
            push_text(&mut segments, text)?;
            segments.push(Segment::Field(parse_action(body.as_str())?));

            last = whole.end();
            trim_next = captures.get(3).is_some();
        }

        let mut text = &source[last..];
        if trim_next {
            text = text.trim_start();
        }
        push_text(&mut segments, text)?;

        Ok(Template { segments })
    }

    /// Render against `event`.
    ///
    /// # Errors
    ///
    /// Fails when a field path does not resolve to a scalar value.
    pub fn render(&self, event: &Event) -> Result<String, TemplateError> {
        if !self
            .segments
            .iter()
            .any(|segment| matches!(segment, Segment::Field(_)))
        {
            return Ok(self.literal());
        }

        let root =
            serde_json::to_value(event).map_err(|e| TemplateError::Encode(e.to_string()))?;

        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => rendered.push_str(text),
                Segment::Field(path) => rendered.push_str(&resolve(&root, path)?),
            }
        }
        trace!("Rendered template into {rendered:?}");
        Ok(rendered)
    }

    fn literal(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_str()),
                Segment::Field(_) => None,
            })
            .collect()
    }
}

/// Parse and render `source` against `event` in one step.
///
/// # Errors
///
/// See [`Template::parse`] and [`Template::render`].
pub fn render(source: &str, event: &Event) -> Result<String, TemplateError> {
    Template::parse(source)?.render(event)
}

fn push_text(segments: &mut Vec<Segment>, text: &str) -> Result<(), TemplateError> {
    if text.contains("{{") {
        return Err(TemplateError::UnclosedAction(text.to_string()));
    }
    if text.is_empty() {
        return Ok(());
    }
    match segments.last_mut() {
        Some(Segment::Text(previous)) => previous.push_str(text),
        _ => segments.push(Segment::Text(text.to_string())),
    }
    Ok(())
}

fn parse_action(body: &str) -> Result<Vec<String>, TemplateError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(TemplateError::EmptyAction);
    }
    if !FIELD_REGEX.is_match(body) {
        return Err(TemplateError::UnsupportedAction(body.to_string()));
    }
    Ok(body
        .split('.')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect())
}

fn resolve(root: &Value, path: &[String]) -> Result<String, TemplateError> {
    let display = format!(".{}", path.join("."));
    let mut current = root;
    let mut in_string_map = false;

    for (depth, field) in path.iter().enumerate() {
        let unresolved = || TemplateError::UnresolvedField {
            path: display.clone(),
            field: field.clone(),
        };
        let Value::Object(object) = current else {
            return Err(unresolved());
        };

        if in_string_map {
            if depth + 1 < path.len() {
                return Err(unresolved());
            }
            return Ok(object
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string());
        }

        let Some((key, value)) = lookup(object, field) else {
            // Empty label and annotation maps are omitted from the event.
            if STRING_MAP_KEYS.contains(&snake_case(field).as_str()) && depth + 2 == path.len() {
                return Ok(String::new());
            }
            return Err(unresolved());
        };
        in_string_map = STRING_MAP_KEYS.contains(&key.as_str());
        current = value;
    }

    match current {
        Value::String(s) => Ok(s.clone()),
        // Whole floats print without a fraction, `60.0` renders as `60`.
        Value::Number(n) => Ok(match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Err(TemplateError::NotPrintable(display))
        }
    }
}

/// Find the JSON member for the Go field name `field`.
fn lookup<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Option<(String, &'a Value)> {
    let snake = if field == "ObjectMeta" {
        METADATA_KEY.to_string()
    } else {
        snake_case(field)
    };

    for key in [field, snake.as_str()] {
        if let Some(value) = object.get(key) {
            return Some((key.to_string(), value));
        }
    }

    // Embedded ObjectMeta: `.Check.Name` lives at `check.metadata.name`.
    if let Some(Value::Object(metadata)) = object.get(METADATA_KEY) {
        for key in [field, snake.as_str()] {
            if let Some(value) = metadata.get(key) {
                return Some((key.to_string(), value));
            }
        }
    }
    None
}

/// `EntityClass` -> `entity_class`, `OSVersion` -> `os_version`.
fn snake_case(field: &str) -> String {
    let chars: Vec<char> = field.chars().collect();
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}
