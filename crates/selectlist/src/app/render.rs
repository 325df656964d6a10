//! Rendering selections for display.

use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

use crate::domain::model::Selection;
use crate::infra::codec::FormatParseError;
use crate::infra::config::Config;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One marked line per item.
    #[default]
    Plain,
    /// Pretty-printed JSON array of `{ item, selected }` objects.
    Json,
}

impl OutputFormat {
    /// Return a stable identifier for configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" | "txt" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(FormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Runtime options controlling rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub selected_marker: String,
    pub unselected_marker: String,
}

impl RenderOptions {
    /// Build options from configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        let format = config.render.format.parse::<OutputFormat>().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to plain output");
            OutputFormat::Plain
        });
        Self {
            format,
            selected_marker: config.render.selected_marker.clone(),
            unselected_marker: config.render.unselected_marker.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Serialize)]
struct RenderedItem<'a, T> {
    item: &'a T,
    selected: bool,
}

/// Turns selections into text according to [`RenderOptions`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render every item with its selected flag. Plain lines and the JSON document each end
    /// with a newline.
    pub fn render<T>(&self, selection: &Selection<T>) -> Result<String>
    where
        T: Serialize + PartialEq,
    {
        match self.options.format {
            OutputFormat::Plain => self.render_plain(selection),
            OutputFormat::Json => render_json(selection),
        }
    }

    fn render_plain<T>(&self, selection: &Selection<T>) -> Result<String>
    where
        T: Serialize + PartialEq,
    {
        let mut out = String::new();
        for (item, selected) in selection.iter_with_selected() {
            let marker = if selected {
                &self.options.selected_marker
            } else {
                &self.options.unselected_marker
            };
            writeln!(out, "{marker} {}", plain_text(item)?)?;
        }
        Ok(out)
    }
}

fn render_json<T>(selection: &Selection<T>) -> Result<String>
where
    T: Serialize + PartialEq,
{
    let rows: Vec<RenderedItem<'_, T>> = selection
        .iter_with_selected()
        .map(|(item, selected)| RenderedItem { item, selected })
        .collect();
    let mut out =
        serde_json::to_string_pretty(&rows).context("failed to serialize selection as JSON")?;
    out.push('\n');
    Ok(out)
}

fn plain_text<T: Serialize>(item: &T) -> Result<String> {
    let value = serde_json::to_value(item).context("failed to serialize item")?;
    Ok(match value {
        Value::String(text) => text,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn plain_marks_selected_items() {
        let selection = Selection::from_list(vec!["a", "b", "c"]).select(&"b");
        let rendered = Renderer::default().render(&selection).unwrap();
        assert_eq!(rendered, "[ ] a\n[x] b\n[ ] c\n");
    }

    #[test]
    fn plain_prints_non_string_values_as_json() {
        let selection = Selection::from_list(vec![json!(1), json!({"k": true})]).select(&json!(1));
        let rendered = Renderer::default().render(&selection).unwrap();
        assert_eq!(rendered, "[x] 1\n[ ] {\"k\":true}\n");
    }

    #[test]
    fn plain_renders_empty_selection_as_empty_string() {
        let rendered = Renderer::default().render(&Selection::<u8>::default()).unwrap();
        assert!(rendered.is_empty());
    }

    #[test]
    fn json_lists_items_with_flags() {
        let options = RenderOptions {
            format: OutputFormat::Json,
            ..RenderOptions::default()
        };
        let selection = Selection::from_list(vec![1, 2, 2]).select(&2);
        let rendered = Renderer::new(options).render(&selection).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            parsed,
            json!([
                {"item": 1, "selected": false},
                {"item": 2, "selected": true},
                {"item": 2, "selected": true}
            ])
        );
    }

    #[test]
    fn from_config_falls_back_on_unknown_format() {
        let mut config = Config::default();
        config.render.format = "html".into();
        config.render.selected_marker = "*".into();
        let options = RenderOptions::from_config(&config);
        assert_eq!(options.format, OutputFormat::Plain);
        assert_eq!(options.selected_marker, "*");
    }

    #[test]
    fn parses_output_format_names() {
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Plain));
        assert_eq!(OutputFormat::Json.as_str(), "json");
    }
}
