// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Render-time interpretation of an agent's output.
//!
//! Parsing happens only when a view asks for it. A JSON agent whose output
//! is not JSON yields [`Preview::Invalid`]; stored state is never touched.

use crate::agent::{AgentEntry, OutputFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the viewer wants the output shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Structured view where one exists
    #[default]
    Preview,
    /// Raw source text
    Code,
}

/// One row of a content queue produced by a JSON agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub tool: Option<String>,
}

impl QueueEntry {
    pub fn is_buy_intent(&self) -> bool {
        self.intent.eq_ignore_ascii_case("buy")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview<'a> {
    /// The agent has never produced output
    Empty,
    /// Parsed content queue
    Queue(Vec<QueueEntry>),
    /// Output of a JSON agent that is not JSON
    Invalid,
    /// Output shown verbatim
    Source { format: OutputFormat, text: &'a str },
}

/// Build the preview for an agent's current output.
pub fn render(entry: &AgentEntry, mode: ViewMode) -> Preview<'_> {
    let Some(text) = entry.runtime.last_output.as_deref() else {
        return Preview::Empty;
    };
    let format = entry.definition.output_format;

    match (format, mode) {
        (OutputFormat::Json, ViewMode::Preview) => match parse_queue(text) {
            Some(entries) => Preview::Queue(entries),
            None => Preview::Invalid,
        },
        _ => Preview::Source { format, text },
    }
}

/// Parse a content queue. Any JSON value parses: a non-array is treated as
/// a one-item queue, and fields are read leniently from each item.
///
/// `None` only when the text is not JSON at all.
pub fn parse_queue(text: &str) -> Option<Vec<QueueEntry>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };
    Some(items.iter().map(queue_entry).collect())
}

fn queue_entry(item: &Value) -> QueueEntry {
    QueueEntry {
        keyword: field(item, "keyword").unwrap_or_default(),
        intent: field(item, "intent").unwrap_or_default(),
        city: field(item, "city"),
        tool: field(item, "tool"),
    }
}

/// Scalar field as display text; empty strings count as missing.
fn field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "preview_tests.rs"]
mod tests;
