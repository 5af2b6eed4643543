// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering shared by commands and the shell.

use chrono::{DateTime, Local};
use clap::ValueEnum;
use mage_core::preview::{render, Preview};
use mage_core::{format_elapsed_ms, AgentEntry, QueueEntry, ViewMode};
use mage_engine::{RunOutcome, RunReport};
use serde::Serialize;

use crate::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Wall-clock time of an epoch timestamp, in local time.
pub fn format_clock(epoch_ms: u64) -> String {
    DateTime::from_timestamp_millis(epoch_ms as i64)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Row in `mage agents` output.
#[derive(Debug, Serialize)]
pub struct AgentRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub cluster: String,
    pub output_format: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<&'a str>,
    pub status: String,
}

impl<'a> From<&'a AgentEntry> for AgentRow<'a> {
    fn from(entry: &'a AgentEntry) -> Self {
        let def = &entry.definition;
        Self {
            id: def.id.as_str(),
            name: &def.name,
            cluster: def.cluster.to_string(),
            output_format: def.output_format.to_string(),
            provider: def.provider.to_string(),
            depends_on: def.depends_on.as_ref().map(|d| d.as_str()),
            status: entry.runtime.status.to_string(),
        }
    }
}

/// Aligned table of agents.
pub fn agent_table<'a>(entries: impl IntoIterator<Item = &'a AgentEntry>) -> String {
    let rows: Vec<AgentRow<'_>> = entries.into_iter().map(AgentRow::from).collect();
    let id_w = rows.iter().map(|r| r.id.len()).max().unwrap_or(0).max(2);
    let name_w = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);

    let mut out = color::header(&format!(
        "{:<id_w$}  {:<name_w$}  {:<11}  {:<8}  {:<9}  {}",
        "ID", "NAME", "CLUSTER", "FORMAT", "STATUS", "CONTEXT FROM"
    ));
    out.push('\n');
    for r in &rows {
        out.push_str(&format!(
            "{:<id_w$}  {:<name_w$}  {:<11}  {:<8}  {:<9}  {}\n",
            r.id,
            r.name,
            r.cluster,
            r.output_format,
            r.status,
            r.depends_on.unwrap_or("-"),
        ));
    }
    out
}

/// Full description of one agent.
pub fn agent_detail(entry: &AgentEntry) -> String {
    let def = &entry.definition;
    let rt = &entry.runtime;
    let mut out = format!("{} ({})\n", color::header(&def.name), def.id);
    let mut field = |label: &str, value: &str| {
        out.push_str(&format!("  {:<10} {}\n", color::context(label), value));
    };
    field("Role:", &def.role);
    field("Goal:", &def.goal);
    field("Backstory:", &def.backstory);
    field("Cluster:", &def.cluster.to_string());
    field("Trigger:", &def.trigger);
    field("Format:", &def.output_format.to_string());
    field("Provider:", &def.provider.to_string());
    if !def.tools.is_empty() {
        field("Tools:", &def.tools.join(", "));
    }
    if let Some(upstream) = &def.depends_on {
        field("Context:", upstream.as_str());
    }
    field("Status:", &rt.status.to_string());
    if let Some(error) = &rt.last_error {
        field("Error:", error);
    }

    out.push_str(&format!("\n{}\n", color::context("Prompt:")));
    for line in def.prompt.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    if !rt.logs.is_empty() {
        out.push_str(&format!("\n{}\n", color::context("Log:")));
        for line in &rt.logs {
            out.push_str(&format!("  {}\n", color::muted(line)));
        }
    }
    out
}

fn queue_view(entries: &[QueueEntry]) -> String {
    let mut out = format!("Content Queue ({} items)\n", entries.len());
    for entry in entries {
        let intent = entry.intent.to_uppercase();
        let intent = if entry.is_buy_intent() { color::header(&intent) } else { intent };
        out.push_str(&format!("  {} [{}]\n", entry.keyword, intent));
        out.push_str(&format!(
            "    city: {}  tool: {}\n",
            entry.city.as_deref().unwrap_or("National"),
            entry.tool.as_deref().unwrap_or("None"),
        ));
    }
    out
}

/// Viewport text for an agent's current output.
pub fn render_preview(entry: &AgentEntry, mode: ViewMode) -> String {
    let mut out = match render(entry, mode) {
        Preview::Empty => {
            return "No artifacts generated yet.\nConfigure and run the agent to see results.\n"
                .to_string()
        }
        Preview::Queue(entries) => queue_view(&entries),
        Preview::Invalid => "Invalid JSON Output\n".to_string(),
        Preview::Source { text, .. } => {
            let mut text = text.to_string();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            text
        }
    };
    if let Some(footer) = footer(entry) {
        out.push_str(&color::muted(&footer));
        out.push('\n');
    }
    out
}

/// `"HTML · last run 10:32:05"`, when the agent has run.
pub fn footer(entry: &AgentEntry) -> Option<String> {
    let ms = entry.runtime.last_run_ms?;
    Some(format!("{} · last run {}", entry.definition.output_format, format_clock(ms)))
}

/// One-line summary of a finished run.
pub fn report_line(report: &RunReport, entry: &AgentEntry) -> String {
    let elapsed = format_elapsed_ms(report.elapsed_ms);
    match &report.outcome {
        RunOutcome::Completed { .. } => format!(
            "{} {} completed in {}",
            color::header(&entry.definition.name),
            color::muted(&format!("({})", report.agent)),
            elapsed
        ),
        RunOutcome::Failed { error } => format!(
            "{} {} failed after {}: {}",
            color::header(&entry.definition.name),
            color::muted(&format!("({})", report.agent)),
            elapsed,
            error
        ),
    }
}

/// JSON shape of a finished run.
#[derive(Debug, Serialize)]
pub struct ReportJson<'a> {
    pub agent: &'a str,
    pub run: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    pub elapsed_ms: u64,
}

impl<'a> From<&'a RunReport> for ReportJson<'a> {
    fn from(report: &'a RunReport) -> Self {
        let (status, output, error) = match &report.outcome {
            RunOutcome::Completed { output } => ("completed", Some(output.as_str()), None),
            RunOutcome::Failed { error } => ("error", None, Some(error.as_str())),
        };
        Self {
            agent: report.agent.as_str(),
            run: report.run.as_str(),
            status,
            output,
            error,
            elapsed_ms: report.elapsed_ms,
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
