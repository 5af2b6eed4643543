// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mage run`: run agents one after another.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mage_adapters::{GenerationAdapter, NotifyAdapter};
use mage_core::{Clock, CredentialsPatch, Provider, Registry, ViewMode};
use mage_engine::{RunError, RunReport, Workspace};

use crate::app;
use crate::exit_error::ExitError;
use crate::output::{render_preview, report_line, OutputFormat, ReportJson};

/// Exit code when a run was refused for lack of a credential
pub const EXIT_MISSING_CREDENTIAL: i32 = 2;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Agent ids to run, in order
    #[arg(required = true, value_name = "AGENT")]
    pub agents: Vec<String>,

    /// Target domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Target niche
    #[arg(long)]
    pub niche: Option<String>,

    #[command(flatten)]
    pub keys: KeyArgs,

    /// Replace an agent's prompt with the contents of a file
    #[arg(long = "prompt-file", value_name = "AGENT=PATH", value_parser = parse_prompt_file)]
    pub prompt_files: Vec<(String, PathBuf)>,

    /// Print raw output instead of the structured preview
    #[arg(long)]
    pub code: bool,
}

/// API keys given on the command line. They override the environment.
#[derive(Args, Debug, Default, Clone)]
pub struct KeyArgs {
    /// Gemini API key (default: GEMINI_API_KEY or API_KEY)
    #[arg(long, value_name = "KEY")]
    pub gemini_key: Option<String>,

    /// Grok API key (default: GROK_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub grok_key: Option<String>,

    /// DataForSEO API key (default: DATAFORSEO_API_KEY)
    #[arg(long = "dataforseo-key", value_name = "KEY")]
    pub dataforseo_key: Option<String>,
}

impl KeyArgs {
    pub fn patch(&self) -> CredentialsPatch {
        [
            (Provider::Gemini, &self.gemini_key),
            (Provider::Grok, &self.grok_key),
            (Provider::DataForSeo, &self.dataforseo_key),
        ]
        .into_iter()
        .fold(CredentialsPatch::new(), |patch, (provider, key)| match key {
            Some(key) => patch.with(provider, key.clone()),
            None => patch,
        })
    }
}

/// Parse `AGENT=PATH`.
pub fn parse_prompt_file(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((agent, path)) if !agent.is_empty() && !path.is_empty() => {
            Ok((agent.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected AGENT=PATH, got '{}'", s)),
    }
}

pub async fn handle(args: RunArgs, registry: Registry, format: OutputFormat) -> Result<()> {
    let workspace = app::workspace(registry, args.keys.patch())?;
    execute(&workspace, &args, format).await
}

/// Configure `workspace` from `args` and perform the runs.
pub async fn execute<G, N, C>(
    workspace: &Workspace<G, N, C>,
    args: &RunArgs,
    format: OutputFormat,
) -> Result<()>
where
    G: GenerationAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    if let Some(domain) = &args.domain {
        workspace.set_domain(domain.clone());
    }
    if let Some(niche) = &args.niche {
        workspace.set_niche(niche.clone());
    }
    for (agent, path) in &args.prompt_files {
        let prompt = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read prompt file {}", path.display()))?;
        workspace.set_prompt(agent, prompt).map_err(|e| ExitError::new(1, e.to_string()))?;
    }

    let mode = if args.code { ViewMode::Code } else { ViewMode::Preview };
    let mut reports: Vec<RunReport> = Vec::new();
    let mut refused = None;

    for agent in &args.agents {
        match workspace.run(agent).await {
            Ok(report) => {
                if format == OutputFormat::Text {
                    print_report(workspace, &report, mode);
                }
                reports.push(report);
            }
            Err(e) => {
                refused = Some(e);
                break;
            }
        }
    }

    if format == OutputFormat::Json {
        let json: Vec<ReportJson<'_>> = reports.iter().map(ReportJson::from).collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    }

    if let Some(e) = refused {
        let code = match e {
            RunError::MissingCredential { .. } => EXIT_MISSING_CREDENTIAL,
            _ => 1,
        };
        return Err(ExitError::new(code, e.to_string()).into());
    }
    if reports.iter().any(|r| !r.outcome.is_completed()) {
        return Err(ExitError::silent(1).into());
    }
    Ok(())
}

fn print_report<G, N, C>(workspace: &Workspace<G, N, C>, report: &RunReport, mode: ViewMode)
where
    G: GenerationAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    workspace.with_state(|state| {
        if let Some(entry) = state.get(report.agent.as_str()) {
            println!("{}", report_line(report, entry));
            println!();
            print!("{}", render_preview(entry, mode));
        }
    });
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
