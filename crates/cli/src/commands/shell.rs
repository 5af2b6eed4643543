// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mage shell`: interactive session over stdin.
//!
//! State lives for the process lifetime. Background runs started with
//! `start` report when they finish, before the next command is read.

use std::io::{IsTerminal, Write};

use anyhow::Result;
use clap::Args;
use mage_adapters::{GenerationAdapter, NotifyAdapter};
use mage_core::{Clock, CredentialsPatch, Provider, Registry, ViewMode};
use mage_engine::{RunError, RunReport, Workspace};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::task::JoinHandle;

use super::run::KeyArgs;
use crate::app;
use crate::output::{agent_detail, agent_table, render_preview, report_line};

#[derive(Args, Debug, Default)]
pub struct ShellArgs {
    /// Initial target domain
    #[arg(long)]
    pub domain: Option<String>,

    /// Initial target niche
    #[arg(long)]
    pub niche: Option<String>,

    #[command(flatten)]
    pub keys: KeyArgs,
}

const HELP: &str = "\
Commands:
  agents                     list agents and status
  show <agent>               definition, state, and log
  set domain|niche <value>   change a global setting
  key <provider> <value>     save an API key (gemini, grok, dataForSeo)
  prompt <agent>             replace a prompt; end input with a line holding only '.'
  run <agent>                run and wait for the result
  start <agent>              run in the background
  preview <agent> [code]     show the latest output
  help                       this text
  quit                       leave the shell
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Domain,
    Niche,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Agents,
    Show(String),
    Set(Setting, String),
    Key(Provider, String),
    Prompt(String),
    Run(String),
    Start(String),
    Preview(String, ViewMode),
    Help,
    Quit,
}

/// Parse one input line. Values after `set` and `key` keep inner spaces.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let agent = |cmd: &str| match rest.split_whitespace().collect::<Vec<_>>()[..] {
        [id] => Ok(id.to_string()),
        _ => Err(format!("usage: {} <agent>", cmd)),
    };

    match word {
        "" => Ok(Command::Empty),
        "agents" | "ls" => Ok(Command::Agents),
        "show" => agent("show").map(Command::Show),
        "prompt" => agent("prompt").map(Command::Prompt),
        "run" => agent("run").map(Command::Run),
        "start" => agent("start").map(Command::Start),
        "preview" => match rest.split_whitespace().collect::<Vec<_>>()[..] {
            [id] => Ok(Command::Preview(id.to_string(), ViewMode::Preview)),
            [id, "code"] => Ok(Command::Preview(id.to_string(), ViewMode::Code)),
            _ => Err("usage: preview <agent> [code]".to_string()),
        },
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = match field {
                "domain" => Setting::Domain,
                "niche" => Setting::Niche,
                _ => return Err("usage: set domain|niche <value>".to_string()),
            };
            Ok(Command::Set(field, value.trim().to_string()))
        }
        "key" => {
            let (provider, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let provider = provider.parse::<Provider>().map_err(|e| e.to_string())?;
            Ok(Command::Key(provider, value.trim().to_string()))
        }
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}' (try 'help')", other)),
    }
}

pub async fn handle(args: ShellArgs, registry: Registry) -> Result<()> {
    let workspace = app::workspace(registry, args.keys.patch())?;
    if let Some(domain) = args.domain {
        workspace.set_domain(domain);
    }
    if let Some(niche) = args.niche {
        workspace.set_niche(niche);
    }

    let interactive = std::io::stdin().is_terminal();
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    Shell::new(workspace, std::io::stdout(), interactive).run(input).await
}

type Pending = (String, JoinHandle<Result<RunReport, RunError>>);

pub struct Shell<G, N, C, W> {
    workspace: Workspace<G, N, C>,
    out: W,
    show_prompt: bool,
    pending: Vec<Pending>,
}

impl<G, N, C, W> Shell<G, N, C, W>
where
    G: GenerationAdapter,
    N: NotifyAdapter,
    C: Clock,
    W: Write,
{
    pub fn new(workspace: Workspace<G, N, C>, out: W, show_prompt: bool) -> Self {
        Self { workspace, out, show_prompt, pending: Vec::new() }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read and execute commands until `quit` or end of input, then wait
    /// for background runs.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        loop {
            self.reap(false).await?;
            if self.show_prompt {
                write!(self.out, "mage> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next_line().await? else { break };
            match parse(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Prompt(agent)) => self.edit_prompt(&agent, &mut lines).await?,
                Ok(command) => self.execute(command).await?,
                Err(message) => writeln!(self.out, "{}", message)?,
            }
        }
        self.reap(true).await
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Empty | Command::Quit | Command::Prompt(_) => {}
            Command::Help => write!(self.out, "{}", HELP)?,
            Command::Agents => {
                let table = self.workspace.with_state(|s| agent_table(s.agents()));
                write!(self.out, "{}", table)?;
            }
            Command::Show(id) => {
                let text = self.workspace.with_state(|s| s.get(&id).map(agent_detail));
                self.write_or_unknown(&id, text)?;
            }
            Command::Preview(id, mode) => {
                let text = self.workspace.with_state(|s| s.get(&id).map(|e| render_preview(e, mode)));
                self.write_or_unknown(&id, text)?;
            }
            Command::Set(Setting::Domain, value) => {
                writeln!(self.out, "domain = {}", value)?;
                self.workspace.set_domain(value);
            }
            Command::Set(Setting::Niche, value) => {
                writeln!(self.out, "niche = {}", value)?;
                self.workspace.set_niche(value);
            }
            Command::Key(provider, value) => {
                self.workspace.save_credentials(CredentialsPatch::new().with(provider, value));
                writeln!(self.out, "{} key saved", provider.label())?;
            }
            Command::Run(id) => {
                let result = self.workspace.run(&id).await;
                self.write_result(&id, result)?;
            }
            Command::Start(id) => {
                let handle = self.workspace.spawn_run(id.clone());
                writeln!(self.out, "started {} in background", id)?;
                self.pending.push((id, handle));
            }
        }
        Ok(())
    }

    async fn edit_prompt<R: AsyncBufRead + Unpin>(
        &mut self,
        agent: &str,
        lines: &mut Lines<R>,
    ) -> Result<()> {
        if self.show_prompt {
            writeln!(self.out, "Enter the new prompt; finish with a line containing only '.'")?;
        }

        let mut body = Vec::new();
        loop {
            match lines.next_line().await? {
                Some(line) if line.trim_end() == "." => break,
                Some(line) => body.push(line),
                None => {
                    writeln!(self.out, "prompt unchanged: input ended before '.'")?;
                    return Ok(());
                }
            }
        }

        match self.workspace.set_prompt(agent, body.join("\n")) {
            Ok(()) => writeln!(self.out, "prompt for {} updated ({} lines)", agent, body.len())?,
            Err(_) => self.write_or_unknown(agent, None)?,
        }
        Ok(())
    }

    /// Report finished background runs. With `wait`, block until all finish.
    async fn reap(&mut self, wait: bool) -> Result<()> {
        let mut still_running = Vec::new();
        for (id, handle) in std::mem::take(&mut self.pending) {
            if !wait && !handle.is_finished() {
                still_running.push((id, handle));
                continue;
            }
            match handle.await {
                Ok(result) => self.write_result(&id, result)?,
                Err(e) => writeln!(self.out, "background run for {} aborted: {}", id, e)?,
            }
        }
        self.pending = still_running;
        Ok(())
    }

    fn write_result(&mut self, id: &str, result: Result<RunReport, RunError>) -> Result<()> {
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                writeln!(self.out, "run refused: {}", e)?;
                return Ok(());
            }
        };
        let text = self.workspace.with_state(|s| {
            s.get(id).map(|entry| {
                format!("{}\n\n{}", report_line(&report, entry), render_preview(entry, ViewMode::Preview))
            })
        });
        self.write_or_unknown(id, text)
    }

    fn write_or_unknown(&mut self, id: &str, text: Option<String>) -> Result<()> {
        match text {
            Some(text) => write!(self.out, "{}", text)?,
            None => writeln!(self.out, "unknown agent '{}'", id)?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
