// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers shared by every spec.

use std::process::Output;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Environment variables that would leak real credentials or settings
const SCRUBBED: &[&str] = &[
    "GEMINI_API_KEY",
    "API_KEY",
    "GROK_API_KEY",
    "DATAFORSEO_API_KEY",
    "MAGE_GEMINI_MODEL",
    "MAGE_GEMINI_BASE_URL",
    "MAGE_GROK_MODEL",
    "MAGE_GROK_BASE_URL",
    "MAGE_LOG",
    "COLOR",
];

pub struct Cli {
    cmd: assert_cmd::Command,
}

/// `mage` with a clean environment and colour disabled.
pub fn cli() -> Cli {
    let mut cmd = assert_cmd::Command::cargo_bin("mage").unwrap();
    for name in SCRUBBED {
        cmd.env_remove(name);
    }
    cmd.env("NO_COLOR", "1");
    Cli { cmd }
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    fn output(mut self) -> Output {
        self.cmd.output().unwrap()
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> Ran {
        self.exits(0)
    }

    /// Run and require a specific exit code.
    pub fn exits(self, code: i32) -> Ran {
        let ran = Ran { output: self.output() };
        assert_eq!(
            ran.output.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            ran.stdout(),
            ran.stderr()
        );
        ran
    }
}

pub struct Ran {
    output: Output,
}

impl Ran {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {:?}:\n{}", needle, stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout unexpectedly has {:?}:\n{}", needle, stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {:?}:\n{}", needle, stderr);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}

/// Local stand-in for the Gemini service.
///
/// Answers each of `replies` once, in order. Specs using it run on a
/// multi-thread runtime because the CLI call blocks its thread.
pub struct FakeService {
    server: MockServer,
}

impl FakeService {
    pub async fn gemini(replies: &[&str]) -> Self {
        let server = MockServer::start().await;
        for text in replies {
            let body = serde_json::json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] });
            Mock::given(method("POST"))
                .and(path("/models/gemini-2.5-flash:generateContent"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .up_to_n_times(1)
                .mount(&server)
                .await;
        }
        Self { server }
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Request bodies received, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| String::from_utf8_lossy(&r.body).to_string())
            .collect()
    }
}
