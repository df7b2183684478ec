//! JSON evaluation protocol.
//!
//! One JSON object per line on stdin, one response per line on stdout,
//! flushed immediately. The command handling is a pure library layer over
//! a [`Session`] so tests can drive it without a process; the
//! `eval_harness` binary is a thin loop on top.
//!
//! Every error is recovered here and reported as a structured response.
//! The loop only terminates on `quit` or end of input; malformed JSON and
//! unknown commands keep it running.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::core::Action;
use crate::envs::{Environment, EnvironmentRegistry};
use crate::grid::Observation;

/// A response frame plus whether the session is over.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub body: Value,
    pub quit: bool,
}

impl Reply {
    fn ok(body: Value) -> Self {
        Self { body, quit: false }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            body: json!({"status": "error", "message": message.into()}),
            quit: false,
        }
    }
}

/// One evaluation session: a registry plus at most one live environment.
pub struct Session {
    registry: EnvironmentRegistry,
    env: Option<Environment>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session over the built-in level registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(EnvironmentRegistry::builtin())
    }

    /// A session over a caller-provided registry.
    #[must_use]
    pub fn with_registry(registry: EnvironmentRegistry) -> Self {
        Self {
            registry,
            env: None,
        }
    }

    /// Handle one input line. Blank lines produce no reply.
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(request) => Some(self.handle_command(&request)),
            Err(e) => {
                warn!(error = %e, "rejected malformed input line");
                Some(Reply::error(format!("Invalid JSON: {e}")))
            }
        }
    }

    /// Dispatch one parsed command.
    pub fn handle_command(&mut self, request: &Value) -> Reply {
        let cmd = request.get("cmd").and_then(Value::as_str).unwrap_or("");
        debug!(cmd, "handling command");

        match cmd {
            "list_envs" => self.list_envs(),
            "reset" => self.reset(request),
            "step" => self.step(request),
            "info" => self.info(),
            "quit" => Reply {
                body: json!({"status": "ok", "message": "goodbye"}),
                quit: true,
            },
            other => Reply::error(format!(
                "Unknown command: {other}. Valid commands: list_envs, reset, step, info, quit"
            )),
        }
    }

    fn list_envs(&self) -> Reply {
        let mut envs = serde_json::Map::new();
        for entry in self.registry.entries() {
            envs.insert(
                entry.name.to_string(),
                json!({"difficulty": entry.difficulty}),
            );
        }
        Reply::ok(json!({"status": "ok", "envs": envs}))
    }

    fn reset(&mut self, request: &Value) -> Reply {
        let name = request
            .get("env")
            .and_then(Value::as_str)
            .unwrap_or("simple");
        match self.registry.create(name) {
            Ok(mut env) => {
                let observation = env.reset();
                let name = env.name().to_string();
                self.env = Some(env);
                Reply::ok(json!({
                    "status": "ok",
                    "env": name,
                    "observation": observation_value(&observation),
                }))
            }
            Err(e) => Reply::error(e.to_string()),
        }
    }

    fn step(&mut self, request: &Value) -> Reply {
        let Some(env) = self.env.as_mut() else {
            return Reply::error("No environment loaded. Use 'reset' first.");
        };
        let action_str = request
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or("wait");
        let action = match Action::parse(action_str) {
            Ok(action) => action,
            Err(e) => return Reply::error(e.to_string()),
        };

        let transition = env.step(action);
        Reply::ok(json!({
            "status": "ok",
            "observation": observation_value(&transition.observation),
            "reward": transition.reward,
            "done": transition.done,
            "info": {
                "steps": transition.info.steps,
                "won": transition.info.won,
                "lost": transition.info.lost,
            },
        }))
    }

    fn info(&mut self) -> Reply {
        let Some(env) = self.env.as_mut() else {
            return Reply::error("No environment loaded. Use 'reset' first.");
        };
        let observation = env.observe();
        let name = env.name().to_string();
        Reply::ok(json!({
            "status": "ok",
            "env": name,
            "observation": observation_value(&observation),
        }))
    }
}

fn observation_value(observation: &Observation) -> Value {
    serde_json::to_value(observation)
        .unwrap_or_else(|e| json!({"serialization_error": e.to_string()}))
}

/// Drive a session over arbitrary line-oriented streams.
///
/// Each reply is written as one line and flushed immediately. Returns on
/// `quit` or end of input.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, output: &mut W) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let Some(reply) = session.handle_line(&line) else {
            continue;
        };
        writeln!(output, "{}", reply.body)?;
        output.flush()?;
        if reply.quit {
            break;
        }
    }
    Ok(())
}
