// Licensed under the Apache-2.0 license

use anyhow::{bail, Context, Result};
use iana_registries_generator::{SourceFormatter, SyntaxOnly};
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Formats generated source by piping it through `rustfmt`.
pub(crate) struct Rustfmt {
    edition: &'static str,
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self { edition: "2021" }
    }
}

impl SourceFormatter for Rustfmt {
    fn format(&self, source: &str) -> Result<String> {
        // Reject invalid syntax with a parser error rather than rustfmt's.
        SyntaxOnly.format(source)?;

        let mut cmd = Command::new("rustfmt");
        cmd.args(["--edition", self.edition]);
        let output = pipe_through(cmd, source).context("failed to run rustfmt")?;
        if !output.status.success() {
            bail!(
                "rustfmt failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8(output.stdout).context("rustfmt produced invalid UTF-8")
    }
}

/// Runs `cmd` with `input` on stdin and collects its output.
///
/// The child is killed and reaped if it stops accepting input.
fn pipe_through(mut cmd: Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to spawn")?;
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(e).context("failed to write to stdin");
        }
    }
    Ok(child.wait_with_output()?)
}
