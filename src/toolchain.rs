//! Queries against the local Xcode toolchain.
//!
//! Uses the standard tools when present; program paths can be overridden
//! via env vars so CI smoke tests can point at stubs.

use std::process::Command;

use crate::config::Platform;

/// Installed SDK version for the platform, e.g. `"15.2"`.
pub fn sdk_version(platform: Platform, debug: bool) -> Result<String, ToolchainError> {
    let program = tool_program("SDKCAT_XCRUN", "xcrun");
    let out = run_tool(
        &program,
        &["--sdk", platform.sdk_name(), "--show-sdk-version"],
    )?;
    if debug {
        eprintln!("[debug] {} --show-sdk-version -> {:?}", program, out);
    }
    if out.is_empty() {
        return Err(ToolchainError::EmptyOutput(program));
    }
    Ok(out)
}

/// Human-readable toolchain identifier, e.g. `"Xcode 15.2"`. First line of
/// the version report; used only for display in remediation messages.
pub fn xcode_version(debug: bool) -> Result<String, ToolchainError> {
    let program = tool_program("SDKCAT_XCODEBUILD", "xcodebuild");
    let out = run_tool(&program, &["-version"])?;
    if debug {
        eprintln!("[debug] {} -version -> {:?}", program, out);
    }
    out.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
        .ok_or(ToolchainError::EmptyOutput(program))
}

fn tool_program(env_var: &str, default: &str) -> String {
    match std::env::var(env_var) {
        Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
        _ => default.to_string(),
    }
}

fn run_tool(program: &str, args: &[&str]) -> Result<String, ToolchainError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ToolchainError::Spawn(program.to_string(), e))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ToolchainError::Failed(program.to_string(), stderr));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[derive(Debug)]
pub enum ToolchainError {
    Spawn(String, std::io::Error),
    Failed(String, String),
    EmptyOutput(String),
    UnparsableVersion(String),
}

impl std::fmt::Display for ToolchainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolchainError::Spawn(program, e) => write!(f, "Failed to run {}: {}", program, e),
            ToolchainError::Failed(program, stderr) => {
                if stderr.is_empty() {
                    write!(f, "{} exited with an error", program)
                } else {
                    write!(f, "{} exited with an error: {}", program, stderr)
                }
            }
            ToolchainError::EmptyOutput(program) => {
                write!(f, "{} produced no output", program)
            }
            ToolchainError::UnparsableVersion(v) => {
                write!(f, "SDK version {:?} is not a decimal number", v)
            }
        }
    }
}

impl std::error::Error for ToolchainError {}
