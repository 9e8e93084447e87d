//! Launching the containerized compiler
//!
//! One blocking `docker run` per query. The command is passed as an argument
//! vector, never through a shell.

use super::QueryConfig;
use crate::error::{CelloError, Result};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Fully qualified entry point inside the Cello image
const CELLO_MAIN: &str = "org.cellocad.v2.DNACompiler.runtime.Main";

/// Something that can turn a query into a populated output directory
pub trait CompilerRunner {
    fn run(&self, query: &QueryConfig) -> Result<()>;
}

/// Build the `docker run` arguments for a query (without the program name).
pub fn docker_args(query: &QueryConfig) -> Vec<String> {
    let input = |file: &str| format!("/root/input/{}", file);
    vec![
        "run".into(),
        "--rm".into(),
        "-v".into(),
        format!("{}:/root/input", query.input_directory.display()),
        "-v".into(),
        format!("{}:/root/output", query.output_directory.display()),
        "-t".into(),
        query.image.clone(),
        "java".into(),
        "-classpath".into(),
        "/root/app.jar".into(),
        CELLO_MAIN.into(),
        "-inputNetlist".into(),
        input(&query.verilog_file),
        "-options".into(),
        input(&query.compiler_options),
        "-userConstraintsFile".into(),
        input(&query.input_ucf),
        "-inputSensorFile".into(),
        input(&query.input_sensors),
        "-outputDeviceFile".into(),
        input(&query.output_device),
        "-pythonEnv".into(),
        "python".into(),
        "-outputDir".into(),
        "/root/output".into(),
    ]
}

/// Runs Cello through the docker CLI
#[derive(Debug, Clone)]
pub struct DockerRunner {
    program: String,
}

impl Default for DockerRunner {
    fn default() -> Self {
        Self {
            program: "docker".to_string(),
        }
    }
}

impl DockerRunner {
    /// Use a different container CLI (e.g. `podman`)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn spawn_error(&self, e: std::io::Error) -> CelloError {
        if e.kind() == std::io::ErrorKind::NotFound {
            CelloError::ToolFailed(format!("{} not found. Please install it first.", self.program))
        } else {
            CelloError::ToolFailed(format!("Failed to run {}: {}", self.program, e))
        }
    }
}

fn failure_message(code: Option<i32>, stderr: &str) -> String {
    let mut msg = match code {
        Some(c) => format!("exited with status {}", c),
        None => "terminated by signal".to_string(),
    };
    msg.push_str(
        ". Placement is non-deterministic, so re-running or changing the query \
         may help. Partial results are left in the output directory.",
    );
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        msg.push('\n');
        msg.push_str(stderr);
    }
    msg
}

impl CompilerRunner for DockerRunner {
    fn run(&self, query: &QueryConfig) -> Result<()> {
        let args = docker_args(query);
        debug!("Running {} {:?}", self.program, args);

        let mut command = Command::new(&self.program);
        command.args(&args);

        if query.logging {
            // Stream the compiler's output straight to the terminal
            let status = command
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| self.spawn_error(e))?;
            if !status.success() {
                return Err(CelloError::ToolFailed(failure_message(status.code(), "")));
            }
        } else {
            let output = command
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .map_err(|e| self.spawn_error(e))?;
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!("Cello exited with {:?}", output.status.code());
                return Err(CelloError::ToolFailed(failure_message(
                    output.status.code(),
                    &stderr,
                )));
            }
        }

        info!("Cello finished, results in {}", query.output_directory.display());
        Ok(())
    }
}
