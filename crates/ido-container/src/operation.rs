//! Operation dispatch.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ido_common::EventSink;

use crate::{compile, decompile, Compiled, Decompiled, Error, Result, TranscodeOptions};

/// The two supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Container to artifact.
    Decompile,
    /// Artifact to container.
    Compile,
}

impl Operation {
    /// Lowercase name used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Decompile => "decompile",
            Operation::Compile => "compile",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "decompile" => Ok(Operation::Decompile),
            "compile" => Ok(Operation::Compile),
            other => Err(Error::UnknownOperation(other.to_string())),
        }
    }
}

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Decompiled(Decompiled),
    Compiled(Compiled),
}

impl Report {
    /// The primary output file.
    pub fn output(&self) -> &Path {
        match self {
            Report::Decompiled(decompiled) => decompiled.output(),
            Report::Compiled(compiled) => &compiled.output,
        }
    }
}

/// Run an operation.
///
/// Every fatal error is reported to the sink at error level before being
/// returned, so the caller only has to turn the `Result` into its final
/// result object.
pub fn run(
    operation: Operation,
    input: &Path,
    output: &Path,
    options: &TranscodeOptions,
    sink: &dyn EventSink,
) -> Result<Report> {
    let result = match operation {
        Operation::Decompile => decompile(input, output, options, sink).map(Report::Decompiled),
        Operation::Compile => compile(input, output, options, sink).map(Report::Compiled),
    };

    if let Err(e) = &result {
        sink.error(&format!("Error during {}: {}", operation, e));
    }
    result
}

/// Parse an operation name and run it.
///
/// Unknown names fail with [`Error::UnknownOperation`] before any file is
/// touched.
pub fn execute(
    operation: &str,
    input: &Path,
    output: &Path,
    options: &TranscodeOptions,
    sink: &dyn EventSink,
) -> Result<Report> {
    let operation = match operation.parse::<Operation>() {
        Ok(operation) => operation,
        Err(e) => {
            sink.error(&e.to_string());
            return Err(e);
        }
    };
    run(operation, input, output, options, sink)
}
