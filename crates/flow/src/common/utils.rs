// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::types::{CliError, CliResult, CliTypedResult};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Logs the outcome of a command
fn log_command(command: &str, start_time: Instant, error: Option<&CliError>) {
    let elapsed = start_time.elapsed();
    match error {
        Some(err) => warn!(
            "{} failed after {:?} with {}: {}",
            command,
            elapsed,
            err.to_str(),
            err
        ),
        None => info!("{} succeeded after {:?}", command, elapsed),
    }
}

/// Drops the output of a successful command for the string "Success"
pub fn to_common_success_result<T>(
    command: &str,
    start_time: Instant,
    result: CliTypedResult<T>,
) -> CliResult {
    to_common_result(command, start_time, result.map(|_| "Success"))
}

/// For pretty printing outputs in JSON
pub fn to_common_result<T: Serialize>(
    command: &str,
    start_time: Instant,
    result: CliTypedResult<T>,
) -> CliResult {
    log_command(command, start_time, result.as_ref().err());

    let is_err = result.is_err();
    let result: ResultWrapper<T> = result.into();
    let string = serde_json::to_string_pretty(&result)
        .unwrap_or_else(|err| format!("{{\"Error\": \"Unable to serialize output: {}\"}}", err));
    if is_err {
        Err(string)
    } else {
        Ok(string)
    }
}

/// A result wrapper for displaying either a correct execution result or an error.
///
/// The purpose of this is to have a pretty easy to recognize JSON output format e.g.
///
/// {
///   "Result":{
///     "name": "HelloWorld"
///   }
/// }
///
/// {
///   "Error":"Failed to run command"
/// }
///
#[derive(Debug, Serialize)]
enum ResultWrapper<T> {
    Result(T),
    Error(String),
}

impl<T> From<CliTypedResult<T>> for ResultWrapper<T> {
    fn from(result: CliTypedResult<T>) -> Self {
        match result {
            Ok(inner) => ResultWrapper::Result(inner),
            Err(inner) => ResultWrapper::Error(inner.to_string()),
        }
    }
}
