//! Small helpers shared across CLI tests.

use std::path::{Path, PathBuf};

use graphfix_core::MemorySink;
use image::{Rgb, RgbImage};
use rand::{SeedableRng, rngs::SmallRng};
use serde_json::Value;
use tempfile::TempDir;

use super::commands::execute;
use super::{CliError, Command, ExecutionSummary};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Runs `command` against an in-memory sink with a fixed seed.
pub(super) fn execute_in_memory(
    command: Command,
    seed: u64,
) -> (Result<ExecutionSummary, CliError>, MemorySink) {
    let mut sink = MemorySink::new();
    let mut rng = SmallRng::seed_from_u64(seed);
    let result = execute(command, &mut rng, &mut sink);
    (result, sink)
}

pub(super) fn expect_error(result: Result<ExecutionSummary, CliError>, panic_msg: &str) -> CliError {
    match result {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn parse_json(sink: &MemorySink, name: &str) -> Value {
    let Some(bytes) = sink.bytes(name) else {
        panic!("`{name}` was not written");
    };
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(err) => panic!("`{name}` is not valid JSON: {err}"),
    }
}

pub(super) fn write_gradient_png(dir: &Path, width: u32, height: u32) -> PathBuf {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([u8::try_from(x * 40).unwrap_or(u8::MAX), u8::try_from(y * 40).unwrap_or(u8::MAX), 0])
    });
    let path = dir.join("gradient.png");
    if let Err(err) = image.save(&path) {
        panic!("failed to write PNG fixture: {err}");
    }
    path
}

pub(super) fn write_table(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("table.txt");
    if let Err(err) = std::fs::write(&path, contents) {
        panic!("failed to write table fixture: {err}");
    }
    path
}
