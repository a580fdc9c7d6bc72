// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage profile parsing.
//!
//! An instrumented test process writes its per-line profile as JSON to the
//! path named in the `RETEST_PROFILE` environment variable:
//!
//! ```json
//! { "src/app.file": { "1": 3, "2": 0, "7": -1 } }
//! ```
//!
//! A negative count marks a line the instrumentation considers not
//! executable. Parse failures are recoverable: the orchestrator warns and
//! drops that one profile.

use std::collections::BTreeMap;

use thiserror::Error;

use super::{CoverageSample, FileLines, LineCount};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to parse profile: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid line number `{0}`")]
    BadLineNumber(String),
}

/// Parse a JSON coverage profile into a sample.
pub fn parse_profile(text: &str) -> Result<CoverageSample, ProfileError> {
    let raw: BTreeMap<String, BTreeMap<String, i64>> = serde_json::from_str(text)?;

    let mut files = BTreeMap::new();
    for (file, lines) in raw {
        let mut parsed = FileLines::new();
        for (line, count) in lines {
            let number: u32 = line
                .parse()
                .map_err(|_| ProfileError::BadLineNumber(line.clone()))?;
            let count = if count < 0 {
                LineCount::NotExecutable
            } else {
                LineCount::Hit(count as u64)
            };
            parsed.insert(number, count);
        }
        files.insert(file, parsed);
    }
    Ok(CoverageSample { files })
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
