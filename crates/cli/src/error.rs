// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types and process exit codes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Process exit codes.
///
/// 0 = all selected tests passed, 1 = at least one test failed,
/// 2 = fatal error before any test executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    TestsFailed,
    Fatal,
}

impl ExitCode {
    pub fn code(self) -> u8 {
        match self {
            ExitCode::Success => 0,
            ExitCode::TestsFailed => 1,
            ExitCode::Fatal => 2,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

/// Failure status store errors.
///
/// Corrupt or missing status data is not an error (it reads as "no prior
/// status"); only writes and clears can fail.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("failed to write status file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to replace status file {path}")]
    Rename {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove status file {path}")]
    Clear {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fatal errors raised before any test executes.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("test directory {path} does not exist")]
    MissingTestDir { path: PathBuf },

    #[error("invalid test file pattern")]
    Pattern(#[from] globset::Error),

    #[error("invalid coverage ignore pattern")]
    IgnorePattern(#[from] regex::Error),

    #[error("cannot prepare cache directory {path}")]
    CacheDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create coverage session directory")]
    CoverageDir(#[source] io::Error),

    #[error("cannot build worker pool")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
