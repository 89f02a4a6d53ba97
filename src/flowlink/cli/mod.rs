//! # CLI Behavior
//!
//! This is one client of the flowlink library. It is the only place that
//! knows about terminal output and exit codes.
//!
//! ## Session Directory
//!
//! State lives in `<dir>/.flowlink/`, where `<dir>` is `--dir` or the current
//! directory. A typical session:
//!
//! ```text
//! flowlink graph workflow_api.json
//! flowlink bind 3.inputs.cfg stepper --label CFG --set maxValue=30
//! flowlink bind 6.inputs.text prompt --label Prompt
//! flowlink group create Sampler stepperAb12Cd
//! flowlink meta --name "Portrait Studio"
//! flowlink export --out flow.json
//! ```
//!
//! `graph` and `load` read from stdin when given `-`.
//!
//! ## Parameter Fields
//!
//! `--set key=value` sets a control parameter by its document name. Values are
//! read as JSON when they parse (`30`, `true`, `"text"`) and as plain text
//! otherwise, so `--set url=KSampler` needs no quoting.
//!
//! ## Logging
//!
//! Library diagnostics go to stderr through `tracing`. The default level is
//! `warn`; `-v` raises it to `info` and `-vv` to `debug`. `RUST_LOG` overrides
//! both.

mod commands;
mod print;
mod setup;

pub use commands::run;
