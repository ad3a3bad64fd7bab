//! Wavy compiles compact textual waveform descriptions into timing-diagram images.
//!
//! Each non-blank input line describes one signal: a name followed either by a
//! string of state characters (`^ _ / \ z x < > - %`) plus optional bus labels, or by
//! a clock spec (`+half_period_minus_one[,phase]`). The pipeline is explicit:
//!
//! - [`parse_document`] turns text into a [`Document`]
//! - [`compile_document`] collects metrics, expands clocks, lays out the canvas and
//!   emits a backend-agnostic [`WavePlan`]
//! - a [`RenderBackend`] rasterizes the plan into a [`FrameRGBA`]
//!
//! [`render_source`] runs all of it in one call.
#![forbid(unsafe_code)]

mod assets;
mod compile;
mod document;
mod foundation;
mod render;

pub use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{WavyError, WavyResult};

pub use crate::assets::font::{FONT_ENV_VAR, FontSource, LoadedFont};
pub use crate::compile::clock::{clock_states, expand_clock, expand_clocks};
pub use crate::compile::layout::{Layout, RowBand};
pub use crate::compile::metrics::{DocumentMetrics, SignalMetrics, signal_metrics};
pub use crate::compile::plan::{
    CompileThreading, Dash, Diagnostic, DrawOp, TextAlign, WaveOpts, WavePlan, compile_plan,
};
pub use crate::compile::transitions::{Level, PairRule, classify, classify_chars};
pub use crate::document::model::{ClockSpec, Document, Row, Signal};
pub use crate::document::parse::{parse_document, parse_line};
pub use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::passes::{OpBackend, execute_plan};
pub use crate::render::pipeline::{RenderOutput, compile_document, compile_source, render_source};
