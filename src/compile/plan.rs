use std::collections::HashSet;

use kurbo::Shape as _;
use rayon::prelude::*;

use crate::{
    compile::layout::{Layout, RowBand, SPACER},
    compile::transitions::{PairRule, classify_chars},
    document::model::{Document, Row, Signal},
    foundation::core::{BezPath, Canvas, Point, Rect, Rgba8Premul},
    foundation::error::{WavyError, WavyResult},
};

const TRACE_COLOR: Rgba8Premul = Rgba8Premul::opaque(0x00, 0x00, 0xff);
const BAND_COLOR: Rgba8Premul = Rgba8Premul::opaque(0xcc, 0xcc, 0xcc);
const LINE_WIDTH: f64 = 1.0;
const PATH_TOLERANCE: f64 = 0.1;

/// Options consumed when compiling a document.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveOpts {
    /// Font size unit `fs`; every dimension scales with it.
    pub font_size: f64,
    /// Draw vertical gridlines at column centres.
    pub debug: bool,
    pub threading: CompileThreading,
}

impl Default for WaveOpts {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            debug: false,
            threading: CompileThreading::default(),
        }
    }
}

/// Per-track parallelism for plan compilation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileThreading {
    /// Compile tracks on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of worker threads (parallel mode only).
    pub threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Horizontal placement of text relative to its anchor.
pub enum TextAlign {
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// On/off dash lengths in pixels.
pub struct Dash {
    pub on: f64,
    pub off: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Draw operation emitted by the compiler, in canvas pixel coordinates.
pub enum DrawOp {
    FillPath {
        path: BezPath,
        color: Rgba8Premul,
    },
    StrokePath {
        path: BezPath,
        color: Rgba8Premul,
        width: f64,
        dash: Option<Dash>,
    },
    /// Single line of text. `anchor.y` is the baseline; `anchor.x` is interpreted
    /// according to `align` once the backend has measured the text.
    Text {
        text: String,
        anchor: Point,
        align: TextAlign,
        size_px: f64,
        color: Rgba8Premul,
    },
}

impl DrawOp {
    pub fn is_text(&self) -> bool {
        matches!(self, DrawOp::Text { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A character pair with no drawing rule. Reported once per signal and pair.
pub struct Diagnostic {
    pub signal: String,
    /// Index of the second character of the pair.
    pub column: usize,
    pub pair: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized signal pair {:?}:{} = {:?}",
            self.signal, self.column, self.pair
        )
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Backend-agnostic drawing plan for one diagram.
///
/// Ops are in painter's order. The plan is complete even when `diagnostics` is
/// non-empty; unrecognized columns are simply left blank.
pub struct WavePlan {
    pub canvas: Canvas,
    pub layout: Layout,
    pub ops: Vec<DrawOp>,
    pub diagnostics: Vec<Diagnostic>,
}

impl WavePlan {
    pub fn to_json_pretty(&self) -> WavyResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WavyError::serde(e.to_string()))
    }

    pub fn has_text(&self) -> bool {
        self.ops.iter().any(DrawOp::is_text)
    }
}

/// Compile an expanded document into a [`WavePlan`].
///
/// Every clock must already carry its expanded states.
pub fn compile_plan(doc: &Document, layout: &Layout, opts: &WaveOpts) -> WavyResult<WavePlan> {
    let canvas = layout.canvas();
    let mut ops = Vec::new();

    ops.push(DrawOp::FillPath {
        path: rect_path(0.0, 0.0, layout.wide, layout.high),
        color: Rgba8Premul::WHITE,
    });

    if opts.debug {
        let mut grid = BezPath::new();
        for i in 0..layout.width {
            let x = layout.right + layout.full * (0.5 + i as f64);
            grid.move_to((x, 0.0));
            grid.line_to((x, layout.high));
        }
        ops.push(stroke(grid, Rgba8Premul::BLACK, None));
    }

    let mut jobs = Vec::<(&Signal, RowBand)>::new();
    let mut row_offset = 0.0;
    for row in &doc.rows {
        match row {
            Row::Track(sig) => {
                jobs.push((sig, layout.row_band(row_offset)));
                row_offset += 1.0;
            }
            Row::Spacer => row_offset += 0.5,
        }
    }

    let tracks: Vec<WavyResult<TrackOutput>> = if opts.threading.parallel {
        let pool = build_thread_pool(opts.threading.threads)?;
        pool.install(|| {
            jobs.par_iter()
                .map(|(sig, band)| compile_track(sig, *band, layout))
                .collect()
        })
    } else {
        jobs.iter()
            .map(|(sig, band)| compile_track(sig, *band, layout))
            .collect()
    };

    let mut diagnostics = Vec::new();
    for track in tracks {
        let track = track?;
        ops.extend(track.ops);
        diagnostics.extend(track.diagnostics);
    }

    ops.push(DrawOp::StrokePath {
        path: rect_path(
            0.5,
            0.5,
            f64::from(canvas.width) - 0.5,
            f64::from(canvas.height) - 0.5,
        ),
        color: Rgba8Premul::BLACK,
        width: LINE_WIDTH,
        dash: None,
    });

    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        ops = ops.len(),
        diagnostics = diagnostics.len(),
        "compiled wave plan"
    );

    Ok(WavePlan {
        canvas,
        layout: *layout,
        ops,
        diagnostics,
    })
}

struct TrackOutput {
    ops: Vec<DrawOp>,
    diagnostics: Vec<Diagnostic>,
}

fn compile_track(sig: &Signal, band: RowBand, layout: &Layout) -> WavyResult<TrackOutput> {
    if sig.is_clock() && sig.states.is_empty() {
        return Err(WavyError::validation(format!(
            "clock {:?} must be expanded before rendering",
            sig.name
        )));
    }

    let fs = layout.font_size;
    let mut ops = vec![DrawOp::FillPath {
        path: rect_path(0.0, band.top + 1.0, layout.wide, band.bot - 1.0),
        color: BAND_COLOR,
    }];
    let mut diagnostics = Vec::new();

    let phase_px = sig
        .clock
        .map_or(0.0, |c| c.phase * layout.full * c.half_period() as f64);
    let mut labels = sig.labels.iter();
    let mut seg_start = layout.right - phase_px;
    let mut reported = HashSet::<(char, char)>::new();

    let states: Vec<char> = sig.states.chars().collect();
    for (idx, pair) in states.windows(2).enumerate() {
        let column = idx + 1;
        let (prev, cur) = (pair[0], pair[1]);
        let start = layout.column_start(column, phase_px);

        let Some(rule) = classify_chars(prev, cur) else {
            if reported.insert((prev, cur)) {
                let diag = Diagnostic {
                    signal: sig.name.clone(),
                    column,
                    pair: [prev, cur].iter().collect(),
                };
                tracing::warn!("{diag}");
                diagnostics.push(diag);
            }
            continue;
        };

        let col = Column::new(start, band, layout);
        col.emit(rule, &mut ops);

        let fx = rule.label_effect(col.half);
        if fx.show_label
            && let Some(label) = labels.next()
        {
            let seg_end = start + fx.segment_end.unwrap_or(0.0);
            if !label.is_empty() {
                ops.push(DrawOp::Text {
                    text: label.clone(),
                    anchor: Point::new(0.5 * (seg_start + seg_end), band.bot - 0.5 * fs),
                    align: TextAlign::Center,
                    size_px: 0.8 * fs,
                    color: Rgba8Premul::BLACK,
                });
            }
        }
        if let Some(next) = fx.next_start {
            seg_start = start + next;
        }
    }

    // Mask phase-shifted clock spill over the name margin.
    ops.push(DrawOp::FillPath {
        path: rect_path(0.0, band.top + 1.0, layout.right, band.bot - 1.0),
        color: Rgba8Premul::WHITE,
    });
    ops.push(DrawOp::Text {
        text: sig.name.clone(),
        anchor: Point::new(layout.right - 0.5 * fs, band.bot - 0.4 * fs),
        align: TextAlign::End,
        size_px: fs,
        color: Rgba8Premul::BLACK,
    });

    Ok(TrackOutput { ops, diagnostics })
}

/// Geometry of one column of one track.
struct Column {
    x: f64,
    half: f64,
    full: f64,
    hi: f64,
    mid: f64,
    lo: f64,
    dash: Dash,
    /// Half height of the data diamond.
    vert: f64,
}

impl Column {
    fn new(start: f64, band: RowBand, layout: &Layout) -> Self {
        let fs = layout.font_size;
        Self {
            x: start,
            half: layout.half(),
            full: layout.full,
            hi: band.mid - layout.demi(),
            mid: band.mid,
            lo: band.mid + layout.demi(),
            dash: Dash {
                on: 0.3 * fs,
                off: 0.2 * fs,
            },
            vert: 0.5 * fs * SPACER,
        }
    }

    fn at(&self, dx: f64, y: f64) -> Point {
        Point::new(self.x + dx, y)
    }

    fn emit(&self, rule: PairRule, ops: &mut Vec<DrawOp>) {
        let (h, f) = (self.half, self.full);
        let (hi, mid, lo) = (self.hi, self.mid, self.lo);

        let solid = |lines: &[&[Point]]| stroke(polylines(lines), TRACE_COLOR, None);
        let dashed = |lines: &[&[Point]]| stroke(polylines(lines), TRACE_COLOR, Some(self.dash));

        match rule {
            PairRule::SteadyHigh => ops.push(solid(&[&[self.at(0.0, hi), self.at(f, hi)]])),
            PairRule::SteadyLow => ops.push(solid(&[&[self.at(0.0, lo), self.at(f, lo)]])),
            PairRule::FallingEdge => ops.push(solid(&[&[
                self.at(0.0, hi),
                self.at(h, hi),
                self.at(h, lo),
                self.at(f, lo),
            ]])),
            PairRule::RisingEdge => ops.push(solid(&[&[
                self.at(0.0, lo),
                self.at(h, lo),
                self.at(h, hi),
                self.at(f, hi),
            ]])),
            PairRule::RampFall => ops.push(solid(&[&[
                self.at(0.0, hi),
                self.at(0.7 * h, hi),
                self.at(1.3 * h, lo),
                self.at(f, lo),
            ]])),
            PairRule::RampRise => ops.push(solid(&[&[
                self.at(0.0, lo),
                self.at(0.7 * h, lo),
                self.at(1.3 * h, hi),
                self.at(f, hi),
            ]])),
            PairRule::BusCross { .. } => ops.push(solid(&[
                &[
                    self.at(0.0, hi),
                    self.at(0.7 * h, hi),
                    self.at(1.3 * h, lo),
                    self.at(f, lo),
                ],
                &[
                    self.at(0.0, lo),
                    self.at(0.7 * h, lo),
                    self.at(1.3 * h, hi),
                    self.at(f, hi),
                ],
            ])),
            PairRule::BusClose => ops.push(solid(&[
                &[
                    self.at(0.0, hi),
                    self.at(0.7 * h, hi),
                    self.at(h, mid),
                    self.at(0.7 * h, lo),
                    self.at(0.0, lo),
                ],
                &[self.at(f, lo), self.at(h, mid), self.at(f, hi)],
            ])),
            PairRule::BusOpen => ops.push(solid(&[
                &[self.at(0.0, lo), self.at(h, mid), self.at(0.0, hi)],
                &[
                    self.at(f, hi),
                    self.at(1.1 * h, hi),
                    self.at(h, mid),
                    self.at(1.1 * h, lo),
                    self.at(f, lo),
                ],
            ])),
            PairRule::HighToUndefined => ops.push(solid(&[
                &[self.at(0.0, hi), self.at(f, hi)],
                &[self.at(h, hi), self.at(f, lo)],
            ])),
            PairRule::LowToUndefined => ops.push(solid(&[
                &[self.at(0.0, lo), self.at(f, lo)],
                &[self.at(h, lo), self.at(f, hi)],
            ])),
            PairRule::UndefinedToHigh => ops.push(solid(&[
                &[self.at(0.0, lo), self.at(h, hi)],
                &[self.at(0.0, hi), self.at(f, hi)],
            ])),
            PairRule::UndefinedToLow => ops.push(solid(&[
                &[self.at(0.0, hi), self.at(h, lo)],
                &[self.at(0.0, lo), self.at(f, lo)],
            ])),
            PairRule::BothRails => ops.push(solid(&[
                &[self.at(0.0, lo), self.at(f, lo)],
                &[self.at(0.0, hi), self.at(f, hi)],
            ])),
            PairRule::LowToHighZ => {
                ops.push(solid(&[&[self.at(0.0, lo), self.at(h, lo)]]));
                ops.push(dashed(&[&[self.at(h, lo), self.at(h, mid), self.at(f, mid)]]));
            }
            PairRule::HighZToUndefined => {
                ops.push(dashed(&[&[self.at(0.0, mid), self.at(h, mid)]]));
                ops.push(solid(&[&[self.at(f, lo), self.at(h, mid), self.at(f, hi)]]));
            }
            PairRule::HighZ => ops.push(dashed(&[&[self.at(0.0, mid), self.at(f, mid)]])),
            PairRule::DataDiamond => {
                let v = self.vert;
                let mut path = polylines(&[&[
                    self.at(0.0, mid - v),
                    self.at(-0.2 * h, mid + v / 10.0),
                    self.at(0.2 * h, mid + v / 10.0),
                    self.at(0.0, mid + v),
                    self.at(f, mid + v),
                    self.at(f + 0.2 * h, mid - v / 10.0),
                    self.at(f - 0.2 * h, mid - v / 10.0),
                    self.at(f, mid - v),
                ]]);
                path.close_path();
                ops.push(DrawOp::FillPath {
                    path,
                    color: Rgba8Premul::WHITE,
                });
            }
        }
    }
}

fn polylines(lines: &[&[Point]]) -> BezPath {
    let mut path = BezPath::new();
    for line in lines {
        let mut pts = line.iter();
        if let Some(first) = pts.next() {
            path.move_to(*first);
            for p in pts {
                path.line_to(*p);
            }
        }
    }
    path
}

fn stroke(path: BezPath, color: Rgba8Premul, dash: Option<Dash>) -> DrawOp {
    DrawOp::StrokePath {
        path,
        color,
        width: LINE_WIDTH,
        dash,
    }
}

fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Rect::new(x0, y0, x1, y1).to_path(PATH_TOLERANCE)
}

fn build_thread_pool(threads: Option<usize>) -> WavyResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WavyError::validation(
            "compile threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WavyError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
