use crate::{
    compile::clock::expand_clocks,
    compile::layout::Layout,
    compile::metrics::DocumentMetrics,
    compile::plan::{Diagnostic, WaveOpts, WavePlan, compile_plan},
    document::model::Document,
    document::parse::parse_document,
    foundation::error::WavyResult,
    render::backend::{FrameRGBA, RenderBackend},
};

/// Compile a parsed document into a [`WavePlan`].
///
/// Phases run in a fixed order:
/// 1. [`DocumentMetrics::collect`] over the raw document
/// 2. clock expansion against the widest data track
/// 3. [`Layout::compute`]
/// 4. [`compile_plan`]
pub fn compile_document(mut doc: Document, opts: &WaveOpts) -> WavyResult<WavePlan> {
    let metrics = DocumentMetrics::collect(&doc);
    expand_clocks(&mut doc, metrics.width);
    let layout = Layout::compute(&metrics, opts.font_size)?;
    tracing::debug!(?metrics, ?layout, "layout resolved");
    compile_plan(&doc, &layout, opts)
}

/// Parse `source` and compile it. `input` names the source in error messages.
#[tracing::instrument(skip(source, opts), fields(bytes = source.len()))]
pub fn compile_source(source: &str, input: &str, opts: &WaveOpts) -> WavyResult<WavePlan> {
    let doc = parse_document(source, input)?;
    compile_document(doc, opts)
}

/// Pixels plus the non-fatal diagnostics collected while compiling them.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub frame: FrameRGBA,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse, compile and rasterize one diagram.
///
/// A fatal parse error returns before the backend is touched, so no image exists.
#[tracing::instrument(skip(source, opts, backend), fields(bytes = source.len()))]
pub fn render_source(
    source: &str,
    input: &str,
    opts: &WaveOpts,
    backend: &mut dyn RenderBackend,
) -> WavyResult<RenderOutput> {
    let plan = compile_source(source, input, opts)?;
    let frame = backend.render_plan(&plan)?;
    Ok(RenderOutput {
        frame,
        diagnostics: plan.diagnostics,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
