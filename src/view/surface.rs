//! Rendering surfaces
//!
//! The dashboard never draws itself; it hands each [`ViewModel`] to a
//! [`RenderSurface`]. Browsers, terminals and tests plug in here.

use super::error::ViewResult;
use super::model::ViewModel;
use super::state::Viewport;
use std::io::Write;

/// Something that can display a dashboard frame
pub trait RenderSurface: Send {
    /// Draw a full frame
    fn render(&mut self, view: &ViewModel) -> ViewResult<()>;

    /// React to a change in available space
    fn resize(&mut self, viewport: Viewport) -> ViewResult<()>;
}

/// Widest the cause column grows
const CAUSE_WIDTH: usize = 40;
/// Narrowest the cause column shrinks
const MIN_CAUSE_WIDTH: usize = 12;
/// Count column plus separator
const COUNT_WIDTH: usize = 9;

/// Plain-text surface, one block per frame.
///
/// The viewport width is read as terminal columns; a zero width keeps the
/// default layout.
pub struct TextSurface<W: Write + Send> {
    out: W,
    viewport: Viewport,
}

impl<W: Write + Send> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            viewport: Viewport::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cause_width(&self) -> usize {
        match self.viewport.width as usize {
            0 => CAUSE_WIDTH,
            columns => columns
                .saturating_sub(COUNT_WIDTH)
                .clamp(MIN_CAUSE_WIDTH, CAUSE_WIDTH),
        }
    }
}

impl<W: Write + Send> RenderSurface for TextSurface<W> {
    fn render(&mut self, view: &ViewModel) -> ViewResult<()> {
        for (label, value) in view.highlights.entries() {
            writeln!(self.out, "{:<14} {}", label, value)?;
        }

        if let Some(last_update) = &view.update_stats.last_update {
            writeln!(self.out, "Last update:   {}", last_update)?;
        }
        if let Some(last_submission) = &view.update_stats.last_submission {
            writeln!(self.out, "Last VA:       {}", last_submission)?;
        }

        if !view.cod_grouping.is_empty() {
            let width = self.cause_width();
            writeln!(self.out)?;
            writeln!(self.out, "{:<width$.width$} {:>8}", "Cause of death", "Count")?;
            writeln!(self.out, "{}", "-".repeat(width + COUNT_WIDTH))?;
            for item in &view.cod_grouping {
                writeln!(self.out, "{:<width$.width$} {:>8}", item.cause, item.count)?;
            }
        }

        if let Some(map) = &view.map {
            writeln!(self.out)?;
            writeln!(self.out, "Map ({})", map.border)?;
            for feature in map.features.iter().filter(|f| f.fill.is_some()) {
                writeln!(
                    self.out,
                    "  {:<32} {:>8} {}",
                    feature.region,
                    feature
                        .count
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    feature.fill.unwrap_or_default()
                )?;
            }

            writeln!(self.out)?;
            writeln!(self.out, "Legend")?;
            for entry in &map.legend {
                writeln!(
                    self.out,
                    "  {:>10.1} - {:<10.1} {}",
                    entry.lower, entry.upper, entry.color
                )?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> ViewResult<()> {
        tracing::trace!(width = viewport.width, height = viewport.height, "Surface resized");
        self.viewport = viewport;
        Ok(())
    }
}
