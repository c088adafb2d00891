//! # Screen Renderer
//!
//! Writes a plain-text picture of the visible views to any writer.
//! The binary points it at stdout; tests point it at a `Vec<u8>`.

use anyhow::Result;
use std::io::Write;

use super::{Element, MovieDetailView, MoviesListView};
use crate::app::models::Record;

pub struct ScreenRenderer<W: Write> {
    out: W,
}

impl<W: Write> ScreenRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Draw whichever of the two views is visible
    pub fn render<L: Element, D: Element>(
        &mut self,
        list: &MoviesListView<L>,
        detail: &MovieDetailView<D>,
    ) -> Result<()> {
        if list.element().is_visible() {
            writeln!(self.out, "Movies")?;
            for row in list.rows() {
                let movie = row.movie();
                writeln!(
                    self.out,
                    "  [{}] {:<28} {}",
                    movie.id(),
                    movie.name(),
                    movie.rating()
                )?;
            }
        }

        let description = detail.description();
        if detail.element().is_visible() && !description.is_empty() {
            writeln!(self.out, "{description}")?;
        }

        writeln!(self.out, "---")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
