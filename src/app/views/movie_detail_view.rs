//! Detail panel showing one movie's description

use anyhow::Result;

use super::{Element, Renderable, Speed, ViewState};
use crate::app::models::Movie;

pub struct MovieDetailView<E: Element> {
    element: E,
    movie: Option<Movie>,
    state: ViewState,
}

impl<E: Element> MovieDetailView<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            movie: None,
            state: ViewState::Unrendered,
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Movie currently on display, if any
    pub fn movie(&self) -> Option<&Movie> {
        self.movie.as_ref()
    }

    /// Text currently in the panel
    pub fn description(&self) -> String {
        self.element.inner_html()
    }

    /// Swap in `movie`: hide at once, replace the content, fade back in
    pub fn show_movie(&mut self, movie: Movie, speed: Speed) {
        self.element.fade_out(Speed::Immediate);
        self.element.set_html(movie.description());
        self.element.fade_in(speed);
        self.movie = Some(movie);
        self.state = ViewState::Shown;
    }

    /// Empty the panel without touching its visibility
    pub fn clear(&mut self) {
        self.element.empty();
        self.movie = None;
    }
}

impl<E: Element> Renderable for MovieDetailView<E> {
    fn render(&mut self) -> Result<()> {
        let text = self
            .movie
            .as_ref()
            .map(|movie| movie.description().to_string())
            .unwrap_or_default();
        self.element.set_html(&text);
        self.state = self.state.after_render();
        Ok(())
    }

    fn show(&mut self, speed: Speed) {
        self.element.fade_in(speed);
        self.state = ViewState::Shown;
    }

    fn hide(&mut self, speed: Speed) {
        self.element.fade_out(speed);
        self.state = ViewState::Hidden;
    }

    fn state(&self) -> ViewState {
        self.state
    }
}
