//! One table row for one movie

use anyhow::Result;
use std::rc::Rc;

use super::{Element, MemoryElement, Renderable, Speed, Template, ViewState};
use crate::app::models::{Movie, Record};
use crate::app::router::NavigationRequest;

pub struct MovieItemView<E: Element = MemoryElement> {
    movie: Movie,
    template: Rc<dyn Template>,
    element: E,
    state: ViewState,
}

impl MovieItemView<MemoryElement> {
    /// Row rendered into a fresh, detached `<tr>`
    pub fn detached(movie: Movie, template: Rc<dyn Template>) -> Self {
        Self::new(movie, template, MemoryElement::new("tr"))
    }
}

impl<E: Element> MovieItemView<E> {
    pub fn new(movie: Movie, template: Rc<dyn Template>, element: E) -> Self {
        Self {
            movie,
            template,
            element,
            state: ViewState::Unrendered,
        }
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// A click asks for the detail route; the row never talks to the
    /// detail view itself.
    pub fn click(&self) -> NavigationRequest {
        tracing::debug!("Row for movie {} clicked", self.movie.id());
        NavigationRequest::new(self.movie.fragment(), true)
    }
}

impl<E: Element> Renderable for MovieItemView<E> {
    fn render(&mut self) -> Result<()> {
        let html = self.template.render(&self.movie.attributes())?;
        self.element.append(&html);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::views::{HtmlTemplate, DEFAULT_ROW_TEMPLATE};

    fn row(movie: Movie) -> MovieItemView {
        MovieItemView::detached(
            movie,
            Rc::new(HtmlTemplate::compile(DEFAULT_ROW_TEMPLATE).unwrap()),
        )
    }

    #[test]
    fn render_should_fill_row_from_template() {
        let mut view = row(Movie::new(1, "Star Wars", "PG", "Best ever"));
        assert_eq!(view.state(), ViewState::Unrendered);

        view.render().unwrap();

        assert_eq!(view.state(), ViewState::Rendered);
        assert_eq!(
            view.element().outer_html(),
            "<tr><td>Star Wars</td><td>PG</td></tr>"
        );
    }

    #[test]
    fn click_should_request_detail_route() {
        let view = row(Movie::new(2, "The Matrix", "R", "Also good..."));
        assert_eq!(
            view.click(),
            NavigationRequest::new("movies/2", true)
        );
    }

    #[test]
    fn show_and_hide_should_toggle_element() {
        let mut view = row(Movie::new(3, "Saving Private Ryan", "R", ""));
        view.hide(Speed::Fast);
        assert!(!view.element().is_visible());
        assert_eq!(view.state(), ViewState::Hidden);

        view.show(Speed::Immediate);
        assert!(view.element().is_visible());
        assert_eq!(view.state(), ViewState::Shown);
    }
}
