//! Movie listing: one row per record in the bound collection
//!
//! The view listens to its collection. `reset` re-renders the whole
//! table, `add` appends a single row. Rendering always starts from an
//! empty element, so the table never holds more rows than the
//! collection has records.

use anyhow::{Context, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use super::{Element, MovieItemView, Renderable, Speed, Template, ViewState};
use crate::app::events::{SubscriptionId, ADD, RESET};
use crate::app::models::{Collection, Movie, Record, RecordId};
use crate::app::router::NavigationRequest;

pub struct MoviesListView<E: Element> {
    collection: Rc<Collection<Movie>>,
    template: Rc<dyn Template>,
    element: E,
    rows: Vec<MovieItemView>,
    state: ViewState,
}

impl<E: Element> MoviesListView<E> {
    pub fn new(collection: Rc<Collection<Movie>>, template: Rc<dyn Template>, element: E) -> Self {
        Self {
            collection,
            template,
            element,
            rows: Vec::new(),
            state: ViewState::Unrendered,
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn rows(&self) -> &[MovieItemView] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.element.child_count()
    }

    /// Names of the rendered rows, top to bottom
    pub fn row_names(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.movie().name()).collect()
    }

    /// Render one movie as a new row below the existing ones
    pub fn render_one(&mut self, movie: Movie) -> Result<()> {
        let mut row = MovieItemView::detached(movie, Rc::clone(&self.template));
        row.render()?;
        self.element.append(&row.element().outer_html());
        self.rows.push(row);
        self.state = self.state.after_render();
        Ok(())
    }

    /// Resolve a click on the row showing `id`
    pub fn click(&self, id: RecordId) -> Option<NavigationRequest> {
        self.rows
            .iter()
            .find(|row| row.movie().id() == id)
            .map(MovieItemView::click)
    }

    fn on_reset(&mut self, _args: &[Value]) -> Result<()> {
        self.render()
    }

    fn on_add(&mut self, args: &[Value]) -> Result<()> {
        let attributes = args
            .first()
            .cloned()
            .context("add event carried no record")?;
        let movie: Movie =
            serde_json::from_value(attributes).context("add event carried an invalid movie")?;
        self.render_one(movie)
    }
}

impl<E: Element + 'static> MoviesListView<E> {
    /// Subscribe the view to its collection's `reset` and `add` events
    pub fn bind(view: &Rc<RefCell<Self>>) -> [SubscriptionId; 2] {
        let collection = Rc::clone(&view.borrow().collection);
        let events = collection.events();
        [
            events.subscribe_bound(RESET, view, Self::on_reset),
            events.subscribe_bound(ADD, view, Self::on_add),
        ]
    }
}

impl<E: Element> Renderable for MoviesListView<E> {
    fn render(&mut self) -> Result<()> {
        self.element.empty();
        self.rows.clear();

        for movie in self.collection.records() {
            self.render_one(movie)?;
        }

        tracing::debug!("Rendered {} movie row(s)", self.rows.len());
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
    use crate::app::models::{fixtures, MOVIES_URL};
    use crate::app::views::{HtmlTemplate, MemoryElement, DEFAULT_ROW_TEMPLATE};

    fn bound_view() -> (Rc<Collection<Movie>>, Rc<RefCell<MoviesListView<MemoryElement>>>) {
        let collection = Rc::new(Collection::new(MOVIES_URL));
        let view = Rc::new(RefCell::new(MoviesListView::new(
            Rc::clone(&collection),
            Rc::new(HtmlTemplate::compile(DEFAULT_ROW_TEMPLATE).unwrap()),
            MemoryElement::with_id("tbody", "movies"),
        )));
        MoviesListView::bind(&view);
        (collection, view)
    }

    #[test]
    fn reset_should_render_one_row_per_movie_in_order() {
        let (collection, view) = bound_view();

        collection.reset(fixtures::movies()).unwrap();

        let view = view.borrow();
        assert_eq!(view.row_count(), 3);
        assert_eq!(
            view.row_names(),
            vec!["Star Wars", "The Matrix", "Saving Private Ryan"]
        );
        assert_eq!(view.state(), ViewState::Rendered);
        assert!(view
            .element()
            .inner_html()
            .starts_with("<tr><td>Star Wars</td><td>PG</td></tr>"));
    }

    #[test]
    fn render_twice_should_still_hold_exactly_n_rows() {
        let (collection, view) = bound_view();
        collection.reset(fixtures::movies()).unwrap();

        let mut view = view.borrow_mut();
        view.render().unwrap();
        view.render().unwrap();

        assert_eq!(view.row_count(), 3);
        assert_eq!(view.rows().len(), 3);
    }

    #[test]
    fn add_should_append_without_clearing() {
        let (collection, view) = bound_view();
        collection.reset(fixtures::movies()).unwrap();

        collection
            .add(Movie::new(4, "Alien", "R", "In space no one can hear you scream"))
            .unwrap();

        let view = view.borrow();
        assert_eq!(view.row_count(), 4);
        assert_eq!(view.row_names().last(), Some(&"Alien"));
    }

    #[test]
    fn click_should_route_through_navigation_request() {
        let (collection, view) = bound_view();
        collection.reset(fixtures::movies()).unwrap();

        let view = view.borrow();
        assert_eq!(
            view.click(2),
            Some(NavigationRequest::new("movies/2", true))
        );
        assert_eq!(view.click(42), None);
    }

    #[test]
    fn show_and_hide_should_track_state() {
        let (_collection, view) = bound_view();
        let mut view = view.borrow_mut();

        view.hide(Speed::Immediate);
        assert_eq!(view.state(), ViewState::Hidden);
        assert!(!view.element().is_visible());

        view.show(Speed::Slow);
        assert_eq!(view.state(), ViewState::Shown);
        assert_eq!(
            view.element().last_transition().map(|t| t.duration),
            Some(Speed::Slow.duration())
        );
    }

    #[test]
    fn dropped_view_should_not_keep_listening() {
        let (collection, view) = bound_view();
        drop(view);

        collection.reset(fixtures::movies()).unwrap();
        assert_eq!(collection.events().listener_count(RESET), 0);
    }

    #[test]
    fn malformed_add_payload_should_fail_the_listener() {
        let (collection, view) = bound_view();

        let err = collection
            .events()
            .publish(ADD, &[serde_json::json!({"name": "no id"})])
            .unwrap_err();

        assert!(err.to_string().contains("failed while handling 'add'"));
        assert_eq!(view.borrow().row_count(), 0);
    }
}
