//! Router for the movie list/detail flow
//!
//! Owns the single list view and the single detail view for the life of
//! the application. Routes:
//!
//! - `""`          show the list, empty the detail panel
//! - `movies/:id`  hide the list, show that movie's description

use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::rc::Rc;

use super::{RouteMatch, RouteTable, Routable};
use crate::app::models::{Collection, Movie, Record, RecordId};
use crate::app::views::{Element, MovieDetailView, MoviesListView, Renderable, Speed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieRoute {
    Main,
    ShowMovie,
}

/// What a routed fragment did to the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieOutcome {
    /// List visible, detail emptied
    Listing,
    /// Detail showing the movie with this id
    Detail { id: RecordId },
    /// No movie with the requested id; nothing on screen changed
    NotFound { id: String },
}

pub struct MovieRouter<L: Element, D: Element> {
    routes: RouteTable<MovieRoute>,
    collection: Rc<Collection<Movie>>,
    list_view: Rc<RefCell<MoviesListView<L>>>,
    detail_view: MovieDetailView<D>,
    list_speed: Speed,
    detail_speed: Speed,
}

impl<L: Element, D: Element> MovieRouter<L, D> {
    pub fn new(
        collection: Rc<Collection<Movie>>,
        list_view: Rc<RefCell<MoviesListView<L>>>,
        detail_view: MovieDetailView<D>,
    ) -> Result<Self> {
        let routes = RouteTable::new()
            .route("", MovieRoute::Main)?
            .route("movies/:id", MovieRoute::ShowMovie)?;

        Ok(Self {
            routes,
            collection,
            list_view,
            detail_view,
            list_speed: Speed::Slow,
            detail_speed: Speed::Slow,
        })
    }

    /// Override the fade speeds used when the list and detail appear
    pub fn with_speeds(mut self, list_speed: Speed, detail_speed: Speed) -> Self {
        self.list_speed = list_speed;
        self.detail_speed = detail_speed;
        self
    }

    pub fn list_view(&self) -> &Rc<RefCell<MoviesListView<L>>> {
        &self.list_view
    }

    pub fn detail_view(&self) -> &MovieDetailView<D> {
        &self.detail_view
    }

    fn main(&mut self) -> Result<MovieOutcome> {
        self.detail_view.clear();
        self.list_view
            .try_borrow_mut()
            .map_err(|_| anyhow!("movie list is busy"))?
            .show(self.list_speed);
        Ok(MovieOutcome::Listing)
    }

    fn show_one_movie(&mut self, raw_id: &str) -> Result<MovieOutcome> {
        let movie = raw_id
            .trim()
            .parse::<RecordId>()
            .ok()
            .and_then(|id| self.collection.get(id));

        let Some(movie) = movie else {
            tracing::warn!("No movie with id '{}'", raw_id);
            return Ok(MovieOutcome::NotFound {
                id: raw_id.to_string(),
            });
        };

        let id = movie.id();
        self.list_view
            .try_borrow_mut()
            .map_err(|_| anyhow!("movie list is busy"))?
            .hide(Speed::Immediate);
        self.detail_view.show_movie(movie, self.detail_speed);
        Ok(MovieOutcome::Detail { id })
    }
}

impl<L: Element, D: Element> Routable for MovieRouter<L, D> {
    type Action = MovieRoute;
    type Outcome = MovieOutcome;

    fn routes(&self) -> &RouteTable<MovieRoute> {
        &self.routes
    }

    fn execute(&mut self, action: MovieRoute, matched: RouteMatch) -> Result<MovieOutcome> {
        match action {
            MovieRoute::Main => self.main(),
            MovieRoute::ShowMovie => self.show_one_movie(matched.param(0).unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{fixtures, MOVIES_URL};
    use crate::app::views::{HtmlTemplate, MemoryElement, DEFAULT_ROW_TEMPLATE};

    type TestRouter = MovieRouter<MemoryElement, MemoryElement>;

    fn router() -> TestRouter {
        let collection = Rc::new(Collection::new(MOVIES_URL));
        let list = Rc::new(RefCell::new(MoviesListView::new(
            Rc::clone(&collection),
            Rc::new(HtmlTemplate::compile(DEFAULT_ROW_TEMPLATE).unwrap()),
            MemoryElement::with_id("tbody", "movies"),
        )));
        MoviesListView::bind(&list);
        collection.reset(fixtures::movies()).unwrap();

        MovieRouter::new(
            collection,
            list,
            MovieDetailView::new(MemoryElement::with_id("div", "movie")),
        )
        .unwrap()
    }

    #[test]
    fn root_should_show_list_and_empty_detail() {
        let mut router = router();
        router.route("movies/1").unwrap();

        let outcome = router.route("").unwrap();

        assert_eq!(outcome, Some(MovieOutcome::Listing));
        assert!(router.list_view().borrow().element().is_visible());
        assert_eq!(router.detail_view().description(), "");
    }

    #[test]
    fn movie_route_should_hide_list_and_show_description() {
        let mut router = router();

        let outcome = router.route("movies/2").unwrap();

        assert_eq!(outcome, Some(MovieOutcome::Detail { id: 2 }));
        assert!(!router.list_view().borrow().element().is_visible());
        assert!(router.detail_view().element().is_visible());
        assert_eq!(router.detail_view().description(), "Also good...");
    }

    #[test]
    fn absent_or_malformed_id_should_change_nothing() {
        let mut router = router();
        router.route("movies/2").unwrap();
        let list_before = router.list_view().borrow().element().clone();
        let detail_before = router.detail_view().element().clone();

        for fragment in ["movies/999", "movies/abc"] {
            let outcome = router.route(fragment).unwrap();
            assert!(matches!(outcome, Some(MovieOutcome::NotFound { .. })));
        }

        assert_eq!(*router.list_view().borrow().element(), list_before);
        assert_eq!(*router.detail_view().element(), detail_before);
    }

    #[test]
    fn unknown_fragment_should_not_match() {
        let mut router = router();
        assert_eq!(router.route("actors/1").unwrap(), None);
    }

    #[test]
    fn custom_speeds_should_reach_the_elements() {
        let mut router = router().with_speeds(Speed::Fast, Speed::Millis(50));

        router.route("movies/3").unwrap();
        assert_eq!(
            router
                .detail_view()
                .element()
                .last_transition()
                .map(|t| t.duration),
            Some(Speed::Millis(50).duration())
        );

        router.route("").unwrap();
        assert_eq!(
            router
                .list_view()
                .borrow()
                .element()
                .last_transition()
                .map(|t| t.duration),
            Some(Speed::Fast.duration())
        );
    }

    #[test]
    fn busy_list_should_fail_instead_of_panicking() {
        let mut router = router();
        let list = Rc::clone(router.list_view());
        let _held = list.borrow_mut();

        assert!(router.route("").is_err());
    }
}
