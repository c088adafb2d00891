//! # Application Controller
//!
//! Builds the single collection, the two views and the router, then
//! turns host events into navigation. Views never reach the router
//! themselves: a row click hands back a [`NavigationRequest`] and the
//! controller applies it to [`History`] before routing.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::io::{self, StdinLock, Stdout, Write};
use std::rc::Rc;

use crate::app::io::{EventStream, HostEvent, LineEventStream};
use crate::app::models::{Collection, FetchOptions, FetchSummary, Movie, MOVIES_URL};
use crate::app::router::{History, MovieOutcome, MovieRouter, NavigationRequest, Routable};
use crate::app::services::DataSource;
use crate::app::views::{
    MemoryElement, MovieDetailView, MoviesListView, ScreenRenderer, TemplateStore,
    MOVIES_TEMPLATE_ID,
};
use crate::config::AppSettings;

pub struct AppController<ES: EventStream, W: Write> {
    collection: Rc<Collection<Movie>>,
    router: MovieRouter<MemoryElement, MemoryElement>,
    history: History,
    renderer: ScreenRenderer<W>,
    event_stream: ES,
    start_route: String,
    should_quit: bool,
}

impl AppController<LineEventStream<StdinLock<'static>>, Stdout> {
    /// Controller reading commands from stdin and drawing to stdout
    pub fn new(settings: &AppSettings) -> Result<Self> {
        Self::with_io_streams(settings, LineEventStream::stdin(), io::stdout())
    }
}

impl<ES: EventStream, W: Write> AppController<ES, W> {
    /// Create a controller with injected input and output
    pub fn with_io_streams(settings: &AppSettings, event_stream: ES, output: W) -> Result<Self> {
        let templates = TemplateStore::with_row_template(&settings.row_template)
            .context("invalid row_template")?;
        let row_template = templates
            .get(MOVIES_TEMPLATE_ID)
            .context("movie row template is not registered")?;

        let collection = Rc::new(Collection::new(MOVIES_URL));
        let list_view = Rc::new(RefCell::new(MoviesListView::new(
            Rc::clone(&collection),
            row_template,
            MemoryElement::with_id("tbody", "movies"),
        )));
        MoviesListView::bind(&list_view);

        let detail_view = MovieDetailView::new(MemoryElement::with_id("div", "movie"));
        let router = MovieRouter::new(Rc::clone(&collection), list_view, detail_view)?
            .with_speeds(settings.list_speed, settings.detail_speed);

        Ok(Self {
            collection,
            router,
            history: History::new(),
            renderer: ScreenRenderer::new(output),
            event_stream,
            start_route: settings.start_route.clone(),
            should_quit: false,
        })
    }

    pub fn collection(&self) -> &Rc<Collection<Movie>> {
        &self.collection
    }

    pub fn router(&self) -> &MovieRouter<MemoryElement, MemoryElement> {
        &self.router
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Replace the route opened by [`start`](Self::start)
    pub fn set_start_route(&mut self, fragment: impl Into<String>) {
        self.start_route = fragment.into();
    }

    /// Fetch the movies; the list view re-renders on the resulting `reset`
    pub async fn load<S: DataSource<Movie>>(&self, source: &S) -> Result<FetchSummary> {
        let summary = self.collection.fetch(source, FetchOptions::reset()).await?;
        tracing::info!("Loaded {} movie(s)", summary.added);
        Ok(summary)
    }

    /// Start history at the configured route and route it
    pub fn start(&mut self) -> Result<Option<MovieOutcome>> {
        let fragment = self.history.start(&self.start_route)?;
        tracing::info!("Starting at '{}'", fragment);
        self.router.route(&fragment)
    }

    /// Record `request` in history and route it when it asks to trigger
    pub fn navigate(&mut self, request: NavigationRequest) -> Result<Option<MovieOutcome>> {
        match self.history.navigate(&request) {
            Some(fragment) => self.router.route(&fragment),
            None => Ok(None),
        }
    }

    /// Apply one host event
    pub fn handle_event(&mut self, event: HostEvent) -> Result<Option<MovieOutcome>> {
        tracing::debug!("Handling host event: {:?}", event);
        match event {
            HostEvent::Navigate(fragment) => self.navigate(NavigationRequest::new(fragment, true)),
            HostEvent::Click(id) => {
                let request = self.router.list_view().borrow().click(id);
                match request {
                    Some(request) => self.navigate(request),
                    None => {
                        tracing::warn!("No row for movie {}", id);
                        Ok(None)
                    }
                }
            }
            HostEvent::Back => match self.history.back() {
                Some(fragment) => self.router.route(&fragment),
                None => Ok(None),
            },
            HostEvent::Forward => match self.history.forward() {
                Some(fragment) => self.router.route(&fragment),
                None => Ok(None),
            },
            HostEvent::Render => Ok(None),
            HostEvent::Quit => {
                self.should_quit = true;
                Ok(None)
            }
        }
    }

    /// Draw the visible views
    pub fn render(&mut self) -> Result<()> {
        let list = self.router.list_view().borrow();
        self.renderer.render(&list, self.router.detail_view())
    }

    /// Load, start, then process host events until quit or end of input
    pub async fn run<S: DataSource<Movie>>(&mut self, source: &S) -> Result<()> {
        self.load(source).await?;
        self.start()?;
        self.render()?;

        while !self.should_quit {
            let Some(event) = self.event_stream.read()? else {
                tracing::debug!("Event stream closed");
                break;
            };

            if let Some(outcome) = self.handle_event(event)? {
                tracing::debug!("Route outcome: {:?}", outcome);
            }

            if !self.should_quit {
                self.render()?;
            }
        }

        Ok(())
    }

    /// Consume the controller, returning its output writer
    pub fn into_output(self) -> W {
        self.renderer.into_inner()
    }
}
