//! # Views Module
//!
//! Presentation units for the movie list/detail flow, plus the host
//! contracts they render through.
//!
//! ```text
//! Collection ──reset/add──▶ MoviesListView ──▶ MovieItemView (one per row)
//!                                 │                    │ click
//!                                 ▼                    ▼
//!                              Element          NavigationRequest ──▶ Router
//! ```

pub mod element;
pub mod movie_detail_view;
pub mod movie_item_view;
pub mod movies_list_view;
pub mod screen;
pub mod template;

pub use element::{Element, MemoryElement, Speed, Transition};
pub use movie_detail_view::MovieDetailView;
pub use movie_item_view::MovieItemView;
pub use movies_list_view::MoviesListView;
pub use screen::ScreenRenderer;
pub use template::{
    HtmlTemplate, Template, TemplateError, TemplateStore, DEFAULT_ROW_TEMPLATE,
    MOVIES_TEMPLATE_ID,
};

use anyhow::Result;

/// Lifecycle of a view: `Unrendered -> Rendered -> (Hidden <-> Shown)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Unrendered,
    Rendered,
    Shown,
    Hidden,
}

impl ViewState {
    /// State after a render: the first render moves out of `Unrendered`,
    /// later renders keep the current visibility
    pub fn after_render(self) -> Self {
        match self {
            ViewState::Unrendered => ViewState::Rendered,
            other => other,
        }
    }
}

/// Capability shared by every view
pub trait Renderable {
    /// Produce the view's markup into its element
    fn render(&mut self) -> Result<()>;

    /// Make the element visible over `speed`
    fn show(&mut self, speed: Speed);

    /// Hide the element over `speed`
    fn hide(&mut self, speed: Speed);

    fn state(&self) -> ViewState;
}
