// 🎛️ Controller - owns the catalog and filter state, drives presenters
//
// Input events map to a recomputation of the visible subset.
// Load cycles replace the catalog on success and leave it alone on failure.

use crate::api::{fetch_all, PokemonSource};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::entities::{Pokemon, TypeRegistry};
use crate::error::LoadError;
use crate::filter::{filter, FilterQuery};
use crate::normalize::normalize_all;
use tracing::{error, info};

// ============================================================================
// PRESENTER BOUNDARY
// ============================================================================

/// Hooks the controller calls on whatever is displaying the catalog
pub trait Presenter {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);

    /// Show or hide the "no results" indicator
    fn set_no_results(&mut self, visible: bool);

    /// Replace the displayed records
    fn render(&mut self, records: &[&Pokemon]);

    /// Replace the selectable type options
    fn populate_types(&mut self, labels: &[String]);
}

/// User interactions raised by a presenter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    QueryChanged(String),
    TypesChanged(Vec<String>),
    InvertToggled(bool),
    RetryClicked,
}

// ============================================================================
// CONTROLLER
// ============================================================================

pub struct Controller<S, P> {
    source: S,
    presenter: P,
    registry: TypeRegistry,
    placeholder_image: String,
    catalog: Catalog,
    query: FilterQuery,
}

impl<S, P> Controller<S, P>
where
    S: PokemonSource + Sync,
    P: Presenter,
{
    pub fn new(source: S, presenter: P, config: &Config) -> Self {
        Self {
            source,
            presenter,
            registry: TypeRegistry::with_defaults(),
            placeholder_image: config.api.placeholder_image.clone(),
            catalog: Catalog::new(),
            query: FilterQuery::default(),
        }
    }

    /// Start from a prepared filter (CLI flags) instead of the empty one
    pub fn with_query(mut self, query: FilterQuery) -> Self {
        self.query = query;
        self
    }

    /// Run one load cycle.
    ///
    /// The loading indicator is hidden on every exit path. On failure the
    /// catalog keeps its previous contents and the presenter shows the
    /// fixed user message.
    pub async fn load(&mut self) -> Result<usize, LoadError> {
        self.presenter.show_loading();
        self.presenter.hide_error();

        let result = match self.fetch_records().await {
            Ok(records) => {
                let count = records.len();
                self.catalog.replace(records);

                let labels = self.catalog.distinct_types();
                self.presenter.populate_types(&labels);
                self.apply_filters();

                info!(count, types = labels.len(), "catalog loaded");
                Ok(count)
            }
            Err(err) => {
                error!(error = %err, "catalog load failed");
                self.presenter.show_error(err.user_message());
                Err(err)
            }
        };

        self.presenter.hide_loading();
        result
    }

    async fn fetch_records(&self) -> Result<Vec<Pokemon>, LoadError> {
        let raws = fetch_all(&self.source).await?;
        Ok(normalize_all(&raws, &self.registry, &self.placeholder_image))
    }

    /// Dispatch one user interaction
    pub async fn handle(&mut self, event: UiEvent) -> Result<(), LoadError> {
        match event {
            UiEvent::QueryChanged(text) => {
                self.query.text = text;
                self.apply_filters();
            }
            UiEvent::TypesChanged(types) => {
                self.query.types = types.into_iter().filter(|t| !t.is_empty()).collect();
                self.apply_filters();
            }
            UiEvent::InvertToggled(invert) => {
                self.query.invert = invert;
                self.apply_filters();
            }
            UiEvent::RetryClicked => {
                self.presenter.hide_error();
                self.load().await?;
            }
        }
        Ok(())
    }

    /// Recompute the visible subset and push it to the presenter
    pub fn apply_filters(&mut self) {
        let visible = filter(&self.catalog, &self.query);
        self.presenter.set_no_results(visible.is_empty());
        self.presenter.render(&visible);
    }

    pub fn visible(&self) -> Vec<&Pokemon> {
        filter(&self.catalog, &self.query)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
