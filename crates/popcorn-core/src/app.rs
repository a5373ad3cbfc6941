//! Application controller.
//!
//! `App` is the only place that mutates selection, rating draft, watched
//! list and search input. Views and key listeners never touch that state
//! directly: they send an [`Intent`], and `App` applies intents one at a
//! time, in the order they arrived.

use popcorn_models::{Selection, UserRating, WatchedMovie};
use popcorn_sources::MovieCatalog;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};
use crate::detail::{DetailFetcher, DetailState};
use crate::keyboard::{KeyBinding, KeyboardHub};
use crate::search::{SearchFetcher, SearchState};
use crate::storage::{Storage, StorageError};
use crate::watched::{AddOutcome, WatchedList, WatchedSummary};

pub const DEFAULT_TITLE: &str = "usePopcorn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Query(String),
    /// Open `id`, or close it if it is already open
    Select(String),
    CloseDetail,
    Rate(u8),
    AddWatched,
    RemoveWatched(String),
    /// Focus and clear the search input, unless it already has focus
    FocusSearch,
    BlurSearch,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("rating must be between 1 and 10, got {0}")]
    InvalidRating(u8),

    #[error("no title is selected")]
    NoSelection,

    #[error("details for the selected title have not loaded")]
    DetailNotReady,

    #[error("pick a rating before adding the title to the watched list")]
    NoRating,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The rating being chosen for the open title, plus how many times the user
/// changed their mind before confirming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingDraft {
    rating: Option<UserRating>,
    decisions: u32,
}

impl RatingDraft {
    pub fn set(&mut self, rating: UserRating) {
        self.rating = Some(rating);
        self.decisions += 1;
    }

    pub fn rating(&self) -> Option<UserRating> {
        self.rating
    }

    pub fn decisions(&self) -> u32 {
        self.decisions
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub text: String,
    pub focused: bool,
}

pub struct App<S> {
    search: SearchFetcher,
    detail: DetailFetcher,
    watched: WatchedList<S>,
    selection: Selection,
    draft: RatingDraft,
    input: SearchInput,
    keyboard: KeyboardHub,
    intents: mpsc::UnboundedSender<Intent>,
    pending: mpsc::UnboundedReceiver<Intent>,
    // Present only while a detail is open
    escape_binding: Option<KeyBinding>,
    _enter_binding: KeyBinding,
    last_added: Option<AddOutcome>,
}

impl<S: Storage> App<S> {
    pub fn new(catalog: Arc<dyn MovieCatalog>, watched: WatchedList<S>, min_query_length: usize) -> Self {
        let (intents, pending) = mpsc::unbounded_channel();
        let keyboard = KeyboardHub::new();

        let mut search = SearchFetcher::new(Arc::clone(&catalog), min_query_length);
        let on_query = intents.clone();
        search.set_query_hook(move |_| {
            let _ = on_query.send(Intent::CloseDetail);
        });

        let on_enter = intents.clone();
        let enter_binding = keyboard.bind("Enter", move || {
            let _ = on_enter.send(Intent::FocusSearch);
        });

        Self {
            search,
            detail: DetailFetcher::new(catalog),
            watched,
            selection: Selection::new(),
            draft: RatingDraft::default(),
            input: SearchInput::default(),
            keyboard,
            intents,
            pending,
            escape_binding: None,
            _enter_binding: enter_binding,
            last_added: None,
        }
    }

    /// A sender views can hold on to; queued intents run on the next `pump`
    pub fn sender(&self) -> mpsc::UnboundedSender<Intent> {
        self.intents.clone()
    }

    /// Apply `intent`, then everything it queued
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), AppError> {
        self.apply(intent)?;
        self.pump()?;
        Ok(())
    }

    /// Apply queued intents until the queue is empty. Returns how many ran.
    pub fn pump(&mut self) -> Result<usize, AppError> {
        let mut applied = 0;
        while let Ok(intent) = self.pending.try_recv() {
            self.apply(intent)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Deliver a key press to every listener, then apply what they queued
    pub fn press_key(&mut self, code: &str) -> Result<usize, AppError> {
        let listeners = self.keyboard.dispatch(code);
        self.pump()?;
        Ok(listeners)
    }

    fn apply(&mut self, intent: Intent) -> Result<(), AppError> {
        debug!("Applying {:?}", intent);
        match intent {
            Intent::Query(text) => {
                // Typing only happens in a focused input
                self.input.focused = true;
                self.input.text = text;
                self.search.set_query(&self.input.text);
            }
            Intent::Select(id) => {
                self.selection.toggle(&id);
                self.selection_changed();
            }
            Intent::CloseDetail => {
                if self.selection.is_open() {
                    self.selection.close();
                    self.selection_changed();
                }
            }
            Intent::Rate(value) => {
                let rating = UserRating::new(value).ok_or(AppError::InvalidRating(value))?;
                if !self.selection.is_open() {
                    return Err(AppError::NoSelection);
                }
                self.draft.set(rating);
            }
            Intent::AddWatched => self.add_selected()?,
            Intent::RemoveWatched(id) => {
                if self.watched.remove(&id)? {
                    info!("Removed {} from watched list", id);
                }
            }
            Intent::FocusSearch => {
                if !self.input.focused {
                    self.input.focused = true;
                    self.input.text.clear();
                    self.search.set_query("");
                }
            }
            Intent::BlurSearch => self.input.focused = false,
        }
        Ok(())
    }

    fn add_selected(&mut self) -> Result<(), AppError> {
        let active = self.selection.active().ok_or(AppError::NoSelection)?;
        let record = self
            .detail
            .state()
            .record
            .filter(|r| r.imdb_id == active)
            .ok_or(AppError::DetailNotReady)?;
        let rating = self.draft.rating().ok_or(AppError::NoRating)?;

        let movie = WatchedMovie::from_detail(&record, rating, self.draft.decisions());
        self.last_added = Some(self.watched.add(movie)?);
        self.selection.close();
        self.selection_changed();
        Ok(())
    }

    fn selection_changed(&mut self) {
        self.draft.reset();
        self.detail.set_id(self.selection.active());

        if self.selection.is_open() {
            if self.escape_binding.is_none() {
                let on_escape = self.intents.clone();
                self.escape_binding = Some(self.keyboard.bind("Escape", move || {
                    let _ = on_escape.send(Intent::CloseDetail);
                }));
            }
        } else {
            self.escape_binding = None;
        }
    }

    /// Terminal title for the current view
    pub fn title(&self) -> String {
        if !self.selection.is_open() {
            return DEFAULT_TITLE.to_string();
        }
        match self.detail.state().record {
            Some(record) => format!("Movie | {}", record.title),
            None => DEFAULT_TITLE.to_string(),
        }
    }

    pub fn search(&self) -> &SearchFetcher {
        &self.search
    }

    pub fn detail(&self) -> &DetailFetcher {
        &self.detail
    }

    pub fn search_state(&self) -> SearchState {
        self.search.state()
    }

    pub fn detail_state(&self) -> DetailState {
        self.detail.state()
    }

    pub fn watched(&self) -> &WatchedList<S> {
        &self.watched
    }

    pub fn summary(&self) -> WatchedSummary {
        self.watched.summary()
    }

    pub fn is_watched(&self, imdb_id: &str) -> bool {
        self.watched.contains(imdb_id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn draft(&self) -> &RatingDraft {
        &self.draft
    }

    pub fn input(&self) -> &SearchInput {
        &self.input
    }

    pub fn keyboard(&self) -> &KeyboardHub {
        &self.keyboard
    }

    /// Outcome of the most recent successful `AddWatched`
    pub fn last_added(&self) -> Option<AddOutcome> {
        self.last_added
    }

    /// Wait for both fetchers to finish loading
    pub async fn settled(&self) {
        self.search.settled().await;
        self.detail.settled().await;
    }

    /// Stop in-flight requests
    pub fn shutdown(&mut self) {
        self.search.cancel();
        self.detail.cancel();
    }
}
