//! Filter and paging state for the patients table.
//!
//! Text edits are recorded immediately but only become effective once the
//! input has been quiet for the debounce window. A change in the effective
//! filters or in the pet-type selection resets the page to 1; page changes
//! apply immediately.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

use super::PatientListParams;
use crate::domain::PetType;

/// Default quiet period before text input takes effect.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TextFilters {
    search: String,
    owner_name: String,
    pet_name: String,
}

/// Debounced filter state driving the list query.
///
/// ```
/// use pet_clinic::client::PatientFilterState;
/// use pet_clinic::domain::PetType;
///
/// let mut state = PatientFilterState::new();
/// state.set_page(3);
/// state.toggle_pet_type(PetType::Cat);
/// assert_eq!(state.params().page, 1);
/// assert_eq!(state.params().pet_types, vec![PetType::Cat]);
/// ```
#[derive(Debug, Clone)]
pub struct PatientFilterState {
    debounce: Duration,
    page: u32,
    page_size: u32,
    typed: TextFilters,
    applied: TextFilters,
    pet_types: Vec<PetType>,
    deadline: Option<Instant>,
}

impl Default for PatientFilterState {
    fn default() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }
}

impl PatientFilterState {
    /// State with the default 300 ms debounce.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with a custom debounce window.
    pub fn with_debounce(debounce: Duration) -> Self {
        let defaults = PatientListParams::default();
        Self {
            debounce,
            page: defaults.page,
            page_size: defaults.page_size,
            typed: TextFilters::default(),
            applied: TextFilters::default(),
            pet_types: Vec::new(),
            deadline: None,
        }
    }

    /// Record a global search edit.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.typed.search = text.into();
        self.restart_window();
    }

    /// Record an owner-name filter edit.
    pub fn set_owner_name(&mut self, text: impl Into<String>) {
        self.typed.owner_name = text.into();
        self.restart_window();
    }

    /// Record a pet-name filter edit.
    pub fn set_pet_name(&mut self, text: impl Into<String>) {
        self.typed.pet_name = text.into();
        self.restart_window();
    }

    /// Replace the pet-type selection. Resets the page when it changes.
    pub fn set_pet_types(&mut self, kinds: impl IntoIterator<Item = PetType>) {
        let mut selection: Vec<PetType> = Vec::new();
        for kind in kinds {
            if !selection.contains(&kind) {
                selection.push(kind);
            }
        }
        if selection != self.pet_types {
            self.pet_types = selection;
            self.page = 1;
        }
    }

    /// Add or remove one pet type from the selection.
    pub fn toggle_pet_type(&mut self, kind: PetType) {
        let mut selection = self.pet_types.clone();
        if let Some(index) = selection.iter().position(|selected| *selected == kind) {
            selection.remove(index);
        } else {
            selection.push(kind);
        }
        self.set_pet_types(selection);
    }

    /// Jump to a page. Zero is treated as the first page.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Change the page size; the page resets to 1.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Whether text edits are waiting for the debounce window to elapse.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Apply pending text edits if the debounce window has elapsed.
    ///
    /// Returns `true` when the effective filters changed.
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => self.apply_typed(),
            _ => false,
        }
    }

    /// Wait out the debounce window, apply pending edits and return the
    /// effective parameters.
    pub async fn settled(&mut self) -> PatientListParams {
        if let Some(deadline) = self.deadline {
            sleep_until(deadline).await;
            self.apply_typed();
        }
        self.params()
    }

    /// Effective query parameters.
    pub fn params(&self) -> PatientListParams {
        PatientListParams {
            page: self.page,
            page_size: self.page_size,
            search: self.applied.search.clone(),
            owner_name: self.applied.owner_name.clone(),
            pet_name: self.applied.pet_name.clone(),
            pet_types: self.pet_types.clone(),
        }
    }

    fn restart_window(&mut self) {
        self.deadline = Some(Instant::now() + self.debounce);
    }

    fn apply_typed(&mut self) -> bool {
        self.deadline = None;
        if self.typed == self.applied {
            return false;
        }
        self.applied = self.typed.clone();
        self.page = 1;
        true
    }
}
