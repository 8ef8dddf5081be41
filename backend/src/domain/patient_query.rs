//! List query model for the patient query engine.
//!
//! A [`PatientFilter`] is a conjunction of optional predicates. Absent
//! predicates do not constrain the result. Adapters translate the same filter
//! into their own query language and must apply it identically to the count
//! and to the page they return.

use pagination::PageRequest;

use super::{Patient, PetType};

/// One entry of the pet-type predicate.
///
/// Tokens that do not name a known species are kept so the predicate still
/// constrains the result; they simply never match a stored pet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PetTypeFilter {
    /// A species the clinic knows about.
    Known(PetType),
    /// Any other token, compared literally.
    Unrecognised(String),
}

impl PetTypeFilter {
    /// Parse a single trimmed token. Matching is case-sensitive, so `DOG`
    /// is kept as an unrecognised token. Returns `None` for blank tokens.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        Some(
            token
                .parse::<PetType>()
                .map_or_else(|_| Self::Unrecognised(token.to_owned()), Self::Known),
        )
    }

    /// Token compared against the stored pet type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(kind) => kind.as_str(),
            Self::Unrecognised(token) => token.as_str(),
        }
    }

    fn accepts(&self, kind: PetType) -> bool {
        matches!(self, Self::Known(known) if *known == kind)
    }
}

fn normalise(text: impl Into<String>) -> Option<String> {
    let text = text.into();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Conjunction of list predicates.
///
/// # Examples
/// ```
/// use pet_clinic::domain::PatientFilter;
///
/// let filter = PatientFilter::default()
///     .with_search("rex")
///     .with_pet_types_csv("dog, Parrot,,fish");
/// assert_eq!(filter.search(), Some("rex"));
/// assert_eq!(filter.pet_type_tokens(), vec!["dog", "parrot", "fish"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFilter {
    search: Option<String>,
    owner_name: Option<String>,
    pet_name: Option<String>,
    pet_types: Vec<PetTypeFilter>,
}

impl PatientFilter {
    /// Free-text search over owner and pet names. Blank text clears it.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = normalise(text);
        self
    }

    /// Owner-name substring predicate. Blank text clears it.
    #[must_use]
    pub fn with_owner_name(mut self, text: impl Into<String>) -> Self {
        self.owner_name = normalise(text);
        self
    }

    /// Pet-name substring predicate. Blank text clears it.
    #[must_use]
    pub fn with_pet_name(mut self, text: impl Into<String>) -> Self {
        self.pet_name = normalise(text);
        self
    }

    /// Restrict to the given species.
    #[must_use]
    pub fn with_pet_types(mut self, kinds: impl IntoIterator<Item = PetType>) -> Self {
        self.pet_types = Vec::new();
        for kind in kinds {
            self.push_pet_type(PetTypeFilter::Known(kind));
        }
        self
    }

    /// Restrict to the comma-separated species in `csv`.
    #[must_use]
    pub fn with_pet_types_csv(mut self, csv: &str) -> Self {
        self.pet_types = Vec::new();
        for entry in csv.split(',').filter_map(PetTypeFilter::parse) {
            self.push_pet_type(entry);
        }
        self
    }

    fn push_pet_type(&mut self, entry: PetTypeFilter) {
        if !self.pet_types.contains(&entry) {
            self.pet_types.push(entry);
        }
    }

    /// Active free-text search.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Active owner-name predicate.
    #[must_use]
    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    /// Active pet-name predicate.
    #[must_use]
    pub fn pet_name(&self) -> Option<&str> {
        self.pet_name.as_deref()
    }

    /// Active pet-type predicate; empty when unconstrained.
    #[must_use]
    pub fn pet_types(&self) -> &[PetTypeFilter] {
        &self.pet_types
    }

    /// Pet-type predicate as the tokens compared against storage.
    #[must_use]
    pub fn pet_type_tokens(&self) -> Vec<&str> {
        self.pet_types.iter().map(PetTypeFilter::as_str).collect()
    }

    /// Whether no predicate is active.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_none()
            && self.owner_name.is_none()
            && self.pet_name.is_none()
            && self.pet_types.is_empty()
    }

    /// Evaluate the conjunction against one joined row.
    #[must_use]
    pub fn matches(&self, patient: &Patient) -> bool {
        let type_ok = self.pet_types.is_empty()
            || self
                .pet_types
                .iter()
                .any(|entry| entry.accepts(patient.pet.pet_type));
        let search_ok = self.search.as_deref().is_none_or(|text| {
            contains_ignore_case(&patient.name, text) || contains_ignore_case(&patient.pet.name, text)
        });
        let owner_ok = self
            .owner_name
            .as_deref()
            .is_none_or(|text| contains_ignore_case(&patient.name, text));
        let pet_ok = self
            .pet_name
            .as_deref()
            .is_none_or(|text| contains_ignore_case(&patient.pet.name, text));
        type_ok && search_ok && owner_ok && pet_ok
    }
}

/// A filtered page request over the joined patients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientListQuery {
    pub filter: PatientFilter,
    pub page: PageRequest,
}

impl PatientListQuery {
    /// Combine a filter with a page request.
    #[must_use]
    pub const fn new(filter: PatientFilter, page: PageRequest) -> Self {
        Self { filter, page }
    }
}
