//! Query parameters for the list endpoint.

use pagination::{DEFAULT_PAGE_SIZE, PageRequest};

use crate::domain::PetType;

/// Effective list query as sent by [`PatientsClient`](super::PatientsClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientListParams {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub owner_name: String,
    pub pet_name: String,
    pub pet_types: Vec<PetType>,
}

impl Default for PatientListParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            owner_name: String::new(),
            pet_name: String::new(),
            pet_types: Vec::new(),
        }
    }
}

impl PatientListParams {
    /// Query-string pairs; blank text filters and an empty type selection
    /// are omitted.
    ///
    /// ```
    /// use pet_clinic::client::PatientListParams;
    /// use pet_clinic::domain::PetType;
    ///
    /// let params = PatientListParams {
    ///     search: "rex".into(),
    ///     pet_types: vec![PetType::Dog, PetType::Parrot],
    ///     ..PatientListParams::default()
    /// };
    /// let pairs = params.query_pairs();
    /// assert!(pairs.contains(&("types", "dog,parrot".to_owned())));
    /// ```
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let page = PageRequest::from_query(
            Some(self.page.to_string().as_str()),
            Some(self.page_size.to_string().as_str()),
        );
        let mut pairs = vec![
            ("page", page.page().to_string()),
            ("limit", page.page_size().to_string()),
        ];
        for (key, value) in [
            ("search", &self.search),
            ("ownerName", &self.owner_name),
            ("petName", &self.pet_name),
        ] {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                pairs.push((key, trimmed.to_owned()));
            }
        }
        if !self.pet_types.is_empty() {
            let types = self
                .pet_types
                .iter()
                .map(|kind| kind.as_str())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("types", types));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_send_only_paging() {
        let pairs = PatientListParams::default().query_pairs();
        assert_eq!(
            pairs,
            vec![("page", "1".to_owned()), ("limit", "10".to_owned())]
        );
    }

    #[rstest]
    fn blank_text_is_omitted_and_values_trimmed() {
        let params = PatientListParams {
            search: "   ".into(),
            owner_name: " Alice ".into(),
            ..PatientListParams::default()
        };
        let pairs = params.query_pairs();
        assert!(pairs.iter().all(|(key, _)| *key != "search"));
        assert!(pairs.contains(&("ownerName", "Alice".to_owned())));
    }

    #[rstest]
    #[case(0, 10, "1", "10")]
    #[case(2, 0, "2", "10")]
    #[case(3, 250, "3", "100")]
    fn paging_is_normalised(
        #[case] page: u32,
        #[case] page_size: u32,
        #[case] expected_page: &str,
        #[case] expected_limit: &str,
    ) {
        let params = PatientListParams {
            page,
            page_size,
            ..PatientListParams::default()
        };
        let pairs = params.query_pairs();
        assert!(pairs.contains(&("page", expected_page.to_owned())));
        assert!(pairs.contains(&("limit", expected_limit.to_owned())));
    }
}
