//! In-process patient repository.
//!
//! Used when no database URL is configured and by the HTTP and behaviour
//! tests. It evaluates [`PatientFilter`](crate::domain::PatientFilter) with
//! the same semantics as the SQL adapter and applies the same ordering.
//! Every write happens under one lock, so creates are atomic.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{PatientListing, PatientRepository, PatientRepositoryError};
use crate::domain::{Patient, PatientDraft, PatientId, PatientListQuery};

/// Repository keeping patients in a hash map guarded by a Tokio `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryPatientRepository {
    patients: RwLock<HashMap<PatientId, Patient>>,
}

impl InMemoryPatientRepository {
    /// Create a repository pre-populated with `patients`.
    ///
    /// Rows are stored as given, without validation.
    pub fn with_patients(patients: impl IntoIterator<Item = Patient>) -> Self {
        Self {
            patients: RwLock::new(patients.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    /// Number of stored patients.
    pub async fn len(&self) -> usize {
        self.patients.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.patients.read().await.is_empty()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn list(
        &self,
        query: &PatientListQuery,
    ) -> Result<PatientListing, PatientRepositoryError> {
        let patients = self.patients.read().await;
        let mut matching: Vec<&Patient> = patients
            .values()
            .filter(|patient| query.filter.matches(patient))
            .collect();
        matching.sort_by_key(|patient| (Reverse(patient.created_at), patient.id));

        let total = u64::try_from(matching.len())
            .map_err(|_| PatientRepositoryError::query("row count exceeds u64 range"))?;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        let rows = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(PatientListing { rows, total })
    }

    async fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        Ok(self.patients.read().await.get(id).cloned())
    }

    async fn create(&self, patient: &Patient) -> Result<(), PatientRepositoryError> {
        let mut patients = self.patients.write().await;
        if patients.contains_key(&patient.id) {
            return Err(PatientRepositoryError::query(format!(
                "patient {} already exists",
                patient.id
            )));
        }
        patients.insert(patient.id, patient.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &PatientId,
        draft: &PatientDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut patients = self.patients.write().await;
        Ok(patients.get_mut(id).map(|patient| {
            patient.apply(draft, updated_at);
            patient.clone()
        }))
    }

    async fn delete(&self, id: &PatientId) -> Result<bool, PatientRepositoryError> {
        Ok(self.patients.write().await.remove(id).is_some())
    }

    async fn ping(&self) -> Result<(), PatientRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientFilter, PatientInput, PetId};
    use chrono::{Duration, TimeZone};
    use pagination::PageRequest;
    use rstest::{fixture, rstest};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn patient(owner: &str, pet: &str, kind: &str, offset_secs: i64) -> Patient {
        let input = PatientInput {
            name: owner.into(),
            phone: "1234567".into(),
            pet_name: pet.into(),
            date_of_birth: "2020-01-01".into(),
            pet_type: kind.into(),
        };
        let draft =
            PatientDraft::validate(&input, base_time().date_naive()).expect("valid draft");
        Patient::from_draft(
            PatientId::random(),
            PetId::random(),
            &draft,
            base_time() + Duration::seconds(offset_secs),
        )
    }

    #[fixture]
    fn repo() -> InMemoryPatientRepository {
        InMemoryPatientRepository::with_patients([
            patient("Alice", "Rex", "dog", 0),
            patient("Bob", "Mia", "cat", 1),
            patient("Carol", "Rexy", "parrot", 2),
        ])
    }

    fn query(filter: PatientFilter, page: u32, size: u32) -> PatientListQuery {
        PatientListQuery::new(filter, PageRequest::new(page, size).expect("valid page"))
    }

    #[rstest]
    #[tokio::test]
    async fn lists_newest_first(repo: InMemoryPatientRepository) {
        let listing = repo
            .list(&query(PatientFilter::default(), 1, 10))
            .await
            .expect("list succeeds");
        let names: Vec<_> = listing.rows.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Bob", "Alice"]);
        assert_eq!(listing.total, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn equal_timestamps_break_ties_by_id() {
        let mut first = patient("Alice", "Rex", "dog", 0);
        let mut second = patient("Bob", "Mia", "cat", 0);
        if second.id < first.id {
            std::mem::swap(&mut first, &mut second);
        }
        let expected = vec![first.id, second.id];
        let repo = InMemoryPatientRepository::with_patients([second, first]);

        let listing = repo
            .list(&query(PatientFilter::default(), 1, 10))
            .await
            .expect("list succeeds");

        let ids: Vec<_> = listing.rows.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    #[case(1, 2, 2)]
    #[case(2, 2, 1)]
    #[case(3, 2, 0)]
    #[tokio::test]
    async fn pages_share_the_unpaginated_total(
        repo: InMemoryPatientRepository,
        #[case] page: u32,
        #[case] size: u32,
        #[case] expected_len: usize,
    ) {
        let listing = repo
            .list(&query(PatientFilter::default(), page, size))
            .await
            .expect("list succeeds");
        assert_eq!(listing.rows.len(), expected_len);
        assert_eq!(listing.total, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn filters_before_counting(repo: InMemoryPatientRepository) {
        let listing = repo
            .list(&query(PatientFilter::default().with_search("rex"), 1, 1))
            .await
            .expect("list succeeds");
        assert_eq!(listing.total, 2);
        assert_eq!(listing.rows.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed(repo: InMemoryPatientRepository) {
        let id = repo
            .list(&query(PatientFilter::default(), 1, 1))
            .await
            .expect("list succeeds")
            .rows
            .first()
            .map(|p| p.id)
            .expect("one row");

        assert!(repo.delete(&id).await.expect("delete succeeds"));
        assert!(!repo.delete(&id).await.expect("delete succeeds"));
        assert!(repo.find_by_id(&id).await.expect("find succeeds").is_none());
        assert_eq!(repo.len().await, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_duplicate_identifiers() {
        let row = patient("Alice", "Rex", "dog", 0);
        let repo = InMemoryPatientRepository::default();
        repo.create(&row).await.expect("first insert");
        assert!(repo.create(&row).await.is_err());
    }
}
