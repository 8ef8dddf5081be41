//! Behaviour tests for the filtered, paginated patient listing.
//!
//! Scenarios run against the in-memory store through the query port, so the
//! filter and paging rules are exercised without a database.
use std::sync::{Arc, Mutex};

use pagination::{Page, PageRequest};
use pet_clinic::domain::ports::PatientsQuery;
use pet_clinic::domain::{Patient, PatientFilter, PatientListQuery, PatientService, PetType};
use pet_clinic::outbound::memory::InMemoryPatientRepository;
use pet_clinic::test_support::{FixedClock, stored_patient};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

type Service = PatientService<InMemoryPatientRepository>;

struct ListingWorld {
    runtime: Runtime,
    service: Option<Service>,
    page: Option<Page<Patient>>,
}

impl ListingWorld {
    fn list(&mut self, filter: PatientFilter, page: PageRequest) {
        let service = self.service.as_ref().expect("clinic seeded");
        let result = self
            .runtime
            .block_on(service.list_patients(PatientListQuery::new(filter, page)));
        self.page = Some(result.expect("listing succeeds"));
    }

    fn page(&self) -> &Page<Patient> {
        self.page.as_ref().expect("listing requested")
    }
}

#[fixture]
fn world() -> Mutex<ListingWorld> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("create runtime");
    Mutex::new(ListingWorld {
        runtime,
        service: None,
        page: None,
    })
}

#[given(
    "a clinic with Alice and Rex the dog, Bob and Mia the cat, and Alice2 and Rex2 the parrot"
)]
fn a_seeded_clinic(world: &Mutex<ListingWorld>) {
    let repo = InMemoryPatientRepository::with_patients([
        stored_patient("Alice", "Rex", PetType::Dog, 3),
        stored_patient("Bob", "Mia", PetType::Cat, 2),
        stored_patient("Alice2", "Rex2", PetType::Parrot, 1),
    ]);
    let service = PatientService::new(Arc::new(repo), Arc::new(FixedClock::default()));
    world.lock().expect("world lock").service = Some(service);
}

#[when("the clinic searches for {text}")]
fn the_clinic_searches_for(world: &Mutex<ListingWorld>, text: String) {
    let filter = PatientFilter::default().with_search(text);
    world
        .lock()
        .expect("world lock")
        .list(filter, PageRequest::default());
}

#[when("the clinic filters by types {types}")]
fn the_clinic_filters_by_types(world: &Mutex<ListingWorld>, types: String) {
    let filter = PatientFilter::default().with_pet_types_csv(&types);
    world
        .lock()
        .expect("world lock")
        .list(filter, PageRequest::default());
}

#[when("the clinic pages through types {types} with page {page} of size {size}")]
fn the_clinic_pages_through_types(
    world: &Mutex<ListingWorld>,
    types: String,
    page: u32,
    size: u32,
) {
    let filter = PatientFilter::default().with_pet_types_csv(&types);
    let request = PageRequest::new(page, size).expect("valid page request");
    world.lock().expect("world lock").list(filter, request);
}

#[then("the listing shows {shown} patients out of {total}")]
fn the_listing_shows(world: &Mutex<ListingWorld>, shown: usize, total: u64) {
    let world = world.lock().expect("world lock");
    let page = world.page();
    assert_eq!(page.data().len(), shown);
    assert_eq!(page.total(), total);
}

#[then("the owners shown are {owners}")]
fn the_owners_shown_are(world: &Mutex<ListingWorld>, owners: String) {
    let world = world.lock().expect("world lock");
    let shown: Vec<&str> = world
        .page()
        .data()
        .iter()
        .map(|patient| patient.name.as_str())
        .collect();
    let expected: Vec<&str> = owners.split(',').collect();
    assert_eq!(shown, expected);
}

#[then("the listing spans {pages} pages")]
fn the_listing_spans(world: &Mutex<ListingWorld>, pages: u64) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.page().total_pages(), pages);
}

#[scenario(
    path = "tests/features/patient_listing.feature",
    name = "Global search matches pet names across owners"
)]
fn global_search_matches_pet_names(world: Mutex<ListingWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/patient_listing.feature",
    name = "Type filter narrows to one species"
)]
fn type_filter_narrows_to_one_species(world: Mutex<ListingWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/patient_listing.feature",
    name = "Filtered results are paginated"
)]
fn filtered_results_are_paginated(world: Mutex<ListingWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/patient_listing.feature",
    name = "An unknown type matches nothing"
)]
fn unknown_type_matches_nothing(world: Mutex<ListingWorld>) {
    let _ = world;
}
