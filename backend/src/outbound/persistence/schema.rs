//! Diesel table definitions mirroring the embedded migrations.

diesel::table! {
    pets (id) {
        id -> Uuid,
        name -> Varchar,
        date_of_birth -> Date,
        pet_type -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    owners (id) {
        id -> Uuid,
        name -> Varchar,
        phone -> Varchar,
        pet_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(owners -> pets (pet_id));

diesel::allow_tables_to_appear_in_same_query!(owners, pets);
