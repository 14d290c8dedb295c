//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `username` is unique and stored trimmed.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login name (max 80 characters).
        username -> Varchar,
    }
}

diesel::table! {
    /// Articles, each owned by exactly one user.
    articles (id) {
        /// Primary key assigned from a sequence; increases with every insert.
        id -> Int8,
        /// Owning user.
        owner_id -> Uuid,
        /// Title (max 200 characters).
        title -> Varchar,
        /// Body text.
        content -> Text,
    }
}

diesel::joinable!(articles -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(users, articles);
