//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the backing database exactly; they drive
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Blog articles.
    ///
    /// `id` is a bigserial primary key; the counts default to zero and both
    /// timestamps are assigned by the database.
    articles (id) {
        /// Primary key, assigned by the database.
        id -> Int8,
        /// Authoring user.
        author_id -> Int8,
        /// Article title.
        title -> Text,
        /// Article body.
        body -> Text,
        /// Number of likes.
        like_count -> Int4,
        /// Number of stocks (bookmarks).
        stock_count -> Int4,
        /// Attached image URLs, in display order.
        image_urls -> Nullable<Array<Text>>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
