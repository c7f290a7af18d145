//! Diesel schema for report lifecycle persistence.

diesel::table! {
    /// Submitted reports.
    reports (id) {
        /// Report identifier.
        id -> Uuid,
        /// Short summary.
        title -> Text,
        /// Free-text description.
        description -> Text,
        /// Where the reported issue is.
        location -> Text,
        /// Salted SHA-256 of the closing password.
        #[max_length = 64]
        password_digest -> Varchar,
        /// Lifecycle status.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Closing timestamp.
        closed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Comments attached to reports.
    report_comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Owning report.
        report_id -> Uuid,
        /// Comment text.
        body -> Text,
        /// Free-form caller fields.
        fields -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(report_comments -> reports (report_id));
diesel::allow_tables_to_appear_in_same_query!(reports, report_comments);
