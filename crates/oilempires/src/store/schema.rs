//! `SQLite` schema definitions for the content store.

/// Company reference data.
pub const CREATE_COMPANIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS oil_companies (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    region TEXT NOT NULL,
    founded TEXT,
    description TEXT NOT NULL,
    control_method TEXT NOT NULL,
    icon TEXT NOT NULL
)
";

/// Visitor comments, one row per submission.
pub const CREATE_COMMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS visitor_comments (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    comment TEXT NOT NULL,
    section TEXT NOT NULL,
    created_at TEXT NOT NULL
)
";

/// Visitor ratings, one row per submission.
pub const CREATE_RATINGS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS visitor_ratings (
    id TEXT PRIMARY KEY,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    section TEXT NOT NULL,
    created_at TEXT NOT NULL
)
";

/// Index backing the name-ordered company listing.
pub const CREATE_COMPANY_NAME_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_companies_name ON oil_companies(name)
";

/// Index backing the per-section, newest-first comment listing.
pub const CREATE_COMMENT_SECTION_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_comments_section ON visitor_comments(section, created_at DESC)
";

/// Index backing the per-section rating listing.
pub const CREATE_RATING_SECTION_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_ratings_section ON visitor_ratings(section)
";

/// Key-value metadata (schema version).
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_are_rerunnable() {
        for stmt in [
            CREATE_COMPANIES_TABLE,
            CREATE_COMMENTS_TABLE,
            CREATE_RATINGS_TABLE,
            CREATE_COMPANY_NAME_INDEX,
            CREATE_COMMENT_SECTION_INDEX,
            CREATE_RATING_SECTION_INDEX,
            CREATE_METADATA_TABLE,
        ] {
            assert!(stmt.contains("IF NOT EXISTS"), "{stmt}");
        }
    }

    #[test]
    fn test_ratings_table_constrains_range() {
        assert!(CREATE_RATINGS_TABLE.contains("CHECK (rating BETWEEN 1 AND 5)"));
    }

    #[test]
    fn test_feedback_tables_keyed_by_section() {
        assert!(CREATE_COMMENTS_TABLE.contains("section TEXT NOT NULL"));
        assert!(CREATE_RATINGS_TABLE.contains("section TEXT NOT NULL"));
    }
}
