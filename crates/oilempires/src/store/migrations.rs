//! Schema versioning for the content store.
//!
//! The version lives in the `metadata` table. Each [`Step`] is applied in its
//! own transaction and bumps the stored version when it commits, so a crash
//! part-way through leaves the database at the last completed step.

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_COMMENTS_TABLE, CREATE_COMMENT_SECTION_INDEX, CREATE_COMPANIES_TABLE,
    CREATE_COMPANY_NAME_INDEX, CREATE_METADATA_TABLE, CREATE_RATINGS_TABLE,
    CREATE_RATING_SECTION_INDEX,
};

const VERSION_KEY: &str = "schema_version";

/// One schema upgrade.
#[derive(Debug)]
struct Step {
    version: u32,
    label: &'static str,
    statements: &'static [&'static str],
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        label: "feedback and company tables",
        statements: &[
            CREATE_COMPANIES_TABLE,
            CREATE_COMMENTS_TABLE,
            CREATE_RATINGS_TABLE,
        ],
    },
    Step {
        version: 2,
        label: "listing indexes",
        statements: &[
            CREATE_COMPANY_NAME_INDEX,
            CREATE_COMMENT_SECTION_INDEX,
            CREATE_RATING_SECTION_INDEX,
        ],
    },
];

/// Version a fully migrated database reports.
pub const CURRENT_VERSION: u32 = 2;

/// Bring `conn` up to [`CURRENT_VERSION`], creating everything on a fresh
/// database.
///
/// # Errors
///
/// Fails if the database was written by a newer build, if the stored version
/// is unreadable, or if any statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    let found = stored_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(Error::Schema {
            message: format!(
                "database schema v{found} is newer than supported v{CURRENT_VERSION}"
            ),
        });
    }

    let pending: Vec<&Step> = STEPS.iter().filter(|s| s.version > found).collect();
    if pending.is_empty() {
        debug!("Content schema already at v{found}");
        return Ok(());
    }

    for step in pending {
        apply(conn, step)?;
    }
    info!("Content schema upgraded from v{found} to v{CURRENT_VERSION}");
    Ok(())
}

fn apply(conn: &Connection, step: &Step) -> Result<()> {
    debug!("Applying schema v{}: {}", step.version, step.label);
    let tx = conn.unchecked_transaction()?;
    for sql in step.statements {
        tx.execute(sql, [])?;
    }
    write_version(&tx, step.version)?;
    tx.commit()?;
    Ok(())
}

/// Zero when no version has been recorded yet.
fn stored_version(conn: &Connection) -> Result<u32> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    raw.map_or(Ok(0), |text| {
        text.trim().parse().map_err(|_| Error::Schema {
            message: format!("invalid schema version: {text}"),
        })
    })
}

fn write_version(conn: &Connection, version: u32) -> Result<()> {
    conn.execute(
        "INSERT INTO metadata (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    fn object_names(conn: &Connection, kind: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = ?1 AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([kind], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_steps_are_sequential() {
        for (i, step) in STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, i + 1, "{}", step.label);
        }
        assert_eq!(STEPS.last().map(|s| s.version), Some(CURRENT_VERSION));
    }

    #[test]
    fn test_fresh_database_gets_everything() {
        let conn = fresh();
        initialize_schema(&conn).unwrap();

        assert_eq!(
            object_names(&conn, "table"),
            vec!["metadata", "oil_companies", "visitor_comments", "visitor_ratings"]
        );
        assert_eq!(object_names(&conn, "index").len(), 3);
        assert_eq!(stored_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_rerun_is_a_no_op() {
        let conn = fresh();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO visitor_ratings (id, rating, section, created_at) VALUES ('r1', 4, 'overview', 'now')",
            [],
        )
        .unwrap();

        initialize_schema(&conn).unwrap();
        let kept: i64 = conn
            .query_row("SELECT COUNT(*) FROM visitor_ratings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(kept, 1);
    }

    #[test]
    fn test_partial_database_resumes_at_next_step() {
        let conn = fresh();
        conn.execute(CREATE_METADATA_TABLE, []).unwrap();
        apply(&conn, &STEPS[0]).unwrap();
        assert!(object_names(&conn, "index").is_empty());

        initialize_schema(&conn).unwrap();
        assert_eq!(object_names(&conn, "index").len(), 3);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = fresh();
        initialize_schema(&conn).unwrap();
        write_version(&conn, CURRENT_VERSION + 1).unwrap();

        let err = initialize_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
        assert!(err.is_store_error());
    }

    #[test]
    fn test_garbage_version_is_reported() {
        let conn = fresh();
        initialize_schema(&conn).unwrap();
        conn.execute("UPDATE metadata SET value = 'two' WHERE key = ?1", [VERSION_KEY])
            .unwrap();

        let err = stored_version(&conn).unwrap_err();
        assert!(err.to_string().contains("invalid schema version: two"));
    }

    #[test]
    fn test_out_of_range_rating_rejected_by_table() {
        let conn = fresh();
        initialize_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO visitor_ratings (id, rating, section, created_at) VALUES ('x', 9, 'overview', 'now')",
            [],
        );
        assert!(result.is_err());
    }
}
