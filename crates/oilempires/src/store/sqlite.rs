//! `SQLite`-backed content store.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{Comment, Company, IconTag, Rating, RatingValue, SectionKey};

use super::migrations;
use super::ContentStore;

/// Content store backed by a single `SQLite` database.
///
/// The connection sits behind a mutex that is only held for the duration of
/// one statement, never across an await point.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a content database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// and brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening content store at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::StoreOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Content store opened at {}", path.display());
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store, mostly for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::StoreOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Mutex::new(conn),
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load reference companies, skipping any whose name is already present.
    ///
    /// Companies are read-only to visitors; this is the administrative path
    /// that puts them there. Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn seed_companies(&self, companies: &[Company]) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut exists =
                tx.prepare("SELECT COUNT(*) FROM oil_companies WHERE name = ?1")?;
            let mut insert = tx.prepare(
                r"
                INSERT INTO oil_companies (id, name, region, founded, description, control_method, icon)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )?;

            for company in companies {
                let count: i64 = exists.query_row([&company.name], |row| row.get(0))?;
                if count > 0 {
                    debug!("Company {} already seeded", company.name);
                    continue;
                }
                insert.execute(params![
                    company.id.to_string(),
                    company.name,
                    company.region,
                    company.founded,
                    company.description,
                    company.control_method,
                    company.icon.to_string(),
                ])?;
                inserted += 1;
            }
        }
        tx.commit()?;

        if inserted > 0 {
            info!("Seeded {} companies", inserted);
        }
        Ok(inserted)
    }

    /// Row counts and file size.
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails or the database file can no
    /// longer be inspected.
    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.lock()?;
        let count = |table: &str| -> Result<i64> {
            let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
            Ok(n)
        };

        let companies = count("oil_companies")?;
        let comments = count("visitor_comments")?;
        let ratings = count("visitor_ratings")?;

        let latest: Option<String> = conn
            .query_row(
                r"
                SELECT created_at FROM (
                    SELECT created_at FROM visitor_comments
                    UNION ALL
                    SELECT created_at FROM visitor_ratings
                ) ORDER BY created_at DESC LIMIT 1
                ",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let latest_feedback = latest
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path)?.len()
        };

        Ok(StoreStats {
            companies,
            comments,
            ratings,
            latest_feedback,
            db_size_bytes,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::internal("content store connection lock poisoned"))
    }

    fn now() -> (DateTime<Utc>, String) {
        let now = Utc::now().trunc_subsecs(6);
        // Fixed-width so that text ordering equals time ordering.
        let text = now.to_rfc3339_opts(SecondsFormat::Micros, true);
        (now, text)
    }

    fn row_to_company(row: &rusqlite::Row) -> rusqlite::Result<Company> {
        let icon_str: String = row.get(6)?;
        let icon = icon_str.parse().unwrap_or_else(|_| {
            warn!("Unknown icon tag: {}, defaulting to Building", icon_str);
            IconTag::default()
        });

        Ok(Company {
            id: parse_uuid(row, 0)?,
            name: row.get(1)?,
            region: row.get(2)?,
            founded: row.get(3)?,
            description: row.get(4)?,
            control_method: row.get(5)?,
            icon,
        })
    }

    fn row_to_comment(row: &rusqlite::Row) -> rusqlite::Result<Comment> {
        Ok(Comment {
            id: parse_uuid(row, 0)?,
            name: row.get(1)?,
            body: row.get(2)?,
            section: SectionKey::new(row.get::<_, String>(3)?),
            created_at: parse_timestamp(&row.get::<_, String>(4)?),
        })
    }

    fn row_to_rating(row: &rusqlite::Row) -> rusqlite::Result<Rating> {
        let raw: i64 = row.get(1)?;
        let value = u8::try_from(raw)
            .map_err(|e| Error::internal(format!("rating out of range: {e}")))
            .and_then(RatingValue::new)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Integer, Box::new(e)))?;

        Ok(Rating {
            id: parse_uuid(row, 0)?,
            value,
            section: SectionKey::new(row.get::<_, String>(2)?),
            created_at: parse_timestamp(&row.get::<_, String>(3)?),
        })
    }
}

fn parse_uuid(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_timestamp(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text).map_or_else(
        |_| {
            warn!("Unparseable timestamp: {}, using now", text);
            Utc::now()
        },
        |dt| dt.with_timezone(&Utc),
    )
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn list_companies(&self) -> Result<Vec<Company>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r"
            SELECT id, name, region, founded, description, control_method, icon
            FROM oil_companies ORDER BY name ASC
            ",
        )?;
        let companies = stmt
            .query_map([], Self::row_to_company)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} companies", companies.len());
        Ok(companies)
    }

    async fn list_comments(&self, section: &SectionKey) -> Result<Vec<Comment>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r"
            SELECT id, name, comment, section, created_at
            FROM visitor_comments WHERE section = ?1
            ORDER BY created_at DESC, rowid DESC
            ",
        )?;
        let comments = stmt
            .query_map([section.as_str()], Self::row_to_comment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} comments for section {}", comments.len(), section);
        Ok(comments)
    }

    async fn list_ratings(&self, section: &SectionKey) -> Result<Vec<Rating>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r"
            SELECT id, rating, section, created_at
            FROM visitor_ratings WHERE section = ?1
            ",
        )?;
        let ratings = stmt
            .query_map([section.as_str()], Self::row_to_rating)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} ratings for section {}", ratings.len(), section);
        Ok(ratings)
    }

    async fn insert_comment(
        &self,
        section: &SectionKey,
        name: &str,
        body: &str,
    ) -> Result<Comment> {
        let id = Uuid::new_v4();
        let (created_at, created_text) = Self::now();

        let conn = self.lock()?;
        conn.execute(
            r"
            INSERT INTO visitor_comments (id, name, comment, section, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![id.to_string(), name, body, section.as_str(), created_text],
        )?;

        info!("Stored comment {} for section {}", id, section);
        Ok(Comment {
            id,
            name: name.to_string(),
            body: body.to_string(),
            section: section.clone(),
            created_at,
        })
    }

    async fn insert_rating(&self, section: &SectionKey, value: RatingValue) -> Result<Rating> {
        let id = Uuid::new_v4();
        let (created_at, created_text) = Self::now();

        let conn = self.lock()?;
        conn.execute(
            r"
            INSERT INTO visitor_ratings (id, rating, section, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![id.to_string(), value.get(), section.as_str(), created_text],
        )?;

        info!("Stored {}-star rating for section {}", value, section);
        Ok(Rating {
            id,
            value,
            section: section.clone(),
            created_at,
        })
    }
}

/// Row counts for the content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of company rows.
    pub companies: i64,
    /// Number of comment rows across all sections.
    pub comments: i64,
    /// Number of rating rows across all sections.
    pub ratings: i64,
    /// Time of the most recent comment or rating.
    pub latest_feedback: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
