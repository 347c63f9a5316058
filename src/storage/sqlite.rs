//! SQLite resume store

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rusqlite::{Connection, Row, params, params_from_iter};
use serde::Serialize;
use tracing::debug;

use crate::core::{NewResume, Record, RecordId, normalize_skills, validate_years};
use crate::error::{Result, ScoutError};
use crate::storage::RecordStore;
use crate::storage::migrations;

const RESUME_COLUMNS: &str =
    "id, candidate_name, raw_text, title, years_experience, location";

/// Ids bound per `IN (...)` statement, well below SQLite's variable limit.
const MAX_BOUND_IDS: usize = 500;

type SkillMap = BTreeMap<RecordId, BTreeSet<String>>;

/// SQLite database wrapper for the resume registry
pub struct Database {
    conn: Connection,
    schema_version: u32,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("schema_version", &self.schema_version)
            .finish_non_exhaustive()
    }
}

/// Stored skill with the number of resumes linked to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRow {
    pub id: i64,
    pub name: String,
    pub resumes: u64,
}

impl Database {
    /// Open database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::configure_pragmas(&conn)?;
        let schema_version = migrations::run_migrations(&conn)?;

        Ok(Self {
            conn,
            schema_version,
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let schema_version = migrations::run_migrations(&conn)?;
        Ok(Self {
            conn,
            schema_version,
        })
    }

    /// Get a reference to the connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Current schema version after migrations.
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Insert a resume and link its normalized skills. Returns the new id.
    pub fn add_resume(&self, resume: &NewResume) -> Result<RecordId> {
        if resume.raw_text.trim().is_empty() {
            return Err(ScoutError::InvalidRecord(
                "resume text must not be empty".to_string(),
            ));
        }
        validate_years(resume.years_experience)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO resumes (candidate_name, title, years_experience, location, raw_text, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                resume.candidate_name,
                resume.title,
                resume.years_experience,
                resume.location,
                resume.raw_text,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        let resume_id = tx.last_insert_rowid();

        for skill in normalize_skills(&resume.skills) {
            let skill_id = get_or_create_skill(&tx, &skill)?;
            tx.execute(
                "INSERT OR IGNORE INTO resume_skill (resume_id, skill_id) VALUES (?, ?)",
                params![resume_id, skill_id],
            )?;
        }
        tx.commit()?;

        debug!(resume_id, name = %resume.candidate_name, "Stored resume");
        Ok(resume_id)
    }

    pub fn get_resume(&self, id: RecordId) -> Result<Option<Record>> {
        Ok(self.get_records_by_id(&[id])?.into_iter().next())
    }

    /// All resumes in ascending id order
    pub fn list_resumes(&self) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RESUME_COLUMNS} FROM resumes ORDER BY id"
        ))?;
        let rows = stmt.query_map([], record_from_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        if records.is_empty() {
            return Ok(records);
        }

        let mut stmt = self.conn.prepare(
            "SELECT rs.resume_id, s.name FROM resume_skill rs
             JOIN skills s ON s.id = rs.skill_id",
        )?;
        let mut skills = SkillMap::new();
        collect_skills(stmt.query([])?, &mut skills)?;
        Ok(attach_skills(records, skills))
    }

    /// Delete a resume and its skill links. Returns whether it existed.
    pub fn delete_resume(&self, id: RecordId) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM resumes WHERE id = ?", [id])?;
        Ok(deleted > 0)
    }

    pub fn count_resumes(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM resumes", [], |row| row.get(0))?;
        Ok(count.max(0).unsigned_abs())
    }

    /// Every known skill by name, with its resume count. Skills outlive
    /// the resumes that introduced them, so counts may be zero.
    pub fn list_skills(&self) -> Result<Vec<SkillRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.id, s.name, COUNT(rs.resume_id) FROM skills s
             LEFT JOIN resume_skill rs ON rs.skill_id = s.id
             GROUP BY s.id, s.name
             ORDER BY s.name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SkillRow {
                id: row.get(0)?,
                name: row.get(1)?,
                resumes: row.get::<_, i64>(2)?.unsigned_abs(),
            })
        })?;
        let mut skills = Vec::new();
        for row in rows {
            skills.push(row?);
        }
        Ok(skills)
    }

    /// Embedding dimension recorded for a resume at its last index build
    pub fn embedding_dim(&self, id: RecordId) -> Result<Option<usize>> {
        let dim: Option<Option<i64>> = self
            .conn
            .query_row(
                "SELECT embedding_dim FROM resumes WHERE id = ?",
                [id],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|err| match err {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        Ok(dim.flatten().and_then(|d| usize::try_from(d).ok()))
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(())
    }
}

impl RecordStore for Database {
    fn list_all_records(&self) -> Result<Vec<Record>> {
        self.list_resumes()
    }

    fn get_records_by_id(&self, ids: &[RecordId]) -> Result<Vec<Record>> {
        let mut wanted = ids.to_vec();
        wanted.sort_unstable();
        wanted.dedup();

        let mut records = Vec::new();
        let mut skills = SkillMap::new();
        for chunk in wanted.chunks(MAX_BOUND_IDS) {
            let marks = placeholders(chunk.len());
            let mut stmt = self.conn.prepare(&format!(
                "SELECT {RESUME_COLUMNS} FROM resumes WHERE id IN ({marks}) ORDER BY id"
            ))?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), record_from_row)?;
            for row in rows {
                records.push(row?);
            }

            let mut stmt = self.conn.prepare(&format!(
                "SELECT rs.resume_id, s.name FROM resume_skill rs
                 JOIN skills s ON s.id = rs.skill_id
                 WHERE rs.resume_id IN ({marks})"
            ))?;
            collect_skills(stmt.query(params_from_iter(chunk.iter()))?, &mut skills)?;
        }
        Ok(attach_skills(records, skills))
    }

    fn record_index_build(&self, dims: usize, _count: usize) -> Result<()> {
        let dims = i64::try_from(dims)
            .map_err(|_| ScoutError::InvalidRecord(format!("embedding dim {dims} too large")))?;
        self.conn
            .execute("UPDATE resumes SET embedding_dim = ?", [dims])?;
        Ok(())
    }
}

fn get_or_create_skill(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT OR IGNORE INTO skills (name) VALUES (?)", [name])?;
    let id = conn.query_row("SELECT id FROM skills WHERE name = ?", [name], |row| {
        row.get(0)
    })?;
    Ok(id)
}

fn collect_skills(mut rows: rusqlite::Rows<'_>, skills: &mut SkillMap) -> Result<()> {
    while let Some(row) = rows.next()? {
        let id: RecordId = row.get(0)?;
        skills.entry(id).or_default().insert(row.get(1)?);
    }
    Ok(())
}

fn attach_skills(mut records: Vec<Record>, mut skills: SkillMap) -> Vec<Record> {
    for record in &mut records {
        if let Some(set) = skills.remove(&record.id) {
            record.skills = set;
        }
    }
    records
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        candidate_name: row.get(1)?,
        raw_text: row.get(2)?,
        skills: BTreeSet::new(),
        title: row.get(3)?,
        years_experience: row.get(4)?,
        location: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::ScoutRoot;
    use tempfile::tempdir;

    fn alice() -> NewResume {
        NewResume {
            candidate_name: "Alice Johnson".to_string(),
            raw_text: "Python backend engineer with Flask, FastAPI, Docker and AWS experience."
                .to_string(),
            skills: vec!["Python".into(), "flask".into(), "FastAPI".into(), "docker".into()],
            title: Some("Senior Backend Engineer".to_string()),
            years_experience: Some(5.0),
            location: Some("Remote".to_string()),
        }
    }

    fn bob() -> NewResume {
        NewResume {
            candidate_name: "Bob Smith".to_string(),
            raw_text: "React and Node developer with some AWS knowledge.".to_string(),
            skills: vec!["react".into(), "node".into(), "aws".into()],
            title: Some("Frontend Developer".to_string()),
            years_experience: None,
            location: None,
        }
    }

    #[test]
    fn test_database_creation_and_schema_version() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/test.db");
        let db = Database::open(&db_path).unwrap();
        assert!(db_path.exists());
        assert_eq!(db.schema_version(), migrations::SCHEMA_VERSION);
    }

    #[test]
    fn test_wal_mode_enabled() {
        let root = ScoutRoot::new();
        let db = root.open_database();
        let mode: String = db
            .conn()
            .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_add_and_get_resume() {
        let db = Database::open_in_memory().unwrap();
        let id = db.add_resume(&alice()).unwrap();

        let record = db.get_resume(id).unwrap().unwrap();
        assert_eq!(record.candidate_name, "Alice Johnson");
        assert_eq!(record.years_experience, Some(5.0));
        assert_eq!(record.location.as_deref(), Some("Remote"));
        let skills: Vec<_> = record.skills.iter().map(String::as_str).collect();
        assert_eq!(skills, vec!["docker", "fastapi", "flask", "python"]);
    }

    #[test]
    fn test_missing_optional_fields_round_trip_as_none() {
        let db = Database::open_in_memory().unwrap();
        let id = db.add_resume(&bob()).unwrap();
        let record = db.get_resume(id).unwrap().unwrap();
        assert!(record.years_experience.is_none());
        assert!(record.location.is_none());
    }

    #[test]
    fn test_skills_are_shared_and_deduplicated() {
        let db = Database::open_in_memory().unwrap();
        db.add_resume(&alice()).unwrap();
        db.add_resume(&bob()).unwrap();
        let mut dup = bob();
        dup.skills = vec!["AWS".into(), "aws ".into()];
        db.add_resume(&dup).unwrap();

        let skills = db.list_skills().unwrap();
        let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["aws", "docker", "fastapi", "flask", "node", "python", "react"]
        );
        assert_eq!(skills[0].resumes, 2);
        assert_eq!(skills[5].resumes, 1);
    }

    #[test]
    fn test_skill_counts_drop_with_deleted_resumes() {
        let db = Database::open_in_memory().unwrap();
        let id = db.add_resume(&bob()).unwrap();
        db.delete_resume(id).unwrap();

        let skills = db.list_skills().unwrap();
        assert_eq!(skills.len(), 3);
        assert!(skills.iter().all(|s| s.resumes == 0));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let mut resume = alice();
        resume.raw_text = "  ".to_string();
        assert!(matches!(
            db.add_resume(&resume),
            Err(ScoutError::InvalidRecord(_))
        ));
        assert_eq!(db.count_resumes().unwrap(), 0);
    }

    #[test]
    fn test_get_records_by_id_orders_and_skips_unknown() {
        let db = Database::open_in_memory().unwrap();
        let a = db.add_resume(&alice()).unwrap();
        let b = db.add_resume(&bob()).unwrap();

        let records = db.get_records_by_id(&[b, 999, a]).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(records[1].has_skill("react"));
        assert!(db.get_records_by_id(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_delete_resume_cascades_links() {
        let db = Database::open_in_memory().unwrap();
        let id = db.add_resume(&alice()).unwrap();

        assert!(db.delete_resume(id).unwrap());
        assert!(!db.delete_resume(id).unwrap());
        assert!(db.get_resume(id).unwrap().is_none());

        let links: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM resume_skill", [], |row| row.get(0))
            .unwrap();
        assert_eq!(links, 0);
    }

    #[test]
    fn test_list_all_records_matches_count() {
        let db = Database::open_in_memory().unwrap();
        db.add_resume(&alice()).unwrap();
        db.add_resume(&bob()).unwrap();
        assert_eq!(db.list_all_records().unwrap().len(), 2);
        assert_eq!(db.count_resumes().unwrap(), 2);
    }

    #[test]
    fn test_record_index_build_sets_embedding_dim() {
        let db = Database::open_in_memory().unwrap();
        let id = db.add_resume(&alice()).unwrap();
        assert_eq!(db.embedding_dim(id).unwrap(), None);

        db.record_index_build(384, 1).unwrap();
        assert_eq!(db.embedding_dim(id).unwrap(), Some(384));
        assert_eq!(db.embedding_dim(12345).unwrap(), None);
    }

    #[test]
    fn test_invalid_years_are_rejected() {
        let db = Database::open_in_memory().unwrap();
        for years in [-3.0, f64::NAN] {
            let mut resume = alice();
            resume.years_experience = Some(years);
            assert!(matches!(
                db.add_resume(&resume),
                Err(ScoutError::InvalidRecord(_))
            ));
        }
        assert_eq!(db.count_resumes().unwrap(), 0);
        assert!(db.list_skills().unwrap().is_empty());
    }

    #[test]
    fn test_hydration_beyond_bound_id_limit() {
        let db = Database::open_in_memory().unwrap();
        let total = MAX_BOUND_IDS * 2 + 7;
        for n in 0..total {
            let mut resume = bob();
            resume.candidate_name = format!("Candidate {n}");
            if n % 2 == 0 {
                resume.skills.push("docker".into());
            }
            db.add_resume(&resume).unwrap();
        }

        let listed = db.list_resumes().unwrap();
        assert_eq!(listed.len(), total);
        assert!(listed.iter().all(|r| r.has_skill("react")));
        assert_eq!(listed.iter().filter(|r| r.has_skill("docker")).count(), total.div_ceil(2));

        let ids: Vec<RecordId> = listed.iter().rev().map(|r| r.id).collect();
        let fetched = db.get_records_by_id(&ids).unwrap();
        assert_eq!(fetched, listed);
    }
}
