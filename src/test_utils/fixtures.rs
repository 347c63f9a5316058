use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::StorageConfig;
use crate::core::{Record, RecordId};
use crate::storage::{Database, MemoryStore};

/// Throwaway scout root laid out like `SCOUT_ROOT`, removed on drop.
pub struct ScoutRoot {
    dir: TempDir,
}

impl ScoutRoot {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp scout root");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `resumes/<file_name>` and return its path.
    pub fn write_resume(&self, file_name: &str, body: &str) -> PathBuf {
        let resumes = self.path().join("resumes");
        std::fs::create_dir_all(&resumes).expect("create resumes dir");
        let path = resumes.join(file_name);
        std::fs::write(&path, body).expect("write resume");
        path
    }

    /// Write the root's `config.toml` and return its path.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        let path = self.path().join("config.toml");
        std::fs::write(&path, toml).expect("write config.toml");
        path
    }

    /// Open the database at the default storage location under this root.
    pub fn open_database(&self) -> Database {
        let path = StorageConfig::default().database_path(self.path());
        Database::open(path).expect("open scout database")
    }
}

impl Default for ScoutRoot {
    fn default() -> Self {
        Self::new()
    }
}

/// Five resumes covering backend, frontend, devops, junior and
/// unknown-experience profiles.
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new(1, "Python backend engineer building Flask and FastAPI services")
            .with_name("Alice Johnson")
            .with_title("Senior Backend Engineer")
            .with_skills(["python", "flask", "fastapi"])
            .with_years(6.0),
        Record::new(2, "React and Node frontend developer shipping web apps")
            .with_name("Bob Smith")
            .with_title("Frontend Developer")
            .with_skills(["react", "node"])
            .with_years(3.0),
        Record::new(3, "DevOps engineer running Docker workloads on AWS")
            .with_name("Chen Wei")
            .with_title("DevOps Engineer")
            .with_skills(["docker", "aws"])
            .with_years(8.0),
        Record::new(4, "Junior Python developer learning Flask")
            .with_name("Dana Lee")
            .with_skills(["python", "flask"])
            .with_years(1.0),
        Record::new(5, "Data analyst writing SQL reports").with_name("Eve Martin"),
    ]
}

/// A [`MemoryStore`] holding [`sample_records`].
pub fn sample_store() -> MemoryStore {
    MemoryStore::from_records(sample_records()).expect("sample records have unique ids")
}

/// `count` synthetic resumes with ids `1..=count`, for load tests and benches.
pub fn synthetic_records(count: usize) -> Vec<Record> {
    const SKILLS: [&str; 7] = ["python", "flask", "fastapi", "react", "node", "aws", "docker"];
    const ROLES: [&str; 4] = ["backend engineer", "frontend developer", "data scientist", "devops lead"];

    (1..=count)
        .map(|n| {
            let first = SKILLS[n % SKILLS.len()];
            let second = SKILLS[(n * 3 + 1) % SKILLS.len()];
            let role = ROLES[n % ROLES.len()];
            let years = (n % 12) as f64;
            Record::new(
                n as RecordId,
                format!("{role} with {years} years of {first} and {second} work, candidate {n}"),
            )
            .with_name(format!("Candidate {n}"))
            .with_skills([first, second])
            .with_years(years)
        })
        .collect()
}
