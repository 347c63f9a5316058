//! In-memory record store

use parking_lot::RwLock;

use crate::core::{NewResume, Record, RecordId, normalize_skills, validate_years};
use crate::error::{Result, ScoutError};

use super::RecordStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records. Ids must be unique.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self> {
        let store = Self::new();
        for record in records {
            store.insert_record(record)?;
        }
        Ok(store)
    }

    /// Insert a record with a caller-chosen id.
    pub fn insert_record(&self, record: Record) -> Result<()> {
        if record.raw_text.trim().is_empty() {
            return Err(ScoutError::InvalidRecord(format!(
                "resume {} has no text",
                record.id
            )));
        }
        validate_years(record.years_experience)?;
        let mut records = self.records.write();
        match records.binary_search_by_key(&record.id, |r| r.id) {
            Ok(_) => Err(ScoutError::InvalidRecord(format!(
                "duplicate resume id {}",
                record.id
            ))),
            Err(pos) => {
                records.insert(pos, record);
                Ok(())
            }
        }
    }

    /// Insert a new resume, assigning the next free id.
    pub fn add_resume(&self, resume: &NewResume) -> Result<RecordId> {
        let id = self.records.read().last().map_or(1, |r| r.id + 1);
        self.insert_record(Record {
            id,
            candidate_name: resume.candidate_name.clone(),
            raw_text: resume.raw_text.clone(),
            skills: normalize_skills(&resume.skills),
            title: resume.title.clone(),
            years_experience: resume.years_experience,
            location: resume.location.clone(),
        })?;
        Ok(id)
    }

    pub fn delete_resume(&self, id: RecordId) -> bool {
        let mut records = self.records.write();
        match records.binary_search_by_key(&id, |r| r.id) {
            Ok(pos) => {
                records.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn list_all_records(&self) -> Result<Vec<Record>> {
        Ok(self.records.read().clone())
    }

    fn get_records_by_id(&self, ids: &[RecordId]) -> Result<Vec<Record>> {
        let records = self.records.read();
        let mut wanted: Vec<RecordId> = ids.to_vec();
        wanted.sort_unstable();
        wanted.dedup();
        Ok(wanted
            .into_iter()
            .filter_map(|id| {
                records
                    .binary_search_by_key(&id, |r| r.id)
                    .ok()
                    .map(|pos| records[pos].clone())
            })
            .collect())
    }
}
