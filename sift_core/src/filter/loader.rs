use crate::condition::LogicalCondition;
use crate::record::Record;

use super::LoadError;

/// Executes the condition a filter hands it.
pub trait DataLoader {
    /// Replaces the condition used by the next [`load`](DataLoader::load).
    fn set_condition(&mut self, condition: LogicalCondition);

    fn condition(&self) -> Option<&LogicalCondition>;

    fn load(&mut self) -> Result<(), LoadError>;
}

/// Filters a fixed set of records in memory.
#[derive(Debug, Default)]
pub struct InMemoryDataLoader {
    records: Vec<Record>,
    condition: Option<LogicalCondition>,
    loaded: Vec<Record>,
    load_count: usize,
}

impl InMemoryDataLoader {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records that matched the condition on the last load.
    pub fn loaded(&self) -> &[Record] {
        &self.loaded
    }

    pub fn load_count(&self) -> usize {
        self.load_count
    }
}

impl DataLoader for InMemoryDataLoader {
    fn set_condition(&mut self, condition: LogicalCondition) {
        self.condition = Some(condition);
    }

    fn condition(&self) -> Option<&LogicalCondition> {
        self.condition.as_ref()
    }

    fn load(&mut self) -> Result<(), LoadError> {
        let mut loaded = Vec::new();
        for record in &self.records {
            let matched = match &self.condition {
                Some(condition) => condition.matches(record).map_err(|error| LoadError::Match {
                    record: record.id.clone(),
                    error,
                })?,
                None => true,
            };
            if matched {
                loaded.push(record.clone());
            }
        }

        log::debug!(
            "Loaded {} of {} records",
            loaded.len(),
            self.records.len()
        );
        self.loaded = loaded;
        self.load_count += 1;
        Ok(())
    }
}
