use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::error::StatsError;
use crate::models::{Sample, SampleSeries};

/// Storage seam for weight entries, keyed by (user, date).
///
/// Statistics code only ever consumes what `list` returns.
pub trait SampleRepository: Send + Sync {
    fn get(&self, user: &str, date: NaiveDate) -> Result<Option<Sample>, StatsError>;

    /// Newest-first entries with `from <= date <= to`; open bounds when `None`.
    fn list(
        &self,
        user: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<SampleSeries, StatsError>;

    /// Feiler med `Duplicate` hvis brukeren allerede har en rad den datoen.
    fn create(&self, user: &str, sample: Sample) -> Result<(), StatsError>;

    /// Erstatter raden på `sample.date`; `NotFound` hvis den ikke finnes.
    fn update(&self, user: &str, sample: Sample) -> Result<(), StatsError>;

    fn delete(&self, user: &str, date: NaiveDate) -> Result<Sample, StatsError>;
}

type UserEntries = BTreeMap<NaiveDate, Sample>;

#[derive(Debug, Default)]
pub struct InMemorySampleRepository {
    entries: Mutex<HashMap<String, UserEntries>>,
}

impl InMemorySampleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, UserEntries>>, StatsError> {
        self.entries
            .lock()
            .map_err(|_| StatsError::Storage("repository lock poisoned".into()))
    }
}

fn not_found(user: &str, date: NaiveDate) -> StatsError {
    StatsError::NotFound {
        user: user.to_string(),
        date,
    }
}

impl SampleRepository for InMemorySampleRepository {
    fn get(&self, user: &str, date: NaiveDate) -> Result<Option<Sample>, StatsError> {
        let entries = self.lock()?;
        Ok(entries.get(user).and_then(|m| m.get(&date)).cloned())
    }

    fn list(
        &self,
        user: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<SampleSeries, StatsError> {
        let entries = self.lock()?;
        let Some(m) = entries.get(user) else {
            return Ok(SampleSeries::default());
        };
        let lo = from.unwrap_or(NaiveDate::MIN);
        let hi = to.unwrap_or(NaiveDate::MAX);
        if lo > hi {
            return Ok(SampleSeries::default());
        }
        Ok(SampleSeries::new(m.range(lo..=hi).map(|(_, s)| s.clone()).collect()))
    }

    fn create(&self, user: &str, sample: Sample) -> Result<(), StatsError> {
        let mut entries = self.lock()?;
        let m = entries.entry(user.to_string()).or_default();
        if m.contains_key(&sample.date) {
            return Err(StatsError::Duplicate {
                user: user.to_string(),
                date: sample.date,
            });
        }
        m.insert(sample.date, sample);
        Ok(())
    }

    fn update(&self, user: &str, sample: Sample) -> Result<(), StatsError> {
        let mut entries = self.lock()?;
        let slot = entries
            .get_mut(user)
            .and_then(|m| m.get_mut(&sample.date))
            .ok_or_else(|| not_found(user, sample.date))?;
        *slot = sample;
        Ok(())
    }

    fn delete(&self, user: &str, date: NaiveDate) -> Result<Sample, StatsError> {
        let mut entries = self.lock()?;
        entries
            .get_mut(user)
            .and_then(|m| m.remove(&date))
            .ok_or_else(|| not_found(user, date))
    }
}
