//! Per-year memoization of extracted records.
//!
//! Entries are never evicted or refreshed: data for a past year is static
//! and the key space (years the API accepts) is small. Concurrent misses for
//! the same year wait on a single computation. A failed computation is not
//! stored, so the next request for that year tries again.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

use crate::record::YearRecord;

/// Shared, immutable record list for one year
pub type Records = Arc<Vec<YearRecord>>;

type Slot = Arc<OnceCell<Records>>;

/// Cache for one category, keyed by year.
#[derive(Default)]
pub struct YearCache {
    slots: Mutex<BTreeMap<i32, Slot>>,
}

impl YearCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, year: i32) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.entry(year).or_default().clone()
    }

    /// Return the stored records for `year`, running `compute` on a miss.
    ///
    /// Only one `compute` runs per year at a time; other callers await its
    /// result.
    pub async fn get_or_try_insert<F, Fut, E>(&self, year: i32, compute: F) -> Result<Records, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<YearRecord>, E>>,
    {
        let slot = self.slot(year);
        slot.get_or_try_init(move || async move { compute().await.map(Arc::new) })
            .await
            .cloned()
    }

    /// Records for `year` if already computed
    pub fn get(&self, year: i32) -> Option<Records> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(&year).and_then(|slot| slot.get().cloned())
    }

    /// Years with a computed entry, ascending
    pub fn years(&self) -> Vec<i32> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(year, _)| *year)
            .collect()
    }

    /// Number of computed entries
    pub fn len(&self) -> usize {
        self.years().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
