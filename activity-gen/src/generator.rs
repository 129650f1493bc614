use chrono::NaiveDate;
use log::{debug, trace};

use crate::catalog::{Activity, Catalog};
use crate::dates::DateRange;
use crate::sampler::CategoricalSampler;

/// One generated day, bound to the catalog entry drawn for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityRecord<'c> {
    pub date: NaiveDate,
    pub activity: &'c Activity,
}

#[derive(Debug)]
pub struct Generator<'c, S> {
    catalog: &'c Catalog,
    sampler: S,
}

impl<'c, S: CategoricalSampler> Generator<'c, S> {
    #[must_use]
    pub fn new(catalog: &'c Catalog, sampler: S) -> Self {
        Generator { catalog, sampler }
    }

    /// Draws one activity per day of `range`, in date order.
    /// An empty or inverted range produces no records.
    ///
    /// # Panics
    /// If the sampler returns an index outside of the catalog
    pub fn generate(&mut self, range: DateRange) -> Vec<ActivityRecord<'c>> {
        debug!(
            "Generating {} days from {} to {} (exclusive)",
            range.len(),
            range.start(),
            range.end()
        );
        let catalog = self.catalog;
        let mut records = Vec::with_capacity(range.len());
        for date in range {
            let index = self.sampler.sample_index(catalog.weights());
            let activity = &catalog.activities()[index];
            trace!("{}: {}", date, activity.name);
            records.push(ActivityRecord { date, activity });
        }
        records
    }

    #[must_use]
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    #[must_use]
    pub fn into_sampler(self) -> S {
        self.sampler
    }
}
