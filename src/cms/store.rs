// src/cms/store.rs
use crate::cms::client::{record_from_value, records_from_value, ContentSource};
use crate::cms::{queries, CmsError};
use crate::domain::PropertyRecord;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

struct Cached<T> {
    fetched_at: Instant,
    value: Arc<T>,
}

impl<T> Cached<T> {
    fn new(value: T) -> Self {
        Self {
            fetched_at: Instant::now(),
            value: Arc::new(value),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

type Slot<T> = RwLock<Option<Cached<T>>>;

/// Upper bound on cached property details.
const MAX_CACHED_DETAILS: usize = 256;

/// Short-lived snapshots of content store queries.
///
/// Pages read listings from here instead of hitting the content store on
/// every request. Snapshots expire after `ttl` and are dropped early by
/// the revalidation webhook.
pub struct ListingStore {
    source: Arc<dyn ContentSource>,
    ttl: Duration,
    active: Slot<Vec<PropertyRecord>>,
    completed: Slot<Vec<PropertyRecord>>,
    details: RwLock<HashMap<String, Cached<PropertyRecord>>>,
}

impl ListingStore {
    pub fn new(source: Arc<dyn ContentSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            active: RwLock::new(None),
            completed: RwLock::new(None),
            details: RwLock::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    /// Properties for sale or rent.
    pub fn active_listings(&self) -> Arc<Vec<PropertyRecord>> {
        self.list(&self.active, queries::ACTIVE_LISTINGS)
    }

    /// Sold and rented properties, most recently updated first.
    pub fn completed_listings(&self) -> Arc<Vec<PropertyRecord>> {
        self.list(&self.completed, queries::COMPLETED_LISTINGS)
    }

    /// One property by slug. Unlike the lists, a failed fetch with nothing
    /// cached is an error so the page can say so. Unknown slugs are never
    /// cached.
    pub fn property(&self, slug: &str) -> Result<Option<Arc<PropertyRecord>>, CmsError> {
        {
            let details = self.details.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = details.get(slug).filter(|c| c.is_fresh(self.ttl)) {
                return Ok(Some(Arc::clone(&cached.value)));
            }
        }

        let fetched = self
            .source
            .fetch(queries::PROPERTY_BY_SLUG, &[("slug", slug)])
            .and_then(record_from_value);

        let mut details = self.details.write().unwrap_or_else(PoisonError::into_inner);
        match fetched {
            Ok(Some(record)) => {
                let cached = Cached::new(record);
                let value = Arc::clone(&cached.value);
                self.make_room(&mut details);
                details.insert(slug.to_string(), cached);
                Ok(Some(value))
            }
            Ok(None) => {
                details.remove(slug);
                Ok(None)
            }
            Err(e) => match details.get(slug) {
                Some(stale) => {
                    tracing::warn!("serving stale property '{slug}': {e}");
                    Ok(Some(Arc::clone(&stale.value)))
                }
                None => Err(e),
            },
        }
    }

    /// Drop expired details, then the oldest ones while the map is full.
    fn make_room(&self, details: &mut HashMap<String, Cached<PropertyRecord>>) {
        details.retain(|_, cached| cached.is_fresh(self.ttl));

        while details.len() >= MAX_CACHED_DETAILS {
            let oldest = details
                .iter()
                .min_by_key(|(_, cached)| cached.fetched_at)
                .map(|(slug, _)| slug.clone());
            match oldest {
                Some(slug) => details.remove(&slug),
                None => break,
            };
        }
    }

    #[cfg(test)]
    fn cached_details(&self) -> usize {
        self.details
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop cached lists, and the given slug's detail if any.
    pub fn invalidate(&self, slug: Option<&str>) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.completed.write().unwrap_or_else(PoisonError::into_inner) = None;

        if let Some(slug) = slug {
            self.details
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(slug);
        }
        tracing::info!(slug = slug.unwrap_or("-"), "listing cache invalidated");
    }

    fn list(&self, slot: &Slot<Vec<PropertyRecord>>, query: &str) -> Arc<Vec<PropertyRecord>> {
        {
            let cached = slot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cached.as_ref().filter(|c| c.is_fresh(self.ttl)) {
                return Arc::clone(&cached.value);
            }
        }

        match self.source.fetch(query, &[]) {
            Ok(value) => {
                let records = records_from_value(value);
                tracing::debug!(count = records.len(), "fetched listings");
                let cached = Cached::new(records);
                let value = Arc::clone(&cached.value);
                *slot.write().unwrap_or_else(PoisonError::into_inner) = Some(cached);
                value
            }
            Err(e) => {
                let stale = slot.read().unwrap_or_else(PoisonError::into_inner);
                match stale.as_ref() {
                    Some(stale) => {
                        tracing::warn!("serving stale listings: {e}");
                        Arc::clone(&stale.value)
                    }
                    None => {
                        tracing::warn!("listings unavailable, showing none: {e}");
                        Arc::new(Vec::new())
                    }
                }
            }
        }
    }
}
