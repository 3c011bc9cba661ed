//! Index of included resources for one refresh.
//!
//! Each prediction response carries its stops, schedules and trips in a
//! side list. The index merges those lists from every route's response
//! into one lookup keyed by `(kind, id)`, so a stop id that happens to
//! equal a trip id cannot shadow it.
//!
//! The index also fixes the refresh's reference "now": the first schedule
//! seen supplies a UTC offset, and the caller's wall-clock instant is
//! expressed in that offset. Later schedules never move it.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::warn;

use crate::domain::{TimestampError, parse_timestamp};
use crate::mbta::{IncludedResource, RawFetchResult};

/// The resource types the board resolves relationships against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Stop,
    Schedule,
    Trip,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Stop => "stop",
            ResourceKind::Schedule => "schedule",
            ResourceKind::Trip => "trip",
        })
    }
}

/// A stop (platform) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRecord {
    pub platform_code: Option<String>,
}

/// A schedule record. The timestamp is kept raw and parsed on use, so a
/// malformed value only affects the predictions that depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub departure_time: Option<String>,
}

impl ScheduleRecord {
    /// Parsed scheduled departure, `None` if the schedule has none.
    pub fn departure_time(&self) -> Result<Option<DateTime<FixedOffset>>, TimestampError> {
        self.departure_time
            .as_deref()
            .map(parse_timestamp)
            .transpose()
    }
}

/// A trip record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub headsign: String,
    pub train_number: String,
}

#[derive(Debug, Clone)]
enum Record {
    Stop(StopRecord),
    Schedule(ScheduleRecord),
    Trip(TripRecord),
}

type ResourceKey = (ResourceKind, String);

/// Lookup of included resources plus the refresh's reference time.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    records: HashMap<ResourceKey, Record>,
    now: Option<DateTime<FixedOffset>>,
}

impl ResourceIndex {
    /// Build the index from one refresh's fetch results, in result order.
    ///
    /// Results with no predictions are skipped entirely: their included
    /// records neither enter the index nor seed the reference time.
    /// `wall_clock` is the instant the reference time is taken from.
    pub fn build(results: &[RawFetchResult], wall_clock: DateTime<Utc>) -> Self {
        let mut index = Self::default();

        for result in results {
            if result.document.data.is_empty() {
                continue;
            }
            for resource in &result.document.included {
                index.insert(resource, wall_clock);
            }
        }

        index
    }

    /// Insert one included record. Last write wins for a repeated key.
    fn insert(&mut self, resource: &IncludedResource, wall_clock: DateTime<Utc>) {
        let (key, record) = match resource {
            IncludedResource::Stop { id, attributes } => (
                (ResourceKind::Stop, id.clone()),
                Record::Stop(StopRecord {
                    platform_code: attributes.platform_code.clone(),
                }),
            ),
            IncludedResource::Schedule { id, attributes } => {
                let schedule = ScheduleRecord {
                    departure_time: attributes.departure_time.clone(),
                };
                if self.now.is_none() {
                    self.fix_reference_time(id, &schedule, wall_clock);
                }
                ((ResourceKind::Schedule, id.clone()), Record::Schedule(schedule))
            }
            IncludedResource::Trip { id, attributes } => (
                (ResourceKind::Trip, id.clone()),
                Record::Trip(TripRecord {
                    headsign: attributes.headsign.clone(),
                    train_number: attributes.name.clone(),
                }),
            ),
            IncludedResource::Other => return,
        };

        self.records.insert(key, record);
    }

    /// Take the reference offset from `schedule` if it has a usable time.
    fn fix_reference_time(
        &mut self,
        id: &str,
        schedule: &ScheduleRecord,
        wall_clock: DateTime<Utc>,
    ) {
        match schedule.departure_time() {
            Ok(Some(departure)) => {
                self.now = Some(wall_clock.with_timezone(departure.offset()));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(schedule = id, error = %e, "Schedule time unusable as reference");
            }
        }
    }

    /// The reference "now" for this refresh, if any schedule provided one.
    pub fn now(&self) -> Option<DateTime<FixedOffset>> {
        self.now
    }

    pub fn stop(&self, id: &str) -> Option<&StopRecord> {
        match self.records.get(&(ResourceKind::Stop, id.to_string())) {
            Some(Record::Stop(stop)) => Some(stop),
            _ => None,
        }
    }

    pub fn schedule(&self, id: &str) -> Option<&ScheduleRecord> {
        match self.records.get(&(ResourceKind::Schedule, id.to_string())) {
            Some(Record::Schedule(schedule)) => Some(schedule),
            _ => None,
        }
    }

    pub fn trip(&self, id: &str) -> Option<&TripRecord> {
        match self.records.get(&(ResourceKind::Trip, id.to_string())) {
            Some(Record::Trip(trip)) => Some(trip),
            _ => None,
        }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
