//! Trip business logic - status derivation, archiving and trip CRUD.
//!
//! Trip status is never updated in the background. [`refresh_statuses`] is a
//! pure function over the trips and "today", and [`TripStore::refresh`] is the
//! one place that persists its result. Completed trips leave the active list
//! and move to a separate archive collection instead of being discarded.

use crate::{
    core::{
        collection::{Collection, Placement},
        storage::KvStorage,
    },
    errors::{Error, Result},
    models::{NewTrip, Trip, TripStatus},
};
use chrono::{NaiveDate, Utc};
use tracing::{error, info};

/// Storage key for the active trips
pub const TRIPS_STORAGE_KEY: &str = "traveho_trips";
/// Storage key for completed trips moved out of the active list
pub const TRIPS_ARCHIVE_STORAGE_KEY: &str = "traveho_trips_archive";

const DEFAULT_TRIP_IMAGE: &str =
    "https://images.unsplash.com/photo-1488646953014-85cb44e25828?w=400&h=200&fit=crop";

impl TripStatus {
    /// Classifies a trip spanning `start..=end` relative to `today`.
    ///
    /// All three are calendar days, so both ends of the range count as part of
    /// the trip.
    #[must_use]
    pub fn classify(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        if today < start {
            Self::Upcoming
        } else if today <= end {
            Self::Current
        } else {
            Self::Completed
        }
    }

    /// Status of `trip` on `today`.
    #[must_use]
    pub fn of(trip: &Trip, today: NaiveDate) -> Self {
        Self::classify(trip.start_date, trip.end_date, today)
    }
}

/// Result of re-deriving trip statuses.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRefresh {
    /// Upcoming and current trips, in their original order
    pub active: Vec<Trip>,
    /// Trips that ended before today
    pub completed: Vec<Trip>,
}

/// Re-labels every trip for `today` and splits off the completed ones.
#[must_use]
pub fn refresh_statuses(trips: &[Trip], today: NaiveDate) -> StatusRefresh {
    let (active, completed): (Vec<Trip>, Vec<Trip>) = trips
        .iter()
        .cloned()
        .map(|mut trip| {
            trip.status = TripStatus::of(&trip, today);
            trip
        })
        .partition(|trip| trip.status != TripStatus::Completed);

    StatusRefresh { active, completed }
}

/// Checks the user-entered fields of a new trip against `today`.
///
/// # Errors
/// - [`Error::Validation`] for a blank destination or purpose, or a trip that
///   has already ended
/// - [`Error::InvalidDateRange`] when the trip ends before it starts
pub fn validate_new_trip(new_trip: &NewTrip, today: NaiveDate) -> Result<()> {
    if new_trip.destination.trim().is_empty() {
        return Err(Error::validation("Trip destination cannot be empty"));
    }
    if new_trip.purpose.trim().is_empty() {
        return Err(Error::validation("Trip purpose cannot be empty"));
    }
    if new_trip.end_date < new_trip.start_date {
        return Err(Error::InvalidDateRange {
            start: new_trip.start_date,
            end: new_trip.end_date,
        });
    }
    if new_trip.end_date < today {
        return Err(Error::validation("Cannot add a trip that has already ended"));
    }
    Ok(())
}

/// Active and archived trips.
///
/// The two lists are always written together in one transaction, so a trip
/// is never persisted in both or in neither.
#[derive(Debug)]
pub struct TripStore {
    trips: Collection<Trip>,
    archive: Collection<Trip>,
}

impl TripStore {
    /// Loads active and archived trips from storage.
    pub async fn load(storage: &KvStorage) -> Result<Self> {
        Ok(Self {
            trips: Collection::load(storage.clone(), TRIPS_STORAGE_KEY, Placement::OldestFirst)
                .await?,
            archive: Collection::load(
                storage.clone(),
                TRIPS_ARCHIVE_STORAGE_KEY,
                Placement::NewestFirst,
            )
            .await?,
        })
    }

    /// Active trips with the status they were last refreshed with.
    #[must_use]
    pub fn trips(&self) -> &[Trip] {
        self.trips.items()
    }

    /// Completed trips, most recently archived first.
    #[must_use]
    pub fn archived(&self) -> &[Trip] {
        self.archive.items()
    }

    /// The active trip with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Trip> {
        self.trips.get(id)
    }

    /// Adds a fully-formed trip as given.
    ///
    /// # Errors
    /// [`Error::DuplicateId`] if the id is taken, or the storage error.
    pub async fn add_trip(&mut self, trip: Trip) -> Result<&Trip> {
        self.trips.insert(trip).await
    }

    /// Creates a trip from user input and refreshes every trip's status for
    /// `today`. Returns the new trip's id.
    ///
    /// The new trip and the refreshed lists are written in one transaction:
    /// on error nothing was persisted and a retry cannot duplicate the trip.
    ///
    /// # Errors
    /// Any error from [`validate_new_trip`], or the storage error.
    pub async fn create_trip(&mut self, new_trip: NewTrip, today: NaiveDate) -> Result<String> {
        validate_new_trip(&new_trip, today)?;

        let trip = Trip {
            id: self.next_trip_id(),
            destination: new_trip.destination.trim().to_string(),
            start_date: new_trip.start_date,
            end_date: new_trip.end_date,
            status: TripStatus::classify(new_trip.start_date, new_trip.end_date, today),
            purpose: new_trip.purpose.trim().to_string(),
            image_url: new_trip
                .image_url
                .unwrap_or_else(|| DEFAULT_TRIP_IMAGE.to_string()),
            flight_number: new_trip.flight_number.filter(|f| !f.trim().is_empty()),
            hotel: new_trip.hotel.filter(|h| !h.trim().is_empty()),
            has_notifications: Some(false),
            meetings: Vec::new(),
            itinerary: Vec::new(),
        };
        let id = trip.id.clone();

        info!(trip_id = %id, destination = %trip.destination, "Creating trip");
        let mut trips = self.trips.items().to_vec();
        trips.push(trip);
        self.apply_statuses(&trips, today).await?;
        Ok(id)
    }

    /// Applies `change` to the trip with `id`.
    pub async fn update_trip<F>(&mut self, id: &str, change: F) -> Result<&Trip>
    where
        F: FnOnce(&mut Trip),
    {
        self.trips.update(id, change).await
    }

    /// Deletes the active trip with `id`.
    pub async fn delete_trip(&mut self, id: &str) -> Result<Trip> {
        self.trips.remove(id).await
    }

    /// Deletes an archived trip.
    pub async fn delete_archived_trip(&mut self, id: &str) -> Result<Trip> {
        self.archive.remove(id).await
    }

    /// Re-derives statuses for `today` and moves completed trips into the
    /// archive. Returns the number of trips archived.
    ///
    /// # Errors
    /// The storage error; both lists are then left as they were.
    pub async fn refresh(&mut self, today: NaiveDate) -> Result<usize> {
        let trips = self.trips.items().to_vec();
        self.apply_statuses(&trips, today).await
    }

    /// Splits `trips` by status for `today` and persists the active list and
    /// the grown archive in a single transaction, then adopts both in memory.
    async fn apply_statuses(&mut self, trips: &[Trip], today: NaiveDate) -> Result<usize> {
        let StatusRefresh { active, completed } = refresh_statuses(trips, today);
        let archived = completed.len();
        if archived == 0 && active == self.trips.items() {
            return Ok(0);
        }

        let mut archive = completed;
        archive.extend(self.archive.items().iter().cloned());
        let archive = dedup_by_id(archive);

        let entries = vec![self.trips.encode(&active)?, self.archive.encode(&archive)?];
        self.trips
            .storage()
            .save_many(entries)
            .await
            .inspect_err(|e| error!("Error saving trips: {e}"))?;

        self.trips.set_persisted(active);
        self.archive.set_persisted(archive);
        if archived > 0 {
            info!(archived, %today, "Archived completed trips");
        }
        Ok(archived)
    }

    /// Next millisecond id unused by both active and archived trips.
    fn next_trip_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        loop {
            let id = candidate.to_string();
            if !self.trips.contains(&id) && !self.archive.contains(&id) {
                return id;
            }
            candidate += 1;
        }
    }

    /// Trips whose status on `today` is `status`.
    ///
    /// Derived from the dates, so it is correct even if [`Self::refresh`] has
    /// not run today. Asking for `Completed` includes the archive.
    #[must_use]
    pub fn by_status(&self, status: TripStatus, today: NaiveDate) -> Vec<Trip> {
        let archived: &[Trip] = if status == TripStatus::Completed {
            self.archive.items()
        } else {
            &[]
        };

        self.trips
            .items()
            .iter()
            .chain(archived)
            .filter(|trip| TripStatus::of(trip, today) == status)
            .map(|trip| Trip {
                status,
                ..trip.clone()
            })
            .collect()
    }

    /// The first trip in progress on `today`, if any.
    #[must_use]
    pub fn current_trip(&self, today: NaiveDate) -> Option<&Trip> {
        self.trips
            .items()
            .iter()
            .find(|trip| TripStatus::of(trip, today) == TripStatus::Current)
    }

    /// Trips starting after `today`, soonest first.
    #[must_use]
    pub fn upcoming_trips(&self, today: NaiveDate) -> Vec<Trip> {
        let mut upcoming = self.by_status(TripStatus::Upcoming, today);
        upcoming.sort_by_key(|trip| trip.start_date);
        upcoming
    }
}

/// Keeps the first occurrence of each id.
fn dedup_by_id(trips: Vec<Trip>) -> Vec<Trip> {
    let mut seen = std::collections::HashSet::new();
    trips
        .into_iter()
        .filter(|trip| seen.insert(trip.id.clone()))
        .collect()
}
