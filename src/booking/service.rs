//! Booking lifecycle: validate a draft, price it, persist it, then track
//! status changes and driver assignment.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::pricing::vocabulary::{ServiceType, TripOption, VehicleType, Zone, AIRPORT_DESTINATION};
use crate::pricing::PriceResolver;

use super::models::{
    BookingDraft, BookingRecord, BookingStats, BookingStatus, PaymentStatus, StatusChange,
};
use super::store::{BookingStore, StoreError};

/// Booking error types
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },

    #[error("Booking {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Draft fields once parsed into the shared vocabulary
#[derive(Debug, Clone, Copy)]
struct Selection {
    service: ServiceType,
    vehicle: VehicleType,
    option: TripOption,
}

#[derive(Clone)]
pub struct BookingService {
    resolver: Arc<PriceResolver>,
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(resolver: Arc<PriceResolver>, store: Arc<dyn BookingStore>) -> Self {
        Self { resolver, store }
    }

    /// Validate, price and persist a booking.
    ///
    /// `today` is the earliest allowed departure date. A trip with no fixed
    /// price is still booked, carrying the quote marker instead of an amount.
    pub async fn create_booking(
        &self,
        draft: BookingDraft,
        today: NaiveDate,
    ) -> Result<BookingRecord, BookingError> {
        let selection = validate(&draft, today)?;

        let destination = match selection.service {
            ServiceType::AirportTransfer => AIRPORT_DESTINATION.to_string(),
            _ => draft.destination.trim().to_string(),
        };

        let price = self.resolver.resolve(
            selection.service,
            selection.vehicle,
            &destination,
            Some(selection.option),
        );

        let zone = match selection.service {
            ServiceType::RegionRental => self
                .resolver
                .table()
                .zone_of(&destination)
                .unwrap_or(Zone::Regions),
            service => service.zone(),
        };

        let now = Utc::now();
        let record = BookingRecord {
            id: Uuid::new_v4(),
            customer: draft.customer,
            pickup_location: draft.pickup_location.trim().to_string(),
            zone,
            destination,
            service_type: selection.service,
            vehicle_type: selection.vehicle,
            trip_option: selection.option,
            passengers: draft.passengers,
            luggage: draft.luggage,
            price,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: draft.payment_method,
            scheduled_date: draft.scheduled_date,
            scheduled_time: draft.scheduled_time,
            return_date: draft.return_date,
            return_time: draft.return_time,
            special_requests: draft.special_requests.filter(|s| !s.trim().is_empty()),
            driver_id: None,
            vehicle_id: None,
            created_at: now,
            updated_at: now,
        };

        let id = self.store.create_booking(record.clone()).await?;
        tracing::info!(
            booking_id = %id,
            service = record.service_type.slug(),
            destination = %record.destination,
            quote = record.price.is_quote_required(),
            "Booking created"
        );

        Ok(record)
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<Option<BookingRecord>, BookingError> {
        Ok(self.store.get_booking(id).await?)
    }

    pub async fn customer_bookings(
        &self,
        email: &str,
        limit: usize,
    ) -> Result<Vec<BookingRecord>, BookingError> {
        Ok(self.store.list_for_customer(email, limit).await?)
    }

    /// Change the booking and/or payment status
    pub async fn update_status(
        &self,
        id: Uuid,
        change: StatusChange,
    ) -> Result<BookingRecord, BookingError> {
        if change.is_empty() {
            return Err(BookingError::Validation {
                message: "Invalid status change".to_string(),
                errors: vec!["status or payment_status is required".to_string()],
            });
        }

        let record = self
            .store
            .update_status(id, change, Utc::now())
            .await?
            .ok_or(BookingError::NotFound(id))?;
        tracing::info!(
            booking_id = %id,
            status = ?record.status,
            payment_status = ?record.payment_status,
            "Booking status updated"
        );
        Ok(record)
    }

    /// Put a driver and vehicle on a booking
    pub async fn assign_driver(
        &self,
        id: Uuid,
        driver_id: &str,
        vehicle_id: &str,
    ) -> Result<BookingRecord, BookingError> {
        let (driver_id, vehicle_id) = (driver_id.trim(), vehicle_id.trim());
        let mut errors = Vec::new();
        if driver_id.is_empty() {
            errors.push("driver_id is required".to_string());
        }
        if vehicle_id.is_empty() {
            errors.push("vehicle_id is required".to_string());
        }
        if !errors.is_empty() {
            return Err(BookingError::Validation {
                message: "Invalid driver assignment".to_string(),
                errors,
            });
        }

        let record = self
            .store
            .assign_driver(id, driver_id, vehicle_id, Utc::now())
            .await?
            .ok_or(BookingError::NotFound(id))?;
        tracing::info!(booking_id = %id, driver_id, vehicle_id, "Driver assigned");
        Ok(record)
    }

    /// Booking counts, across all customers or for one email
    pub async fn booking_stats(&self, email: Option<&str>) -> Result<BookingStats, BookingError> {
        let records = match email {
            Some(email) => self.store.list_for_customer(email, usize::MAX).await?,
            None => self.store.list_all().await?,
        };
        Ok(BookingStats::tally(records.iter().map(|r| r.status)))
    }
}

/// Check a draft, collecting every problem rather than stopping at the first
fn validate(draft: &BookingDraft, today: NaiveDate) -> Result<Selection, BookingError> {
    let mut errors = Vec::new();

    let service = ServiceType::from_slug(&draft.service_type);
    if service.is_none() {
        errors.push(format!("unknown service type '{}'", draft.service_type));
    }

    let vehicle = VehicleType::from_slug(&draft.vehicle_type);
    if vehicle.is_none() {
        errors.push(format!("unknown vehicle type '{}'", draft.vehicle_type));
    }

    let option = TripOption::parse(&draft.trip_option);
    if option.is_none() {
        errors.push(format!("unknown trip option '{}'", draft.trip_option));
    }

    if draft.customer.name.trim().is_empty() {
        errors.push("customer name is required".to_string());
    }
    if !draft.customer.email.contains('@') {
        errors.push("customer email is invalid".to_string());
    }
    if draft.pickup_location.trim().is_empty() {
        errors.push("pickup location is required".to_string());
    }
    if service.is_some_and(|s| s != ServiceType::AirportTransfer)
        && draft.destination.trim().is_empty()
    {
        errors.push("destination is required".to_string());
    }

    if draft.passengers == 0 {
        errors.push("passengers must be at least 1".to_string());
    } else if let Some(vehicle) = vehicle {
        if draft.passengers > vehicle.capacity() {
            errors.push(format!(
                "{} seats at most {} passengers",
                vehicle.label(),
                vehicle.capacity()
            ));
        }
    }

    if draft.scheduled_date < today {
        errors.push("scheduled date is in the past".to_string());
    }

    if option.is_some_and(TripOption::is_round_trip) {
        match draft.return_date {
            None => errors.push("return date is required for a round trip".to_string()),
            Some(ret) if ret < draft.scheduled_date => {
                errors.push("return date is before the departure date".to_string())
            }
            Some(_) => {}
        }
    }

    match (service, vehicle, option) {
        (Some(service), Some(vehicle), Some(option)) if errors.is_empty() => Ok(Selection {
            service,
            vehicle,
            option,
        }),
        _ => Err(BookingError::Validation {
            message: "Invalid booking".to_string(),
            errors,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::models::Customer;
    use crate::booking::store::InMemoryBookingStore;
    use crate::pricing::{PriceResult, RuleTable};
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveTime};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn draft() -> BookingDraft {
        BookingDraft {
            customer: Customer {
                name: "Awa Diop".to_string(),
                email: "awa@example.sn".to_string(),
                phone: "+221 77 000 00 00".to_string(),
            },
            pickup_location: "Plateau, Dakar".to_string(),
            destination: String::new(),
            service_type: "airport-transfer".to_string(),
            vehicle_type: "berline".to_string(),
            trip_option: "aller-simple".to_string(),
            passengers: 2,
            luggage: 2,
            scheduled_date: NaiveDate::from_ymd_opt(2026, 10, 25).unwrap(),
            scheduled_time: NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
            return_date: None,
            return_time: None,
            payment_method: None,
            special_requests: Some("  ".to_string()),
        }
    }

    fn service_with(store: Arc<dyn BookingStore>) -> BookingService {
        let table = Arc::new(RuleTable::embedded().unwrap());
        BookingService::new(Arc::new(PriceResolver::new(table)), store)
    }

    fn validation_errors(err: BookingError) -> Vec<String> {
        match err {
            BookingError::Validation { errors, .. } => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    struct OfflineStore;

    #[async_trait]
    impl BookingStore for OfflineStore {
        async fn create_booking(&self, _record: BookingRecord) -> Result<Uuid, StoreError> {
            Err(StoreError::Unavailable("document store offline".to_string()))
        }

        async fn get_booking(&self, _id: Uuid) -> Result<Option<BookingRecord>, StoreError> {
            Err(StoreError::Unavailable("document store offline".to_string()))
        }

        async fn list_for_customer(
            &self,
            _email: &str,
            _limit: usize,
        ) -> Result<Vec<BookingRecord>, StoreError> {
            Ok(vec![])
        }

        async fn list_all(&self) -> Result<Vec<BookingRecord>, StoreError> {
            Err(StoreError::Unavailable("document store offline".to_string()))
        }

        async fn update_status(
            &self,
            _id: Uuid,
            _change: StatusChange,
            _at: DateTime<Utc>,
        ) -> Result<Option<BookingRecord>, StoreError> {
            Err(StoreError::Unavailable("document store offline".to_string()))
        }

        async fn assign_driver(
            &self,
            _id: Uuid,
            _driver_id: &str,
            _vehicle_id: &str,
            _at: DateTime<Utc>,
        ) -> Result<Option<BookingRecord>, StoreError> {
            Err(StoreError::Unavailable("document store offline".to_string()))
        }
    }

    // ==================== creation ====================

    #[tokio::test]
    async fn test_airport_booking_is_priced_and_stored() {
        let store = Arc::new(InMemoryBookingStore::new());
        let service = service_with(store.clone());

        let record = service.create_booking(draft(), today()).await.unwrap();

        assert_eq!(record.zone, Zone::Airport);
        assert_eq!(record.destination, AIRPORT_DESTINATION);
        assert_eq!(record.price.amount(), Some(25000));
        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(record.payment_status, PaymentStatus::Pending);
        assert!(record.special_requests.is_none());
        assert_eq!(store.get_booking(record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_region_booking_uses_destination_zone() {
        let service = service_with(Arc::new(InMemoryBookingStore::new()));
        let mut d = draft();
        d.service_type = "region-rental".to_string();
        d.destination = " Saint-Louis ".to_string();
        d.trip_option = "aller-retour".to_string();
        d.return_date = Some(NaiveDate::from_ymd_opt(2026, 10, 27).unwrap());

        let record = service.create_booking(d, today()).await.unwrap();
        assert_eq!(record.zone, Zone::Regions);
        assert_eq!(record.destination, "Saint-Louis");
        assert_eq!(record.price.amount(), Some(150000));

        let mut d = draft();
        d.service_type = "region-rental".to_string();
        d.destination = "Rufisque".to_string();
        let record = service.create_booking(d, today()).await.unwrap();
        assert_eq!(record.zone, Zone::Suburbs);
    }

    #[tokio::test]
    async fn test_unpriced_trip_is_booked_as_quote() {
        let service = service_with(Arc::new(InMemoryBookingStore::new()));
        let mut d = draft();
        d.service_type = "region-rental".to_string();
        d.destination = "Tambacounda".to_string();

        let record = service.create_booking(d, today()).await.unwrap();
        assert_eq!(record.price, PriceResult::QuoteRequired);
        assert_eq!(record.zone, Zone::Regions);
    }

    #[tokio::test]
    async fn test_customer_bookings() {
        let service = service_with(Arc::new(InMemoryBookingStore::new()));
        service.create_booking(draft(), today()).await.unwrap();
        service.create_booking(draft(), today()).await.unwrap();

        let found = service.customer_bookings("awa@example.sn", 10).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(service.customer_bookings("nobody@example.sn", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let service = service_with(Arc::new(OfflineStore));
        let err = service.create_booking(draft(), today()).await.unwrap_err();
        assert!(matches!(err, BookingError::Store(StoreError::Unavailable(_))));
        assert!(err.to_string().contains("offline"));
    }

    // ==================== lifecycle ====================

    #[tokio::test]
    async fn test_status_and_payment_updates() {
        let service = service_with(Arc::new(InMemoryBookingStore::new()));
        let created = service.create_booking(draft(), today()).await.unwrap();

        let confirmed = service
            .update_status(
                created.id,
                StatusChange {
                    status: Some(BookingStatus::Confirmed),
                    payment_status: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.payment_status, PaymentStatus::Pending);
        assert!(confirmed.updated_at >= created.updated_at);

        let paid = service
            .update_status(
                created.id,
                StatusChange {
                    status: None,
                    payment_status: Some(PaymentStatus::Paid),
                },
            )
            .await
            .unwrap();
        assert_eq!(paid.status, BookingStatus::Confirmed);
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_empty_status_change_is_rejected() {
        let service = service_with(Arc::new(InMemoryBookingStore::new()));
        let created = service.create_booking(draft(), today()).await.unwrap();

        let errors = validation_errors(
            service
                .update_status(created.id, StatusChange::default())
                .await
                .unwrap_err(),
        );
        assert_eq!(errors, vec!["status or payment_status is required".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_booking_is_not_found() {
        let service = service_with(Arc::new(InMemoryBookingStore::new()));
        let id = Uuid::new_v4();
        let change = StatusChange {
            status: Some(BookingStatus::Cancelled),
            payment_status: None,
        };

        let err = service.update_status(id, change).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound(missing) if missing == id));

        let err = service.assign_driver(id, "drv-1", "veh-1").await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_assign_driver() {
        let service = service_with(Arc::new(InMemoryBookingStore::new()));
        let created = service.create_booking(draft(), today()).await.unwrap();

        let assigned = service
            .assign_driver(created.id, " drv-7 ", "veh-dk-1204")
            .await
            .unwrap();
        assert_eq!(assigned.status, BookingStatus::DriverAssigned);
        assert_eq!(assigned.driver_id.as_deref(), Some("drv-7"));
        assert_eq!(assigned.vehicle_id.as_deref(), Some("veh-dk-1204"));

        let errors = validation_errors(service.assign_driver(created.id, "", " ").await.unwrap_err());
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn test_booking_stats() {
        let service = service_with(Arc::new(InMemoryBookingStore::new()));
        let mut ids = Vec::new();
        for _ in 0..4 {
            ids.push(service.create_booking(draft(), today()).await.unwrap().id);
        }
        let mut other = draft();
        other.customer.email = "other@example.sn".to_string();
        service.create_booking(other, today()).await.unwrap();

        service.assign_driver(ids[0], "drv-1", "veh-1").await.unwrap();
        for (id, status) in [(ids[1], BookingStatus::Completed), (ids[2], BookingStatus::Cancelled)] {
            let change = StatusChange {
                status: Some(status),
                payment_status: None,
            };
            service.update_status(id, change).await.unwrap();
        }

        let all = service.booking_stats(None).await.unwrap();
        assert_eq!(
            all,
            BookingStats {
                total: 5,
                pending: 3,
                completed: 1,
                cancelled: 1,
            }
        );

        let awa = service.booking_stats(Some("awa@example.sn")).await.unwrap();
        assert_eq!(awa.total, 4);
        assert_eq!(awa.pending, 2);
    }

    #[tokio::test]
    async fn test_stats_report_store_failure() {
        let service = service_with(Arc::new(OfflineStore));
        let err = service.booking_stats(None).await.unwrap_err();
        assert!(matches!(err, BookingError::Store(_)));
    }

    // ==================== validation ====================

    #[test]
    fn test_valid_draft() {
        let selection = validate(&draft(), today()).unwrap();
        assert_eq!(selection.service, ServiceType::AirportTransfer);
        assert_eq!(selection.vehicle, VehicleType::Sedan);
        assert_eq!(selection.option, TripOption::OneWay);
    }

    #[test]
    fn test_unknown_identifiers_are_rejected() {
        let mut d = draft();
        d.service_type = "boat".to_string();
        d.vehicle_type = "limousine".to_string();
        d.trip_option = "forever".to_string();

        let errors = validation_errors(validate(&d, today()).unwrap_err());
        assert!(errors.iter().any(|e| e.contains("boat")));
        assert!(errors.iter().any(|e| e.contains("limousine")));
        assert!(errors.iter().any(|e| e.contains("forever")));
        assert_eq!(errors.len(), 3, "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_destination_required_outside_airport() {
        let mut d = draft();
        d.service_type = "dakar-rental".to_string();
        d.trip_option = "journee".to_string();
        let errors = validation_errors(validate(&d, today()).unwrap_err());
        assert_eq!(errors, vec!["destination is required".to_string()]);
    }

    #[test]
    fn test_passenger_limits() {
        let mut d = draft();
        d.passengers = 0;
        let errors = validation_errors(validate(&d, today()).unwrap_err());
        assert_eq!(errors, vec!["passengers must be at least 1".to_string()]);

        d.passengers = 5;
        let errors = validation_errors(validate(&d, today()).unwrap_err());
        assert_eq!(errors, vec!["Berline seats at most 4 passengers".to_string()]);

        d.vehicle_type = "minibus15".to_string();
        assert!(validate(&d, today()).is_ok());
    }

    #[test]
    fn test_dates() {
        let mut d = draft();
        d.scheduled_date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let errors = validation_errors(validate(&d, today()).unwrap_err());
        assert_eq!(errors, vec!["scheduled date is in the past".to_string()]);

        d.scheduled_date = today();
        assert!(validate(&d, today()).is_ok());
    }

    #[test]
    fn test_round_trip_needs_valid_return() {
        let mut d = draft();
        d.trip_option = "aller-retour".to_string();
        let errors = validation_errors(validate(&d, today()).unwrap_err());
        assert_eq!(errors, vec!["return date is required for a round trip".to_string()]);

        d.return_date = Some(NaiveDate::from_ymd_opt(2026, 10, 24).unwrap());
        let errors = validation_errors(validate(&d, today()).unwrap_err());
        assert_eq!(errors, vec!["return date is before the departure date".to_string()]);

        d.return_date = Some(d.scheduled_date);
        assert!(validate(&d, today()).is_ok());
    }

    #[test]
    fn test_customer_fields() {
        let mut d = draft();
        d.customer.name = " ".to_string();
        d.customer.email = "awa.example.sn".to_string();
        d.pickup_location = String::new();
        let errors = validation_errors(validate(&d, today()).unwrap_err());
        assert_eq!(errors.len(), 3);
    }
}
