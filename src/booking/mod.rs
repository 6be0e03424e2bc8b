//! Bookings: drafts from the booking forms, priced, persisted and tracked
//! through their status lifecycle.

pub mod models;
pub mod routes;
pub mod service;
pub mod store;

pub use models::{
    BookingDraft, BookingRecord, BookingStats, BookingStatus, Customer, DriverAssignment,
    PaymentMethod, PaymentStatus, StatusChange,
};
pub use routes::router;
pub use service::{BookingError, BookingService};
pub use store::{BookingStore, InMemoryBookingStore, StoreError};
