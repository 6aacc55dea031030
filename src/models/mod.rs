pub mod booking;
pub mod concert;

pub use booking::{Booking, BookingWithConcert, NewBooking};
pub use concert::{Concert, ConcertSummary};
