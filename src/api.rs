mod client;
mod error;
mod resource;
mod search;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use resource::{HttpResource, Resource};
pub use search::{AppointmentSearch, CustomerSearch, DateRange, Search, VaccinationSearch, WorkDaySearch};
