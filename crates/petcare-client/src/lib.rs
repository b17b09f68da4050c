//! PetCare client library.
//!
//! The client-side half of the write path: a persistent session store
//! (token, user profile, patient id), a request gateway that turns every
//! outbound call into a uniform three-way outcome, and the typed API
//! service page controllers call into.
//!
//! # Modules
//!
//! - [`session`]: persistent key-value session store
//! - [`gateway`]: request chokepoint and outcome classification
//! - [`api`]: typed calls (login, prescription submit)

pub mod api;
pub mod gateway;
pub mod session;

pub use api::{ApiService, PrescriptionForm};
pub use gateway::{ApiOutcome, RequestGateway};
pub use session::{SessionStore, UserProfile};
