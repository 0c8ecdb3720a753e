//! # Schedulo Core
//!
//! Platform-free logic for Schedulo: the compact course identifier, the
//! scheduling domain model, the in-memory registries and the codec that
//! turns them into the storage document.
//!
//! Nothing here touches the filesystem or a cipher. The root `schedulo`
//! crate adds encryption at rest and the command-line front end.

pub mod academic;
pub mod alphabet;
pub mod category;
pub mod course;
pub mod course_id;
pub mod datetime;
pub mod document;
pub mod error;
pub mod event;
pub mod location;
pub mod mood;
pub mod registry;
pub mod semester;

pub use error::{DecodeError, ValidationError};
pub use registry::Registries;
