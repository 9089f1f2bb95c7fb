//! Client-side view state, one slice per resource

mod slice;

pub use slice::*;

use crate::appointments::Appointment;
use crate::auth::{Session, User};
use crate::projects::Project;
use crate::properties::Property;
use crate::statistics::Statistics;

/// The dashboard's view state.
///
/// Built once at the root and handed to the pages that need it; clones share
/// the same slices.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub appointments: SharedSlice<Vec<Appointment>>,
    pub brokers: SharedSlice<Vec<User>>,
    pub buyers: SharedSlice<Vec<User>>,
    pub projects: SharedSlice<Vec<Project>>,
    pub properties: SharedSlice<Vec<Property>>,
    pub statistics: SharedSlice<Statistics>,
    pub auth: SharedSlice<Session>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
