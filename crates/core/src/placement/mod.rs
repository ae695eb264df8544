//! Location → Room → Rack hierarchy

pub mod hierarchy;
pub mod ports;
pub mod service;

pub use hierarchy::{
    on_location_change, on_rack_change, on_room_change, options_for_rack, options_for_room,
    revalidate, LocationHierarchySelector,
};
pub use service::LocationService;
