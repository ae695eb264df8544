//! Shared test helpers for `stockdesk-core` integration tests.
//!
//! In-memory stand-ins for the backend ports plus small fixture builders, so
//! flow tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod stock;

use stockdesk_domain::{Location, LocationTree, Placement, Rack, Room};

/// Two sites; `L1` has rooms `R1` (racks `K1`, `K2`) and `R2`, `L2` has `R3`.
pub fn sample_tree() -> LocationTree {
    let location = |id: &str| Location {
        id: id.to_string(),
        name: format!("Site {id}"),
        code: None,
        description: None,
    };
    let room = |id: &str, location: &str| Room {
        id: id.to_string(),
        name: format!("Room {id}"),
        location: location.to_string(),
    };
    let rack = |id: &str, room: &str| Rack {
        id: id.to_string(),
        name: format!("Rack {id}"),
        room: room.to_string(),
    };

    LocationTree::new(
        vec![location("L1"), location("L2")],
        vec![room("R1", "L1"), room("R2", "L1"), room("R3", "L2")],
        vec![rack("K1", "R1"), rack("K2", "R1"), rack("K3", "R3")],
    )
}

pub fn shelf_k1() -> Placement {
    Placement::at("L1").in_room("R1").on_rack("K1")
}
