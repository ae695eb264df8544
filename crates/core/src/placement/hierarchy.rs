//! Cascading selection over the placement hierarchy.
//!
//! A room choice is only meaningful under its location and a rack choice only
//! under its room. Changing a parent therefore clears every descendant, and a
//! refreshed tree clears any choice that no longer resolves.

use stockdesk_common::{FieldError, ValidationError};
use stockdesk_domain::constants::CODE_UNKNOWN_NODE;
use stockdesk_domain::{
    HierarchySelection, LocationTree, Placement, Rack, Result, Room, StockDeskError,
};

const FIELD_LOCATION: &str = "location";
const FIELD_ROOM: &str = "room";
const FIELD_RACK: &str = "rack";

/// Rooms selectable under `selected_location`, in input order.
pub fn options_for_room<'a>(all_rooms: &'a [Room], selected_location: Option<&str>) -> Vec<&'a Room> {
    match selected_location {
        Some(location) => all_rooms.iter().filter(|room| room.location == location).collect(),
        None => Vec::new(),
    }
}

/// Racks selectable under `selected_room`, in input order.
pub fn options_for_rack<'a>(all_racks: &'a [Rack], selected_room: Option<&str>) -> Vec<&'a Rack> {
    match selected_room {
        Some(room) => all_racks.iter().filter(|rack| rack.room == room).collect(),
        None => Vec::new(),
    }
}

/// A new location always clears room and rack.
pub fn on_location_change(
    new_location: Option<&str>,
    _current: &HierarchySelection,
) -> HierarchySelection {
    HierarchySelection::new(new_location, None, None)
}

/// A new room keeps the location and clears the rack.
pub fn on_room_change(new_room: Option<&str>, current: &HierarchySelection) -> HierarchySelection {
    HierarchySelection {
        location: current.location.clone(),
        room: new_room.map(str::to_string),
        rack: None,
    }
}

pub fn on_rack_change(new_rack: Option<&str>, current: &HierarchySelection) -> HierarchySelection {
    HierarchySelection { rack: new_rack.map(str::to_string), ..current.clone() }
}

/// Drop the parts of `selection` that no longer resolve in `tree`.
///
/// Top-down: an unknown location clears everything, a room outside the
/// location clears room and rack, a rack outside the room clears the rack.
pub fn revalidate(selection: &HierarchySelection, tree: &LocationTree) -> HierarchySelection {
    let location = selection.location.as_deref().filter(|id| tree.location(id).is_some());
    let room = selection.room.as_deref().filter(|id| {
        location.is_some_and(|loc| tree.room(id).is_some_and(|room| room.location == loc))
    });
    let rack = selection.rack.as_deref().filter(|id| {
        room.is_some_and(|parent| tree.rack(id).is_some_and(|rack| rack.room == parent))
    });

    HierarchySelection::new(location, room, rack)
}

/// Stateful selector bound to one fetched [`LocationTree`].
#[derive(Debug, Clone, Default)]
pub struct LocationHierarchySelector {
    tree: LocationTree,
    selection: HierarchySelection,
}

impl LocationHierarchySelector {
    pub fn new(tree: LocationTree) -> Self {
        Self { tree, selection: HierarchySelection::default() }
    }

    /// Start from an existing placement, keeping only what resolves.
    pub fn with_placement(tree: LocationTree, placement: &Placement) -> Self {
        let selection = revalidate(&HierarchySelection::from_placement(placement), &tree);
        Self { tree, selection }
    }

    pub fn tree(&self) -> &LocationTree {
        &self.tree
    }

    pub fn selection(&self) -> &HierarchySelection {
        &self.selection
    }

    /// Current choice as a placement; `None` until a location is chosen.
    pub fn placement(&self) -> Option<Placement> {
        self.selection.to_placement()
    }

    pub fn room_options(&self) -> Vec<&Room> {
        options_for_room(&self.tree.rooms, self.selection.location.as_deref())
    }

    pub fn rack_options(&self) -> Vec<&Rack> {
        options_for_rack(&self.tree.racks, self.selection.room.as_deref())
    }

    pub fn select_location(&mut self, location: Option<&str>) -> Result<&HierarchySelection> {
        if let Some(id) = location {
            if self.tree.location(id).is_none() {
                return Err(unknown(FIELD_LOCATION, "Location not found", id));
            }
        }
        self.selection = on_location_change(location, &self.selection);
        Ok(&self.selection)
    }

    pub fn select_room(&mut self, room: Option<&str>) -> Result<&HierarchySelection> {
        if let Some(id) = room {
            if !self.room_options().iter().any(|r| r.id == id) {
                return Err(unknown(
                    FIELD_ROOM,
                    "Room does not belong to the selected location",
                    id,
                ));
            }
        }
        self.selection = on_room_change(room, &self.selection);
        Ok(&self.selection)
    }

    pub fn select_rack(&mut self, rack: Option<&str>) -> Result<&HierarchySelection> {
        if let Some(id) = rack {
            if !self.rack_options().iter().any(|r| r.id == id) {
                return Err(unknown(FIELD_RACK, "Rack does not belong to the selected room", id));
            }
        }
        self.selection = on_rack_change(rack, &self.selection);
        Ok(&self.selection)
    }

    /// Swap in a freshly fetched tree. Returns `true` when part of the
    /// selection was cleared because it no longer resolves.
    pub fn refresh(&mut self, tree: LocationTree) -> bool {
        let revalidated = revalidate(&self.selection, &tree);
        let changed = revalidated != self.selection;
        if changed {
            tracing::debug!(
                before = ?self.selection,
                after = ?revalidated,
                "placement.selection_cleared"
            );
        }
        self.tree = tree;
        self.selection = revalidated;
        changed
    }

    pub fn clear(&mut self) {
        self.selection = HierarchySelection::default();
    }
}

fn unknown(field: &str, message: &str, id: &str) -> StockDeskError {
    let mut errors = ValidationError::new();
    errors.push(FieldError::new(field, message).with_code(CODE_UNKNOWN_NODE).with_metadata("id", id));
    StockDeskError::Validation(errors)
}
