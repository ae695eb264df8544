//! Physical placement hierarchy: Location → Room → Rack

use serde::{Deserialize, Deserializer, Serialize};

use crate::impl_domain_status_conversions;

/// Where stock physically sits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub location_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack_id: Option<String>,
}

impl Placement {
    /// Placement at a location with no room or rack
    pub fn at(location_id: impl Into<String>) -> Self {
        Self { location_id: location_id.into(), room_id: None, rack_id: None }
    }

    pub fn in_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn on_rack(mut self, rack_id: impl Into<String>) -> Self {
        self.rack_id = Some(rack_id.into());
        self
    }

    /// True when all three fields are equal; blank optional ids count as
    /// absent.
    pub fn same_as(&self, other: &Self) -> bool {
        fn norm(id: Option<&String>) -> Option<&str> {
            id.map(|s| s.trim()).filter(|s| !s.is_empty())
        }

        self.location_id.trim() == other.location_id.trim()
            && norm(self.room_id.as_ref()) == norm(other.room_id.as_ref())
            && norm(self.rack_id.as_ref()) == norm(other.rack_id.as_ref())
    }
}

/// Top level of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A room inside exactly one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// Owning location id
    #[serde(deserialize_with = "reference_id")]
    pub location: String,
}

/// A rack inside exactly one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// Owning room id
    #[serde(deserialize_with = "reference_id")]
    pub room: String,
}

/// Accepts either a bare id or a populated `{ "_id" | "id": ... }` object.
fn reference_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Reference {
        Id(String),
        Object {
            #[serde(alias = "_id")]
            id: String,
        },
    }

    Ok(match Reference::deserialize(deserializer)? {
        Reference::Id(id) | Reference::Object { id } => id,
    })
}

/// Which collection of the hierarchy an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyLevel {
    Location,
    Room,
    Rack,
}

impl_domain_status_conversions!(HierarchyLevel {
    Location => "location",
    Room => "room",
    Rack => "rack",
});

impl HierarchyLevel {
    /// Plural collection name, as used in REST paths and wrapped payloads
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Location => "locations",
            Self::Room => "rooms",
            Self::Rack => "racks",
        }
    }

    /// Name of the parent reference field, if the level has a parent
    pub fn parent_field(&self) -> Option<&'static str> {
        match self {
            Self::Location => None,
            Self::Room => Some("location"),
            Self::Rack => Some("room"),
        }
    }
}

/// Create/update payload for any hierarchy node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent id; required for rooms and racks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl NodeDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn under(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// All three fetched collections, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTree {
    pub locations: Vec<Location>,
    pub rooms: Vec<Room>,
    pub racks: Vec<Rack>,
}

impl LocationTree {
    pub fn new(locations: Vec<Location>, rooms: Vec<Room>, racks: Vec<Rack>) -> Self {
        Self { locations, rooms, racks }
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn rack(&self, id: &str) -> Option<&Rack> {
        self.racks.iter().find(|r| r.id == id)
    }

    /// Location a rack ultimately belongs to
    pub fn location_of_rack(&self, rack_id: &str) -> Option<&str> {
        let rack = self.rack(rack_id)?;
        self.room(&rack.room).map(|room| room.location.as_str())
    }
}

/// The current `{location, room, rack}` choice of a cascading selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchySelection {
    pub location: Option<String>,
    pub room: Option<String>,
    pub rack: Option<String>,
}

impl HierarchySelection {
    pub fn new(
        location: Option<&str>,
        room: Option<&str>,
        rack: Option<&str>,
    ) -> Self {
        Self {
            location: location.map(str::to_string),
            room: room.map(str::to_string),
            rack: rack.map(str::to_string),
        }
    }

    pub fn from_placement(placement: &Placement) -> Self {
        Self {
            location: Some(placement.location_id.clone()),
            room: placement.room_id.clone(),
            rack: placement.rack_id.clone(),
        }
    }

    /// Placement for submission; `None` until a location is chosen.
    pub fn to_placement(&self) -> Option<Placement> {
        let location_id = self.location.as_ref().filter(|id| !id.trim().is_empty())?;
        Some(Placement {
            location_id: location_id.clone(),
            room_id: self.room.clone(),
            rack_id: self.rack.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_as_compares_all_three_fields() {
        let a = Placement::at("L1").in_room("R1").on_rack("K1");
        assert!(a.same_as(&a.clone()));
        assert!(!a.same_as(&Placement::at("L1").in_room("R1").on_rack("K2")));
        assert!(!a.same_as(&Placement::at("L1").in_room("R1")));
        assert!(Placement::at("L1").same_as(&Placement::at("L1").in_room("  ")));
    }

    #[test]
    fn room_accepts_populated_parent() {
        let populated: Room =
            serde_json::from_str(r#"{"_id": "R1", "name": "Cold room", "location": {"_id": "L1", "name": "Main"}}"#)
                .unwrap();
        assert_eq!(populated.location, "L1");

        let bare: Rack = serde_json::from_str(r#"{"id": "K1", "name": "A-1", "room": "R1"}"#).unwrap();
        assert_eq!(bare.room, "R1");
    }

    #[test]
    fn tree_resolves_rack_to_location() {
        let tree = LocationTree::new(
            vec![Location { id: "L1".into(), name: "Main".into(), code: None, description: None }],
            vec![Room { id: "R1".into(), name: "Cold".into(), location: "L1".into() }],
            vec![Rack { id: "K1".into(), name: "A".into(), room: "R1".into() }],
        );
        assert_eq!(tree.location_of_rack("K1"), Some("L1"));
        assert_eq!(tree.location_of_rack("K9"), None);
    }

    #[test]
    fn selection_requires_location_for_placement() {
        assert!(HierarchySelection::default().to_placement().is_none());
        let sel = HierarchySelection::new(Some("L1"), Some("R1"), None);
        assert_eq!(sel.to_placement(), Some(Placement::at("L1").in_room("R1")));
    }

    #[test]
    fn level_names() {
        assert_eq!(HierarchyLevel::Rack.collection(), "racks");
        assert_eq!(HierarchyLevel::Room.parent_field(), Some("location"));
        assert_eq!(HierarchyLevel::Location.parent_field(), None);
        assert_eq!(HierarchyLevel::Room.to_string(), "room");
    }
}
