//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Messages
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again";

// Pagination
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 500;
pub const FIRST_PAGE: u32 = 1;

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Form field identifiers reported in validation errors
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_REASON: &str = "reason";
pub const FIELD_RESERVATION_TYPE: &str = "reservationType";
pub const FIELD_RESERVED_UNTIL: &str = "reservedUntil";
pub const FIELD_TO_LOCATION: &str = "toLocation";
pub const FIELD_TO_ROOM: &str = "toRoom";
pub const FIELD_TO_RACK: &str = "toRack";
pub const FIELD_PRODUCT: &str = "product";

// Validation error codes
pub const CODE_EXCEEDS_STOCK: &str = "exceeds_stock";
pub const CODE_EXCEEDS_AVAILABLE: &str = "exceeds_available";
pub const CODE_EXCEEDS_RESERVED: &str = "exceeds_reserved";
pub const CODE_SAME_PLACEMENT: &str = "same_placement";
pub const CODE_UNKNOWN_NODE: &str = "unknown_node";
pub const CODE_OVERFLOW: &str = "overflow";
