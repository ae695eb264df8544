//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Adjustment kinds, reservation types and hierarchy levels all travel as
//! lowercase strings. This macro gives each of them one place where the
//! variant ↔ string mapping lives.
//!
//! # Example
//!
//! ```rust
//! use stockdesk_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shelf {
//!     Top,
//!     Bottom,
//! }
//!
//! impl_domain_status_conversions!(Shelf {
//!     Top => "top",
//!     Bottom => "bottom",
//! });
//!
//! assert_eq!(Shelf::Top.to_string(), "top");
//! assert_eq!("BOTTOM".parse::<Shelf>(), Ok(Shelf::Bottom));
//! ```

/// Implements Display and FromStr traits for status enums
///
/// - Display writes the lowercase wire string
/// - FromStr parses case-insensitively and names the enum in its error
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
