//! Macro for implementing Display and FromStr for wire enums
//!
//! The service encodes enumerations (profile type, attachment status, scan
//! schedule, ...) as lowercase strings. Serde handles the JSON side through
//! `rename_all`; this macro gives the same strings to `Display` and `FromStr`
//! so callers can parse CLI input or query parameters.
//!
//! # Example
//!
//! ```rust
//! use compliance_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Schedule {
//!     Daily,
//!     Every7Days,
//! }
//!
//! impl_wire_enum_conversions!(Schedule {
//!     Daily => "daily",
//!     Every7Days => "every_7_days",
//! });
//!
//! assert_eq!(Schedule::Every7Days.to_string(), "every_7_days");
//! ```

/// Implements Display and FromStr traits for wire enums
///
/// - Display writes the wire string
/// - FromStr parses case-insensitively and names the enum in its error
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestState {
        Enabled,
        Disabled,
    }

    impl_wire_enum_conversions!(TestState {
        Enabled => "enabled",
        Disabled => "disabled",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestState::Enabled.to_string(), "enabled");
        assert_eq!(TestState::Disabled.to_string(), "disabled");
    }

    #[test]
    fn test_fromstr_mixed_case() {
        assert_eq!(TestState::from_str("ENABLED").unwrap(), TestState::Enabled);
        assert_eq!(TestState::from_str("DisAbled").unwrap(), TestState::Disabled);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestState::from_str("paused");
        assert!(result.unwrap_err().contains("Invalid TestState: paused"));
        assert!(TestState::from_str("").is_err());
    }
}
