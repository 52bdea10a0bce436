//! Macro for implementing Display and FromStr for label enums
//!
//! Several domain enums travel as human-readable labels (`"Sleep"`,
//! `"Urgent"`, `"Productivity Hack"`): they appear in AI prompts, in JSON
//! returned by the AI gateway and in the UI. This macro provides a single
//! implementation of both conversions with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use healthprod_domain::impl_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mood {
//!     Calm,
//!     Energetic,
//! }
//!
//! impl_label_conversions!(Mood {
//!     Calm => "Calm",
//!     Energetic => "Energetic",
//! });
//!
//! assert_eq!("calm".parse::<Mood>().unwrap(), Mood::Calm);
//! assert_eq!(Mood::Energetic.to_string(), "Energetic");
//! ```

/// Implements Display and FromStr traits for label enums
///
/// This macro generates:
/// - Display trait: writes the canonical label
/// - FromStr trait: parses case-insensitive labels (surrounding whitespace
///   ignored) and fails with `HealthProdError::Validation`
#[macro_export]
macro_rules! impl_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical label for this variant.
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::HealthProdError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::HealthProdError::Validation(format!(
                    "Invalid {}: {}",
                    stringify!($enum_name),
                    s
                )))
            }
        }
    };
}
