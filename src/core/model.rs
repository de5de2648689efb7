use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Numeric listing identifier. Seed listings use small integers, listings
/// created at runtime use milliseconds since the unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub u64);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ListingId {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .map(ListingId)
            .ok_or_else(|| UnknownVariant {
                kind: "listing id",
                value: s.to_string(),
            })
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

vocabulary! {
    /// Neighbourhoods a room can be listed in.
    Location, "location" {
        Downtown => "Downtown",
        NorthSide => "North Side",
        SouthSide => "South Side",
        EastSide => "East Side",
        WestSide => "West Side",
        Central => "Central",
        Suburban => "Suburban",
        UniversityArea => "University Area",
    }
}

vocabulary! {
    Amenity, "amenity" {
        WiFi => "WiFi",
        AttachedBathroom => "Attached Bathroom",
        Furnished => "Furnished",
        Ac => "AC",
        KitchenAccess => "Kitchen Access",
        Parking => "Parking",
        Balcony => "Balcony",
        Tv => "TV",
        WashingMachine => "Washing Machine",
        GymAccess => "Gym Access",
        NearMetro => "Near Metro",
        PetsAllowed => "Pets Allowed",
    }
}

/// A single rentable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub rent: u64,
    pub deposit: u64,
    pub description: String,
    pub images: Vec<String>,
    pub location: Location,
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub featured: bool,
    pub rating: Option<f32>,
    pub reviews: Option<u32>,
    pub owner: String,
}

impl Listing {
    pub fn has_amenity(&self, amenity: Amenity) -> bool {
        self.amenities.contains(&amenity)
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner == email
    }
}

/// The person currently using the application. No password is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_parses_display_names() {
        assert_eq!("University Area".parse::<Location>(), Ok(Location::UniversityArea));
        assert_eq!("wifi".parse::<Amenity>(), Ok(Amenity::WiFi));
        assert!("Moon Base".parse::<Location>().is_err());
    }

    #[test]
    fn test_vocabulary_serializes_as_label() {
        let json = serde_json::to_string(&Amenity::KitchenAccess).unwrap();
        assert_eq!(json, "\"Kitchen Access\"");
        assert_eq!(Location::ALL.len(), 8);
        assert_eq!(Amenity::ALL.len(), 12);
    }

    #[test]
    fn test_listing_id_rejects_non_numeric_and_zero() {
        assert_eq!("42".parse::<ListingId>(), Ok(ListingId(42)));
        assert!("abc".parse::<ListingId>().is_err());
        assert!("0".parse::<ListingId>().is_err());
        assert!("".parse::<ListingId>().is_err());
    }
}
