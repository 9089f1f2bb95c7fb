//! Enumerated codes used by the API and their display labels.
//!
//! Every dropdown and every card reads its labels from here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in display order
            pub const fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            /// Wire code
            pub const fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Human readable label
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    other => Err(Error::general(format!(
                        concat!("unknown ", stringify!($name), " code: {}"),
                        other
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl CatalogEntry for $name {
            fn code(self) -> &'static str {
                $name::code(self)
            }

            fn label(self) -> &'static str {
                $name::label(self)
            }
        }
    };
}

/// Code and label lookup shared by every table in this module
pub trait CatalogEntry: Copy {
    fn code(self) -> &'static str;
    fn label(self) -> &'static str;
}

/// A categorical value as read from a record.
///
/// Codes missing from the table are kept verbatim in `Other` so that a
/// single odd record does not fail a whole list; they display as the raw
/// code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coded<T> {
    Known(T),
    Other(String),
}

impl<T: CatalogEntry> Coded<T> {
    /// The table entry, if the code is in the table
    pub fn known(&self) -> Option<T> {
        match self {
            Coded::Known(value) => Some(*value),
            Coded::Other(_) => None,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Coded::Known(value) => value.code(),
            Coded::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Coded::Known(value) => value.label(),
            Coded::Other(raw) => raw,
        }
    }
}

impl<T> From<T> for Coded<T> {
    fn from(value: T) -> Self {
        Coded::Known(value)
    }
}

impl<T: Default> Default for Coded<T> {
    fn default() -> Self {
        Coded::Known(T::default())
    }
}

impl<T: CatalogEntry> fmt::Display for Coded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

coded_enum! {
    /// Kind of unit
    PropertyType {
        StandaloneVilla => ("standalone_villa", "Stand Alone Villa"),
        Apartment => ("apartment", "Apartment"),
        Chalet => ("chalet", "Chalet"),
        TwinVilla => ("twin_villa", "Twin Villa"),
        Duplex => ("duplex", "Duplex"),
    }
}

coded_enum! {
    /// Built-up area bucket
    AreaRange {
        From100To150 => ("100_to_150", "100-150 m²"),
        From150To200 => ("150_to_200", "150-200 m²"),
        From200To250 => ("200_to_250", "200-250 m²"),
        From250To300 => ("250_to_300", "250-300 m²"),
    }
}

coded_enum! {
    /// Asking price bucket
    PriceRange {
        OneToTwoMillion => ("1_to_2_million", "1-2M"),
        TwoToThreeMillion => ("2_to_3_million", "2-3M"),
        ThreeToFourMillion => ("3_to_4_million", "3-4M"),
        FourToFiveMillion => ("4_to_5_million", "4-5M"),
        FiveToSixMillion => ("5_to_6_million", "5-6M"),
    }
}

coded_enum! {
    PropertyStatus {
        Available => ("available", "Available"),
        Reserved => ("reserved", "Reserved"),
        Sold => ("sold", "Sold"),
    }
}

coded_enum! {
    Role {
        Admin => ("admin", "Admin"),
        Broker => ("broker", "Broker"),
        Buyer => ("buyer", "Buyer"),
    }
}

coded_enum! {
    AppointmentType {
        Sale => ("sale", "Sale"),
        Rent => ("rent", "Rent"),
    }
}

coded_enum! {
    AppointmentStatus {
        Pending => ("pending", "Pending"),
        Done => ("done", "Done"),
    }
}

coded_enum! {
    /// Amenities a project can advertise; stored on the record by label
    ProjectFeature {
        Parking => ("Parking In The Area", "Parking In The Area"),
        AirConditioning => ("Air Conditioning", "Air Conditioning"),
        SecurityGuard => ("Security Guard", "Security Guard"),
        Terrace => ("Terrace", "Terrace"),
        Elevator => ("Elevator Lift", "Elevator Lift"),
        Balcony => ("Balcony", "Balcony"),
        Supermarket => ("SuperMarket", "SuperMarket"),
    }
}

impl Default for PropertyStatus {
    fn default() -> Self {
        PropertyStatus::Available
    }
}

/// Options whose label contains `needle`, ignoring case.
///
/// Backs the type-to-filter dropdowns; an empty needle keeps everything.
pub fn filter_options<T>(options: &[T], needle: &str) -> Vec<T>
where
    T: Copy + fmt::Display,
{
    let needle = needle.trim().to_lowercase();
    options
        .iter()
        .copied()
        .filter(|opt| needle.is_empty() || opt.to_string().to_lowercase().contains(&needle))
        .collect()
}
