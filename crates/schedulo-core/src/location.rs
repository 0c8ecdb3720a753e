//! Where an event or course meets.
//!
//! Persisted locations carry no explicit tag. The variant is recognized by
//! which field is present: `bldgCode`, `link` or `address`.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// A room in a campus building, e.g. `500OLS 129`.
    OnCampus { bldg_code: String, room_number: u16 },
    /// An online meeting.
    Virtual { link: String },
    /// A street address off campus.
    OffCampus { address: String },
}

impl Location {
    pub fn on_campus(bldg_code: impl Into<String>, room_number: u16) -> Result<Self, ValidationError> {
        let bldg_code = bldg_code.into();
        if bldg_code.is_empty() {
            return Err(ValidationError::EmptyField("building code"));
        }
        Ok(Location::OnCampus {
            bldg_code,
            room_number,
        })
    }

    pub fn virtual_link(link: impl Into<String>) -> Result<Self, ValidationError> {
        let link = link.into();
        if link.is_empty() {
            return Err(ValidationError::EmptyField("link"));
        }
        Ok(Location::Virtual { link })
    }

    /// An empty address is allowed; older files store one for "somewhere
    /// off campus".
    pub fn off_campus(address: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Location::OffCampus {
            address: address.into(),
        })
    }

    /// Full building name for on-campus locations with a known building.
    pub fn building_name(&self) -> Option<&'static str> {
        match self {
            Location::OnCampus { bldg_code, .. } => building_name(bldg_code),
            _ => None,
        }
    }
}

impl FromStr for Location {
    type Err = ValidationError;

    /// Parses the class-schedule form `"<building> <room>"` into an
    /// on-campus location.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidLocation(s.to_string());
        let mut parts = s.split(' ');
        let (Some(bldg), Some(room), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let room: u16 = room.parse().map_err(|_| invalid())?;
        Location::on_campus(bldg, room).map_err(|_| invalid())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::OnCampus {
                bldg_code,
                room_number,
            } => write!(f, "{} {}", bldg_code, room_number),
            Location::Virtual { link } => f.write_str(link),
            Location::OffCampus { address } => f.write_str(address),
        }
    }
}

/// Campus building codes as printed in the class schedule.
const BUILDINGS: &[(&str, &str)] = &[
    ("ANCH", "Evinrude Marine Operations Center (Anchorage)"),
    ("118RBT", "Robert's Hall"),
    ("119EVH", "Evans Hall"),
    ("255RNT", "Music House"),
    ("267RNT", "Music Program Studios"),
    ("402QAD", "Quadrangle Classrooms"),
    ("403QAD", "Quadrangle Classrooms"),
    ("405QAD", "Dan Dahle Building"),
    ("407QAD", "DMES Lab"),
    ("410GLE", "Gleason Performing Arts Center"),
    ("420CRF", "Crawford Building"),
    ("424LNK", "Link Building"),
    ("427FRU", "Frueauff Building"),
    ("428EVL", "Evans Library Pavilion"),
    ("439SHP", "Shephard Building"),
    ("460SKU", "Skurla Hall (Aeronautics Building)"),
    ("500OLS", "F.W. Olin Life Sciences Building"),
    ("501OEC", "F.W. Olin Engineering Complex"),
    ("502OPS", "F.W. Olin Physical Sciences Center"),
    ("504LSA", "L3Harris Center for Science and Engineering"),
    ("510CLE", "Clemente Center"),
    ("512UNP", "University Plaza at Florida Tech"),
    ("538LAB", "Aerospace Laboratories and Machine Shop"),
    ("540MIL", "Military Sciences/Facilities Operations/Shipping Building"),
    ("545AUT", "The Scott Center for Autism Treatment"),
    ("547WAV", "Surf Mechanics Lab"),
    ("610CTR", "All Faiths Center"),
    ("710FTC", "L3Harris Commons"),
    ("910CAI", "Center for Aeronautics & Innovation"),
    ("927BBO", "Nathan M. Bisk College of Business / Babcock Oaks"),
    ("994BLR", "Emil Buehler Center for Aviation Training"),
];

/// Looks up a building name by code. Codes are matched exactly.
pub fn building_name(code: &str) -> Option<&'static str> {
    BUILDINGS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Every known `(code, name)` pair.
pub fn buildings() -> impl Iterator<Item = (&'static str, &'static str)> {
    BUILDINGS.iter().copied()
}
