use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four fixed office locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "DEL")]
    Del,
    #[serde(rename = "MUM")]
    Mum,
    #[serde(rename = "BLR")]
    Blr,
    #[serde(rename = "HYD")]
    Hyd,
}

impl Location {
    pub const ALL: [Location; 4] = [Location::Del, Location::Mum, Location::Blr, Location::Hyd];

    pub const fn as_str(self) -> &'static str {
        match self {
            Location::Del => "DEL",
            Location::Mum => "MUM",
            Location::Blr => "BLR",
            Location::Hyd => "HYD",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEL" => Ok(Location::Del),
            "MUM" => Ok(Location::Mum),
            "BLR" => Ok(Location::Blr),
            "HYD" => Ok(Location::Hyd),
            other => Err(format!(
                "invalid location: {other} (expected DEL|MUM|BLR|HYD)"
            )),
        }
    }
}

/// Per-location applicability flags. Always carries exactly the four fixed
/// keys; there is no way to add or remove one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationMap {
    #[serde(rename = "DEL")]
    pub del: bool,
    #[serde(rename = "MUM")]
    pub mum: bool,
    #[serde(rename = "BLR")]
    pub blr: bool,
    #[serde(rename = "HYD")]
    pub hyd: bool,
}

impl LocationMap {
    pub const fn new(del: bool, mum: bool, blr: bool, hyd: bool) -> Self {
        Self { del, mum, blr, hyd }
    }

    pub const fn all(value: bool) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, location: Location) -> bool {
        match location {
            Location::Del => self.del,
            Location::Mum => self.mum,
            Location::Blr => self.blr,
            Location::Hyd => self.hyd,
        }
    }

    pub fn set(&mut self, location: Location, value: bool) {
        match location {
            Location::Del => self.del = value,
            Location::Mum => self.mum = value,
            Location::Blr => self.blr = value,
            Location::Hyd => self.hyd = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, bool)> + '_ {
        Location::ALL.into_iter().map(|loc| (loc, self.get(loc)))
    }
}

/// Location narrowing for list views: a concrete site or "All Locations".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationFilter {
    #[default]
    All,
    Only(Location),
}

impl LocationFilter {
    pub fn matches(self, location: Location) -> bool {
        match self {
            LocationFilter::All => true,
            LocationFilter::Only(loc) => loc == location,
        }
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationFilter::All => f.write_str("All Locations"),
            LocationFilter::Only(loc) => loc.fmt(f),
        }
    }
}

impl FromStr for LocationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("all locations")
        {
            return Ok(LocationFilter::All);
        }
        trimmed.parse::<Location>().map(LocationFilter::Only)
    }
}

impl Serialize for LocationFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LocationFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
