// src/form/mod.rs
// Form field state for a single property

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PredictError, Result};

pub mod options;

pub use options::{
    fallback_options, range_hint, Bounds, FormOptionsLoader, LoadedOptions,
    OPTIONS_FALLBACK_MESSAGE,
};

/// Separator used by the service for the amenities string
pub const AMENITY_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Categorical,
    Numeric,
    Boolean,
    /// Maintained through amenity toggles, never typed in
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PropertyType,
    RoomType,
    BedType,
    CancellationPolicy,
    City,
    Accommodates,
    Bathrooms,
    Bedrooms,
    Beds,
    AmenitiesCount,
    AmenitiesList,
    CleaningFee,
    InstantBookable,
}

impl Field {
    /// Input order of the form
    pub const ALL: [Field; 13] = [
        Field::PropertyType,
        Field::RoomType,
        Field::City,
        Field::Accommodates,
        Field::Bedrooms,
        Field::Beds,
        Field::Bathrooms,
        Field::BedType,
        Field::CancellationPolicy,
        Field::CleaningFee,
        Field::InstantBookable,
        Field::AmenitiesList,
        Field::AmenitiesCount,
    ];

    /// Fields that must be chosen before a prediction can be requested
    pub const REQUIRED: [Field; 3] = [Field::PropertyType, Field::RoomType, Field::City];

    pub fn name(&self) -> &'static str {
        match self {
            Field::PropertyType => "property_type",
            Field::RoomType => "room_type",
            Field::BedType => "bed_type",
            Field::CancellationPolicy => "cancellation_policy",
            Field::City => "city",
            Field::Accommodates => "accommodates",
            Field::Bathrooms => "bathrooms",
            Field::Bedrooms => "bedrooms",
            Field::Beds => "beds",
            Field::AmenitiesCount => "amenities_count",
            Field::AmenitiesList => "amenities_list",
            Field::CleaningFee => "cleaning_fee",
            Field::InstantBookable => "instant_bookable",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::PropertyType => "Property Type",
            Field::RoomType => "Room Type",
            Field::BedType => "Bed Type",
            Field::CancellationPolicy => "Cancellation Policy",
            Field::City => "City",
            Field::Accommodates => "Accommodates",
            Field::Bathrooms => "Bathrooms",
            Field::Bedrooms => "Bedrooms",
            Field::Beds => "Beds",
            Field::AmenitiesCount => "Amenities Count",
            Field::AmenitiesList => "Amenities",
            Field::CleaningFee => "Cleaning Fee",
            Field::InstantBookable => "Instant Bookable",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::PropertyType
            | Field::RoomType
            | Field::BedType
            | Field::CancellationPolicy
            | Field::City => FieldKind::Categorical,
            Field::Accommodates
            | Field::Bathrooms
            | Field::Bedrooms
            | Field::Beds
            | Field::AmenitiesCount => FieldKind::Numeric,
            Field::CleaningFee | Field::InstantBookable => FieldKind::Boolean,
            Field::AmenitiesList => FieldKind::Derived,
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| PredictError::UnknownField(name.to_string()))
    }
}

/// Everything the prediction endpoints need, serialized as the request body.
///
/// The amenity selection and its count are private so they can only change
/// together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub property_type: String,
    pub room_type: String,
    #[serde(rename = "amenities_list", with = "amenity_list")]
    amenities: Vec<String>,
    amenities_count: u32,
    pub accommodates: u32,
    pub bathrooms: f64,
    pub bed_type: String,
    pub cancellation_policy: String,
    pub cleaning_fee: bool,
    pub city: String,
    pub instant_bookable: bool,
    pub bedrooms: u32,
    pub beds: u32,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            property_type: String::new(),
            room_type: String::new(),
            amenities: Vec::new(),
            amenities_count: 0,
            accommodates: 1,
            bathrooms: 1.0,
            bed_type: String::new(),
            cancellation_policy: String::new(),
            cleaning_fee: false,
            city: String::new(),
            instant_bookable: false,
            bedrooms: 1,
            beds: 1,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }

    /// Comma-joined selection, as sent to the service
    pub fn amenities_list(&self) -> String {
        self.amenities.join(AMENITY_SEPARATOR)
    }

    pub fn amenities_count(&self) -> u32 {
        self.amenities_count
    }

    pub fn has_amenity(&self, tag: &str) -> bool {
        self.amenities.iter().any(|a| a == tag)
    }

    /// Apply one checkbox change. The count always follows the list length.
    pub fn set_amenity(&mut self, tag: &str, selected: bool) {
        if selected {
            if !self.has_amenity(tag) {
                self.amenities.push(tag.to_string());
            }
        } else {
            self.amenities.retain(|a| a != tag);
        }
        self.amenities_count = self.amenities.len() as u32;
    }

    /// Flip a checkbox; returns whether the amenity is now selected
    pub fn toggle_amenity(&mut self, tag: &str) -> bool {
        let selected = !self.has_amenity(tag);
        self.set_amenity(tag, selected);
        selected
    }

    /// Seed the count without a selection (the server-reported median).
    /// Ignored once amenities are selected.
    pub fn set_amenities_count(&mut self, count: u32) {
        if self.amenities.is_empty() {
            self.amenities_count = count;
        }
    }

    /// Re-derive the count from a non-empty selection (for forms read from files)
    pub fn normalized(mut self) -> Self {
        if !self.amenities.is_empty() {
            self.amenities_count = self.amenities.len() as u32;
        }
        self
    }

    /// Set a field from the raw text an input produced
    pub fn set(&mut self, field: Field, raw: &str) -> Result<()> {
        match field {
            Field::PropertyType => self.property_type = raw.to_string(),
            Field::RoomType => self.room_type = raw.to_string(),
            Field::BedType => self.bed_type = raw.to_string(),
            Field::CancellationPolicy => self.cancellation_policy = raw.to_string(),
            Field::City => self.city = raw.to_string(),
            Field::Accommodates => self.accommodates = parse_count(field, raw)?,
            Field::Bedrooms => self.bedrooms = parse_count(field, raw)?,
            Field::Beds => self.beds = parse_count(field, raw)?,
            Field::AmenitiesCount => {
                let count = parse_count(field, raw)?;
                if !self.amenities.is_empty() && count != self.amenities_count {
                    return Err(PredictError::InvalidValue {
                        field: field.name().to_string(),
                        value: format!("{} (follows the selected amenities)", raw),
                    });
                }
                self.amenities_count = count;
            }
            Field::Bathrooms => self.bathrooms = parse_quantity(field, raw)?,
            Field::CleaningFee => self.cleaning_fee = parse_flag(field, raw)?,
            Field::InstantBookable => self.instant_bookable = parse_flag(field, raw)?,
            Field::AmenitiesList => {
                return Err(PredictError::InvalidValue {
                    field: field.name().to_string(),
                    value: format!("{} (select amenities individually)", raw),
                })
            }
        }
        Ok(())
    }

    /// Set a field addressed by its wire name
    pub fn set_by_name(&mut self, name: &str, raw: &str) -> Result<()> {
        let field: Field = name.parse()?;
        self.set(field, raw)
    }

    /// Current value rendered as input text
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::PropertyType => self.property_type.clone(),
            Field::RoomType => self.room_type.clone(),
            Field::BedType => self.bed_type.clone(),
            Field::CancellationPolicy => self.cancellation_policy.clone(),
            Field::City => self.city.clone(),
            Field::Accommodates => self.accommodates.to_string(),
            Field::Bathrooms => self.bathrooms.to_string(),
            Field::Bedrooms => self.bedrooms.to_string(),
            Field::Beds => self.beds.to_string(),
            Field::AmenitiesCount => self.amenities_count.to_string(),
            Field::AmenitiesList => self.amenities_list(),
            Field::CleaningFee => self.cleaning_fee.to_string(),
            Field::InstantBookable => self.instant_bookable.to_string(),
        }
    }

    /// Required fields that are still empty
    pub fn missing_required(&self) -> Vec<Field> {
        Field::REQUIRED
            .iter()
            .copied()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn has_required(&self) -> bool {
        self.missing_required().is_empty()
    }
}

/// Split the service's comma-joined amenities string
pub fn split_amenities(raw: &str) -> Vec<String> {
    raw.split(AMENITY_SEPARATOR)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

fn invalid(field: Field, raw: &str) -> PredictError {
    PredictError::InvalidValue {
        field: field.name().to_string(),
        value: raw.to_string(),
    }
}

/// Whole, non-negative numbers. Accepts `2.0` because medians arrive as floats.
fn parse_count(field: Field, raw: &str) -> Result<u32> {
    let text = raw.trim();
    if let Ok(n) = text.parse::<u32>() {
        return Ok(n);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => {
            Ok(v as u32)
        }
        _ => Err(invalid(field, raw)),
    }
}

fn parse_quantity(field: Field, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(invalid(field, raw)),
    }
}

fn parse_flag(field: Field, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" | "checked" => Ok(true),
        "false" | "off" | "no" | "0" | "" => Ok(false),
        _ => Err(invalid(field, raw)),
    }
}

mod amenity_list {
    use super::{split_amenities, AMENITY_SEPARATOR};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&tags.join(AMENITY_SEPARATOR))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(split_amenities(&raw))
    }
}
