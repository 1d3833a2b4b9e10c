// src/form/options.rs
// Loading categorical choices and numeric ranges, with a static fallback

use tracing::{info, warn};

use super::{Field, FormState};
use crate::api::{FormOptions, FormOptionsResponse, NumericRanges, PredictionApi};

pub const OPTIONS_FALLBACK_MESSAGE: &str = "Failed to load form options. Using fallback values.";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Options used when `/form-options` cannot be reached
pub fn fallback_options() -> FormOptions {
    FormOptions {
        property_type: strings(&["Apartment", "House", "Other"]),
        room_type: strings(&["Entire home/apt", "Private room", "Shared room"]),
        bed_type: strings(&["Real Bed", "Futon", "Couch"]),
        cancellation_policy: strings(&["flexible", "moderate", "strict"]),
        city: strings(&["New York", "Los Angeles", "Chicago"]),
        amenities_list: strings(&[
            "air_conditioning",
            "carbon_monoxide_detector",
            "essentials",
            "hangers",
            "heating",
            "kitchen",
            "shampoo",
            "smoke_detector",
            "tv",
            "wireless_internet",
        ]),
    }
}

/// Default used when the service reports ranges but no median for a field
pub fn default_median(field: Field) -> Option<f64> {
    match field {
        Field::Accommodates => Some(2.0),
        Field::Bathrooms | Field::Bedrooms | Field::Beds => Some(1.0),
        Field::AmenitiesCount => Some(3.0),
        _ => None,
    }
}

/// Input bounds for a numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Bounds {
    /// Server-reported range when known, otherwise the built-in limits
    pub fn for_field(ranges: &NumericRanges, field: Field) -> Option<Bounds> {
        let (min, max, step) = match field {
            Field::Accommodates => (1.0, 20.0, 1.0),
            Field::Bedrooms => (0.0, 10.0, 1.0),
            Field::Beds => (1.0, 20.0, 1.0),
            Field::Bathrooms => (0.5, 10.0, 0.5),
            _ => return None,
        };
        Some(match ranges.get(field) {
            Some(range) => Bounds {
                min: range.min,
                max: range.max,
                step,
            },
            None => Bounds { min, max, step },
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// `Range: 1 - 16` hint, only for ranges the service reported
pub fn range_hint(ranges: &NumericRanges, field: Field) -> Option<String> {
    ranges
        .get(field)
        .map(|r| format!("Range: {} - {}", r.min, r.max))
}

/// Outcome of one options load cycle
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedOptions {
    pub options: FormOptions,
    pub ranges: NumericRanges,
    ranges_reported: bool,
    /// Non-fatal message for the user when fallback data is in use
    pub notice: Option<String>,
}

impl LoadedOptions {
    pub fn from_response(response: FormOptionsResponse) -> Self {
        let ranges_reported = response.numeric_ranges.is_some();
        Self {
            options: response.categorical_options,
            ranges: response.numeric_ranges.unwrap_or_default(),
            ranges_reported,
            notice: None,
        }
    }

    pub fn fallback() -> Self {
        Self {
            options: fallback_options(),
            ranges: NumericRanges::default(),
            ranges_reported: false,
            notice: Some(OPTIONS_FALLBACK_MESSAGE.to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.notice.is_some()
    }

    /// Seed numeric fields from reported medians.
    ///
    /// Leaves the form untouched when the service sent no ranges. The
    /// amenities count is only seeded while nothing is selected.
    pub fn apply_defaults(&self, form: &mut FormState) {
        if !self.ranges_reported {
            return;
        }
        let seed = |field: Field| -> f64 {
            self.ranges
                .median(field)
                .or_else(|| default_median(field))
                .unwrap_or(1.0)
        };
        let whole = |v: f64| v.round().max(0.0) as u32;

        form.accommodates = whole(seed(Field::Accommodates));
        form.bathrooms = seed(Field::Bathrooms).max(0.0);
        form.bedrooms = whole(seed(Field::Bedrooms));
        form.beds = whole(seed(Field::Beds));
        if form.amenities().is_empty() {
            form.set_amenities_count(whole(seed(Field::AmenitiesCount)));
        }
    }
}

pub struct FormOptionsLoader;

impl FormOptionsLoader {
    /// One request, no retry. Failure yields the fallback set.
    pub async fn load<A>(api: &A) -> LoadedOptions
    where
        A: PredictionApi + ?Sized,
    {
        match api.form_options().await {
            Ok(response) => {
                let loaded = LoadedOptions::from_response(response);
                info!(
                    cities = loaded.options.city.len(),
                    amenities = loaded.options.amenities_list.len(),
                    "Form options loaded"
                );
                loaded
            }
            Err(err) => {
                warn!(error = %err, "Error fetching form options, using fallback values");
                LoadedOptions::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NumericRange;

    fn range(min: f64, max: f64, median: Option<f64>) -> Option<NumericRange> {
        Some(NumericRange { min, max, median })
    }

    #[test]
    fn test_fallback_matches_fixed_list() {
        let options = fallback_options();
        assert_eq!(options.property_type, vec!["Apartment", "House", "Other"]);
        assert_eq!(options.city, vec!["New York", "Los Angeles", "Chicago"]);
        assert_eq!(options.amenities_list.len(), 10);
        assert_eq!(options.amenities_list[0], "air_conditioning");
        assert_eq!(options.amenities_list[9], "wireless_internet");
    }

    #[test]
    fn test_apply_defaults_uses_medians_and_literals() {
        let loaded = LoadedOptions::from_response(FormOptionsResponse {
            categorical_options: FormOptions::default(),
            numeric_ranges: Some(NumericRanges {
                accommodates: range(1.0, 16.0, Some(4.0)),
                bathrooms: range(0.0, 8.0, Some(1.5)),
                bedrooms: range(0.0, 10.0, None),
                beds: None,
                amenities_count: range(0.0, 10.0, Some(5.0)),
            }),
            total_records: None,
        });

        let mut form = FormState::new();
        loaded.apply_defaults(&mut form);
        assert_eq!(form.accommodates, 4);
        assert_eq!(form.bathrooms, 1.5);
        assert_eq!(form.bedrooms, 1);
        assert_eq!(form.beds, 1);
        assert_eq!(form.amenities_count(), 5);
    }

    #[test]
    fn test_missing_medians_use_literals() {
        let loaded = LoadedOptions::from_response(FormOptionsResponse {
            categorical_options: FormOptions::default(),
            numeric_ranges: Some(NumericRanges::default()),
            total_records: None,
        });
        let mut form = FormState::new();
        loaded.apply_defaults(&mut form);
        assert_eq!(form.accommodates, 2);
        assert_eq!(form.amenities_count(), 3);
    }

    #[test]
    fn test_fallback_leaves_numeric_fields() {
        let mut form = FormState::new();
        form.accommodates = 6;
        let before = form.clone();
        let loaded = LoadedOptions::fallback();
        loaded.apply_defaults(&mut form);
        assert_eq!(form, before);
        assert_eq!(loaded.notice.as_deref(), Some(OPTIONS_FALLBACK_MESSAGE));
    }

    #[test]
    fn test_selection_keeps_its_count() {
        let loaded = LoadedOptions::from_response(FormOptionsResponse {
            categorical_options: FormOptions::default(),
            numeric_ranges: Some(NumericRanges::default()),
            total_records: None,
        });
        let mut form = FormState::new();
        form.set_amenity("tv", true);
        loaded.apply_defaults(&mut form);
        assert_eq!(form.amenities_count(), 1);
    }

    #[test]
    fn test_bounds_prefer_reported_range() {
        let ranges = NumericRanges {
            beds: range(1.0, 12.0, Some(2.0)),
            ..Default::default()
        };
        assert_eq!(
            Bounds::for_field(&ranges, Field::Beds),
            Some(Bounds { min: 1.0, max: 12.0, step: 1.0 })
        );
        let bathrooms = Bounds::for_field(&ranges, Field::Bathrooms).unwrap();
        assert_eq!((bathrooms.min, bathrooms.step), (0.5, 0.5));
        assert!(!bathrooms.contains(0.0));
        assert!(Bounds::for_field(&ranges, Field::City).is_none());
        assert_eq!(range_hint(&ranges, Field::Beds).as_deref(), Some("Range: 1 - 12"));
        assert!(range_hint(&ranges, Field::Accommodates).is_none());
    }
}
