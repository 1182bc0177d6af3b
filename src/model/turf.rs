use serde::{Deserialize, Serialize};

use crate::data::Searchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turf {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_per_hour: f64,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub operating_hours: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub slot_minutes: Option<u32>,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub sport_type: Option<String>,
    #[serde(default)]
    pub surface_type: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub buffer_minutes: Option<u32>,
    #[serde(default)]
    pub lead_time_minutes: Option<u32>,
    #[serde(default)]
    pub bookable_days_ahead: Option<u32>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Turf {
    /// `(latitude, longitude)` when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    pub fn operating_hours(&self) -> String {
        format_operating_hours(self.open_time.as_deref(), self.close_time.as_deref())
    }
}

impl Searchable for Turf {
    fn search_field(&self, field: &str) -> Option<&str> {
        match field {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "location" => Some(&self.location),
            "description" => self.description.as_deref(),
            "sport_type" => self.sport_type.as_deref(),
            "surface_type" => self.surface_type.as_deref(),
            _ => None,
        }
    }
}

pub const TURF_SEARCH_FIELDS: &[&str] = &["name", "location"];

/// Detail responses come either bare or wrapped as `{"turf": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TurfDetail {
    Wrapped { turf: Turf },
    Bare(Turf),
}

impl TurfDetail {
    pub fn into_turf(self) -> Turf {
        match self {
            TurfDetail::Wrapped { turf } | TurfDetail::Bare(turf) => turf,
        }
    }
}

/// `"open - close"`, or `"N/A"` unless both ends are set.
pub fn format_operating_hours(open: Option<&str>, close: Option<&str>) -> String {
    match (open, close) {
        (Some(open), Some(close)) if !open.is_empty() && !close.is_empty() => {
            format!("{} - {}", open, close)
        }
        _ => "N/A".to_string(),
    }
}

pub fn google_maps_url(lat: f64, lng: f64) -> String {
    format!("https://www.google.com/maps?q={},{}", lat, lng)
}

pub fn directions_url(lat: f64, lng: f64) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        lat, lng
    )
}

pub const OSM_DEFAULT_DELTA: f64 = 0.01;

/// OpenStreetMap embed URL with a bounding box of `delta` degrees around
/// the marker.
pub fn osm_embed_url(lat: f64, lng: f64, delta: f64) -> String {
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={}%2C{}%2C{}%2C{}&layer=mapnik&marker={}%2C{}",
        lng - delta,
        lat - delta,
        lng + delta,
        lat + delta,
        lat,
        lng
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn turf_json() -> serde_json::Value {
        json!({
            "id": "t1",
            "name": "Downtown Arena",
            "location": "Lekki",
            "price_per_hour": 15000,
            "open_time": "08:00",
            "close_time": "22:00",
            "latitude": 6.5,
            "longitude": 3.25
        })
    }

    #[test]
    fn test_detail_accepts_both_shapes() {
        let bare: TurfDetail = serde_json::from_value(turf_json()).unwrap();
        let wrapped: TurfDetail = serde_json::from_value(json!({ "turf": turf_json() })).unwrap();
        assert_eq!(bare.into_turf(), wrapped.into_turf());
    }

    #[test]
    fn test_operating_hours() {
        let turf: Turf = serde_json::from_value(turf_json()).unwrap();
        assert_eq!(turf.operating_hours(), "08:00 - 22:00");
        assert_eq!(format_operating_hours(Some("08:00"), None), "N/A");
        assert_eq!(format_operating_hours(Some(""), Some("22:00")), "N/A");
    }

    #[test]
    fn test_map_urls() {
        assert_eq!(
            google_maps_url(6.5, 3.25),
            "https://www.google.com/maps?q=6.5,3.25"
        );
        assert_eq!(
            directions_url(6.5, 3.25),
            "https://www.google.com/maps/dir/?api=1&destination=6.5,3.25"
        );
        assert_eq!(
            osm_embed_url(1.5, 2.5, 0.5),
            "https://www.openstreetmap.org/export/embed.html?bbox=2%2C1%2C3%2C2&layer=mapnik&marker=1.5%2C2.5"
        );
    }

    #[test]
    fn test_search_fields() {
        let turf: Turf = serde_json::from_value(turf_json()).unwrap();
        assert_eq!(turf.search_field("location"), Some("Lekki"));
        assert_eq!(turf.search_field("description"), None);
        assert_eq!(turf.coordinates(), Some((6.5, 3.25)));
    }
}
