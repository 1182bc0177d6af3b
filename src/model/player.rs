use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Searchable;
use crate::form::{FieldDescriptor, FieldKind, FormValues};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub points: f64,
    pub assists: f64,
    pub rebounds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steals: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnovers: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fouls: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_played: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_goal_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub three_point_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_throw_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_rating: Option<f64>,
    pub overall_score: f64,
    pub performance_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub nationality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performances: Option<Vec<Performance>>,
}

impl Searchable for Player {
    fn search_field(&self, field: &str) -> Option<&str> {
        match field {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "position" => Some(&self.position),
            "nationality" => Some(&self.nationality),
            "image_url" => self.image_url.as_deref(),
            "notes" => self.notes.as_deref(),
            _ => None,
        }
    }
}

pub const PLAYER_SEARCH_FIELDS: &[&str] = &["name", "position", "nationality"];

pub const PLAYER_FORM_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("name", "Name", FieldKind::Text).required(),
    FieldDescriptor::new("position", "Position", FieldKind::Text)
        .placeholder("e.g., PG, SF, C")
        .required(),
    FieldDescriptor::new("age", "Age", FieldKind::Number).required(),
    FieldDescriptor::new("nationality", "Nationality", FieldKind::Text).required(),
    FieldDescriptor::new("height_cm", "Height (cm)", FieldKind::Number).required(),
    FieldDescriptor::new("weight_kg", "Weight (kg)", FieldKind::Number).required(),
    FieldDescriptor::new("image_url", "Image URL", FieldKind::Url).wide(),
    FieldDescriptor::new("notes", "Notes", FieldKind::Text).wide(),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: String, value: String },
}

/// Typed write body for the players endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerPayload {
    pub name: String,
    pub position: String,
    pub age: i64,
    pub height_cm: i64,
    pub weight_kg: i64,
    pub nationality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl PlayerPayload {
    /// Coerce the edited string values into a write body.
    ///
    /// New players are sent with `is_active: true`; edits leave it out.
    pub fn from_form(values: &FormValues, is_new: bool) -> Result<Self, CoercionError> {
        Ok(Self {
            name: values.get("name").to_string(),
            position: values.get("position").to_string(),
            age: whole_number(values, "age")?,
            height_cm: whole_number(values, "height_cm")?,
            weight_kg: whole_number(values, "weight_kg")?,
            nationality: values.get("nationality").to_string(),
            image_url: non_empty(values, "image_url"),
            notes: non_empty(values, "notes"),
            is_active: is_new.then_some(true),
        })
    }
}

/// Integer value of a numeric field. Decimals are truncated toward zero.
fn whole_number(values: &FormValues, field: &str) -> Result<i64, CoercionError> {
    let raw = values.get(field).trim();
    let not_a_number = || CoercionError::NotANumber {
        field: field.to_string(),
        value: raw.to_string(),
    };

    if let Ok(n) = raw.parse::<i64>() {
        return Ok(n);
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n.trunc() as i64),
        _ => Err(not_a_number()),
    }
}

fn non_empty(values: &FormValues, field: &str) -> Option<String> {
    Some(values.get(field))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Edit prefill for an existing player.
pub fn player_to_form(player: &Player) -> FormValues {
    FormValues::new()
        .with("name", player.name.as_str())
        .with("position", player.position.as_str())
        .with("age", player.age.to_string())
        .with("height_cm", player.height_cm.to_string())
        .with("weight_kg", player.weight_kg.to_string())
        .with("nationality", player.nationality.as_str())
        .with("image_url", player.image_url.clone().unwrap_or_default())
        .with("notes", player.notes.clone().unwrap_or_default())
}

pub fn empty_player_form() -> FormValues {
    FormValues::empty_for(PLAYER_FORM_FIELDS)
}

/// Per-game averages, formatted to one decimal place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AverageStats {
    pub points: String,
    pub assists: String,
    pub rebounds: String,
    pub score: String,
}

pub fn average_stats(performances: &[Performance]) -> AverageStats {
    if performances.is_empty() {
        let zero = || "0".to_string();
        return AverageStats {
            points: zero(),
            assists: zero(),
            rebounds: zero(),
            score: zero(),
        };
    }

    let count = performances.len() as f64;
    let mean = |f: fn(&Performance) -> f64| {
        format!("{:.1}", performances.iter().map(f).sum::<f64>() / count)
    };

    AverageStats {
        points: mean(|p| p.points),
        assists: mean(|p| p.assists),
        rebounds: mean(|p| p.rebounds),
        score: mean(|p| p.overall_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn performance(points: f64, assists: f64, rebounds: f64, score: f64) -> Performance {
        Performance {
            id: None,
            points,
            assists,
            rebounds,
            steals: None,
            blocks: None,
            turnovers: None,
            fouls: None,
            minutes_played: None,
            field_goal_pct: None,
            three_point_pct: None,
            free_throw_pct: None,
            efficiency_rating: None,
            overall_score: score,
            performance_date: "2024-01-01".to_string(),
        }
    }

    fn sample_player() -> Player {
        Player {
            id: "p1".to_string(),
            name: "Ada".to_string(),
            position: "PG".to_string(),
            age: 27,
            height_cm: 182.0,
            weight_kg: 75.0,
            nationality: "Nigeria".to_string(),
            image_url: None,
            is_active: true,
            notes: Some("Captain".to_string()),
            performances: None,
        }
    }

    #[test]
    fn test_form_fields_shape() {
        let names: Vec<_> = PLAYER_FORM_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "position",
                "age",
                "nationality",
                "height_cm",
                "weight_kg",
                "image_url",
                "notes"
            ]
        );
        assert!(PLAYER_FORM_FIELDS[..6].iter().all(|f| f.required));
        assert!(PLAYER_FORM_FIELDS[6..].iter().all(|f| !f.required));
    }

    #[test]
    fn test_payload_for_new_player() {
        let values = empty_player_form()
            .with("name", "Ada")
            .with("age", "27")
            .with("height_cm", "182")
            .with("weight_kg", "75.9");
        let payload = PlayerPayload::from_form(&values, true).unwrap();
        assert_eq!(payload.age, 27);
        assert_eq!(payload.weight_kg, 75);
        assert_eq!(payload.is_active, Some(true));

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("image_url").is_none());
        assert!(json.get("notes").is_none());
        assert_eq!(json["age"], serde_json::json!(27));
    }

    #[test]
    fn test_payload_for_edit_omits_is_active() {
        let values = player_to_form(&sample_player());
        let payload = PlayerPayload::from_form(&values, false).unwrap();
        assert_eq!(payload.is_active, None);
        assert_eq!(payload.notes.as_deref(), Some("Captain"));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("is_active").is_none());
    }

    #[test]
    fn test_payload_rejects_non_numeric() {
        let values = player_to_form(&sample_player()).with("age", "twenty");
        let err = PlayerPayload::from_form(&values, true).unwrap_err();
        assert_eq!(
            err,
            CoercionError::NotANumber {
                field: "age".to_string(),
                value: "twenty".to_string()
            }
        );
    }

    #[test]
    fn test_player_to_form_round_numbers() {
        let values = player_to_form(&sample_player());
        assert_eq!(values.get("height_cm"), "182");
        assert_eq!(values.get("image_url"), "");
        assert_eq!(values.get("notes"), "Captain");
    }

    #[test]
    fn test_average_stats() {
        assert_eq!(average_stats(&[]).points, "0");
        let stats = average_stats(&[
            performance(10.0, 4.0, 3.0, 70.0),
            performance(21.0, 5.0, 6.0, 81.0),
        ]);
        assert_eq!(stats.points, "15.5");
        assert_eq!(stats.assists, "4.5");
        assert_eq!(stats.rebounds, "4.5");
        assert_eq!(stats.score, "75.5");
    }

    #[test]
    fn test_search_fields_are_strings_only() {
        let player = sample_player();
        assert_eq!(player.search_field("name"), Some("Ada"));
        assert_eq!(player.search_field("age"), None);
        assert_eq!(player.search_field("image_url"), None);
    }
}
