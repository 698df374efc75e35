use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;

pub type RecipeId = i64;

/// A recipe as returned by the catalog API. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    /// 0 to 5; absent means "not rated", not zero.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "minutes")]
    pub total_time: Option<u32>,
    #[serde(default, deserialize_with = "minutes")]
    pub cook_time: Option<u32>,
    #[serde(default, deserialize_with = "minutes")]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub serves: Option<Serves>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutrients: Map<String, Value>,
}

impl Recipe {
    /// Calorie count from the nutrients object. The importer keeps whatever the
    /// source had, so both `389` and `"389 kcal"` occur.
    pub fn calories(&self) -> Option<f64> {
        match self.nutrients.get("calories")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
                let re = NUMBER_RE.get_or_init(|| {
                    Regex::new(r"(\d+(\.\d+)?)").expect("static regex is valid")
                });
                re.captures(s)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| m.as_str().parse().ok())
            }
            _ => None,
        }
    }
}

/// Serving size: either a head count or free text such as "4-6 people".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Serves {
    Count(u32),
    Text(String),
}

impl fmt::Display for Serves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Serves::Count(n) => write!(f, "{n}"),
            Serves::Text(s) => f.write_str(s),
        }
    }
}

/// Response body shared by the listing and search endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Recipe>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl Envelope {
    /// The server's failure message, if the payload signals one.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// A successfully retrieved item set.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub items: Vec<Recipe>,
    /// Catalog size reported by the listing endpoint. Search responses carry none.
    pub total: Option<u64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Minutes arrive as integers, floats or numeric strings; anything else is absent.
fn minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|m| u32::try_from(m).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_with_missing_fields() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": 7,
            "title": null,
            "cuisine": null,
            "rating": null,
            "nutrients": null
        }))
        .unwrap();

        assert_eq!(recipe.id, 7);
        assert_eq!(recipe.title, "");
        assert!(recipe.rating.is_none());
        assert!(recipe.total_time.is_none());
        assert!(recipe.serves.is_none());
        assert!(recipe.nutrients.is_empty());
    }

    #[test]
    fn test_lenient_minutes_and_serves() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": 1,
            "title": "Sweet Potato Pie",
            "total_time": "115",
            "cook_time": 85,
            "prep_time": "soon",
            "serves": "8 servings"
        }))
        .unwrap();

        assert_eq!(recipe.total_time, Some(115));
        assert_eq!(recipe.cook_time, Some(85));
        assert_eq!(recipe.prep_time, None);
        assert_eq!(recipe.serves, Some(Serves::Text("8 servings".to_string())));

        let recipe: Recipe =
            serde_json::from_value(json!({"id": 2, "title": "Dal", "serves": 4})).unwrap();
        assert_eq!(recipe.serves, Some(Serves::Count(4)));
        assert_eq!(recipe.serves.unwrap().to_string(), "4");
    }

    #[test]
    fn test_calories_from_number_or_text() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": 1,
            "title": "Soup",
            "nutrients": {"calories": "389 kcal", "fatContent": "12 g"}
        }))
        .unwrap();
        assert_eq!(recipe.calories(), Some(389.0));

        let recipe: Recipe = serde_json::from_value(json!({
            "id": 2,
            "title": "Salad",
            "nutrients": {"calories": 120.5}
        }))
        .unwrap();
        assert_eq!(recipe.calories(), Some(120.5));

        let recipe: Recipe =
            serde_json::from_value(json!({"id": 3, "title": "Water"})).unwrap();
        assert_eq!(recipe.calories(), None);
    }

    #[test]
    fn test_envelope_error_detection() {
        let env: Envelope = serde_json::from_value(json!({"error": "boom"})).unwrap();
        assert_eq!(env.error_message(), Some("boom".to_string()));
        assert!(env.data.is_empty());

        let env: Envelope =
            serde_json::from_value(json!({"error": null, "data": [], "total": 0})).unwrap();
        assert_eq!(env.error_message(), None);

        let env: Envelope = serde_json::from_value(json!({"error": {"code": 3}})).unwrap();
        assert_eq!(env.error_message(), Some("{\"code\":3}".to_string()));
    }

    #[test]
    fn test_envelope_without_data_is_empty_listing() {
        let env: Envelope = serde_json::from_value(json!({"total": 12})).unwrap();
        assert!(env.data.is_empty());
        assert_eq!(env.total, Some(12));
    }
}
