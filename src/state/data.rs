/// Shared data structures for the application state
///
/// These structs represent the product rows that flow between
/// the network/persistence layers and the UI layer.

use serde::{Deserialize, Deserializer, Serialize};

/// A single product row in the table
///
/// The remote endpoint sends `price` as a string; it is coerced to f64
/// while deserializing so everything past this boundary works with a
/// real number. The local save file round-trips it as a number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique identifier, stable across edits
    pub id: u32,
    pub name: String,
    /// Product image URL
    pub image: String,
    /// Grouping key
    pub category: String,
    /// May be null or blank; rendered as "N/A" in that case
    #[serde(default)]
    pub label: Option<String>,
    /// Editable; arrives as a string on the wire
    #[serde(deserialize_with = "price_from_wire")]
    pub price: f64,
    pub description: String,
}

impl Record {
    /// Label as shown in the table: blank or missing labels become "N/A"
    pub fn display_label(&self) -> &str {
        match &self.label {
            Some(label) if !label.trim().is_empty() => label,
            _ => "N/A",
        }
    }
}

/// Accept `price` as either a JSON string (remote endpoint) or a JSON
/// number (local save file). A string that does not parse as a number
/// coerces to 0.0 with a warning; the row itself is kept.
fn price_from_wire<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(f64),
        Text(String),
    }

    match Wire::deserialize(deserializer)? {
        Wire::Number(n) => Ok(n),
        Wire::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) => Ok(n),
            Err(_) => {
                log::warn!("unparseable price {:?}, coercing to 0.0", s);
                Ok(0.0)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_row(price: &str, label: &str) -> String {
        format!(
            r#"{{"id":1,"name":"Sourdough","image":"https://cdn.example/bread.png",
                "category":"Bakery","label":{},"price":{},"description":"Fresh loaf"}}"#,
            label, price
        )
    }

    #[test]
    fn test_price_coerced_from_string() {
        let record: Record = serde_json::from_str(&wire_row("\"9.99\"", "\"\"")).unwrap();
        assert_eq!(record.price, 9.99);
    }

    #[test]
    fn test_price_accepts_number() {
        let record: Record = serde_json::from_str(&wire_row("15", "\"Fresh\"")).unwrap();
        assert_eq!(record.price, 15.0);
    }

    #[test]
    fn test_unparseable_price_coerces_to_zero() {
        let record: Record = serde_json::from_str(&wire_row("\"n/a\"", "null")).unwrap();
        assert_eq!(record.price, 0.0);
    }

    #[test]
    fn test_blank_label_displays_na() {
        let blank: Record = serde_json::from_str(&wire_row("\"1.0\"", "\"  \"")).unwrap();
        let missing: Record = serde_json::from_str(&wire_row("\"1.0\"", "null")).unwrap();
        let named: Record = serde_json::from_str(&wire_row("\"1.0\"", "\"Organic\"")).unwrap();

        assert_eq!(blank.display_label(), "N/A");
        assert_eq!(missing.display_label(), "N/A");
        assert_eq!(named.display_label(), "Organic");
    }

    #[test]
    fn test_round_trip() {
        let original: Vec<Record> = serde_json::from_str(&format!(
            "[{},{}]",
            wire_row("\"9.99\"", "\"\""),
            wire_row("\"12.50\"", "\"Organic\"")
        ))
        .unwrap();

        let json = serde_json::to_string(&original).unwrap();
        let restored: Vec<Record> = serde_json::from_str(&json).unwrap();

        assert_eq!(original, restored);
        // Serialized price is a number, not a string
        assert!(json.contains("\"price\":9.99"));
    }
}
