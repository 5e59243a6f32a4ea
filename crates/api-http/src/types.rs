//! Request/Response Types

use serde::{Deserialize, Serialize};
use todo_core::domain::{DomainError, Intent, Todo};

/// Form body of `POST /{list_id}`
#[derive(Debug, Default)]
pub struct ActionForm {
    pub intent: Option<String>,
    pub text: Option<String>,
    pub id: Option<String>,
}

impl ActionForm {
    /// Build from decoded form pairs; a repeated field keeps its first value
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = ActionForm::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "intent" => &mut form.intent,
                "text" => &mut form.text,
                "id" => &mut form.id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form
    }

    pub fn into_intent(self) -> Result<Intent, DomainError> {
        Intent::parse(
            self.intent.as_deref(),
            self.text.as_deref(),
            self.id.as_deref(),
        )
    }
}

/// JSON body of `GET /{list_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub todos: Vec<Todo>,
}

/// JSON body of a successful action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
}

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_field_keeps_first_value() {
        let form = ActionForm::from_pairs(pairs(&[
            ("intent", "create"),
            ("text", "milk"),
            ("intent", "toggle"),
            ("text", "bread"),
        ]));
        assert_eq!(
            form.into_intent().unwrap(),
            Intent::Create {
                text: "milk".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let form = ActionForm::from_pairs(pairs(&[("id", "7"), ("extra", "x"), ("intent", "delete")]));
        assert_eq!(
            form.into_intent().unwrap(),
            Intent::Delete {
                id: "7".to_string()
            }
        );
    }
}
