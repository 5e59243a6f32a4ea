// Intent - a parsed form submission

use super::error::{DomainError, Result};
use super::todo::TodoId;

/// What a form submission asks the list to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create { text: String },
    Toggle { id: TodoId },
    Delete { id: TodoId },
}

impl Intent {
    /// Parse the raw form fields of a submission.
    ///
    /// Only presence is checked: `text` must be non-empty for `create`,
    /// `id` must be non-empty for `toggle` and `delete`.
    pub fn parse(intent: Option<&str>, text: Option<&str>, id: Option<&str>) -> Result<Self> {
        match intent {
            Some("create") => match text {
                Some(text) if !text.is_empty() => Ok(Intent::Create {
                    text: text.to_string(),
                }),
                _ => Err(DomainError::InvalidText),
            },
            Some("toggle") => Ok(Intent::Toggle {
                id: required_id(id)?,
            }),
            Some("delete") => Ok(Intent::Delete {
                id: required_id(id)?,
            }),
            _ => Err(DomainError::InvalidIntent),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::Create { .. } => "create",
            Intent::Toggle { .. } => "toggle",
            Intent::Delete { .. } => "delete",
        }
    }
}

fn required_id(id: Option<&str>) -> Result<TodoId> {
    match id {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(DomainError::InvalidId),
    }
}
