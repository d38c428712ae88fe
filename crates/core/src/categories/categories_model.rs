//! Category domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

pub const DEFAULT_CATEGORY_COLOR: &str = "#0066cc";

/// Domain model representing a transaction category.
///
/// Categories form a hierarchy of at most one level: a category may have a
/// parent, but that parent can never have a parent of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub color: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

/// Input model for creating a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub parent_id: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewCategory {
    /// Validates the new category data.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_color(&self.color)?;
        if let (Some(id), Some(parent_id)) = (&self.id, &self.parent_id) {
            if id == parent_id {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Category cannot be its own parent".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Input model for updating an existing category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub id: Option<String>,
    pub name: String,
    pub parent_id: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CategoryUpdate {
    /// Validates the category update data.
    pub fn validate(&self) -> Result<()> {
        let id = self.id.as_deref().ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(
                "Category ID is required for updates".to_string(),
            ))
        })?;
        validate_name(&self.name)?;
        validate_color(&self.color)?;
        if self.parent_id.as_deref() == Some(id) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category cannot be its own parent".to_string(),
            )));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Category name cannot be empty".to_string(),
        )));
    }
    Ok(())
}

fn validate_color(color: &str) -> Result<()> {
    let hex = color.strip_prefix('#').unwrap_or("");
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Color must be a '#rrggbb' hex value, got '{}'",
            color
        ))));
    }
    Ok(())
}
