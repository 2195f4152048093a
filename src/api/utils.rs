//! API utility functions
//!
//! Multipart form helpers shared by the upload handlers.

use axum::extract::multipart::{Field, Multipart};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::AppError;

/// Next field of a multipart body, or `None` at the end
pub async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>, AppError> {
    multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        AppError::InvalidRequest(format!("Malformed multipart body: {}", e))
    })
}

/// Read a text field
pub async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or("").to_string();
    field.text().await.map_err(|e| {
        tracing::error!("Failed to read {} field: {}", name, e);
        AppError::InvalidRequest(format!("Failed to read field '{}'", name))
    })
}

/// Read a file field's bytes
pub async fn read_bytes(field: Field<'_>) -> Result<Vec<u8>, AppError> {
    let name = field.name().unwrap_or("").to_string();
    let data = field.bytes().await.map_err(|e| {
        tracing::error!("Failed to read {} data: {}", name, e);
        AppError::InvalidRequest(format!("Failed to read file '{}'", name))
    })?;
    Ok(data.to_vec())
}

/// Read a file field as standard base64
///
/// Returns `None` for an empty part, which browsers send when no file was picked.
pub async fn read_base64(field: Field<'_>) -> Result<Option<String>, AppError> {
    let data = read_bytes(field).await?;
    if data.is_empty() {
        return Ok(None);
    }
    Ok(Some(STANDARD.encode(data)))
}

/// Treat blank optional text as absent
pub fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("Tokyo".into()), Some("Tokyo".to_string()));
        assert_eq!(non_empty("   ".into()), None);
        assert_eq!(non_empty(String::new()), None);
    }
}
