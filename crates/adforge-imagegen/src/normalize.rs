//! Normalization of canonical images into renderer-consumable strings

use crate::{
    error::{ImageGenError, Result},
    types::GeneratedImage,
};

/// Convert an image into a string a renderer can consume directly
///
/// A direct URL is returned unchanged; an inline payload becomes a
/// `data:` URL. An image carrying neither should be unreachable given the
/// adapter invariants, but the value crossed an external-API boundary, so
/// the shape is checked rather than assumed.
///
/// # Errors
///
/// `MalformedResponse` when neither reference form is present.
pub fn to_displayable(image: &GeneratedImage) -> Result<String> {
    if let Some(ref url) = image.url {
        return Ok(url.clone());
    }

    if let Some(ref data) = image.b64_data {
        let content_type = image.content_type.as_deref().unwrap_or("image/png");
        return Ok(format!("data:{content_type};base64,{data}"));
    }

    Err(ImageGenError::MalformedResponse(
        "image carries neither a URL nor an inline payload".to_string(),
    ))
}
