// src/dtos/product.rs
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::models::product::Product;

/// Raw text fields of a product form, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub selling_price: Option<String>,
    pub cost_price: Option<String>,
    pub quantity: Option<String>,
}

impl ProductForm {
    // Older clients post the `product_*` field names.
    fn slot_mut(&mut self, field: &str) -> Option<&mut Option<String>> {
        let slot = match field {
            "name" | "product_name" => &mut self.name,
            "description" | "product_description" => &mut self.description,
            "code" | "product_code" => &mut self.code,
            "selling_price" | "product_sp" => &mut self.selling_price,
            "cost_price" | "product_cp" => &mut self.cost_price,
            "quantity" | "product_quantity" => &mut self.quantity,
            _ => return None,
        };
        Some(slot)
    }
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A parsed product request. Multipart bodies may carry an image, JSON
/// bodies carry fields only, and any other body is read as no fields at all.
#[derive(Debug, Default)]
pub struct ProductUpload {
    pub form: ProductForm,
    pub image: Option<ImageUpload>,
}

fn is_image_field(name: &str) -> bool {
    matches!(name, "image" | "product_img")
}

impl ProductUpload {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut upload = ProductUpload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::upload(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if is_image_field(&name) {
                let file_name = field.file_name().map(str::to_owned).unwrap_or_default();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::upload(e.to_string()))?;
                // Browsers send an empty part when no file was picked.
                if !file_name.is_empty() {
                    upload.image = Some(ImageUpload { file_name, bytes });
                }
                continue;
            }

            if let Some(slot) = upload.form.slot_mut(&name) {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::upload(e.to_string()))?;
                *slot = Some(value);
            }
        }

        Ok(upload)
    }

    pub fn from_json(fields: Map<String, Value>) -> Result<Self, AppError> {
        let mut upload = ProductUpload::default();
        for (name, value) in fields {
            let Some(slot) = upload.form.slot_mut(&name) else {
                continue;
            };
            *slot = match value {
                Value::Null => None,
                Value::String(text) => Some(text),
                Value::Number(number) => Some(number.to_string()),
                _ => {
                    return Err(AppError::upload(format!(
                        "{name} must be a string or a number"
                    )))
                }
            };
        }
        Ok(upload)
    }
}

fn content_type(req: &Request) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

impl<S> FromRequest<S> for ProductUpload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(&req);

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| AppError::upload(rejection.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        if content_type.starts_with("application/json") {
            let Json(fields) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::upload(rejection.body_text()))?;
            return Self::from_json(fields);
        }

        Ok(ProductUpload::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub code: String,
    pub image_path: Option<String>,
    pub selling_price: f64,
    pub cost_price: f64,
    pub quantity: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            code: product.code,
            image_path: product.image_path,
            selling_price: product.selling_price,
            cost_price: product.cost_price,
            quantity: product.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_and_canonical_names_share_slots() {
        let mut form = ProductForm::default();
        *form.slot_mut("product_sp").unwrap() = Some("10".into());
        *form.slot_mut("quantity").unwrap() = Some("3".into());

        assert_eq!(form.selling_price.as_deref(), Some("10"));
        assert_eq!(form.quantity.as_deref(), Some("3"));
        assert!(form.slot_mut("colour").is_none());
    }

    #[test]
    fn json_fields_become_form_text() {
        let fields = serde_json::json!({
            "product_quantity": 12,
            "selling_price": 99.5,
            "name": "Dokra Horse",
            "description": null,
            "tags": ["ignored"],
        });
        let Value::Object(fields) = fields else { unreachable!() };

        let upload = ProductUpload::from_json(fields).unwrap();
        assert_eq!(upload.form.quantity.as_deref(), Some("12"));
        assert_eq!(upload.form.selling_price.as_deref(), Some("99.5"));
        assert_eq!(upload.form.name.as_deref(), Some("Dokra Horse"));
        assert_eq!(upload.form.description, None);
        assert!(upload.image.is_none());
    }

    #[test]
    fn json_rejects_nested_values_for_known_fields() {
        let Value::Object(fields) = serde_json::json!({ "quantity": { "n": 1 } }) else {
            unreachable!()
        };
        assert!(matches!(ProductUpload::from_json(fields), Err(AppError::Upload(_))));
    }
}
