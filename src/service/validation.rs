//! Form validation. Every field is checked so the response names all failures at once.

use crate::error::{AppError, ValidationErrors};
use crate::model::{Category, GarmentDraft, GarmentForm, ProductDraft, ProductForm, Size};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a product form. Runs identically for create and update.
    pub fn product(form: &ProductForm) -> Result<ProductDraft, AppError> {
        let mut errors = ValidationErrors::new();

        let name = required(&mut errors, "name", &form.name, "Product name is required");
        let brand = required(&mut errors, "brand", &form.brand, "Brand is required");

        let price = match present(&form.price) {
            None => {
                errors.push("price", "Price is required");
                None
            }
            Some(raw) => match raw.parse::<f64>() {
                Ok(p) if !p.is_finite() => {
                    errors.push("price", "Price must be a number");
                    None
                }
                Ok(p) if p < 0.0 => {
                    errors.push("price", "Price must be at least 0");
                    None
                }
                Ok(p) => Some(p),
                Err(_) => {
                    errors.push("price", "Price must be a number");
                    None
                }
            },
        };

        let color = required(&mut errors, "color", &form.color, "Color is required");

        let size = match present(&form.size) {
            None => {
                errors.push("size", "Size is required");
                None
            }
            Some(raw) => raw.parse::<Size>().ok().or_else(|| {
                errors.push("size", one_of("Size", Size::ALL.iter().map(|s| s.as_str())));
                None
            }),
        };

        let category = match present(&form.category) {
            None => {
                errors.push("category", "Category is required");
                None
            }
            Some(raw) => raw.parse::<Category>().ok().or_else(|| {
                errors.push(
                    "category",
                    one_of("Category", Category::ALL.iter().map(|c| c.as_str())),
                );
                None
            }),
        };

        let description = present(&form.description).map(str::to_string);

        match (name, brand, price, color, size, category) {
            (Some(name), Some(brand), Some(price), Some(color), Some(size), Some(category))
                if errors.is_empty() =>
            {
                Ok(ProductDraft {
                    name,
                    brand,
                    price,
                    color,
                    size,
                    category,
                    description,
                })
            }
            _ => Err(AppError::Validation(errors)),
        }
    }

    pub fn garment(form: &GarmentForm) -> Result<GarmentDraft, AppError> {
        let mut errors = ValidationErrors::new();

        let name = required(&mut errors, "name", &form.name, "Garment name is required");
        let location = present(&form.location).map(str::to_string);
        let contact = match present(&form.contact) {
            None => {
                errors.push("contact", "Contact is required");
                None
            }
            Some(raw) => match raw.parse::<f64>() {
                Ok(c) if c.is_finite() => Some(c),
                _ => {
                    errors.push("contact", "Contact must be a number");
                    None
                }
            },
        };

        match (name, contact) {
            (Some(name), Some(contact)) if errors.is_empty() => Ok(GarmentDraft {
                name,
                location,
                contact,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

/// Trimmed value, or `None` when the field is missing or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &Option<String>,
    message: &str,
) -> Option<String> {
    let v = present(value).map(str::to_string);
    if v.is_none() {
        errors.push(field, message);
    }
    v
}

fn one_of<'a>(label: &str, allowed: impl Iterator<Item = &'a str>) -> String {
    format!("{} must be one of: {}", label, allowed.collect::<Vec<_>>().join(", "))
}
