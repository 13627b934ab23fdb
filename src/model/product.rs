//! Product records and their closed enumerations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{GarmentId, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shirt,
    Pants,
    Dress,
    Outerwear,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Shirt,
        Category::Pants,
        Category::Dress,
        Category::Outerwear,
        Category::Accessories,
    ];

    /// Stored and query-string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Shirt => "shirt",
            Category::Pants => "pants",
            Category::Dress => "dress",
            Category::Outerwear => "outerwear",
            Category::Accessories => "accessories",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Shirt => "Shirts",
            Category::Pants => "Pants",
            Category::Dress => "Dresses",
            Category::Outerwear => "Outerwear",
            Category::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

impl Size {
    pub const ALL: [Size; 6] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl, Size::Xxl];

    pub const fn as_str(self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "XXL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_uppercase();
        Size::ALL.into_iter().find(|z| z.as_str() == s).ok_or(())
    }
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub color: String,
    pub size: Size,
    pub category: Category,
    pub description: Option<String>,
    /// Owning garment, if the product was created under one. Display only.
    pub garment_id: Option<GarmentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated product fields, ready to insert or to overwrite a stored product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub color: String,
    pub size: Size,
    pub category: Category,
    pub description: Option<String>,
}

impl ProductDraft {
    /// Materialize a new product. The id and timestamps are assigned here, as a
    /// document store would on insert.
    pub fn into_product(self, garment_id: Option<GarmentId>) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::generate(),
            name: self.name,
            brand: self.brand,
            price: self.price,
            color: self.color,
            size: self.size,
            category: self.category,
            description: self.description,
            garment_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields of `product`, keeping id, owner and creation time.
    pub fn apply_to(self, product: &mut Product) {
        product.name = self.name;
        product.brand = self.brand;
        product.price = self.price;
        product.color = self.color;
        product.size = self.size;
        product.category = self.category;
        product.description = self.description;
        product.updated_at = Utc::now();
    }
}

/// Raw product form as submitted by the browser. Every field is optional so
/// that missing inputs surface as validation messages rather than a rejected body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl From<&Product> for ProductForm {
    fn from(p: &Product) -> Self {
        Self {
            name: Some(p.name.clone()),
            brand: Some(p.brand.clone()),
            price: Some(format!("{:.2}", p.price)),
            color: Some(p.color.clone()),
            size: Some(p.size.as_str().to_string()),
            category: Some(p.category.as_str().to_string()),
            description: p.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parsing_is_case_insensitive() {
        assert_eq!("Shirt".parse::<Category>(), Ok(Category::Shirt));
        assert_eq!(" pants ".parse::<Category>(), Ok(Category::Pants));
        assert!("fruit".parse::<Category>().is_err());
    }

    #[test]
    fn size_parsing_accepts_lowercase() {
        assert_eq!("xl".parse::<Size>(), Ok(Size::Xl));
        assert!("XXXL".parse::<Size>().is_err());
    }

    #[test]
    fn apply_keeps_identity_and_owner() {
        let owner = GarmentId::generate();
        let draft = ProductDraft {
            name: "Linen shirt".into(),
            brand: "Uniqlo".into(),
            price: 29.9,
            color: "white".into(),
            size: Size::M,
            category: Category::Shirt,
            description: None,
        };
        let mut product = draft.clone().into_product(Some(owner));
        let id = product.id;

        ProductDraft { price: 19.9, ..draft }.apply_to(&mut product);

        assert_eq!(product.id, id);
        assert_eq!(product.garment_id, Some(owner));
        assert!((product.price - 19.9).abs() < f64::EPSILON);
    }
}
