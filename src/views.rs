//! Askama templates and the view models they render.

use askama::Template;

use crate::model::{Category, Garment, Product, ProductForm, Size};

/// Product as shown in lists and on the detail page.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub color: String,
    pub size: &'static str,
    pub category: &'static str,
    pub category_label: &'static str,
    pub description: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            brand: p.brand.clone(),
            price: format!("${:.2}", p.price),
            color: p.color.clone(),
            size: p.size.as_str(),
            category: p.category.as_str(),
            category_label: p.category.label(),
            description: p.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GarmentView {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub contact: String,
    pub product_count: usize,
}

impl From<&Garment> for GarmentView {
    fn from(g: &Garment) -> Self {
        Self {
            id: g.id.to_string(),
            name: g.name.clone(),
            location: g.location.clone(),
            contact: g.contact.to_string(),
            product_count: g.products.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub fn category_options(selected: Option<&str>) -> Vec<SelectOption> {
    Category::ALL
        .iter()
        .map(|c| SelectOption {
            value: c.as_str(),
            label: c.label(),
            selected: selected.is_some_and(|s| s.eq_ignore_ascii_case(c.as_str())),
        })
        .collect()
}

pub fn size_options(selected: Option<&str>) -> Vec<SelectOption> {
    Size::ALL
        .iter()
        .map(|s| SelectOption {
            value: s.as_str(),
            label: s.as_str(),
            selected: selected.is_some_and(|v| v.eq_ignore_ascii_case(s.as_str())),
        })
        .collect()
}

/// Field values echoed back into a product form.
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub color: String,
    pub description: String,
}

impl From<&ProductForm> for ProductFields {
    fn from(f: &ProductForm) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: text(&f.name),
            brand: text(&f.brand),
            price: text(&f.price),
            color: text(&f.color),
            description: text(&f.description),
        }
    }
}

#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub flash: Option<&'static str>,
    /// "All" when unfiltered, otherwise the category being shown.
    pub category_label: String,
    pub categories: Vec<SelectOption>,
    pub products: Vec<ProductView>,
}

#[derive(Template)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub flash: Option<&'static str>,
    pub product: ProductView,
    pub garment: Option<GarmentView>,
}

/// Create, nested create and edit share one form.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub title: String,
    pub action: String,
    pub cancel_href: String,
    pub fields: ProductFields,
    pub sizes: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
}

impl ProductFormTemplate {
    pub fn new(title: String, action: String, cancel_href: String, form: &ProductForm) -> Self {
        Self {
            title,
            action,
            cancel_href,
            fields: ProductFields::from(form),
            sizes: size_options(form.size.as_deref()),
            categories: category_options(form.category.as_deref()),
        }
    }
}

#[derive(Template)]
#[template(path = "garments/index.html")]
pub struct GarmentsIndexTemplate {
    pub flash: Option<&'static str>,
    pub garments: Vec<GarmentView>,
}

#[derive(Template)]
#[template(path = "garments/show.html")]
pub struct GarmentShowTemplate {
    pub flash: Option<&'static str>,
    pub garment: GarmentView,
    pub products: Vec<ProductView>,
}

#[derive(Template)]
#[template(path = "garments/create.html")]
pub struct GarmentFormTemplate {}
