use serde::Deserialize;
use validator::Validate;

use crate::domain::product::NewProduct;

#[derive(Deserialize, Validate)]
/// Form data for adding a product.
pub struct AddProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

impl From<AddProductForm> for NewProduct {
    fn from(form: AddProductForm) -> Self {
        NewProduct::new(form.name, form.description, form.category, form.price)
    }
}
