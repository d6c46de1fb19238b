use serde::Deserialize;
use validator::Validate;

use crate::domain::training::NewTraining;

#[derive(Deserialize, Validate)]
/// Form data for adding a training program.
pub struct AddTrainingForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub level: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub featured: bool,
}

impl From<AddTrainingForm> for NewTraining {
    fn from(form: AddTrainingForm) -> Self {
        NewTraining::new(
            form.title,
            form.description,
            form.category,
            form.level,
            form.price,
            form.featured,
        )
    }
}
