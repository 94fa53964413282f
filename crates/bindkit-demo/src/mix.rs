#![forbid(unsafe_code)]

//! The shared drink record shown by the data-binding screen.

use bindkit_runtime::{Field, Record};

/// A drink: a name and its ingredients, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mix {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl Mix {
    pub const NAME: Field<Mix, String> = Field::new("name", |m| &m.name, |m| &mut m.name);
    pub const INGREDIENTS: Field<Mix, Vec<String>> =
        Field::new("ingredients", |m| &m.ingredients, |m| &mut m.ingredients);

    pub fn new(name: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            name: name.into(),
            ingredients,
        }
    }
}

impl Record for Mix {
    const TYPE_NAME: &'static str = "Mix";
    const FIELDS: &'static [&'static str] = &["name", "ingredients"];

    fn describe_field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "ingredients" => Some(self.ingredients.join(", ")),
            _ => None,
        }
    }
}
