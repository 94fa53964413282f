#![forbid(unsafe_code)]

//! Data-binding screen: renders the shared [`Mix`] and loads a preset into it.

use bindkit_runtime::{BindingScope, ObservableRecord};
use tracing::debug;

use super::{ActionError, Redraw, Screen, ScreenId, Transition, header};
use crate::mix::Mix;

const PRESET_NAME: &str = "Rum and coke";
const PRESET_INGREDIENTS: [&str; 3] = ["Rum", "Coke", "Ice"];

pub struct BindingScreen {
    mix: ObservableRecord<Mix>,
}

impl BindingScreen {
    /// The screen observes `mix`; it does not own it.
    #[must_use]
    pub fn new(mix: ObservableRecord<Mix>) -> Self {
        Self { mix }
    }

    /// Push the preset into the shared record, one field at a time.
    pub fn load(&self) {
        debug!(preset = PRESET_NAME, "loading mix");
        self.mix.set(&Mix::NAME, PRESET_NAME.to_string());
        self.mix.set(
            &Mix::INGREDIENTS,
            PRESET_INGREDIENTS.iter().map(|s| (*s).to_string()).collect(),
        );
    }
}

impl Screen for BindingScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Binding
    }

    fn mount(&self, scope: &mut BindingScope, redraw: Redraw) {
        scope.observe(&self.mix, move || redraw());
    }

    fn view_string(&self) -> String {
        let mut out = header(ScreenId::Binding);
        self.mix.with(|mix| {
            out.push_str(&format!("\n[ {} ]", mix.name));
            for ingredient in &mix.ingredients {
                out.push_str(&format!("\n  {ingredient}"));
            }
        });
        out.push_str("\n[Load]");
        out
    }

    fn press(&self, action: &str) -> Result<Transition, ActionError> {
        match action.trim() {
            "load" => {
                self.load();
                Ok(Transition::Stay)
            }
            _ => Err(ActionError::Unknown {
                screen: ScreenId::Binding,
                action: action.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn empty_mix_renders_blank_title() {
        let screen = BindingScreen::new(ObservableRecord::new(Mix::default()));
        assert_eq!(screen.view_string(), "Data Binding\n============\n[  ]\n[Load]");
    }

    #[test]
    fn load_sets_both_fields_and_notifies_twice() {
        let mix = ObservableRecord::new(Mix::default());
        let screen = BindingScreen::new(mix.clone());
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = mix.subscribe(move || count_clone.set(count_clone.get() + 1));

        screen.press("load").unwrap();
        assert_eq!(count.get(), 3);
        assert_eq!(mix.get(&Mix::NAME), "Rum and coke");
        assert_eq!(mix.get(&Mix::INGREDIENTS), vec!["Rum", "Coke", "Ice"]);
        assert!(screen.view_string().contains("[ Rum and coke ]\n  Rum\n  Coke\n  Ice"));
    }
}
