#![forbid(unsafe_code)]

//! Stacked rows with an alert.

use bindkit_runtime::{BindingScope, Observable};

use super::{ActionError, Redraw, Screen, ScreenId, Transition, header};

pub struct StacksScreen {
    showing_alert: Observable<bool>,
}

impl StacksScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            showing_alert: Observable::new(false),
        }
    }
}

impl Default for StacksScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for StacksScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Stacks
    }

    fn mount(&self, scope: &mut BindingScope, redraw: Redraw) {
        scope.observe_value(&self.showing_alert, move |_| redraw());
    }

    fn view_string(&self) -> String {
        let mut out = header(ScreenId::Stacks);
        out.push_str("\nRow 1\nRow 2\n[Alert]");
        if self.showing_alert.get() {
            out.push_str(concat!(
                "\n\n+ Alert ----------+",
                "\n| Alert message   |",
                "\n|            [OK] |",
                "\n+-----------------+",
            ));
        }
        out
    }

    fn press(&self, action: &str) -> Result<Transition, ActionError> {
        match action.trim() {
            "alert" => self.showing_alert.set(true),
            "ok" | "dismiss" => self.showing_alert.set(false),
            _ => {
                return Err(ActionError::Unknown {
                    screen: ScreenId::Stacks,
                    action: action.to_string(),
                });
            }
        }
        Ok(Transition::Stay)
    }
}
