#![forbid(unsafe_code)]

//! A row of action buttons.

use bindkit_runtime::{BindingScope, Observable};
use tracing::info;

use super::{ActionError, Redraw, Screen, ScreenId, Transition, header};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Send,
    Add,
    Map,
}

impl ButtonKind {
    const ALL: [ButtonKind; 3] = [Self::Send, Self::Add, Self::Map];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Add => "add",
            Self::Map => "map",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

pub struct ButtonsScreen {
    last_pressed: Observable<Option<ButtonKind>>,
}

impl ButtonsScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_pressed: Observable::new(None),
        }
    }

    #[must_use]
    pub fn last_pressed(&self) -> Option<ButtonKind> {
        self.last_pressed.get()
    }
}

impl Default for ButtonsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ButtonsScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Buttons
    }

    fn mount(&self, scope: &mut BindingScope, redraw: Redraw) {
        scope.observe_value(&self.last_pressed, move |_| redraw());
    }

    fn view_string(&self) -> String {
        let mut out = header(ScreenId::Buttons);
        out.push('\n');
        let row: Vec<String> = ButtonKind::ALL
            .iter()
            .map(|kind| format!("[{}]", kind.label()))
            .collect();
        out.push_str(&row.join(" "));
        if let Some(kind) = self.last_pressed.get() {
            out.push_str(&format!("\nlast pressed: {}", kind.label()));
        }
        out
    }

    fn press(&self, action: &str) -> Result<Transition, ActionError> {
        let kind = ButtonKind::from_label(action.trim()).ok_or_else(|| ActionError::Unknown {
            screen: ScreenId::Buttons,
            action: action.to_string(),
        })?;
        match kind {
            ButtonKind::Send => info!("button pressed"),
            ButtonKind::Add => info!("other button"),
            ButtonKind::Map => info!("map"),
        }
        self.last_pressed.set(Some(kind));
        Ok(Transition::Stay)
    }
}
