#![forbid(unsafe_code)]

//! Demo screens.
//!
//! Each screen owns handles to the observable state it renders and exposes a
//! plain-text view. Mounting a screen subscribes its state sources into the
//! caller's [`BindingScope`]; every notification asks the app to redraw.

pub mod binding;
pub mod buttons;
pub mod catalog;
pub mod form;
pub mod framed;
pub mod list;
pub mod stacks;

use std::fmt;
use std::rc::Rc;

use bindkit_runtime::{BindingScope, ObservableRecord};

use crate::mix::Mix;

/// Callback a mounted screen invokes whenever its state changes.
pub type Redraw = Rc<dyn Fn()>;

/// Identifier for each screen in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Catalog,
    Form,
    Stacks,
    Buttons,
    Framed,
    List,
    Binding,
}

impl ScreenId {
    /// All screens, root first, then in catalog order.
    pub const ALL: &'static [ScreenId] = &[
        Self::Catalog,
        Self::Form,
        Self::Stacks,
        Self::Buttons,
        Self::Framed,
        Self::List,
        Self::Binding,
    ];

    /// Screens reachable from the catalog.
    pub const LINKS: &'static [ScreenId] = &[
        Self::Form,
        Self::Stacks,
        Self::Buttons,
        Self::Framed,
        Self::List,
        Self::Binding,
    ];

    /// Short name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Form => "form",
            Self::Stacks => "stacks",
            Self::Buttons => "buttons",
            Self::Framed => "framed",
            Self::List => "list",
            Self::Binding => "binding",
        }
    }

    /// Title shown in the catalog row and the screen header.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Catalog => "SwiftUI",
            Self::Form => "Form",
            Self::Stacks => "Stacks",
            Self::Buttons => "Buttons",
            Self::Framed => "Framed",
            Self::List => "List",
            Self::Binding => "Data Binding",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Build a fresh screen. The data-binding screen shares `mix`.
    #[must_use]
    pub fn build(self, mix: &ObservableRecord<Mix>) -> Rc<dyn Screen> {
        match self {
            Self::Catalog => Rc::new(catalog::CatalogScreen::new()),
            Self::Form => Rc::new(form::FormScreen::new()),
            Self::Stacks => Rc::new(stacks::StacksScreen::new()),
            Self::Buttons => Rc::new(buttons::ButtonsScreen::new()),
            Self::Framed => Rc::new(framed::FramedScreen),
            Self::List => Rc::new(list::ListScreen::new()),
            Self::Binding => Rc::new(binding::BindingScreen::new(mix.clone())),
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the app should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Push(ScreenId),
    Pop,
}

/// A rejected user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The screen has no action by that name.
    Unknown { screen: ScreenId, action: String },
    /// The action's argument could not be parsed.
    InvalidValue { action: &'static str, value: String },
    /// A picker index beyond the available options.
    OutOfRange {
        action: &'static str,
        index: usize,
        len: usize,
    },
    /// `back` on the root screen.
    AtRoot,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { screen, action } => {
                write!(f, "screen '{screen}' has no action '{action}'")
            }
            Self::InvalidValue { action, value } => {
                write!(f, "invalid value for '{action}': {value}")
            }
            Self::OutOfRange { action, index, len } => {
                write!(f, "'{action}' index {index} out of range (0..{len})")
            }
            Self::AtRoot => f.write_str("already at the root screen"),
        }
    }
}

impl std::error::Error for ActionError {}

/// A text-rendered screen.
pub trait Screen {
    fn id(&self) -> ScreenId;

    /// Subscribe the state this screen renders. Static screens draw once.
    fn mount(&self, _scope: &mut BindingScope, redraw: Redraw) {
        redraw();
    }

    /// Render the current state as text.
    fn view_string(&self) -> String;

    /// Apply a user action such as `load` or `name=Ada`.
    ///
    /// `back` is handled by the app for every screen except the root.
    fn press(&self, action: &str) -> Result<Transition, ActionError>;
}

/// Split `key=value` actions.
pub(crate) fn split_action(action: &str) -> (&str, Option<&str>) {
    match action.split_once('=') {
        Some((key, value)) => (key.trim(), Some(value)),
        None => (action.trim(), None),
    }
}

/// Parse a picker index argument and check it against the option count.
pub(crate) fn parse_index(
    action: &'static str,
    value: Option<&str>,
    len: usize,
) -> Result<usize, ActionError> {
    let raw = value.unwrap_or_default();
    let index = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| ActionError::InvalidValue {
            action,
            value: raw.to_string(),
        })?;
    if index >= len {
        return Err(ActionError::OutOfRange { action, index, len });
    }
    Ok(index)
}

/// Header line shared by every screen.
pub(crate) fn header(id: ScreenId) -> String {
    let title = id.title();
    format!("{title}\n{}", "=".repeat(title.chars().count()))
}
