#![forbid(unsafe_code)]

//! Application model: a navigation stack of mounted screens.
//!
//! The app owns the one shared [`Mix`] record and hands it down to the
//! screens that need it. Every mounted screen keeps its own
//! [`BindingScope`]; pushing a screen mounts it on top of the stack and
//! popping unmounts it. Each notification a mounted screen receives renders
//! that screen into a new [`Frame`].

use std::cell::RefCell;
use std::rc::Rc;

use bindkit_runtime::{BindingScope, ObservableRecord};
use tracing::{debug, info};

use crate::mix::Mix;
use crate::screens::{ActionError, Screen, ScreenId, Transition};

/// One rendered screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub screen: ScreenId,
    pub text: String,
}

struct Mounted {
    screen: Rc<dyn Screen>,
    scope: BindingScope,
}

pub struct AppModel {
    mix: ObservableRecord<Mix>,
    stack: Vec<Mounted>,
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl AppModel {
    /// Create the app with the catalog mounted as root.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mix(ObservableRecord::new(Mix::default()))
    }

    /// Create the app around an existing record.
    #[must_use]
    pub fn with_mix(mix: ObservableRecord<Mix>) -> Self {
        let mut app = Self {
            mix,
            stack: Vec::new(),
            frames: Rc::new(RefCell::new(Vec::new())),
        };
        app.push(ScreenId::Catalog);
        app
    }

    #[must_use]
    pub fn mix(&self) -> &ObservableRecord<Mix> {
        &self.mix
    }

    /// Screen on top of the navigation stack.
    #[must_use]
    pub fn current_screen(&self) -> ScreenId {
        self.stack
            .last()
            .map_or(ScreenId::Catalog, |mounted| mounted.screen.id())
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Mount `id` on top of the stack.
    pub fn push(&mut self, id: ScreenId) {
        let screen = id.build(&self.mix);
        let mut scope = BindingScope::new();

        let frames = Rc::clone(&self.frames);
        let weak = Rc::downgrade(&screen);
        screen.mount(
            &mut scope,
            Rc::new(move || {
                if let Some(screen) = weak.upgrade() {
                    frames.borrow_mut().push(Frame {
                        screen: screen.id(),
                        text: screen.view_string(),
                    });
                }
            }),
        );

        info!(screen = %id, depth = self.stack.len() + 1, "screen mounted");
        self.stack.push(Mounted { screen, scope });
    }

    /// Unmount the top screen. The root cannot be popped.
    pub fn pop(&mut self) -> Result<ScreenId, ActionError> {
        if self.stack.len() <= 1 {
            return Err(ActionError::AtRoot);
        }
        let Some(mut mounted) = self.stack.pop() else {
            return Err(ActionError::AtRoot);
        };
        mounted.scope.unmount();
        let id = mounted.screen.id();
        info!(screen = %id, depth = self.stack.len(), "screen unmounted");
        Ok(id)
    }

    /// Apply an action to the top screen, following any navigation it asks
    /// for. `back` pops the stack from any screen.
    pub fn press(&mut self, action: &str) -> Result<Transition, ActionError> {
        let transition = if action.trim() == "back" {
            Transition::Pop
        } else {
            let Some(mounted) = self.stack.last() else {
                return Err(ActionError::AtRoot);
            };
            mounted.screen.press(action)?
        };
        debug!(action, ?transition, "action applied");

        match transition {
            Transition::Stay => {}
            Transition::Push(id) => self.push(id),
            Transition::Pop => {
                self.pop()?;
            }
        }
        Ok(transition)
    }

    /// Frames rendered so far, oldest first.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.borrow().clone()
    }

    /// Remove and return the frames rendered so far.
    pub fn take_frames(&self) -> Vec<Frame> {
        std::mem::take(&mut *self.frames.borrow_mut())
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_catalog_with_one_frame() {
        let app = AppModel::new();
        assert_eq!(app.current_screen(), ScreenId::Catalog);
        assert_eq!(app.depth(), 1);
        let frames = app.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].screen, ScreenId::Catalog);
    }

    #[test]
    fn open_and_back() {
        let mut app = AppModel::new();
        app.press("open=list").unwrap();
        assert_eq!(app.current_screen(), ScreenId::List);
        assert_eq!(app.depth(), 2);

        assert_eq!(app.press("back"), Ok(Transition::Pop));
        assert_eq!(app.current_screen(), ScreenId::Catalog);
        assert_eq!(app.press("back"), Err(ActionError::AtRoot));
    }

    #[test]
    fn static_screen_draws_once() {
        let mut app = AppModel::new();
        app.take_frames();
        app.push(ScreenId::Framed);
        let frames = app.take_frames();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].text.contains("Borders"));
    }

    #[test]
    fn popping_binding_screen_detaches_it_from_mix() {
        let mut app = AppModel::new();
        app.push(ScreenId::Binding);
        assert_eq!(app.mix().subscriber_count(), 1);
        app.pop().unwrap();
        assert_eq!(app.mix().subscriber_count(), 0);
    }
}
