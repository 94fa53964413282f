#![forbid(unsafe_code)]

//! Root navigation list with an info sheet.

use bindkit_runtime::{BindingScope, Observable};
use tracing::info;

use super::{ActionError, Redraw, Screen, ScreenId, Transition, split_action};

pub struct CatalogScreen {
    show_info: Observable<bool>,
}

impl CatalogScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_info: Observable::new(false),
        }
    }

    #[must_use]
    pub fn is_info_presented(&self) -> bool {
        self.show_info.get()
    }
}

impl Default for CatalogScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for CatalogScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Catalog
    }

    fn mount(&self, scope: &mut BindingScope, redraw: Redraw) {
        info!("Appeared");
        scope.observe_value(&self.show_info, move |_| redraw());
    }

    fn view_string(&self) -> String {
        let mut out = format!("{:<28}(i)\n", ScreenId::Catalog.title());
        out.push_str(&"-".repeat(31));
        for link in ScreenId::LINKS {
            out.push_str(&format!("\n  {:<26} >", link.title()));
        }
        if self.show_info.get() {
            out.push_str("\n\n[sheet] Info View");
        }
        out
    }

    fn press(&self, action: &str) -> Result<Transition, ActionError> {
        match split_action(action) {
            ("info", None) => {
                self.show_info.toggle();
                Ok(Transition::Stay)
            }
            ("dismiss", None) => {
                self.show_info.set(false);
                Ok(Transition::Stay)
            }
            ("open", Some(name)) => ScreenId::from_name(name)
                .filter(|id| ScreenId::LINKS.contains(id))
                .map(Transition::Push)
                .ok_or_else(|| ActionError::InvalidValue {
                    action: "open",
                    value: name.to_string(),
                }),
            _ => Err(ActionError::Unknown {
                screen: ScreenId::Catalog,
                action: action.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_link() {
        let screen = CatalogScreen::new();
        let view = screen.view_string();
        for link in ScreenId::LINKS {
            assert!(view.contains(link.title()), "missing {link}");
        }
        assert!(!view.contains("Info View"));
    }

    #[test]
    fn info_toggles_sheet() {
        let screen = CatalogScreen::new();
        assert_eq!(screen.press("info"), Ok(Transition::Stay));
        assert!(screen.is_info_presented());
        assert!(screen.view_string().contains("[sheet] Info View"));

        screen.press("dismiss").unwrap();
        assert!(!screen.is_info_presented());
    }

    #[test]
    fn open_pushes_link() {
        let screen = CatalogScreen::new();
        assert_eq!(
            screen.press("open=binding"),
            Ok(Transition::Push(ScreenId::Binding))
        );
        assert!(screen.press("open=catalog").is_err());
        assert!(screen.press("open=nowhere").is_err());
    }

    #[test]
    fn unknown_action() {
        let screen = CatalogScreen::new();
        assert!(matches!(
            screen.press("load"),
            Err(ActionError::Unknown { .. })
        ));
    }
}
