#![forbid(unsafe_code)]

//! Personal-info form backed by its own observable record.
//!
//! The text field and the two pickers edit the record through
//! [`TwoWayBinding`]s, the way a form control writes to bound state.

use bindkit_runtime::{BindingScope, Field, ObservableRecord, Record, TwoWayBinding};

use super::{ActionError, Redraw, Screen, ScreenId, Transition, header, parse_index, split_action};

pub const LOCATIONS: [&str; 3] = ["Portland", "Seattle", "Austin"];
pub const BUILDING_TYPES: [&str; 3] = ["Lab", "Administration", "Housing"];
const ROW_COUNT: usize = 3;

/// Form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub location_index: usize,
    pub building_number: u32,
    pub building_type_index: usize,
}

impl FormState {
    pub const NAME: Field<FormState, String> = Field::new("name", |f| &f.name, |f| &mut f.name);
    pub const LOCATION_INDEX: Field<FormState, usize> = Field::new(
        "location_index",
        |f| &f.location_index,
        |f| &mut f.location_index,
    );
    pub const BUILDING_NUMBER: Field<FormState, u32> = Field::new(
        "building_number",
        |f| &f.building_number,
        |f| &mut f.building_number,
    );
    pub const BUILDING_TYPE_INDEX: Field<FormState, usize> = Field::new(
        "building_type_index",
        |f| &f.building_type_index,
        |f| &mut f.building_type_index,
    );
}

impl Record for FormState {
    const TYPE_NAME: &'static str = "FormState";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "location_index",
        "building_number",
        "building_type_index",
    ];

    fn describe_field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "location_index" => Some(label(&LOCATIONS, self.location_index).to_string()),
            "building_number" => Some(self.building_number.to_string()),
            "building_type_index" => {
                Some(label(&BUILDING_TYPES, self.building_type_index).to_string())
            }
            _ => None,
        }
    }
}

pub struct FormScreen {
    state: ObservableRecord<FormState>,
    name: TwoWayBinding<String>,
    location: TwoWayBinding<usize>,
    building_number: TwoWayBinding<u32>,
    building_type: TwoWayBinding<usize>,
}

impl FormScreen {
    #[must_use]
    pub fn new() -> Self {
        let state = ObservableRecord::new(FormState::default());
        Self {
            name: state.binding(FormState::NAME),
            location: state.binding(FormState::LOCATION_INDEX),
            building_number: state.binding(FormState::BUILDING_NUMBER),
            building_type: state.binding(FormState::BUILDING_TYPE_INDEX),
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ObservableRecord<FormState> {
        &self.state
    }
}

impl Default for FormScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Picker label for `index`, or `?` when the stored index is out of range.
fn label<'a>(options: &[&'a str], index: usize) -> &'a str {
    options.get(index).copied().unwrap_or("?")
}

fn segmented(options: &[&str], selected: usize) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if i == selected {
                format!("[{option}]")
            } else {
                (*option).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Screen for FormScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Form
    }

    fn mount(&self, scope: &mut BindingScope, redraw: Redraw) {
        scope.observe(&self.state, move || redraw());
    }

    fn view_string(&self) -> String {
        let name = self.name.get();
        let name = if name.is_empty() { "<Name>".to_string() } else { name };
        let mut out = header(ScreenId::Form);
        out.push_str("\nPERSONAL INFO");
        out.push_str(&format!("\n  Name: {name}"));
        out.push_str(&format!("\n  Location: {}", label(&LOCATIONS, self.location.get())));
        out.push_str(&format!("\n  Building: {}", self.building_number.get()));
        out.push_str(&format!(
            "\n  Building type: {}",
            segmented(&BUILDING_TYPES, self.building_type.get())
        ));
        out.push_str("\nROWS");
        for row in 0..ROW_COUNT {
            out.push_str(&format!("\n  Row {row}"));
        }
        out
    }

    fn press(&self, action: &str) -> Result<Transition, ActionError> {
        match split_action(action) {
            ("name", Some(value)) => self.name.set(value.to_string()),
            ("location", value) => {
                self.location
                    .set(parse_index("location", value, LOCATIONS.len())?);
            }
            ("type", value) => {
                self.building_type
                    .set(parse_index("type", value, BUILDING_TYPES.len())?);
            }
            ("building", value) => {
                let raw = value.unwrap_or_default();
                let number = raw.trim().parse::<u32>().map_err(|_| ActionError::InvalidValue {
                    action: "building",
                    value: raw.to_string(),
                })?;
                self.building_number.set(number);
            }
            _ => {
                return Err(ActionError::Unknown {
                    screen: ScreenId::Form,
                    action: action.to_string(),
                });
            }
        }
        Ok(Transition::Stay)
    }
}
