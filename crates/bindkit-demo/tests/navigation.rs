//! End-to-end navigation through the demo catalog.
//!
//! Drives the app the way the binary does: push screens, apply actions, and
//! inspect the frames each state change produced.

use bindkit_demo::app::AppModel;
use bindkit_demo::mix::Mix;
use bindkit_demo::screens::{ActionError, ScreenId, Transition};
use bindkit_runtime::ObservableRecord;
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

#[test]
fn load_on_binding_screen_renders_each_field_change() {
    init_tracing();
    let mut app = AppModel::new();
    assert_eq!(app.press("open=binding"), Ok(Transition::Push(ScreenId::Binding)));
    app.take_frames();

    app.press("load").unwrap();
    let frames = app.take_frames();
    // One frame per field set: name first, then ingredients.
    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|f| f.screen == ScreenId::Binding));
    assert!(frames[0].text.contains("[ Rum and coke ]"));
    assert!(!frames[0].text.contains("Coke\n"));
    assert!(frames[1].text.contains("  Rum\n  Coke\n  Ice"));
}

#[test]
fn mix_survives_leaving_and_reentering_binding_screen() {
    init_tracing();
    let mix = ObservableRecord::new(Mix::default());
    let mut app = AppModel::with_mix(mix.clone());

    app.press("open=binding").unwrap();
    app.press("load").unwrap();
    app.press("back").unwrap();
    assert_eq!(mix.subscriber_count(), 0);

    app.take_frames();
    app.press("open=binding").unwrap();
    let frames = app.take_frames();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].text.contains("[ Rum and coke ]"));
    assert_eq!(mix.get(&Mix::NAME), "Rum and coke");
}

#[test]
fn external_writes_reach_mounted_screen() {
    init_tracing();
    let mix = ObservableRecord::new(Mix::default());
    let mut app = AppModel::with_mix(mix.clone());
    app.push(ScreenId::Binding);
    app.take_frames();

    mix.update(&Mix::INGREDIENTS, |items| items.push("Mint".into()));
    let frames = app.take_frames();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].text.contains("  Mint"));
}

#[test]
fn info_sheet_round_trip() {
    init_tracing();
    let mut app = AppModel::new();
    app.take_frames();

    app.press("info").unwrap();
    app.press("dismiss").unwrap();
    let frames = app.take_frames();
    assert_eq!(frames.len(), 2);
    assert!(frames[0].text.contains("[sheet] Info View"));
    assert!(!frames[1].text.contains("Info View"));
}

#[test]
fn form_edits_render_through_bindings() {
    init_tracing();
    let mut app = AppModel::new();
    app.push(ScreenId::Form);
    app.take_frames();

    app.press("name=Ada").unwrap();
    app.press("location=1").unwrap();
    let frames = app.take_frames();
    assert_eq!(frames.len(), 2);
    assert!(frames[1].text.contains("Name: Ada"));
    assert!(frames[1].text.contains("Location: Seattle"));
}

#[test]
fn errors_leave_state_untouched() {
    init_tracing();
    let mut app = AppModel::new();
    app.push(ScreenId::Stacks);
    app.take_frames();

    assert!(matches!(
        app.press("load"),
        Err(ActionError::Unknown {
            screen: ScreenId::Stacks,
            ..
        })
    ));
    assert!(app.take_frames().is_empty());
    assert_eq!(app.current_screen(), ScreenId::Stacks);
}

#[test]
fn every_link_opens_and_closes() {
    init_tracing();
    let mut app = AppModel::new();
    for &id in ScreenId::LINKS {
        app.press(&format!("open={id}")).unwrap();
        assert_eq!(app.current_screen(), id);
        app.press("back").unwrap();
        assert_eq!(app.depth(), 1);
    }
}
