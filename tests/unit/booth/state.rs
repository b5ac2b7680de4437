use super::*;

fn snap(marker: u8) -> Snapshot {
    Snapshot::from_image(image::RgbaImage::from_pixel(
        4,
        4,
        image::Rgba([marker, 0, 0, 255]),
    ))
}

fn at_camera() -> PhotoBoothState {
    PhotoBoothState::new()
        .reduce(BoothEvent::SelectLayout("4-square".into()))
        .reduce(BoothEvent::SelectTheme("ocean".into()))
        .reduce(BoothEvent::SubmitCaption("Hi!".into()))
}

fn at_editor() -> PhotoBoothState {
    at_camera().reduce(BoothEvent::PhotosCaptured(vec![snap(1), snap(2), snap(3), snap(4)]))
}

#[test]
fn forward_flow_records_selections() {
    let s = PhotoBoothState::new();
    assert_eq!(s.step(), BoothStep::Layout);

    let s = s.reduce(BoothEvent::SelectLayout("4-square".into()));
    assert_eq!(s.step(), BoothStep::Design);
    assert_eq!(s.layout_id(), Some("4-square"));

    let s = s.reduce(BoothEvent::SelectTheme("ocean".into()));
    assert_eq!(s.step(), BoothStep::Text);
    assert_eq!(s.theme_id(), Some("ocean"));

    let s = s.reduce(BoothEvent::SubmitCaption("Hi!".into()));
    assert_eq!(s.step(), BoothStep::Camera);
    assert_eq!(s.caption(), "Hi!");

    let s = s.reduce(BoothEvent::PhotosCaptured(vec![snap(1), snap(2)]));
    assert_eq!(s.step(), BoothStep::Editor);
    assert_eq!(s.photos().len(), 2);
    assert!(!s.grayscale());
}

#[test]
fn caption_is_truncated_by_characters() {
    let long: String = "é".repeat(130);
    let s = PhotoBoothState::new()
        .reduce(BoothEvent::SelectLayout("3-vertical".into()))
        .reduce(BoothEvent::SelectTheme("classic".into()))
        .reduce(BoothEvent::SubmitCaption(long));
    assert_eq!(s.caption().chars().count(), 100);
}

#[test]
fn events_for_other_steps_are_ignored() {
    let s = PhotoBoothState::new();
    assert_eq!(s.clone().reduce(BoothEvent::SelectTheme("ocean".into())), s);
    assert_eq!(s.clone().reduce(BoothEvent::ToggleGrayscale), s);
    assert_eq!(s.clone().reduce(BoothEvent::PhotosCaptured(vec![snap(1)])), s);

    let cam = at_camera();
    assert_eq!(cam.clone().reduce(BoothEvent::SelectLayout("x".into())), cam);
}

#[test]
fn back_steps_one_screen_and_is_noop_on_first() {
    let s = PhotoBoothState::new();
    assert_eq!(s.clone().reduce(BoothEvent::Back), s);

    let cam = at_camera();
    let text = cam.reduce(BoothEvent::Back);
    assert_eq!(text.step(), BoothStep::Text);
    assert_eq!(text.layout_id(), Some("4-square"));
    let design = text.reduce(BoothEvent::Back);
    assert_eq!(design.step(), BoothStep::Design);
    let layout = design.reduce(BoothEvent::Back);
    assert_eq!(layout.step(), BoothStep::Layout);
}

#[test]
fn back_from_editor_resets_everything() {
    let editor = at_editor().reduce(BoothEvent::ToggleGrayscale);
    assert!(editor.grayscale());
    let reset = editor.reduce(BoothEvent::Back);
    assert_eq!(reset, PhotoBoothState::new());
}

#[test]
fn toggle_grayscale_flips() {
    let s = at_editor().reduce(BoothEvent::ToggleGrayscale);
    assert!(s.grayscale());
    let s = s.reduce(BoothEvent::ToggleGrayscale);
    assert!(!s.grayscale());
}

#[test]
fn capture_step_transitions_are_observable() {
    let text = PhotoBoothState::new()
        .reduce(BoothEvent::SelectLayout("4-square".into()))
        .reduce(BoothEvent::SelectTheme("ocean".into()));
    let cam = at_camera();
    assert!(enters_capture(&text, &cam));
    assert!(!leaves_capture(&text, &cam));

    let editor = at_editor();
    assert!(leaves_capture(&cam, &editor));
    assert!(leaves_capture(&cam, &cam.clone().reduce(BoothEvent::Back)));
    assert!(!leaves_capture(&cam, &cam));
    assert!(!leaves_capture(&editor, &editor.clone().reduce(BoothEvent::ToggleGrayscale)));
}

#[test]
fn composite_spec_requires_editor_and_known_ids() {
    let catalog = Catalog::builtin();
    assert!(at_camera().composite_spec(&catalog).is_err());

    let editor = at_editor().reduce(BoothEvent::ToggleGrayscale);
    let spec = editor.composite_spec(&catalog).unwrap();
    assert_eq!(spec.layout.id, "4-square");
    assert_eq!(spec.theme.id, "ocean");
    assert_eq!(spec.caption, "Hi!");
    assert!(spec.grayscale);
    assert_eq!(spec.images.len(), 4);

    let unknown = PhotoBoothState::new()
        .reduce(BoothEvent::SelectLayout("nope".into()))
        .reduce(BoothEvent::SelectTheme("ocean".into()))
        .reduce(BoothEvent::SubmitCaption(String::new()))
        .reduce(BoothEvent::PhotosCaptured(Vec::new()));
    assert!(matches!(
        unknown.composite_spec(&catalog),
        Err(BoothError::Validation(_))
    ));
}
