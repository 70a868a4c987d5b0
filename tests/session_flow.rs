//! Integration tests for the table placement session
//!
//! Walks a table through configure -> preview -> commit the way an editor
//! drives it, and checks the preview seats agree with the committed table.

use pretty_assertions::assert_eq;

use seat_layout::layout::{LayoutConfig, Placement, Point, TableShape};
use seat_layout::session::{PlacementSession, SessionError, SessionState, MAX_SCALE};

const EPSILON: f64 = 0.001;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn configured() -> PlacementSession {
    let mut session = PlacementSession::new(LayoutConfig::default());
    session.open().unwrap();
    session
}

#[test]
fn test_full_preview_flow() {
    let mut session = configured();
    session.set_shape(TableShape::Rectangle).unwrap();
    session.set_size(120.0, 60.0).unwrap();
    session.set_seat_count(6).unwrap();
    session.set_label(Some("Head table".to_string())).unwrap();

    let inline = session.inline_preview().unwrap();
    assert_eq!(inline.seats.len(), 6);

    session.start_preview(Point::new(400.0, 300.0)).unwrap();
    assert_eq!(session.rotate_step(6).unwrap(), 90.0);
    assert!(approx_eq(session.scale_step(2).unwrap(), 1.2));
    session.move_to(Point::new(500.0, 250.0)).unwrap();

    let preview = session.preview().unwrap();
    let table = session.commit().unwrap();

    assert_eq!(table.seats, preview);
    assert_eq!(table.layout.spec.label.as_deref(), Some("Head table"));
    assert_eq!(table.placement.position, Point::new(500.0, 250.0));
    assert!(matches!(session.state(), SessionState::Committed { .. }));

    session.reset().unwrap();
    assert_eq!(session.state(), &SessionState::Idle);
}

#[test]
fn test_preview_rotates_about_table_center() {
    let mut session = configured();
    session.set_shape(TableShape::Square).unwrap();
    session.start_preview(Point::new(100.0, 100.0)).unwrap();

    // Square 80x80 with 4 seats: seat 0 starts 52 above the center
    let before = session.preview().unwrap();
    assert!(approx_eq(before[0].position.x, 100.0));
    assert!(approx_eq(before[0].position.y, 48.0));

    // Quarter turn clockwise on screen moves it to the right of the center
    session.set_rotation(90.0).unwrap();
    let after = session.preview().unwrap();
    assert!(approx_eq(after[0].position.x, 152.0));
    assert!(approx_eq(after[0].position.y, 100.0));
}

#[test]
fn test_commit_immediately_uses_identity_transform() {
    let mut session = configured();
    let inline = session.inline_preview().unwrap();
    let table = session.commit_immediately(Point::new(40.0, 40.0)).unwrap();

    assert_eq!(table.placement, Placement::at(Point::new(40.0, 40.0)));
    // Table center is (40, 40) locally, so the seats do not move
    for (placed, local) in table.seats.iter().zip(&inline.seats) {
        assert!(approx_eq(placed.position.x, local.position.x));
        assert!(approx_eq(placed.position.y, local.position.y));
    }
}

#[test]
fn test_cancel_from_preview_produces_nothing() {
    let mut session = configured();
    session.start_preview(Point::new(0.0, 0.0)).unwrap();
    session.cancel().unwrap();

    assert_eq!(session.state(), &SessionState::Cancelled);
    assert_eq!(session.placement(), None);
    assert!(session.commit().is_err());
    session.reset().unwrap();
    session.open().unwrap();
}

#[test]
fn test_illegal_transitions() {
    let mut session = PlacementSession::default();
    assert_eq!(
        session.start_preview(Point::new(0.0, 0.0)),
        Err(SessionError::InvalidTransition {
            action: "start a preview",
            state: "idle",
        })
    );
    assert!(session.rotate_step(1).is_err());
    assert!(session.cancel().is_err());
    assert!(session.reset().is_err());

    session.open().unwrap();
    assert!(session.open().is_err());
    assert!(session.commit().is_err());
    assert!(session.preview().is_err());
    assert!(session.reset().is_err());
}

#[test]
fn test_scale_limits_hold_through_steps() {
    let mut session = configured();
    session.start_preview(Point::new(0.0, 0.0)).unwrap();
    for _ in 0..20 {
        session.scale_step(1).unwrap();
    }
    assert_eq!(session.placement().unwrap().scale, MAX_SCALE);
    assert_eq!(session.set_scale(0.1).unwrap(), 0.5);
}

#[test]
fn test_label_edit_keeps_geometry() {
    let mut session = configured();
    let revision = session.geometry_revision();
    session.set_category(Some("vip".to_string())).unwrap();
    session.set_label(Some("T1".to_string())).unwrap();
    assert_eq!(session.geometry_revision(), revision);

    session.set_seat_count(8).unwrap();
    assert_eq!(session.geometry_revision(), revision + 1);
    assert!(session
        .inline_preview()
        .unwrap()
        .seats
        .iter()
        .all(|s| s.category.as_deref() == Some("vip")));
}

#[test]
fn test_session_survives_toml_round_trip() {
    let mut session = configured();
    session.set_shape(TableShape::Triangle).unwrap();
    session.set_size(90.0, 78.0).unwrap();
    session.set_seat_count(6).unwrap();
    session.start_preview(Point::new(200.0, 120.0)).unwrap();
    session.rotate_step(-1).unwrap();

    let saved = toml::to_string(&session).unwrap();
    assert!(saved.contains(r#"state = "previewing""#));

    let mut restored: PlacementSession = toml::from_str(&saved).unwrap();
    assert_eq!(restored, session);
    assert_eq!(restored.placement().unwrap().rotation, 345.0);
    assert_eq!(restored.commit().unwrap(), session.commit().unwrap());
}

#[test]
fn test_restored_session_keeps_its_config() {
    let config = LayoutConfig::default()
        .with_seat_radius(20.0)
        .with_max_seat_count(30);
    let mut session = PlacementSession::new(config.clone());
    session.open().unwrap();
    session.set_shape(TableShape::Round).unwrap();
    session.set_seat_count(25).unwrap();
    let before = session.inline_preview().unwrap();

    let saved = toml::to_string(&session).unwrap();
    let mut restored: PlacementSession = toml::from_str(&saved).unwrap();
    assert_eq!(restored.config(), &config);

    // 25 seats is only legal under the saved cap of 30
    restored.set_label(Some("Long table".to_string())).unwrap();
    // Seats recomputed after the restore still sit 20 out from the outline
    restored.set_size(100.0, 100.0).unwrap();
    let after = restored.inline_preview().unwrap();
    assert!(approx_eq(after.seats[0].position.y, before.seats[0].position.y));
    assert!(approx_eq(after.seats[0].position.y, -20.0));
}
