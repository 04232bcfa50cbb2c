//! Per-kind handler outcomes.

mod common;

use ember_server::entity::{Entity, EntityKind};
use ember_server::form::{Form, FormResponse};
use ember_server::map::{MapData, MapDecoration};
use ember_server::protocol::packets::Interact;
use ember_server::protocol::{CURRENT_PROTOCOL, ClientboundPacket};
use ember_server::session::Disposition;
use serde_json::json;

use common::*;

// ---------------------------------------------------------------------------
// Movement and session
// ---------------------------------------------------------------------------

#[test]
fn movement_is_always_claimed() {
    let mut h = Harness::new();
    assert_eq!(h.feed(&move_player([10.0, 65.5, -3.0], 15.0, 90.0)), Disposition::Handled);
    assert_eq!(h.player().position, [10.0, 65.5, -3.0]);
    assert_eq!(h.player().rotation, [15.0, 90.0, 90.0]);
    assert!(h.player().on_ground);
}

#[test]
fn login_is_recorded_once() {
    let mut h = Harness::new();
    assert_eq!(h.feed(&login(CURRENT_PROTOCOL, b"{}")), Disposition::Handled);
    assert!(h.player().is_logged_in());
    assert_eq!(h.player().protocol(), Some(CURRENT_PROTOCOL));

    assert_eq!(h.feed(&login(CURRENT_PROTOCOL, b"{}")), Disposition::Unhandled);
}

#[test]
fn local_player_initialized_marks_spawned() {
    let mut h = Harness::new();
    assert!(!h.player().is_spawned());
    assert_eq!(h.feed(&local_player_initialized()), Disposition::Handled);
    assert!(h.player().is_spawned());
}

#[test]
fn view_distance_request_is_clamped_and_echoed() {
    let mut h = Harness::new();
    h.max_view_distance = 12;

    assert_eq!(h.feed(&request_chunk_radius(8)), Disposition::Handled);
    assert_eq!(h.feed(&request_chunk_radius(64)), Disposition::Handled);
    assert_eq!(h.feed(&request_chunk_radius(0)), Disposition::Handled);

    assert_eq!(h.player().view_distance(), 1);
    assert_eq!(
        h.outbound.sent(),
        vec![
            (CONN_ID, ClientboundPacket::ChunkRadiusUpdated { radius: 8 }),
            (CONN_ID, ClientboundPacket::ChunkRadiusUpdated { radius: 12 }),
            (CONN_ID, ClientboundPacket::ChunkRadiusUpdated { radius: 1 }),
        ]
    );
}

// ---------------------------------------------------------------------------
// Riding
// ---------------------------------------------------------------------------

#[test]
fn mount_input_requires_riding() {
    let mut h = Harness::new();
    assert_eq!(h.feed(&player_input(0.5, 1.0, false)), Disposition::Unhandled);
}

#[test]
fn mount_input_reaches_a_live_mount() {
    let mut h = Harness::new();
    let pig = h.entities.spawn(Entity::new(EntityKind::Pig, [0.0; 3]));
    h.player_mut().mount(pig);

    assert_eq!(h.feed(&player_input(0.25, 1.0, true)), Disposition::Handled);
    let input = h.entities.get(pig).unwrap().rider_input;
    assert_eq!(input.strafe, 0.25);
    assert_eq!(input.forward, 1.0);
    assert!(input.jumping);
}

#[test]
fn mount_input_to_a_dead_or_missing_mount_is_not_handled() {
    let mut h = Harness::new();
    let horse = h.entities.spawn(Entity::new(EntityKind::Horse, [0.0; 3]));
    h.player_mut().mount(horse);

    h.entities.get_mut(horse).unwrap().alive = false;
    assert_eq!(h.feed(&player_input(0.0, 1.0, false)), Disposition::Unhandled);

    h.entities.despawn(horse);
    assert_eq!(h.feed(&player_input(0.0, 1.0, false)), Disposition::Unhandled);
}

#[test]
fn rider_jump_only_moves_horses() {
    let mut h = Harness::new();
    let horse = h.entities.spawn(Entity::new(EntityKind::Horse, [0.0; 3]));
    let boat = h.entities.spawn(Entity::new(EntityKind::Boat, [0.0; 3]));

    h.player_mut().mount(horse);
    assert_eq!(h.feed(&rider_jump(80)), Disposition::Handled);
    assert!((h.entities.get(horse).unwrap().jump_power - 0.8).abs() < 1e-6);

    h.player_mut().mount(boat);
    assert_eq!(h.feed(&rider_jump(80)), Disposition::Unhandled);
    assert_eq!(h.entities.get(boat).unwrap().jump_power, 0.0);
}

#[test]
fn absolute_move_steers_only_the_ridden_entity() {
    let mut h = Harness::new();
    let boat = h.entities.spawn(Entity::new(EntityKind::Boat, [0.0; 3]));
    let other = h.entities.spawn(Entity::new(EntityKind::Minecart, [0.0; 3]));
    h.player_mut().mount(boat);

    let target = [4.0, 62.0, 9.0];
    assert_eq!(h.feed(&move_entity_absolute(boat.runtime_id(), target)), Disposition::Handled);
    let moved = h.entities.get(boat).unwrap();
    assert_eq!(moved.position, target);
    assert_eq!(moved.rotation[1], 90.0);

    assert_eq!(
        h.feed(&move_entity_absolute(other.runtime_id(), target)),
        Disposition::Unhandled
    );
    assert_eq!(h.entities.get(other).unwrap().position, [0.0; 3]);
}

#[test]
fn leaving_a_vehicle_dismounts() {
    let mut h = Harness::new();
    let boat = h.entities.spawn(Entity::new(EntityKind::Boat, [0.0; 3]));
    h.player_mut().mount(boat);

    let leave = interact(Interact::ACTION_LEAVE_VEHICLE, boat.runtime_id());
    assert_eq!(h.feed(&leave), Disposition::Handled);
    assert_eq!(h.player().riding(), None);
    assert_eq!(h.feed(&leave), Disposition::Unhandled);
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

#[test]
fn known_map_is_sent_back() {
    let mut h = Harness::new();
    let mut data = MapData::blank(42, 0, 2);
    data.decorations.push(MapDecoration {
        icon: 0,
        rotation: 8,
        x: -10,
        y: 20,
        label: "home".into(),
        color: 0xffff_ffff,
    });
    h.maps.insert(data.clone());

    assert_eq!(h.feed(&map_info_request(42)), Disposition::Handled);
    assert_eq!(
        h.outbound.sent(),
        vec![(CONN_ID, ClientboundPacket::map_item_data(&data))]
    );
}

#[test]
fn unknown_map_is_not_handled() {
    let mut h = Harness::new();
    h.maps.insert(MapData::blank(1, 0, 0));
    assert_eq!(h.feed(&map_info_request(2)), Disposition::Unhandled);
    assert!(h.outbound.sent().is_empty());
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[test]
fn repaired_custom_form_response_is_delivered() {
    let mut h = Harness::new();
    let id = h.player_mut().send_form(Form::custom("Settings", 4));

    assert_eq!(h.feed(&modal_form_response(id, r#"[A,,"B, C",]"#)), Disposition::Handled);
    assert_eq!(
        h.player().form_responses(),
        &[(id, FormResponse::Custom(vec![json!("A"), json!(""), json!("B, C"), json!("")]))]
    );
    assert!(!h.player().has_pending_form(id));
}

#[test]
fn modal_and_menu_responses() {
    let mut h = Harness::new();
    let modal = h.player_mut().send_form(Form::modal("Sure?"));
    let menu = h.player_mut().send_form(Form::menu("Pick", 3));

    assert_eq!(h.feed(&modal_form_response(modal, "true\n")), Disposition::Handled);
    assert_eq!(h.feed(&modal_form_response(menu, "2")), Disposition::Handled);
    assert_eq!(
        h.player().form_responses(),
        &[(modal, FormResponse::Modal(true)), (menu, FormResponse::Menu(2))]
    );
}

#[test]
fn closing_a_form_is_a_response() {
    let mut h = Harness::new();
    let id = h.player_mut().send_form(Form::menu("Pick", 3));
    assert_eq!(h.feed(&modal_form_response(id, "null")), Disposition::Handled);
    assert_eq!(h.player().form_responses(), &[(id, FormResponse::Closed)]);
}

#[test]
fn response_to_unknown_form_is_not_handled() {
    let mut h = Harness::new();
    assert_eq!(h.feed(&modal_form_response(99, "true")), Disposition::Unhandled);
    assert!(h.player().form_responses().is_empty());
}

#[test]
fn unrepairable_response_is_reported_not_fatal() {
    let mut h = Harness::new();
    let id = h.player_mut().send_form(Form::custom("Broken", 2));

    assert_eq!(h.feed(&modal_form_response(id, r#"["open, 1]"#)), Disposition::Unhandled);
    assert!(h.player().is_connected());
    assert!(h.player().has_pending_form(id));
}

#[test]
fn mismatched_response_shape_is_rejected() {
    let mut h = Harness::new();
    let id = h.player_mut().send_form(Form::menu("Pick", 2));
    assert_eq!(h.feed(&modal_form_response(id, "5")), Disposition::Unhandled);
    assert!(h.player().form_responses().is_empty());
}
