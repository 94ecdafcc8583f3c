use std::{cell::RefCell, rc::Rc};

use groundwork_core::{
    Command, Direction, GridCoord, GridTile, GroundType, PlacementError, TileShape,
};
use groundwork_system_preview::{InstanceLedger, PlacementPreview, PreviewInput, PreviewStatus};
use groundwork_world::{apply, GridEngine};

fn seeded_engine() -> GridEngine {
    let mut engine = GridEngine::with_dimensions(6, 6);
    engine.place_initial_tile(&[GridTile::single(GroundType::Grass)], Direction::North);
    engine
}

fn domino(ground: GroundType) -> GridTile {
    GridTile::new(TileShape::rectangle(2, 1), ground)
}

#[test]
fn hidden_until_tile_and_anchor_are_known() {
    let engine = seeded_engine();
    let mut preview = PlacementPreview::new();
    assert_eq!(preview.status(&engine), PreviewStatus::Hidden);

    preview.select(domino(GroundType::Sand), Direction::North);
    assert_eq!(preview.status(&engine), PreviewStatus::Hidden);
    assert!(preview.footprint().is_empty());

    preview.hover(GridCoord::new(3, 2));
    assert_eq!(preview.status(&engine), PreviewStatus::Valid);
}

#[test]
fn footprint_follows_rotation() {
    let mut preview = PlacementPreview::new();
    preview.select(domino(GroundType::Sand), Direction::North);
    preview.hover(GridCoord::new(3, 2));
    assert_eq!(
        preview.footprint(),
        vec![GridCoord::new(3, 2), GridCoord::new(4, 2)]
    );

    preview.rotate_clockwise();
    assert_eq!(preview.direction(), Direction::East);
    assert_eq!(
        preview.footprint(),
        vec![GridCoord::new(3, 2), GridCoord::new(3, 3)]
    );

    preview.rotate_counter_clockwise();
    preview.rotate_counter_clockwise();
    assert_eq!(preview.direction(), Direction::West);
}

#[test]
fn blocked_status_reports_reason() {
    let mut engine = seeded_engine();
    assert!(engine.place_tile(3, 2, &GridTile::single(GroundType::Grass), Direction::North));
    let mut preview = PlacementPreview::new();
    preview.select(GridTile::single(GroundType::Rock), Direction::North);

    preview.hover(GridCoord::new(0, 0));
    assert_eq!(
        preview.status(&engine),
        PreviewStatus::Blocked(PlacementError::NotNearGround)
    );

    preview.hover(GridCoord::new(3, 3));
    assert_eq!(
        preview.status(&engine),
        PreviewStatus::Blocked(PlacementError::Occupied {
            cell: GridCoord::new(3, 3)
        })
    );
}

#[test]
fn confirm_places_and_hides() {
    let mut engine = seeded_engine();
    let mut preview = PlacementPreview::new();
    preview.select(domino(GroundType::Sand), Direction::North);
    preview.hover(GridCoord::new(3, 2));

    assert!(preview.confirm(&mut engine));

    assert_eq!(engine.tile_type(3, 2), GroundType::Sand);
    assert_eq!(engine.tile_type(4, 2), GroundType::Sand);
    assert_eq!(preview.status(&engine), PreviewStatus::Hidden);
    assert!(preview.tile().is_none());
}

#[test]
fn rejected_confirm_keeps_preview() {
    let mut engine = seeded_engine();
    let mut preview = PlacementPreview::new();
    preview.select(domino(GroundType::Sand), Direction::North);
    preview.hover(GridCoord::new(0, 0));

    assert!(!preview.confirm(&mut engine));

    assert_eq!(preview.anchor(), Some(GridCoord::new(0, 0)));
    assert_eq!(engine.points(), vec![GridCoord::new(3, 3)]);
}

#[test]
fn handle_emits_place_command_for_valid_confirmation() {
    let mut engine = seeded_engine();
    let mut preview = PlacementPreview::new();
    preview.select(domino(GroundType::Lake), Direction::North);
    let mut commands = Vec::new();

    preview.handle(
        PreviewInput {
            cursor_cell: Some(GridCoord::new(3, 4)),
            rotate_clockwise: true,
            confirm_action: true,
            ..PreviewInput::default()
        },
        &engine,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PlaceTile {
            anchor: GridCoord::new(3, 4),
            tile: domino(GroundType::Lake),
            direction: Direction::East,
        }],
        "rotation applies before the confirmation is evaluated"
    );
    assert_eq!(preview.status(&engine), PreviewStatus::Hidden);

    for command in commands {
        assert!(apply(&mut engine, command));
    }
    assert_eq!(engine.tile_type(3, 5), GroundType::Lake);
}

#[test]
fn handle_ignores_blocked_confirmation() {
    let engine = seeded_engine();
    let mut preview = PlacementPreview::new();
    preview.select(GridTile::single(GroundType::Rock), Direction::North);
    let mut commands = Vec::new();

    preview.handle(
        PreviewInput {
            cursor_cell: Some(GridCoord::new(0, 5)),
            confirm_action: true,
            ..PreviewInput::default()
        },
        &engine,
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(preview.anchor(), Some(GridCoord::new(0, 5)));
}

#[test]
fn cancel_hides_preview() {
    let engine = seeded_engine();
    let mut preview = PlacementPreview::new();
    preview.select(GridTile::single(GroundType::Rock), Direction::North);
    preview.hover(GridCoord::new(3, 2));
    let mut commands = Vec::new();

    preview.handle(
        PreviewInput {
            cancel_action: true,
            confirm_action: true,
            ..PreviewInput::default()
        },
        &engine,
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(preview.status(&engine), PreviewStatus::Hidden);
}

#[test]
fn ledger_tracks_engine_events() {
    let mut engine = GridEngine::with_dimensions(6, 6);
    let ledger = Rc::new(RefCell::new(InstanceLedger::new()));
    let _ = engine.subscribe(Box::new(Rc::clone(&ledger)));

    engine.place_initial_tile(&[GridTile::single(GroundType::Grass)], Direction::North);
    assert!(engine.place_tile(3, 2, &domino(GroundType::Sand), Direction::North));
    assert!(engine.update_one_tile(3, 3, GroundType::Rock));
    assert!(engine.remove_one_tile(4, 2));

    let ledger = ledger.borrow();
    assert!(ledger.instances(GroundType::Grass).is_empty());
    assert_eq!(ledger.instances(GroundType::Sand), &[GridCoord::new(3, 2)]);
    assert_eq!(ledger.instances(GroundType::Rock), &[GridCoord::new(3, 3)]);
    assert_eq!(ledger.len(), engine.grid().occupied_count());
    assert_eq!(ledger.missing_removals(), 0);
}

#[test]
fn rebuild_matches_live_tracking() {
    let mut engine = seeded_engine();
    let live = Rc::new(RefCell::new(InstanceLedger::new()));
    live.borrow_mut().rebuild(&engine);
    let _ = engine.subscribe(Box::new(Rc::clone(&live)));

    assert!(engine.place_tile(2, 3, &GridTile::single(GroundType::Mountain), Direction::North));
    assert!(engine.place_tile(3, 4, &GridTile::single(GroundType::Mountain), Direction::North));

    let mut rebuilt = InstanceLedger::new();
    rebuilt.rebuild(&engine);

    for ground in GroundType::ALL_GROUND {
        let mut live_cells = live.borrow().instances(ground).to_vec();
        let mut rebuilt_cells = rebuilt.instances(ground).to_vec();
        live_cells.sort_by_key(|cell| (cell.y(), cell.x()));
        rebuilt_cells.sort_by_key(|cell| (cell.y(), cell.x()));
        assert_eq!(live_cells, rebuilt_cells, "{ground} instances diverged");
    }
}
