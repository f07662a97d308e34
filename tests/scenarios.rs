use lib::chess::*;
use proptest::sample::select;
use test_strategy::proptest;

fn sq(x: i8, y: i8) -> Square {
    Square::new(x, y).unwrap()
}

fn board(pieces: &[(&str, Role, (i8, i8))]) -> Board {
    let setup: Setup = pieces
        .iter()
        .map(|&(label, role, (x, y))| Entry {
            label: label.parse().unwrap(),
            role,
            square: sq(x, y),
        })
        .collect();

    Board::new(&setup).unwrap()
}

fn of(board: &Board, label: &str) -> Result<Bitboard, UnimplementedRule> {
    destinations(board, board.find(label).unwrap())
}

#[proptest]
fn destinations_stay_on_the_board_and_avoid_friends(#[strategy(0usize..32)] i: usize) {
    let board = Board::new(&Setup::default())?;
    let piece = board.roster().nth(i).unwrap();

    if let Ok(bb) = destinations(&board, piece) {
        for s in bb {
            assert!((Square::MIN..=Square::MAX).contains(&s.x()));
            assert!((Square::MIN..=Square::MAX).contains(&s.y()));
            assert!(board.piece_on(s).map_or(true, |p| p.faction() != piece.faction()));
        }

        assert_eq!(destinations(&board, piece), Ok(bb));
    }
}

#[proptest]
fn south_pieces_on_portals_cannot_move(
    #[strategy(select(Role::ALL.to_vec()))]
    #[filter(#r.faction() == Faction::South)]
    r: Role,
    #[strategy(0usize..2)] i: usize,
) {
    let portal = Square::PORTALS[i];
    let board = board(&[
        ("CC-?", r, (portal.x(), portal.y())),
        ("IC-K", Role::King, (portal.x(), portal.y() - 1)),
    ]);

    assert_eq!(of(&board, "CC-?"), Ok(Bitboard::empty()));
}

#[test]
fn north_pawn_advances_two_squares_only_through_empty_squares() {
    let b = board(&[("IC-S3", Role::Pawn, (3, 2))]);
    assert!(of(&b, "IC-S3").unwrap().contains(sq(3, 4)));

    let b = board(&[("IC-S3", Role::Pawn, (3, 2)), ("CC-B1", Role::Soldier, (3, 3))]);
    assert!(!of(&b, "IC-S3").unwrap().contains(sq(3, 4)));
}

#[test]
fn cannon_captures_along_a_rank_over_exactly_one_screen() {
    let screens: [&[(&str, Role, (i8, i8))]; 3] = [
        &[],
        &[("CC-B1", Role::Soldier, (4, 5))],
        &[("CC-B1", Role::Soldier, (4, 5)), ("IC-S2", Role::Pawn, (5, 5))],
    ];

    for (n, screens) in screens.into_iter().enumerate() {
        let mut pieces = vec![
            ("CC-P1", Role::Cannon, (2, 5)),
            ("IC-S1", Role::Pawn, (7, 5)),
        ];

        pieces.extend_from_slice(screens);
        let b = board(&pieces);
        assert_eq!(of(&b, "CC-P1").unwrap().contains(sq(7, 5)), n == 1);
    }
}

#[test]
fn horse_is_blocked_by_its_leg() {
    let mut game = Game::default();
    let horse = game.board().find("CC-M1").unwrap().id();
    let soldier = game.board().find("CC-B1").unwrap().id();

    let bb = game.destinations(horse).unwrap();
    assert!(!bb.contains(sq(1, 6)));
    assert!(!bb.contains(sq(3, 6)));

    game.select(soldier).unwrap();
    game.attempt_move(soldier, 2, 6).unwrap();

    let bb = game.destinations(horse).unwrap();
    assert!(bb.contains(sq(1, 6)));
    assert!(bb.contains(sq(3, 6)));
}

#[test]
fn moving_onto_an_enemy_captures_it_and_flips_the_turn() {
    let mut game = Game::new(board(&[
        ("CC-C1", Role::Chariot, (4, 7)),
        ("IC-S1", Role::Pawn, (4, 2)),
    ]));

    let chariot = game.board().find("CC-C1").unwrap().id();
    let pawn = game.board().find("IC-S1").unwrap().id();

    game.select(chariot).unwrap();
    let m = game.attempt_move(chariot, 4, 2).unwrap();

    assert_eq!(m.capture, Some(pawn));
    assert_eq!(m.next_turn, Faction::North);
    assert_eq!(game.turn(), Faction::North);

    let captured = game.board().piece(pawn).unwrap();
    assert_eq!(captured.status(), Status::Captured);
    assert_eq!(captured.coordinates(), SENTINEL);

    let mover = game.board().piece(chariot).unwrap();
    assert_eq!(mover.coordinates(), (4, 2));
    assert!(mover.moved());
}

#[test]
fn selecting_off_turn_leaves_the_selection_unchanged() {
    let mut game = Game::default();
    let pawn = game.board().find("IC-S1").unwrap().id();

    assert!(matches!(
        game.select(pawn),
        Err(InvalidAction::TurnViolation(TurnViolation::OutOfTurn { .. }))
    ));

    assert_eq!(game.selection(), Selection::Idle);
}

#[test]
fn queen_and_rook_have_no_movement_rule() {
    let mut game = Game::default();
    for label in ["IC-Q", "IC-R1", "IC-R2"] {
        let id = game.board().find(label).unwrap().id();
        let role = game.board().piece(id).unwrap().role();
        assert_eq!(
            game.destinations(id),
            Err(InvalidAction::UnimplementedRule(UnimplementedRule(role)))
        );
    }

    let soldier = game.board().find("CC-B1").unwrap().id();
    game.select(soldier).unwrap();
    game.attempt_move(soldier, 2, 6).unwrap();

    let queen = game.board().find("IC-Q").unwrap().id();
    assert_eq!(game.select(queen), Err(UnimplementedRule(Role::Queen).into()));

    assert_eq!(game.selection(), Selection::Idle);
}

#[test]
fn custom_setup_can_be_read_from_ron() {
    let setup: Setup = r#"[
        (label: "CC-P1", role: Cannon, square: (2, 5)),
        (label: "CC-B1", role: Soldier, square: (4, 5)),
        (label: "IC-K", role: King, square: (7, 5)),
    ]"#
    .parse()
    .unwrap();

    let game = Game::new(Board::new(&setup).unwrap());
    let cannon = game.board().find("CC-P1").unwrap().id();
    assert!(game.destinations(cannon).unwrap().contains(sq(7, 5)));
}

#[test]
fn invalid_setup_builds_no_board() {
    let setup: Setup = r#"[
        (label: "CC-P1", role: Cannon, square: (2, 5)),
        (label: "CC-P1", role: Cannon, square: (3, 5)),
    ]"#
    .parse()
    .unwrap();

    assert!(matches!(Board::new(&setup), Err(InvalidSetup::DuplicateLabel(_))));
}
