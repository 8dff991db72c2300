use hopset::board::jump::Direction;
use hopset::board::{Board, PieceColor, Pos};
use hopset::game::{Player, PlayerKind};
use hopset::search::{SearchParams, Searcher, WeightMatrix};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn board_from(lines: &[&str]) -> Board {
    let rows: Vec<Vec<_>> = lines.iter().map(|l| l.chars().map(PieceColor::from_letter).collect()).collect();
    Board::from_rows(&rows).expect("valid board")
}

fn players() -> (Player, Player) {
    (Player::new(2, PlayerKind::Computer, "cpu").unwrap(), Player::new(1, PlayerKind::Human, "human").unwrap())
}

#[test]
fn search_is_deterministic_on_random_boards() {
    let (me, opp) = players();
    for seed in 0..5u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut b = Board::random(10, &mut rng).unwrap();
        b.set(0, 0, None).unwrap();
        let mut s = Searcher::default();
        let r1 = s.choose_start(&b, &me, &opp);
        let r2 = Searcher::default().choose_start(&b, &me, &opp);
        assert_eq!(r1, r2);
        let r = r1.expect("center hole gives a move");
        let mut m = WeightMatrix::build(&b, &me, &opp);
        let (v, d) = s.best_chain_value(&mut m, r.start);
        assert_eq!((v, d), (r.value, Some(r.direction)));
    }
}

#[test]
fn denial_weight_steers_the_start() {
    // Two single captures: (0,0) takes B, (3,3) takes D. Opponent collects D
    // so capturing it is worth more.
    let b = board_from(&["AB  ", "    ", "    ", "  DC"]);
    let (me, mut opp) = players();
    let mut s = Searcher::default();
    let r = s.choose_start(&b, &me, &opp).unwrap();
    assert_eq!(r.start, Pos::new(0, 0));
    opp.credit(PieceColor::D);
    let r = s.choose_start(&b, &me, &opp).unwrap();
    assert_eq!(r.start, Pos::new(3, 3));
    assert_eq!(r.direction, Direction::Left);
    assert_eq!(r.value, 4);
}

#[test]
fn ties_keep_first_direction() {
    // From (1,1) both Down and Right capture one equal-weight piece.
    let b = board_from(&["    ", " AB ", " C  ", "    "]);
    let (me, opp) = players();
    let mut m = WeightMatrix::build(&b, &me, &opp);
    let (v, d) = Searcher::default().best_chain_value(&mut m, Pos::new(1, 1));
    assert_eq!(v, 2);
    assert_eq!(d, Some(Direction::Down));
}

#[test]
fn continuation_modes() {
    // From (2,0) Up and Right are legal; Right leads on to a second capture.
    let b = board_from(&["    ", "B D ", "AC  ", "    "]);
    let (me, opp) = players();
    let pos = Pos::new(2, 0);
    let mut replan = Searcher::new(SearchParams { replan_each_step: true });
    assert_eq!(replan.choose_continuation(&b, &me, &opp, pos), Some(Direction::Right));
    let mut first = Searcher::new(SearchParams { replan_each_step: false });
    assert_eq!(first.choose_continuation(&b, &me, &opp, pos), Some(Direction::Up));
}
