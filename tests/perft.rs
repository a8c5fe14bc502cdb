use lib::chess::{File, Game, Piece, Position, Rank, Square};
use lib::util::Integer;
use rayon::prelude::*;
use test_strategy::proptest;

fn perft(pos: &Position, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => pos.moves().count(),
        d => pos
            .moves()
            .par_bridge()
            .map(|m| {
                let mut next = pos.clone();
                next.play_unchecked(m);
                perft(&next, d - 1)
            })
            .sum(),
    }
}

// The piece placement field of a FEN record, with white to move and every king
// and rook still able to castle from its home square.
fn position(placement: &str) -> Position {
    let mut game = Game::new();

    for (rank, row) in Rank::iter().rev().zip(placement.split('/')) {
        let mut files = File::iter();
        for c in row.chars() {
            match c.to_digit(10) {
                Some(n) => files.by_ref().take(n as usize).for_each(drop),
                None => {
                    let p: Piece = c.to_string().parse().unwrap();
                    let sq = Square::new(files.next().unwrap(), rank);
                    game.setup_piece(sq, p.role(), p.color()).unwrap();
                }
            }
        }
    }

    game.position().clone()
}

#[test]
fn placement_is_read_rank_by_rank() {
    let pos = position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    assert_eq!(&pos, &Position::default());
}

#[cfg(not(tarpaulin))]
#[proptest(cases = 1)]
fn perft_expands_expected_number_of_nodes() {
    // https://www.chessprogramming.org/Perft_Results#Initial_Position
    assert_eq!(perft(&Position::default(), 4), 197281);

    // https://www.chessprogramming.org/Perft_Results#Position_2
    let pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R");
    assert_eq!(perft(&pos, 3), 97862);

    // https://www.chessprogramming.org/Perft_Results#Position_3
    let pos = position("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8");
    assert_eq!(perft(&pos, 4), 43238);

    // https://www.chessprogramming.org/Perft_Results#Position_6
    let pos = position("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1");
    assert_eq!(perft(&pos, 3), 89890);
}
