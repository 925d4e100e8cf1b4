//! Long-running random-vs-random matches through the full player stack.

use async_std::task;
use indicatif::ProgressIterator;
use othello_player::connectors::RandomConnector;
use othello_player::{Referee, Tally};
use othello_rules::{GameHistory, Player};

fn self_play(size: usize, games: usize) -> Tally {
    let mut tally = Tally::default();

    for game in (0..games).progress() {
        let seed = game as u64;
        let mut referee = Referee::new(
            GameHistory::new(size).unwrap(),
            Box::new(RandomConnector::seeded(Player::Black, 2 * seed)),
            Box::new(RandomConnector::seeded(Player::White, 2 * seed + 1)),
        )
        .unwrap();

        let outcome = task::block_on(referee.play()).unwrap();
        let history = referee.history();
        let last = history.current();
        let score = last.score();

        assert_eq!(history.outcome(), Some(outcome));
        assert_eq!(score.black + score.white + last.count_empty(), size * size);
        for pair in history.states().windows(2) {
            assert_eq!(pair[1].turn(), !pair[0].turn());
        }

        tally.record(outcome);
    }

    tally
}

#[test]
fn self_play_4x4() {
    assert_eq!(self_play(4, 200).games(), 200);
}

#[test]
fn self_play_8x8() {
    assert_eq!(self_play(8, 50).games(), 50);
}

#[test]
fn self_play_is_reproducible() {
    assert_eq!(self_play(6, 20), self_play(6, 20));
}
