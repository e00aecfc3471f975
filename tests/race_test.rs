//! End-to-end races between steady players.

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use strictly_routes::{
    ConsolePresenter, DriverConfig, DriverErrorKind, FailureCause, Player, RaceFactory, RaceGame,
    REPLAY_PROMPT, SteadyPlayer, TurnDriver,
};

/// Report sink the test can read back.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().expect("buffer poisoned").clone()).expect("not utf8")
    }
}

impl std::io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn racers(strides: &[(&str, u8)]) -> Vec<Box<dyn Player<RaceGame>>> {
    strides
        .iter()
        .map(|(name, stride)| Box::new(SteadyPlayer::new(*name, *stride)) as Box<dyn Player<RaceGame>>)
        .collect()
}

#[tokio::test]
async fn test_faster_racer_wins() {
    let mut players = racers(&[("Alice", 3), ("Bob", 2)]);
    let mut driver = TurnDriver::new(&mut players, RaceFactory::new(9), DriverConfig::headless())
        .with_report(Box::new(SharedBuf::default()));

    driver.run().await.expect("race failed");

    assert_eq!(driver.winner(), Some("Alice"));
    // Alice reaches 9 on her third action; Bob has moved twice.
    assert_eq!(driver.turns_taken(), 5);
    let scores = driver.summary().expect("no summary").final_scores().clone();
    assert_eq!(scores.get("Alice"), Some(9));
    assert_eq!(scores.get("Bob"), Some(4));
}

#[tokio::test]
async fn test_round_cap_crowns_leader() {
    let mut players = racers(&[("Alice", 1), ("Bob", 2)]);
    let config = DriverConfig::headless().with_maximum_rounds(3);
    let mut driver = TurnDriver::new(&mut players, RaceFactory::new(100), config)
        .with_report(Box::new(SharedBuf::default()));

    driver.run().await.expect("race failed");

    assert_eq!(driver.turns_taken(), 6);
    assert_eq!(driver.winner(), Some("Bob"));
    assert_eq!(driver.game().map(|g| g.rounds_completed()), Some(3));
}

#[tokio::test]
async fn test_oversized_stride_is_fatal_in_strict_mode() {
    let mut players = racers(&[("Alice", 2), ("Mallory", 9)]);
    let mut driver = TurnDriver::new(&mut players, RaceFactory::new(20), DriverConfig::headless())
        .with_report(Box::new(SharedBuf::default()));

    let err = driver.run().await.expect_err("oversized stride accepted");

    assert_eq!(err.kind(), &DriverErrorKind::BadAction(FailureCause::InvalidAction));
    assert!(err.to_string().contains("Failure: invalid_action"));
    assert_eq!(driver.turns_taken(), 2);
}

#[tokio::test]
async fn test_oversized_stride_forfeits_in_lenient_mode() {
    let mut players = racers(&[("Alice", 2), ("Mallory", 9)]);
    let config = DriverConfig::headless().with_strict_failures(false);
    let mut driver = TurnDriver::new(&mut players, RaceFactory::new(6), config)
        .with_report(Box::new(SharedBuf::default()));

    driver.run().await.expect("lenient race failed");

    assert_eq!(driver.winner(), Some("Alice"));
    let game = driver.game().expect("no game");
    assert_eq!(game.target(), 6);
}

#[tokio::test]
async fn test_debug_report_shows_track_and_actions() {
    let mut players = racers(&[("Alice", 3), ("Bob", 0)]);
    let report = SharedBuf::default();
    let config = DriverConfig::new().with_display(false);
    let mut driver = TurnDriver::new(&mut players, RaceFactory::new(3), config)
        .with_report(Box::new(report.clone()));

    driver.run().await.expect("race failed");

    let text = report.text();
    assert!(
        text.starts_with(
            "Track: Alice 3/3, Bob 0/3\n\
             Player Alice: position 0 of 3 (round 0)\n\
             Doing Action: advance 3\n\
             Alice strides 3 (1 accepted, 0 rejected)\n\n"
        ),
        "{text}"
    );
    assert!(text.contains("Winner: Alice\nFinal Scores: {Alice: 3, Bob: 0}\n"), "{text}");
}

#[tokio::test]
async fn test_console_presenter_shows_summary_with_display() {
    let mut players = racers(&[("Alice", 3)]);
    let screen = SharedBuf::default();
    let presenter = ConsolePresenter::new(Cursor::new(b"\n".to_vec()), screen.clone());
    let config = DriverConfig::new().with_debug(false);
    let mut driver = TurnDriver::new(&mut players, RaceFactory::new(3), config)
        .with_presenter(Box::new(presenter))
        .with_report(Box::new(SharedBuf::default()));

    driver.run().await.expect("race failed");

    let text = screen.text();
    assert!(text.contains("Winner: Alice"), "{text}");
    assert!(text.contains(REPLAY_PROMPT), "{text}");
}

#[tokio::test]
async fn test_race_under_trace_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut players = racers(&[("Alice", 3), ("Bob", 2)]);
    let config = DriverConfig::new().with_display(false);
    let mut driver = TurnDriver::new(&mut players, RaceFactory::new(6), config)
        .with_report(Box::new(SharedBuf::default()));

    driver.run().await.expect("race failed");

    assert_eq!(driver.winner(), Some("Alice"));
    assert_eq!(driver.turns_taken(), 3);
    assert_eq!(driver.seats().len(), 2);
}
