pub mod test_utils;

use std::time::Duration;

use test_utils::{point, ts};
use travelblogr_core::playback::{Playback, PlaybackDriver, PlaybackSpeed};

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn current_index(driver: &PlaybackDriver) -> usize {
    driver.state().lock().unwrap().current_index()
}

#[tokio::test(start_paused = true)]
async fn advances_one_index_per_second_at_normal_speed() {
    let mut driver = PlaybackDriver::new(5);
    driver.start();
    settle().await;
    assert_eq!(current_index(&driver), 0);

    tokio::time::advance(Duration::from_millis(999)).await;
    settle().await;
    assert_eq!(current_index(&driver), 0);

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(current_index(&driver), 1);

    for _ in 0..3 {
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
    }
    assert_eq!(current_index(&driver), 4);
}

#[tokio::test(start_paused = true)]
async fn halts_at_the_last_index_without_wrapping() {
    let mut driver = PlaybackDriver::new(3);
    driver.start();
    settle().await;

    for _ in 0..10 {
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;
    }

    let state = driver.state();
    let playback = state.lock().unwrap();
    assert_eq!(playback.current_index(), 2);
    assert!(!playback.is_playing());
}

#[tokio::test(start_paused = true)]
async fn never_runs_unless_started() {
    let driver = PlaybackDriver::new(5);
    tokio::time::advance(Duration::from_secs(30)).await;
    settle().await;
    assert_eq!(current_index(&driver), 0);
    assert!(!driver.state().lock().unwrap().is_playing());
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_the_timer() {
    let mut driver = PlaybackDriver::new(10);
    driver.start();
    settle().await;
    tokio::time::advance(Duration::from_millis(1000)).await;
    settle().await;
    assert_eq!(current_index(&driver), 1);

    driver.stop();
    settle().await;
    tokio::time::advance(Duration::from_secs(10)).await;
    settle().await;
    assert_eq!(current_index(&driver), 1);
    assert!(!driver.state().lock().unwrap().is_playing());
}

#[tokio::test(start_paused = true)]
async fn speed_change_rearms_the_timer() {
    let mut driver = PlaybackDriver::new(20);
    driver.start();
    settle().await;

    driver.set_speed(PlaybackSpeed::Quintuple);
    settle().await;

    // 5x speed: one index per 200ms
    tokio::time::advance(Duration::from_millis(1000)).await;
    settle().await;
    assert_eq!(current_index(&driver), 5);
}

#[test]
fn visible_is_the_inclusive_prefix() {
    let points = vec![
        point("a", 0.0, 0.0, Some(ts(0))),
        point("b", 0.0, 1.0, Some(ts(60))),
        point("c", 0.0, 2.0, Some(ts(120))),
    ];
    let mut playback = Playback::new(points.len());

    assert_eq!(playback.visible(&points).len(), 1);
    playback.play();
    playback.advance();
    assert_eq!(playback.visible(&points).len(), 2);
    playback.advance();
    assert_eq!(playback.visible(&points), &points[..]);

    let empty: Vec<_> = Vec::new();
    assert!(Playback::new(0).visible(&empty).is_empty());
}
