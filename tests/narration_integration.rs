//! Narration tests with a scripted thought generator
//!
//! No network: the generator replays canned replies so the rate limit,
//! fallback and non-blocking publication can be checked deterministically.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;

use thor_guard::core::error::{GameError, Result};
use thor_guard::narration::prompt::clean_thought;
use thor_guard::narration::{
    Narrator, ThoughtFuture, ThoughtGenerator, FALLBACK_THOUGHT, INITIAL_THOUGHT,
};
use thor_guard::simulation::{NarrationTopic, SimulationEvent};

/// Replays queued replies; an empty queue behaves like a failing API
#[derive(Default)]
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String>>>,
    contexts: Mutex<Vec<String>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedGenerator {
    fn with_replies(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ThoughtGenerator for ScriptedGenerator {
    fn generate<'a>(&'a self, context: &'a str) -> ThoughtFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.contexts.lock().unwrap().push(context.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GameError::Narration("offline".into())))?;
            clean_thought(&reply)
        })
    }
}

fn narrator_with(generator: Arc<ScriptedGenerator>) -> Narrator {
    Narrator::new(Some(generator), Handle::current(), 6000)
}

#[tokio::test]
async fn test_reply_is_published() {
    let generator = ScriptedGenerator::with_replies(vec![Ok("  \"Stay close, pups!\" ".into())]);
    let mut narrator = narrator_with(generator.clone());
    assert_eq!(narrator.current_thought(), INITIAL_THOUGHT);

    let task = narrator.request(NarrationTopic::SessionStart, 0).unwrap();
    task.await.unwrap();

    assert_eq!(narrator.current_thought(), "Stay close, pups!");
    assert_eq!(
        generator.contexts.lock().unwrap().as_slice(),
        ["Welcome to the forest! I will look after you."]
    );
}

#[tokio::test]
async fn test_failure_publishes_fallback() {
    let generator = ScriptedGenerator::with_replies(vec![Err(GameError::Narration(
        "API error: overloaded".into(),
    ))]);
    let mut narrator = narrator_with(generator);

    narrator.request(NarrationTopic::Bark, 0).unwrap().await.unwrap();
    assert_eq!(narrator.current_thought(), FALLBACK_THOUGHT);
}

#[tokio::test]
async fn test_empty_reply_publishes_fallback() {
    let generator = ScriptedGenerator::with_replies(vec![Ok("   ".into())]);
    let mut narrator = narrator_with(generator);

    narrator.request(NarrationTopic::Bark, 0).unwrap().await.unwrap();
    assert_eq!(narrator.current_thought(), FALLBACK_THOUGHT);
}

#[tokio::test]
async fn test_rate_limit_measured_from_failed_attempt() {
    let generator = ScriptedGenerator::with_replies(vec![
        Err(GameError::Narration("timeout".into())),
        Ok("Back, wolves!".into()),
    ]);
    let mut narrator = narrator_with(generator.clone());

    narrator.request(NarrationTopic::SessionStart, 1_000).unwrap().await.unwrap();
    assert_eq!(narrator.current_thought(), FALLBACK_THOUGHT);

    // The failed call still counts as an attempt
    assert!(narrator.request(NarrationTopic::Bark, 3_000).is_none());
    assert!(narrator.request(NarrationTopic::Bark, 6_999).is_none());
    assert_eq!(generator.calls(), 1);

    narrator.request(NarrationTopic::Bark, 7_000).unwrap().await.unwrap();
    assert_eq!(generator.calls(), 2);
    assert_eq!(narrator.current_thought(), "Back, wolves!");
}

#[tokio::test]
async fn test_pending_call_does_not_block() {
    let generator = Arc::new(ScriptedGenerator {
        replies: Mutex::new(vec![Ok("Nothing gets past me.".to_string())].into()),
        delay: Some(Duration::from_millis(50)),
        ..Default::default()
    });
    let mut narrator = narrator_with(generator);
    let mut updates = narrator.subscribe();

    let task = narrator.request(NarrationTopic::SessionStart, 0).unwrap();
    // Still showing the old line while the call is in flight
    assert_eq!(narrator.current_thought(), INITIAL_THOUGHT);

    updates.changed().await.unwrap();
    assert_eq!(*updates.borrow(), "Nothing gets past me.");
    task.await.unwrap();
}

#[tokio::test]
async fn test_events_drive_requests() {
    let generator = ScriptedGenerator::with_replies(vec![Ok("Woof.".into())]);
    let mut narrator = narrator_with(generator.clone());

    narrator.handle_events(
        &[
            SimulationEvent::SessionStarted,
            SimulationEvent::NarrationRequested(NarrationTopic::Bark),
            SimulationEvent::NarrationRequested(NarrationTopic::Bark),
        ],
        500,
    );

    // Two requests in one tick: the second is rate limited
    let mut updates = narrator.subscribe();
    updates.changed().await.unwrap();
    assert_eq!(generator.calls(), 1);
    assert_eq!(narrator.current_thought(), "Woof.");
}
