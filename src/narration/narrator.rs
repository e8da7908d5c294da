//! Rate-limited, fire-and-forget narration
//!
//! The narrator owns the "current thought" slot. Requests run on the tokio
//! runtime and publish into a watch channel; the render loop only ever reads
//! the latest value, so a slow call never holds up a tick.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::types::Millis;
use crate::narration::prompt::{topic_context, FALLBACK_THOUGHT, INITIAL_THOUGHT};
use crate::narration::ThoughtGenerator;
use crate::simulation::tick::{NarrationTopic, SimulationEvent};

pub struct Narrator {
    generator: Option<Arc<dyn ThoughtGenerator>>,
    runtime: Handle,
    interval_ms: Millis,
    /// Time of the last attempted request, successful or not
    last_attempt: Option<Millis>,
    sender: Arc<watch::Sender<String>>,
    receiver: watch::Receiver<String>,
}

impl Narrator {
    /// A narrator without a generator always publishes the fallback line
    pub fn new(
        generator: Option<Arc<dyn ThoughtGenerator>>,
        runtime: Handle,
        interval_ms: Millis,
    ) -> Self {
        let (sender, receiver) = watch::channel(INITIAL_THOUGHT.to_string());
        Self {
            generator,
            runtime,
            interval_ms,
            last_attempt: None,
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Latest published thought
    pub fn current_thought(&self) -> String {
        self.receiver.borrow().clone()
    }

    /// A receiver that observes every published thought
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.receiver.clone()
    }

    /// Ask for a new thought unless one was attempted within the interval
    ///
    /// Returns the spawned task, if any, so callers may await it in tests.
    pub fn request(&mut self, topic: NarrationTopic, now: Millis) -> Option<JoinHandle<()>> {
        if let Some(last) = self.last_attempt {
            if now.saturating_sub(last) < self.interval_ms {
                tracing::debug!(?topic, "Narration rate limited");
                return None;
            }
        }
        self.last_attempt = Some(now);

        let Some(generator) = self.generator.clone() else {
            self.sender.send_replace(FALLBACK_THOUGHT.to_string());
            return None;
        };

        tracing::debug!(?topic, "Narration requested");
        let sender = Arc::clone(&self.sender);
        let context = topic_context(topic);
        Some(self.runtime.spawn(async move {
            let thought = match generator.generate(context).await {
                Ok(thought) => thought,
                Err(e) => {
                    tracing::warn!("Narration failed: {}", e);
                    FALLBACK_THOUGHT.to_string()
                }
            };
            sender.send_replace(thought);
        }))
    }

    /// Forward every narration request found in a tick's events
    pub fn handle_events(&mut self, events: &[SimulationEvent], now: Millis) {
        for event in events {
            if let SimulationEvent::NarrationRequested(topic) = event {
                self.request(*topic, now);
            }
        }
    }
}
