//! One conversational turn end to end: local intents fire immediately,
//! the streaming reply runs alongside them, and exactly one of the two
//! sources is allowed to execute actions.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info};

use deskmate_actions::ActionExecutor;
use deskmate_chat::{CancelFlag, ChatClient, ChatError, ChatOutcome, Conversation};
use deskmate_intent::{Action, IntentDetector};

use crate::markers::arbitrate;

/// Executes a single action and reports the outcome as user-facing text.
/// Handler failures are part of the result string, never an `Err`.
#[async_trait]
pub trait ActionRunner: Send + Sync {
    async fn run(&self, action: &Action) -> String;
}

#[async_trait]
impl ActionRunner for ActionExecutor {
    async fn run(&self, action: &Action) -> String {
        ActionExecutor::run(self, action).await
    }
}

/// Incremental output of a turn, delivered in arrival order. Fragments
/// from one reply are ordered among themselves; action results may land
/// before, between, or after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Fragment(String),
    ActionResult { action: Action, result: String },
}

/// How a turn ended. Errors travel separately as `ChatError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResult {
    Completed { display: String },
    Cancelled,
    ModelUnavailable { installed: Vec<String> },
}

pub struct Coordinator {
    detector: IntentDetector,
    client: ChatClient,
    runner: Arc<dyn ActionRunner>,
    conversation: Conversation,
}

impl Coordinator {
    pub fn new(client: ChatClient, runner: Arc<dyn ActionRunner>) -> Self {
        Self {
            detector: IntentDetector::new(),
            client,
            runner,
            conversation: Conversation::new(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    /// Swap the chat client, e.g. after the user picks a different model.
    /// Conversation history is kept.
    pub fn set_client(&mut self, client: ChatClient) {
        self.client = client;
    }

    /// Reset the conversation to just the system message.
    pub fn clear(&mut self) {
        self.conversation.clear();
    }

    /// Run one user turn. Local intents detected in `text` are dispatched
    /// right away on a separate task while the backend streams its reply;
    /// when the reply completes, embedded action markers are stripped for
    /// display and executed only if no local action already fired.
    ///
    /// Taking `&mut self` serializes turns: a second send cannot start
    /// while one is in flight.
    pub async fn run_turn(
        &mut self,
        text: &str,
        cancel: &CancelFlag,
        events: &mpsc::Sender<TurnEvent>,
    ) -> Result<TurnResult, ChatError> {
        let local_actions = self.detector.detect(text);
        let local_fired = !local_actions.is_empty();

        let local_task = if local_fired {
            info!(count = local_actions.len(), "dispatching locally detected actions");
            Some(tokio::spawn(run_actions(
                Arc::clone(&self.runner),
                local_actions,
                events.clone(),
            )))
        } else {
            None
        };

        let (fragment_tx, mut fragment_rx) = mpsc::channel::<String>(32);
        let forward_events = events.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(fragment) = fragment_rx.recv().await {
                if forward_events
                    .send(TurnEvent::Fragment(fragment))
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });

        let outcome = self
            .client
            .send(&mut self.conversation, text, cancel, &fragment_tx)
            .await;
        drop(fragment_tx);
        let _ = forwarder.await;

        // Already-dispatched actions run to completion regardless of how
        // the stream ended.
        if let Some(task) = local_task {
            let _ = task.await;
        }

        match outcome? {
            ChatOutcome::Completed { reply } => {
                let (display, ai_actions) = arbitrate(&reply, local_fired);
                if local_fired && reply.contains("[ACTION:") {
                    debug!("discarding assistant action markers, local intents took the turn");
                }
                run_actions(Arc::clone(&self.runner), ai_actions, events.clone()).await;
                Ok(TurnResult::Completed { display })
            }
            ChatOutcome::Cancelled => Ok(TurnResult::Cancelled),
            ChatOutcome::ModelUnavailable { installed } => {
                Ok(TurnResult::ModelUnavailable { installed })
            }
        }
    }
}

async fn run_actions(
    runner: Arc<dyn ActionRunner>,
    actions: Vec<Action>,
    events: mpsc::Sender<TurnEvent>,
) {
    for action in actions {
        let result = runner.run(&action).await;
        if events
            .send(TurnEvent::ActionResult { action, result })
            .await
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskmate_intent::ActionKind;
    use std::sync::Mutex;

    struct RecordingRunner {
        seen: Mutex<Vec<Action>>,
    }

    impl RecordingRunner {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<Action> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ActionRunner for RecordingRunner {
        async fn run(&self, action: &Action) -> String {
            self.seen.lock().unwrap().push(action.clone());
            format!("ran {}", action.kind)
        }
    }

    #[tokio::test]
    async fn run_actions_reports_each_result() {
        let runner = RecordingRunner::new();
        let (tx, mut rx) = mpsc::channel(8);
        let actions = vec![
            Action::new(ActionKind::Screenshot, ""),
            Action::new(ActionKind::OpenUrl, "https://x.test"),
        ];
        run_actions(runner.clone() as Arc<dyn ActionRunner>, actions.clone(), tx).await;

        assert_eq!(runner.seen(), actions);
        let first = rx.recv().await.unwrap();
        assert_eq!(
            first,
            TurnEvent::ActionResult {
                action: Action::new(ActionKind::Screenshot, ""),
                result: "ran SCREENSHOT".into(),
            }
        );
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn run_actions_with_empty_list_is_a_no_op() {
        let runner = RecordingRunner::new();
        let (tx, mut rx) = mpsc::channel(8);
        run_actions(runner.clone() as Arc<dyn ActionRunner>, Vec::new(), tx).await;
        assert!(runner.seen().is_empty());
        assert!(rx.recv().await.is_none());
    }
}
