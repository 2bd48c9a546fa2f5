use super::*;
use crate::chat::transcript::Speaker;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use tokio::sync::oneshot;

// =========================================================================
// MockCompletion
// =========================================================================

struct MockCompletion {
    answer: Option<String>,
    calls: AtomicUsize,
}

impl MockCompletion {
    fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self { answer: Some(answer.to_string()), calls: AtomicUsize::new(0) })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self { answer: None, calls: AtomicUsize::new(0) })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, _question: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .ok_or_else(|| CompletionError::RemoteUnavailable("mock failure".into()))
    }
}

/// Completion client whose answers are released by the test, per question.
struct GatedCompletion {
    gates: Mutex<HashMap<String, oneshot::Receiver<String>>>,
}

#[async_trait::async_trait]
impl CompletionClient for GatedCompletion {
    async fn complete(&self, question: &str) -> Result<String, CompletionError> {
        let gate = self.gates.lock().unwrap().remove(question).expect("gate registered");
        gate.await
            .map_err(|_| CompletionError::RemoteUnavailable("gate dropped".into()))
    }
}

fn router_with(client: Arc<dyn CompletionClient>) -> QueryRouter {
    QueryRouter::new(Arc::new(CannedResponses::default()), client)
}

fn last_two(conversation: &Conversation) -> (Turn, Turn) {
    let turns = conversation.view().0;
    let n = turns.len();
    (turns[n - 2].clone(), turns[n - 1].clone())
}

// =========================================================================
// blank input
// =========================================================================

#[tokio::test]
async fn whitespace_only_is_a_no_op() {
    let mock = MockCompletion::answering("unused");
    let router = router_with(mock.clone());
    let conversation = Conversation::new(Transcript::with_greeting());

    for input in ["", "  ", "\n\t "] {
        let outcome = router.submit(&conversation, input).await;
        assert!(matches!(outcome, Submission::Ignored));
    }
    assert_eq!(conversation.len(), 1);
    assert_eq!(mock.calls(), 0);
}

// =========================================================================
// canned path
// =========================================================================

#[tokio::test]
async fn hi_gets_canned_greeting() {
    let mock = MockCompletion::answering("unused");
    let router = router_with(mock.clone());
    let conversation = Conversation::default();

    let outcome = router.submit(&conversation, "hi").await;

    assert!(matches!(&outcome, Submission::Canned { .. }));
    assert_eq!(
        conversation.view().0,
        vec![Turn::user("hi"), Turn::assistant("Hey! I'm Abu's bot 🤖. Ask me anything about him!")]
    );
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn canned_match_normalizes_but_records_raw_text() {
    let mock = MockCompletion::answering("unused");
    let router = router_with(mock.clone());
    let conversation = Conversation::default();

    router.submit(&conversation, "  PROJECTS ").await;

    let (user, assistant) = last_two(&conversation);
    assert_eq!(user, Turn::user("  PROJECTS "));
    assert_eq!(assistant.text, "Abu has worked on React, Next.js, and 3D portfolio projects.");
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn canned_reply_is_deterministic() {
    let router = router_with(MockCompletion::answering("unused"));
    let conversation = Conversation::default();

    let first = router.submit(&conversation, "skills").await;
    let second = router.submit(&conversation, "skills").await;

    assert_eq!(first.reply(), second.reply());
    assert_eq!(conversation.len(), 4);
}

#[tokio::test]
async fn canned_wins_over_remote_for_question_like_triggers() {
    let canned = CannedResponses::from_pairs([("what do you do?", "I answer questions about Abu.")]).unwrap();
    let mock = MockCompletion::answering("remote");
    let router = QueryRouter::new(Arc::new(canned), mock.clone());
    let conversation = Conversation::default();

    let outcome = router.submit(&conversation, "What do you do?").await;

    assert_eq!(outcome.reply(), Some("I answer questions about Abu."));
    assert_eq!(mock.calls(), 0);
}

// =========================================================================
// remote path
// =========================================================================

#[tokio::test]
async fn miss_appends_remote_answer() {
    let mock = MockCompletion::answering("Likely TypeScript.");
    let router = router_with(mock.clone());
    let conversation = Conversation::default();

    let outcome = router.submit(&conversation, "What's your favorite language?").await;

    assert!(matches!(&outcome, Submission::Answered { reply } if reply == "Likely TypeScript."));
    assert_eq!(
        conversation.view().0,
        vec![Turn::user("What's your favorite language?"), Turn::assistant("Likely TypeScript.")]
    );
    assert_eq!(mock.calls(), 1);
    assert_eq!(conversation.phase(), Phase::Idle);
}

#[tokio::test]
async fn miss_with_failure_appends_apology() {
    let mock = MockCompletion::failing();
    let router = router_with(mock.clone());
    let conversation = Conversation::default();

    let outcome = router.submit(&conversation, "What's your favorite language?").await;

    assert!(matches!(outcome, Submission::Failed { error: CompletionError::RemoteUnavailable(_), .. }));
    let (user, assistant) = last_two(&conversation);
    assert_eq!(user, Turn::user("What's your favorite language?"));
    assert_eq!(assistant, Turn::assistant(APOLOGY_TEXT));
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn every_submission_adds_user_then_assistant() {
    let router = router_with(MockCompletion::answering("sure"));
    let conversation = Conversation::new(Transcript::with_greeting());

    for input in ["hi", "tell me a joke", "contact", "   ", "why rust?"] {
        let before = conversation.len();
        let outcome = router.submit(&conversation, input).await;
        if matches!(outcome, Submission::Ignored) {
            assert_eq!(conversation.len(), before);
            continue;
        }
        assert_eq!(conversation.len(), before + 2);
        let (user, assistant) = last_two(&conversation);
        assert_eq!(user.speaker, Speaker::User);
        assert_eq!(user.text, input);
        assert_eq!(assistant.speaker, Speaker::Assistant);
    }
}

#[tokio::test]
async fn awaiting_reply_while_remote_in_flight() {
    let (tx, rx) = oneshot::channel();
    let gated = GatedCompletion { gates: Mutex::new(HashMap::from([("slow?".to_string(), rx)])) };
    let router = router_with(Arc::new(gated));
    let conversation = Arc::new(Conversation::default());

    let task = {
        let router = router.clone();
        let conversation = conversation.clone();
        tokio::spawn(async move { router.submit(&conversation, "slow?").await })
    };

    while conversation.phase() != Phase::AwaitingReply {
        tokio::task::yield_now().await;
    }
    assert_eq!(conversation.view().0, vec![Turn::user("slow?")]);

    tx.send("done".into()).unwrap();
    let outcome = task.await.unwrap();

    assert_eq!(outcome.reply(), Some("done"));
    assert_eq!(conversation.phase(), Phase::Idle);
}

#[tokio::test]
async fn overlapping_replies_land_in_arrival_order() {
    let (tx_first, rx_first) = oneshot::channel();
    let (tx_second, rx_second) = oneshot::channel();
    let gated = GatedCompletion {
        gates: Mutex::new(HashMap::from([("first?".to_string(), rx_first), ("second?".to_string(), rx_second)])),
    };
    let router = router_with(Arc::new(gated));
    let conversation = Arc::new(Conversation::default());

    let spawn_submit = |text: &'static str| {
        let router = router.clone();
        let conversation = conversation.clone();
        tokio::spawn(async move { router.submit(&conversation, text).await })
    };
    let first = spawn_submit("first?");
    while conversation.len() < 1 {
        tokio::task::yield_now().await;
    }
    let second = spawn_submit("second?");
    while conversation.len() < 2 {
        tokio::task::yield_now().await;
    }

    tx_second.send("answer two".into()).unwrap();
    second.await.unwrap();
    tx_first.send("answer one".into()).unwrap();
    first.await.unwrap();

    let texts: Vec<String> = conversation.view().0.into_iter().map(|t| t.text).collect();
    assert_eq!(texts, vec!["first?", "second?", "answer two", "answer one"]);
}

// =========================================================================
// phase / transcript consistency
// =========================================================================

#[test]
fn reply_lands_before_leaving_awaiting_reply() {
    let conversation = Conversation::default();
    let awaiting = conversation.begin_await(Turn::user("q?"));
    assert_eq!(conversation.view(), (vec![Turn::user("q?")], Phase::AwaitingReply));

    conversation.finish_await(awaiting, Turn::assistant("a"));
    assert_eq!(conversation.view(), (vec![Turn::user("q?"), Turn::assistant("a")], Phase::Idle));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn idle_view_never_ends_with_unanswered_user_turn() {
    let router = router_with(MockCompletion::answering("ok"));
    let conversation = Arc::new(Conversation::default());
    let done = Arc::new(AtomicBool::new(false));

    let observer = {
        let conversation = conversation.clone();
        let done = done.clone();
        tokio::spawn(async move {
            while !done.load(Ordering::SeqCst) {
                let (turns, phase) = conversation.view();
                if phase == Phase::Idle {
                    if let Some(last) = turns.last() {
                        assert_eq!(last.speaker, Speaker::Assistant, "idle after {} turns", turns.len());
                    }
                }
                tokio::task::yield_now().await;
            }
        })
    };

    for i in 0..500 {
        let text = if i % 5 == 0 { "hi".to_string() } else { format!("question {i}?") };
        router.submit(&conversation, &text).await;
    }
    done.store(true, Ordering::SeqCst);
    observer.await.unwrap();
    assert_eq!(conversation.len(), 1000);
}
