use crate::client::identity::{Identity, IdentityError, IdentityProvider, User};
use crate::client::transport::{ChatTransport, ClientError};
use crate::message::Message;

pub use crate::message::FALLBACK_REPLY;
pub const SERVER_ERROR_REPLY: &str = "Server error — check function logs.";

/// A submit that has been accepted and is waiting for its reply.
#[derive(Debug)]
pub struct PendingTurn {
    epoch: u64,
    conversation: Vec<Message>,
}

impl PendingTurn {
    /// Conversation to send, ending with the new user message. Fallback
    /// texts shown after earlier failures are left out.
    pub fn conversation(&self) -> &[Message] {
        &self.conversation
    }
}

/// State behind one chat window: transcript, input box, loading flag and
/// who is signed in. Nothing outlives the value or a logout.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<Message>,
    // Parallel to `messages`; set for fallback texts the model never said.
    local_only: Vec<bool>,
    input: String,
    loading: bool,
    identity: Identity,
    // Bumped on logout so replies to an abandoned conversation are dropped.
    epoch: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_identity(Identity::Unauthenticated)
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self {
            messages: Vec::new(),
            local_only: Vec::new(),
            input: String::new(),
            loading: false,
            identity,
            epoch: 0,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn display_email(&self) -> Option<&str> {
        self.identity.email()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Whether the send button would be enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && self.identity.is_signed_in() && !self.input.trim().is_empty()
    }

    /// Accept the current input, or do nothing.
    ///
    /// Returns `None` for blank input, while a reply is in flight, or when
    /// nobody is signed in. Otherwise the user message is appended right
    /// away and the loading flag stays set until [`finish_submit`].
    ///
    /// [`finish_submit`]: ChatSession::finish_submit
    pub fn begin_submit(&mut self) -> Option<PendingTurn> {
        if !self.can_submit() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.push(Message::user(text), false);
        self.loading = true;

        Some(PendingTurn {
            epoch: self.epoch,
            conversation: self.forwarded_history(),
        })
    }

    /// Record the outcome of a turn: exactly one assistant message, then the
    /// loading flag is cleared. Turns started before a logout are dropped.
    pub fn finish_submit(&mut self, turn: PendingTurn, outcome: Result<String, ClientError>) {
        if turn.epoch != self.epoch {
            tracing::debug!("dropping reply for a conversation closed by logout");
            return;
        }

        let (content, local) = match outcome {
            Ok(reply) => (reply, false),
            Err(ClientError::Transport(err)) => {
                tracing::warn!(error = %err, "chat proxy unreachable");
                (SERVER_ERROR_REPLY.to_string(), true)
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat proxy returned no reply");
                (FALLBACK_REPLY.to_string(), true)
            }
        };

        self.push(Message::assistant(content), local);
        self.loading = false;
    }

    fn push(&mut self, message: Message, local: bool) {
        self.messages.push(message);
        self.local_only.push(local);
    }

    /// Transcript minus the fallback texts, which never reach the model.
    fn forwarded_history(&self) -> Vec<Message> {
        self.messages
            .iter()
            .zip(&self.local_only)
            .filter(|(_, local)| !**local)
            .map(|(m, _)| m.clone())
            .collect()
    }

    /// Full submit cycle against `transport`. Returns whether anything was sent.
    pub async fn submit(&mut self, transport: &dyn ChatTransport) -> bool {
        let Some(turn) = self.begin_submit() else {
            return false;
        };
        let outcome = transport.send(turn.conversation()).await;
        self.finish_submit(turn, outcome);
        true
    }

    /// Pick up an existing provider session, if any.
    pub async fn mount(&mut self, provider: &dyn IdentityProvider) {
        self.identity = match provider.current_user().await {
            Ok(Some(user)) => Identity::Authenticated(user),
            Ok(None) => Identity::Unauthenticated,
            Err(err) => {
                tracing::warn!(error = %err, "could not read identity");
                Identity::Unauthenticated
            }
        };
    }

    pub fn on_auth_callback(&mut self, user: User) {
        self.identity = Identity::Authenticated(user);
    }

    /// Only valid from the login prompt; a signed-in user stays signed in.
    pub fn continue_as_guest(&mut self) {
        if self.identity == Identity::Unauthenticated {
            self.identity = Identity::guest();
        }
    }

    /// Sign out and drop the conversation. Local state is cleared even if
    /// the provider call fails.
    pub async fn logout(&mut self, provider: &dyn IdentityProvider) -> Result<(), IdentityError> {
        let was_authenticated = matches!(self.identity, Identity::Authenticated(_));

        self.messages.clear();
        self.local_only.clear();
        self.input.clear();
        self.loading = false;
        self.identity = Identity::Unauthenticated;
        self.epoch += 1;

        if was_authenticated {
            provider.sign_out().await?;
        }
        Ok(())
    }
}
