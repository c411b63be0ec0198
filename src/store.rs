//! Discussion store: threads, per-thread message logs and the current selection.
//!
//! Every mutation is a [`Command`] applied by [`reduce`], a pure function from
//! the previous [`State`] to the next one. A failed command leaves the previous
//! state untouched. [`DiscussionStore`] owns the state and stamps commands with
//! ids and the current time before handing them to `reduce`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::categories::{self, CategorySummary, CATALOG};
use crate::ids;
use crate::models::*;
use crate::validate::{validate_chat_message, validate_new_thread, ValidationError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("thread not found: {0}")]
    NotFound(ThreadId),
    #[error("id already in use: {0}")]
    Conflict(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct State {
    threads: Vec<Thread>, // creation order, ids unique
    messages: HashMap<ThreadId, Vec<Message>>,
    current_thread: Option<ThreadId>,
}

impl State {
    pub fn thread(&self, id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == id)
    }

    fn thread_mut(&mut self, id: &str) -> Option<&mut Thread> {
        self.threads.iter_mut().find(|t| t.id == id)
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn messages(&self, thread_id: &str) -> &[Message] {
        self.messages.get(thread_id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn has_message(&self, message_id: &str) -> bool {
        self.messages.values().flatten().any(|m| m.id == message_id)
    }

    pub fn current_thread(&self) -> Option<&ThreadId> {
        self.current_thread.as_ref()
    }

    // Caller has already checked that the thread exists and the content is valid.
    fn append(
        &mut self,
        thread_id: &str,
        message_id: MessageId,
        author: &User,
        content: &str,
        at: DateTime<Utc>,
    ) {
        let Some(thread) = self.thread_mut(thread_id) else { return };
        let at = at.max(thread.last_activity_at);
        thread.message_count += 1;
        thread.last_activity_at = at;
        let message = Message {
            id: message_id,
            thread_id: thread_id.to_string(),
            author_id: author.id.clone(),
            author_display_name: author.display_name.clone(),
            author_color: author.color.clone(),
            content: content.trim().to_string(),
            created_at: at,
        };
        self.messages.entry(thread_id.to_string()).or_default().push(message);
    }
}

/// Closed set of state transitions. Ids and timestamps are fixed by the
/// caller so that [`reduce`] stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateThread {
        thread_id: ThreadId,
        message_id: MessageId,
        new: NewThread,
        author: User,
        at: DateTime<Utc>,
    },
    PostMessage {
        message_id: MessageId,
        thread_id: ThreadId,
        author: User,
        content: String,
        at: DateTime<Utc>,
    },
    SelectThread(Option<ThreadId>),
}

impl Command {
    pub fn create_thread(new: NewThread, author: User, at: DateTime<Utc>) -> Self {
        Command::CreateThread {
            thread_id: ids::thread_id(at),
            message_id: ids::message_id(at),
            new,
            author,
            at,
        }
    }

    pub fn post_message(
        thread_id: impl Into<ThreadId>,
        author: User,
        content: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Command::PostMessage {
            message_id: ids::message_id(at),
            thread_id: thread_id.into(),
            author,
            content: content.into(),
            at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    ThreadCreated(ThreadId),
    MessagePosted(MessageId),
    SelectionChanged(Option<ThreadId>),
}

pub fn reduce(state: &State, command: Command) -> StoreResult<(State, Applied)> {
    match command {
        Command::CreateThread { thread_id, message_id, new, author, at } => {
            validate_new_thread(&new)?;
            if state.thread(&thread_id).is_some() {
                return Err(StoreError::Conflict(thread_id));
            }
            if state.has_message(&message_id) {
                return Err(StoreError::Conflict(message_id));
            }
            let mut next = state.clone();
            next.threads.push(Thread {
                id: thread_id.clone(),
                title: new.title.trim().to_string(),
                category: categories::canonical_name(&new.category),
                description: new.description,
                created_at: at,
                last_activity_at: at,
                message_count: 0,
                is_active: true,
            });
            next.append(&thread_id, message_id, &author, &new.opening_message, at);
            Ok((next, Applied::ThreadCreated(thread_id)))
        }
        Command::PostMessage { message_id, thread_id, author, content, at } => {
            if state.thread(&thread_id).is_none() {
                return Err(StoreError::NotFound(thread_id));
            }
            validate_chat_message(&content)?;
            if state.has_message(&message_id) {
                return Err(StoreError::Conflict(message_id));
            }
            let mut next = state.clone();
            next.append(&thread_id, message_id.clone(), &author, &content, at);
            Ok((next, Applied::MessagePosted(message_id)))
        }
        Command::SelectThread(selection) => {
            if let Some(id) = &selection {
                if state.thread(id).is_none() {
                    return Err(StoreError::NotFound(id.clone()));
                }
            }
            let mut next = state.clone();
            next.current_thread = selection.clone();
            Ok((next, Applied::SelectionChanged(selection)))
        }
    }
}

/// Owned store handed to whatever needs to read or mutate discussions.
#[derive(Debug, Clone, Default)]
pub struct DiscussionStore {
    state: State,
}

impl DiscussionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn dispatch(&mut self, command: Command) -> StoreResult<Applied> {
        let (next, applied) = reduce(&self.state, command)?;
        self.state = next;
        Ok(applied)
    }

    /// Creates a thread together with its opening message. `new.category`
    /// may be a catalog slug; the thread stores the display name.
    pub fn create_thread(&mut self, new: NewThread, author: &User) -> StoreResult<ThreadId> {
        let now = Utc::now();
        let thread_id = ids::thread_id(now);
        let title = new.title.trim().to_string();
        let category = categories::canonical_name(&new.category);
        self.dispatch(Command::CreateThread {
            thread_id: thread_id.clone(),
            message_id: ids::message_id(now),
            new,
            author: author.clone(),
            at: now,
        })?;
        info!(%thread_id, %title, %category, author = %author.display_name, "thread created");
        Ok(thread_id)
    }

    pub fn post_message(
        &mut self,
        thread_id: &str,
        author: &User,
        content: &str,
    ) -> StoreResult<MessageId> {
        let now = Utc::now();
        let message_id = ids::message_id(now);
        self.dispatch(Command::PostMessage {
            message_id: message_id.clone(),
            thread_id: thread_id.to_string(),
            author: author.clone(),
            content: content.to_string(),
            at: now,
        })?;
        debug!(%thread_id, %message_id, author = %author.display_name, "message posted");
        Ok(message_id)
    }

    pub fn select_thread(&mut self, thread_id: Option<&str>) -> StoreResult<()> {
        self.dispatch(Command::SelectThread(thread_id.map(str::to_string)))?;
        debug!(selected = ?thread_id, "selection changed");
        Ok(())
    }

    pub fn join_thread(&mut self, thread_id: &str) -> StoreResult<()> {
        self.select_thread(Some(thread_id))
    }

    /// Clears the selection. There is nothing to validate.
    pub fn leave_thread(&mut self) {
        self.state.current_thread = None;
        debug!("selection cleared");
    }

    /// Threads matching `filter`, most recently active first.
    pub fn list_threads(&self, filter: &ThreadFilter) -> Vec<Thread> {
        // newest first before the stable sort so equal activity keeps newest on top
        let mut v: Vec<Thread> = self
            .state
            .threads
            .iter()
            .rev()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        v.sort_by(|a, b| b.last_activity_at.cmp(&a.last_activity_at));
        v
    }

    /// Thread and message totals for a catalog category given by slug or name.
    pub fn category_summary(&self, key: &str) -> Option<CategorySummary> {
        let category = *categories::find(key)?;
        let (thread_count, message_count) = self
            .state
            .threads
            .iter()
            .filter(|t| t.category.eq_ignore_ascii_case(category.name))
            .fold((0, 0), |(n, m), t| (n + 1, m + t.message_count));
        Some(CategorySummary { category, thread_count, message_count })
    }

    /// Summaries for the whole catalog, in catalog order.
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        CATALOG.iter().filter_map(|c| self.category_summary(c.slug)).collect()
    }

    pub fn get_thread(&self, thread_id: &str) -> StoreResult<Thread> {
        self.state
            .thread(thread_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(thread_id.to_string()))
    }

    /// Message log of a thread in posting order.
    pub fn get_messages(&self, thread_id: &str) -> StoreResult<Vec<Message>> {
        if self.state.thread(thread_id).is_none() {
            return Err(StoreError::NotFound(thread_id.to_string()));
        }
        Ok(self.state.messages(thread_id).to_vec())
    }

    pub fn current_thread(&self) -> Option<&Thread> {
        self.state.current_thread().and_then(|id| self.state.thread(id))
    }

    pub fn thread_count(&self) -> usize {
        self.state.threads.len()
    }

    /// Serializable copy of the whole state.
    pub fn snapshot(&self) -> State {
        self.state.clone()
    }
}
