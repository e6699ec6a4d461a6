//! Documents, meetings, business cards, to-dos and the user's own business card.
//!
//! Each family persists under its own key. The user's own card is a single
//! value seeded from configuration until it is first saved.

use crate::{
    core::{
        collection::{Collection, Placement},
        storage::KvStorage,
    },
    errors::{Error, Result},
    models::{
        BusinessCard, Document, Meeting, MyBusinessCard, NewDocument, NewMeeting, NewTodo,
        TodoItem, TodoPriority,
    },
};
use chrono::NaiveDate;
use tracing::{error, info};

/// Storage key for document metadata
pub const DOCUMENTS_STORAGE_KEY: &str = "traveho_documents";
/// Storage key for meetings
pub const MEETINGS_STORAGE_KEY: &str = "traveho_meetings";
/// Storage key for collected business cards
pub const BUSINESS_CARDS_STORAGE_KEY: &str = "traveho_business_cards";
/// Storage key for to-dos
pub const TODOS_STORAGE_KEY: &str = "traveho_todos";
/// Storage key for the user's own business card
pub const MY_BUSINESS_CARD_STORAGE_KEY: &str = "traveho_my_business_card";

/// Counts shown on the to-do dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoStats {
    /// Not yet completed
    pub pending: usize,
    /// Completed
    pub completed: usize,
    /// High-priority items not yet completed
    pub high_priority_pending: usize,
}

/// Documents, meetings, collected business cards, to-dos and the user's own
/// business card.
#[derive(Debug)]
pub struct DocumentStore {
    storage: KvStorage,
    documents: Collection<Document>,
    meetings: Collection<Meeting>,
    business_cards: Collection<BusinessCard>,
    todos: Collection<TodoItem>,
    my_business_card: MyBusinessCard,
}

impl DocumentStore {
    /// Loads every collection. `default_card` is used when no card of the
    /// user's own has been saved yet.
    pub async fn load(storage: &KvStorage, default_card: MyBusinessCard) -> Result<Self> {
        let my_business_card = storage
            .load_json(MY_BUSINESS_CARD_STORAGE_KEY)
            .await
            .inspect_err(|e| error!("Error loading business card: {e}"))?
            .unwrap_or(default_card);

        Ok(Self {
            storage: storage.clone(),
            documents: Collection::load(
                storage.clone(),
                DOCUMENTS_STORAGE_KEY,
                Placement::NewestFirst,
            )
            .await?,
            meetings: Collection::load(
                storage.clone(),
                MEETINGS_STORAGE_KEY,
                Placement::OldestFirst,
            )
            .await?,
            business_cards: Collection::load(
                storage.clone(),
                BUSINESS_CARDS_STORAGE_KEY,
                Placement::OldestFirst,
            )
            .await?,
            todos: Collection::load(storage.clone(), TODOS_STORAGE_KEY, Placement::NewestFirst)
                .await?,
            my_business_card,
        })
    }

    // Documents

    /// Documents, newest first.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        self.documents.items()
    }

    /// A fresh document id.
    #[must_use]
    pub fn next_document_id(&self) -> String {
        self.documents.next_id()
    }

    /// Adds a fully-formed document as given.
    ///
    /// # Errors
    /// [`Error::DuplicateId`] if the id is taken, or the storage error.
    pub async fn add_document(&mut self, document: Document) -> Result<&Document> {
        info!(document_id = %document.id, name = %document.name, "Adding document");
        self.documents.insert(document).await
    }

    /// Records an uploaded document dated `today`.
    ///
    /// # Errors
    /// [`Error::Validation`] for a blank name, or the storage error.
    pub async fn create_document(
        &mut self,
        new_document: NewDocument,
        today: NaiveDate,
    ) -> Result<&Document> {
        let name = new_document.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Document name cannot be empty"));
        }
        let document = Document {
            id: self.documents.next_id(),
            name: name.to_string(),
            doc_type: new_document.doc_type,
            upload_date: today,
        };
        self.add_document(document).await
    }

    /// Deletes the document with `id` and returns it.
    pub async fn delete_document(&mut self, id: &str) -> Result<Document> {
        self.documents.remove(id).await
    }

    // Meetings

    /// Meetings in the order they were scheduled.
    #[must_use]
    pub fn meetings(&self) -> &[Meeting] {
        self.meetings.items()
    }

    /// A fresh meeting id.
    #[must_use]
    pub fn next_meeting_id(&self) -> String {
        self.meetings.next_id()
    }

    /// Adds a fully-formed meeting as given.
    pub async fn add_meeting(&mut self, meeting: Meeting) -> Result<&Meeting> {
        self.meetings.insert(meeting).await
    }

    /// Schedules a meeting from form input.
    ///
    /// Attendee names are split on commas and trimmed, dropping empty ones.
    /// A blank location or description is stored as absent. The new meeting
    /// has no recording and no summary yet.
    ///
    /// # Errors
    /// [`Error::Validation`] for a blank title, or the storage error.
    pub async fn create_meeting(&mut self, new_meeting: NewMeeting) -> Result<&Meeting> {
        let title = new_meeting.title.trim();
        if title.is_empty() {
            return Err(Error::validation("Please enter a meeting title."));
        }

        let meeting = Meeting {
            id: self.meetings.next_id(),
            title: title.to_string(),
            date: new_meeting.date,
            time: new_meeting.time,
            duration: new_meeting.duration,
            location: non_blank(&new_meeting.location),
            attendees: new_meeting
                .attendees
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            friend_attendees: new_meeting.friend_attendees,
            description: non_blank(&new_meeting.description),
            has_recording: Some(false),
            has_summary: Some(false),
        };
        info!(meeting_id = %meeting.id, date = %meeting.date, "Scheduling meeting");
        self.meetings.insert(meeting).await
    }

    /// Applies `change` to the meeting with `id`.
    pub async fn update_meeting<F>(&mut self, id: &str, change: F) -> Result<&Meeting>
    where
        F: FnOnce(&mut Meeting),
    {
        self.meetings.update(id, change).await
    }

    /// Deletes the meeting with `id` and returns it.
    pub async fn delete_meeting(&mut self, id: &str) -> Result<Meeting> {
        self.meetings.remove(id).await
    }

    /// Meetings scheduled on `date`, in insertion order.
    #[must_use]
    pub fn meetings_on(&self, date: NaiveDate) -> Vec<&Meeting> {
        self.meetings
            .items()
            .iter()
            .filter(|m| m.date == date)
            .collect()
    }

    // Business cards

    /// Collected business cards in scan order.
    #[must_use]
    pub fn business_cards(&self) -> &[BusinessCard] {
        self.business_cards.items()
    }

    /// A fresh business card id.
    #[must_use]
    pub fn next_business_card_id(&self) -> String {
        self.business_cards.next_id()
    }

    /// Adds a scanned business card.
    pub async fn add_business_card(&mut self, card: BusinessCard) -> Result<&BusinessCard> {
        self.business_cards.insert(card).await
    }

    /// Applies `change` to the business card with `id`.
    pub async fn update_business_card<F>(&mut self, id: &str, change: F) -> Result<&BusinessCard>
    where
        F: FnOnce(&mut BusinessCard),
    {
        self.business_cards.update(id, change).await
    }

    /// Deletes the business card with `id` and returns it.
    pub async fn delete_business_card(&mut self, id: &str) -> Result<BusinessCard> {
        self.business_cards.remove(id).await
    }

    // To-dos

    /// To-dos, newest first.
    #[must_use]
    pub fn todos(&self) -> &[TodoItem] {
        self.todos.items()
    }

    /// A fresh to-do id.
    #[must_use]
    pub fn next_todo_id(&self) -> String {
        self.todos.next_id()
    }

    /// Adds a fully-formed to-do as given.
    pub async fn add_todo(&mut self, todo: TodoItem) -> Result<&TodoItem> {
        self.todos.insert(todo).await
    }

    /// Adds an open to-do created `today` from form input. A blank
    /// description is stored as absent.
    ///
    /// # Errors
    /// [`Error::Validation`] for a blank title, or the storage error.
    pub async fn create_todo(&mut self, new_todo: NewTodo, today: NaiveDate) -> Result<&TodoItem> {
        let title = new_todo.title.trim();
        if title.is_empty() {
            return Err(Error::validation("Please enter a todo title."));
        }

        let todo = TodoItem {
            id: self.todos.next_id(),
            title: title.to_string(),
            description: non_blank(&new_todo.description),
            completed: false,
            priority: new_todo.priority,
            due_date: new_todo.due_date,
            created_date: today,
            category: new_todo.category,
        };
        self.todos.insert(todo).await
    }

    /// Applies `change` to the to-do with `id`.
    pub async fn update_todo<F>(&mut self, id: &str, change: F) -> Result<&TodoItem>
    where
        F: FnOnce(&mut TodoItem),
    {
        self.todos.update(id, change).await
    }

    /// Deletes the to-do with `id` and returns it.
    pub async fn delete_todo(&mut self, id: &str) -> Result<TodoItem> {
        self.todos.remove(id).await
    }

    /// Flips the completed flag of the to-do with `id`.
    pub async fn toggle_todo(&mut self, id: &str) -> Result<&TodoItem> {
        self.todos.update(id, |t| t.completed = !t.completed).await
    }

    /// Pending, completed and urgent counts over every to-do.
    #[must_use]
    pub fn todo_stats(&self) -> TodoStats {
        self.todos
            .items()
            .iter()
            .fold(TodoStats::default(), |mut stats, todo| {
                if todo.completed {
                    stats.completed += 1;
                } else {
                    stats.pending += 1;
                    if todo.priority == TodoPriority::High {
                        stats.high_priority_pending += 1;
                    }
                }
                stats
            })
    }

    // My business card

    /// The user's own card, or the configured default if never saved.
    #[must_use]
    pub const fn my_business_card(&self) -> &MyBusinessCard {
        &self.my_business_card
    }

    /// Applies `change` to the user's own card and persists it.
    pub async fn update_my_business_card<F>(&mut self, change: F) -> Result<&MyBusinessCard>
    where
        F: FnOnce(&mut MyBusinessCard),
    {
        let mut next = self.my_business_card.clone();
        change(&mut next);
        self.storage
            .save_json(MY_BUSINESS_CARD_STORAGE_KEY, &next)
            .await
            .inspect_err(|e| error!("Error saving business card: {e}"))?;
        self.my_business_card = next;
        Ok(&self.my_business_card)
    }
}

/// Trimmed `value`, or `None` when blank.
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
