//! Travel friend directory - a read-only list seeded from configuration.
//!
//! Meetings reference friends by id. Nothing enforces that those ids exist,
//! so every lookup here skips ids it cannot resolve.

use crate::models::{Meeting, TravelFriend};

/// Travel friends, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct FriendDirectory {
    friends: Vec<TravelFriend>,
}

impl FriendDirectory {
    /// Wraps the configured friends.
    #[must_use]
    pub const fn new(friends: Vec<TravelFriend>) -> Self {
        Self { friends }
    }

    /// Every friend.
    #[must_use]
    pub fn friends(&self) -> &[TravelFriend] {
        &self.friends
    }

    /// Friends that can be invited to meetings.
    #[must_use]
    pub fn connected_friends(&self) -> Vec<&TravelFriend> {
        self.friends.iter().filter(|f| f.is_connected).collect()
    }

    /// The friend with `id`.
    #[must_use]
    pub fn friend_by_id(&self, id: &str) -> Option<&TravelFriend> {
        self.friends.iter().find(|f| f.id == id)
    }

    /// Friends whose name or location contains `query`, ignoring case.
    /// An empty query matches everyone.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&TravelFriend> {
        let query = query.trim().to_lowercase();
        self.friends
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&query)
                    || f.location.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Friends whose id is in `ids`, in directory order. Unknown ids are skipped.
    #[must_use]
    pub fn friends_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&TravelFriend> {
        self.friends
            .iter()
            .filter(|f| ids.iter().any(|id| id.as_ref() == f.id))
            .collect()
    }

    /// Every attendee name of `meeting`: free-text names first, then resolved friends.
    #[must_use]
    pub fn meeting_attendees(&self, meeting: &Meeting) -> Vec<String> {
        meeting
            .attendees
            .iter()
            .cloned()
            .chain(
                self.friends_by_ids(meeting.friend_attendees.as_slice())
                    .into_iter()
                    .map(|f| f.name.clone()),
            )
            .collect()
    }

    /// One-line description of a friend selection, e.g. `"Sarah Johnson, Mike Chen +1 more"`.
    #[must_use]
    pub fn selection_summary<S: AsRef<str>>(&self, ids: &[S]) -> String {
        if ids.is_empty() {
            return "No travel friends selected".to_string();
        }

        let names: Vec<&str> = self
            .friends_by_ids(ids)
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();

        if names.len() <= 2 {
            names.join(", ")
        } else {
            format!("{} +{} more", names[..2].join(", "), names.len() - 2)
        }
    }
}
