/// Classification tag for one stream event.
///
/// The vocabulary is closed on our side but open on the wire: any object that
/// does not match a known field signature classifies as [`Unrecognized`] and
/// is dropped without dispatch, so new upstream event kinds never break an
/// existing stream.
///
/// [`Unrecognized`]: EventKind::Unrecognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Status,
    StatusDeletion,
    DirectMessage,
    DirectMessageDeletion,
    TrackLimitation,
    ScrubGeo,
    StallWarning,
    FriendsList,
    Favorite,
    Unfavorite,
    Follow,
    Unfollow,
    Block,
    Unblock,
    UserListCreated,
    UserListUpdated,
    UserListDestroyed,
    UserListMemberAdded,
    UserListMemberRemoved,
    UserListSubscribed,
    UserListUnsubscribed,
    UserProfileUpdate,
    Unrecognized,
}

impl EventKind {
    /// Stable label, used for logs and metric label values.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Status => "status",
            EventKind::StatusDeletion => "status_deletion",
            EventKind::DirectMessage => "direct_message",
            EventKind::DirectMessageDeletion => "direct_message_deletion",
            EventKind::TrackLimitation => "track_limitation",
            EventKind::ScrubGeo => "scrub_geo",
            EventKind::StallWarning => "stall_warning",
            EventKind::FriendsList => "friends_list",
            EventKind::Favorite => "favorite",
            EventKind::Unfavorite => "unfavorite",
            EventKind::Follow => "follow",
            EventKind::Unfollow => "unfollow",
            EventKind::Block => "block",
            EventKind::Unblock => "unblock",
            EventKind::UserListCreated => "user_list_created",
            EventKind::UserListUpdated => "user_list_updated",
            EventKind::UserListDestroyed => "user_list_destroyed",
            EventKind::UserListMemberAdded => "user_list_member_added",
            EventKind::UserListMemberRemoved => "user_list_member_removed",
            EventKind::UserListSubscribed => "user_list_subscribed",
            EventKind::UserListUnsubscribed => "user_list_unsubscribed",
            EventKind::UserProfileUpdate => "user_profile_update",
            EventKind::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
