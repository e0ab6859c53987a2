use super::EventKind;
use crate::model::DirectMessage;
use crate::model::StallWarning;
use crate::model::Status;
use crate::model::StatusDeletionNotice;
use crate::model::User;
use crate::model::UserList;

/// One fully decoded stream event.
///
/// Tagged-variant form of the listener surface: adding a variant here forces
/// every dispatch site to handle it at compile time. Each variant maps to
/// exactly one [`StreamListener`] callback.
///
/// [`StreamListener`]: crate::StreamListener
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Status(Status),
    StatusDeletion(StatusDeletionNotice),
    DirectMessage(DirectMessage),
    DirectMessageDeletion { message_id: i64, user_id: i64 },
    TrackLimitation { limited_statuses: u64 },
    ScrubGeo { user_id: i64, up_to_status_id: i64 },
    StallWarning(StallWarning),
    FriendsList(Vec<i64>),
    Favorite { source: User, target: User, status: Status },
    Unfavorite { source: User, target: User, status: Status },
    Follow { source: User, target: User },
    Unfollow { source: User, target: User },
    Block { source: User, target: User },
    Unblock { source: User, target: User },
    UserListCreated { owner: User, list: UserList },
    UserListUpdated { owner: User, list: UserList },
    UserListDestroyed { owner: User, list: UserList },
    UserListMemberAdded { member: User, owner: User, list: UserList },
    UserListMemberRemoved { member: User, owner: User, list: UserList },
    UserListSubscribed { subscriber: User, owner: User, list: UserList },
    UserListUnsubscribed { subscriber: User, owner: User, list: UserList },
    UserProfileUpdate(User),
}

impl StreamEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StreamEvent::Status(_) => EventKind::Status,
            StreamEvent::StatusDeletion(_) => EventKind::StatusDeletion,
            StreamEvent::DirectMessage(_) => EventKind::DirectMessage,
            StreamEvent::DirectMessageDeletion { .. } => EventKind::DirectMessageDeletion,
            StreamEvent::TrackLimitation { .. } => EventKind::TrackLimitation,
            StreamEvent::ScrubGeo { .. } => EventKind::ScrubGeo,
            StreamEvent::StallWarning(_) => EventKind::StallWarning,
            StreamEvent::FriendsList(_) => EventKind::FriendsList,
            StreamEvent::Favorite { .. } => EventKind::Favorite,
            StreamEvent::Unfavorite { .. } => EventKind::Unfavorite,
            StreamEvent::Follow { .. } => EventKind::Follow,
            StreamEvent::Unfollow { .. } => EventKind::Unfollow,
            StreamEvent::Block { .. } => EventKind::Block,
            StreamEvent::Unblock { .. } => EventKind::Unblock,
            StreamEvent::UserListCreated { .. } => EventKind::UserListCreated,
            StreamEvent::UserListUpdated { .. } => EventKind::UserListUpdated,
            StreamEvent::UserListDestroyed { .. } => EventKind::UserListDestroyed,
            StreamEvent::UserListMemberAdded { .. } => EventKind::UserListMemberAdded,
            StreamEvent::UserListMemberRemoved { .. } => EventKind::UserListMemberRemoved,
            StreamEvent::UserListSubscribed { .. } => EventKind::UserListSubscribed,
            StreamEvent::UserListUnsubscribed { .. } => EventKind::UserListUnsubscribed,
            StreamEvent::UserProfileUpdate(_) => EventKind::UserProfileUpdate,
        }
    }
}
