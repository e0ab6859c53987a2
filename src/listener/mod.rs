use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::model::DirectMessage;
use crate::model::StallWarning;
use crate::model::Status;
use crate::model::StatusDeletionNotice;
use crate::model::User;
use crate::model::UserList;
use crate::StreamError;
use crate::StreamEvent;

/// Callback surface for one user stream, supplied by the caller.
///
/// Every method has a default no-op body, so implementors override only the
/// events they care about. The dispatch lane guarantees serial, non-overlapping
/// invocation per stream, in wire order; no additional synchronization is
/// required inside the callbacks. Blocking here is tolerated: it delays this
/// stream's queue, never the socket reader.
///
/// `on_exception` is the catch-all for delivery failures: decode errors on
/// recognized event kinds and panics raised inside other callbacks.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StreamListener: Send + Sync + 'static {
    async fn on_status(
        &self,
        _status: Status,
    ) {
    }

    async fn on_status_deletion(
        &self,
        _notice: StatusDeletionNotice,
    ) {
    }

    async fn on_direct_message(
        &self,
        _message: DirectMessage,
    ) {
    }

    async fn on_direct_message_deletion(
        &self,
        _message_id: i64,
        _user_id: i64,
    ) {
    }

    /// `limited_statuses` is the number of statuses matched but withheld
    /// upstream.
    async fn on_track_limitation(
        &self,
        _limited_statuses: u64,
    ) {
    }

    async fn on_scrub_geo(
        &self,
        _user_id: i64,
        _up_to_status_id: i64,
    ) {
    }

    async fn on_stall_warning(
        &self,
        _warning: StallWarning,
    ) {
    }

    /// Delivered once at stream start with the ids of followed accounts.
    async fn on_friends_list(
        &self,
        _friend_ids: Vec<i64>,
    ) {
    }

    async fn on_favorite(
        &self,
        _source: User,
        _target: User,
        _status: Status,
    ) {
    }

    async fn on_unfavorite(
        &self,
        _source: User,
        _target: User,
        _status: Status,
    ) {
    }

    async fn on_follow(
        &self,
        _source: User,
        _target: User,
    ) {
    }

    async fn on_unfollow(
        &self,
        _source: User,
        _target: User,
    ) {
    }

    async fn on_block(
        &self,
        _source: User,
        _target: User,
    ) {
    }

    async fn on_unblock(
        &self,
        _source: User,
        _target: User,
    ) {
    }

    async fn on_user_list_created(
        &self,
        _owner: User,
        _list: UserList,
    ) {
    }

    async fn on_user_list_updated(
        &self,
        _owner: User,
        _list: UserList,
    ) {
    }

    async fn on_user_list_destroyed(
        &self,
        _owner: User,
        _list: UserList,
    ) {
    }

    async fn on_user_list_member_added(
        &self,
        _member: User,
        _owner: User,
        _list: UserList,
    ) {
    }

    async fn on_user_list_member_removed(
        &self,
        _member: User,
        _owner: User,
        _list: UserList,
    ) {
    }

    async fn on_user_list_subscribed(
        &self,
        _subscriber: User,
        _owner: User,
        _list: UserList,
    ) {
    }

    async fn on_user_list_unsubscribed(
        &self,
        _subscriber: User,
        _owner: User,
        _list: UserList,
    ) {
    }

    async fn on_user_profile_update(
        &self,
        _user: User,
    ) {
    }

    /// Catch-all for delivery failures. Never invoked for unrecognized event
    /// shapes, which are dropped silently by contract.
    async fn on_exception(
        &self,
        _error: &StreamError,
    ) {
    }
}

/// Routes one decoded event to exactly one listener callback.
pub(crate) async fn deliver(
    listener: &dyn StreamListener,
    event: StreamEvent,
) {
    match event {
        StreamEvent::Status(status) => listener.on_status(status).await,
        StreamEvent::StatusDeletion(notice) => listener.on_status_deletion(notice).await,
        StreamEvent::DirectMessage(message) => listener.on_direct_message(message).await,
        StreamEvent::DirectMessageDeletion { message_id, user_id } => {
            listener.on_direct_message_deletion(message_id, user_id).await
        }
        StreamEvent::TrackLimitation { limited_statuses } => listener.on_track_limitation(limited_statuses).await,
        StreamEvent::ScrubGeo { user_id, up_to_status_id } => listener.on_scrub_geo(user_id, up_to_status_id).await,
        StreamEvent::StallWarning(warning) => listener.on_stall_warning(warning).await,
        StreamEvent::FriendsList(friend_ids) => listener.on_friends_list(friend_ids).await,
        StreamEvent::Favorite { source, target, status } => listener.on_favorite(source, target, status).await,
        StreamEvent::Unfavorite { source, target, status } => listener.on_unfavorite(source, target, status).await,
        StreamEvent::Follow { source, target } => listener.on_follow(source, target).await,
        StreamEvent::Unfollow { source, target } => listener.on_unfollow(source, target).await,
        StreamEvent::Block { source, target } => listener.on_block(source, target).await,
        StreamEvent::Unblock { source, target } => listener.on_unblock(source, target).await,
        StreamEvent::UserListCreated { owner, list } => listener.on_user_list_created(owner, list).await,
        StreamEvent::UserListUpdated { owner, list } => listener.on_user_list_updated(owner, list).await,
        StreamEvent::UserListDestroyed { owner, list } => listener.on_user_list_destroyed(owner, list).await,
        StreamEvent::UserListMemberAdded { member, owner, list } => {
            listener.on_user_list_member_added(member, owner, list).await
        }
        StreamEvent::UserListMemberRemoved { member, owner, list } => {
            listener.on_user_list_member_removed(member, owner, list).await
        }
        StreamEvent::UserListSubscribed { subscriber, owner, list } => {
            listener.on_user_list_subscribed(subscriber, owner, list).await
        }
        StreamEvent::UserListUnsubscribed { subscriber, owner, list } => {
            listener.on_user_list_unsubscribed(subscriber, owner, list).await
        }
        StreamEvent::UserProfileUpdate(user) => listener.on_user_profile_update(user).await,
    }
}
