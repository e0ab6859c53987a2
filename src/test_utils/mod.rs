//! Shared helpers for unit tests: fixture feed lines and a recording
//! listener that taps every callback onto an unbounded channel.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::DirectMessage;
use crate::StallWarning;
use crate::Status;
use crate::StatusDeletionNotice;
use crate::StreamError;
use crate::StreamListener;
use crate::User;
use crate::UserList;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    env_logger::init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
    println!("setup logger for unit test.");
}

//-----------------------------------------------------------
// Fixture feed lines

pub fn status_line(
    id: i64,
    user_id: i64,
    text: &str,
) -> String {
    format!(
        r#"{{"id":{},"text":"{}","user":{{"id":{},"screen_name":"fixture"}},"created_at":"Sun Aug 01 12:00:00 +0000 2026"}}"#,
        id, text, user_id
    )
}

pub fn status_deletion_line(
    status_id: i64,
    user_id: i64,
) -> String {
    format!(
        r#"{{"delete":{{"status":{{"id":{},"user_id":{}}}}}}}"#,
        status_id, user_id
    )
}

pub fn direct_message_line(
    id: i64,
    sender_id: i64,
    text: &str,
) -> String {
    format!(
        r#"{{"direct_message":{{"id":{},"text":"{}","sender_id":{},"recipient_id":1}}}}"#,
        id, text, sender_id
    )
}

pub fn direct_message_deletion_line(
    message_id: i64,
    user_id: i64,
) -> String {
    format!(
        r#"{{"delete":{{"direct_message":{{"id":{},"user_id":{}}}}}}}"#,
        message_id, user_id
    )
}

pub fn track_limitation_line(count: u64) -> String {
    format!(r#"{{"limit":{{"track":{}}}}}"#, count)
}

pub fn scrub_geo_line(
    user_id: i64,
    up_to_status_id: i64,
) -> String {
    format!(
        r#"{{"scrub_geo":{{"user_id":{},"up_to_status_id":{}}}}}"#,
        user_id, up_to_status_id
    )
}

pub fn stall_warning_line(percent_full: u8) -> String {
    format!(
        r#"{{"warning":{{"code":"FALLING_BEHIND","message":"queue is filling up","percent_full":{}}}}}"#,
        percent_full
    )
}

pub fn friends_line(ids: &[i64]) -> String {
    let ids = ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",");
    format!(r#"{{"friends":[{}]}}"#, ids)
}

pub fn follow_line(
    source_id: i64,
    target_id: i64,
) -> String {
    interaction_line("follow", source_id, target_id, None)
}

pub fn block_line(
    source_id: i64,
    target_id: i64,
) -> String {
    interaction_line("block", source_id, target_id, None)
}

pub fn favorite_line(
    source_id: i64,
    target_id: i64,
    status_id: i64,
) -> String {
    let status = format!(r#"{{"id":{},"text":"favorited"}}"#, status_id);
    interaction_line("favorite", source_id, target_id, Some(&status))
}

pub fn list_member_added_line(
    owner_id: i64,
    member_id: i64,
    list_id: i64,
) -> String {
    let list = format!(r#"{{"id":{},"name":"fixtures"}}"#, list_id);
    interaction_line("list_member_added", owner_id, member_id, Some(&list))
}

pub fn user_update_line(user_id: i64) -> String {
    interaction_line("user_update", user_id, user_id, None)
}

pub fn interaction_line(
    event: &str,
    source_id: i64,
    target_id: i64,
    target_object: Option<&str>,
) -> String {
    let target_object = target_object
        .map(|json| format!(r#","target_object":{}"#, json))
        .unwrap_or_default();
    format!(
        r#"{{"event":"{}","source":{{"id":{}}},"target":{{"id":{}}}{}}}"#,
        event, source_id, target_id, target_object
    )
}

/// Valid JSON, but no known field signature.
pub fn unknown_line() -> String {
    r#"{"brand_new_wrapper":{"answer":42},"for_user":12345678}"#.to_owned()
}

//-----------------------------------------------------------
// Recording listener

/// Compact projection of one received callback, for order and payload
/// assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum Received {
    Status { id: i64, text: String },
    StatusDeletion { status_id: i64, user_id: i64 },
    DirectMessage { id: i64 },
    DirectMessageDeletion { message_id: i64, user_id: i64 },
    TrackLimitation { limited_statuses: u64 },
    ScrubGeo { user_id: i64, up_to_status_id: i64 },
    StallWarning { code: String },
    FriendsList(Vec<i64>),
    Favorite { source: i64, target: i64, status: i64 },
    Unfavorite { source: i64, target: i64, status: i64 },
    Follow { source: i64, target: i64 },
    Unfollow { source: i64, target: i64 },
    Block { source: i64, target: i64 },
    Unblock { source: i64, target: i64 },
    UserListCreated { owner: i64, list: i64 },
    UserListUpdated { owner: i64, list: i64 },
    UserListDestroyed { owner: i64, list: i64 },
    UserListMemberAdded { member: i64, owner: i64, list: i64 },
    UserListMemberRemoved { member: i64, owner: i64, list: i64 },
    UserListSubscribed { subscriber: i64, owner: i64, list: i64 },
    UserListUnsubscribed { subscriber: i64, owner: i64, list: i64 },
    UserProfileUpdate { user: i64 },
    Exception(String),
}

/// Listener that forwards every callback onto an unbounded channel, with an
/// optional artificial delay to simulate slow listener code. Also tracks
/// callback overlap so tests can assert serial invocation.
pub struct RecordingListener {
    tx: mpsc::UnboundedSender<Received>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingListener {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Received>) {
        Self::with_delay(None)
    }

    pub fn with_delay(delay: Option<Duration>) -> (Arc<Self>, mpsc::UnboundedReceiver<Received>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener = Arc::new(RecordingListener {
            tx,
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        });
        (listener, rx)
    }

    /// Highest number of callbacks observed running at once. 1 means the
    /// dispatch lane kept its serial-invocation guarantee.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn observe(
        &self,
        record: Received,
    ) {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let _ = self.tx.send(record);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StreamListener for RecordingListener {
    async fn on_status(
        &self,
        status: Status,
    ) {
        self.observe(Received::Status {
            id: status.id,
            text: status.text,
        })
        .await;
    }

    async fn on_status_deletion(
        &self,
        notice: StatusDeletionNotice,
    ) {
        self.observe(Received::StatusDeletion {
            status_id: notice.status_id,
            user_id: notice.user_id,
        })
        .await;
    }

    async fn on_direct_message(
        &self,
        message: DirectMessage,
    ) {
        self.observe(Received::DirectMessage { id: message.id }).await;
    }

    async fn on_direct_message_deletion(
        &self,
        message_id: i64,
        user_id: i64,
    ) {
        self.observe(Received::DirectMessageDeletion { message_id, user_id }).await;
    }

    async fn on_track_limitation(
        &self,
        limited_statuses: u64,
    ) {
        self.observe(Received::TrackLimitation { limited_statuses }).await;
    }

    async fn on_scrub_geo(
        &self,
        user_id: i64,
        up_to_status_id: i64,
    ) {
        self.observe(Received::ScrubGeo { user_id, up_to_status_id }).await;
    }

    async fn on_stall_warning(
        &self,
        warning: StallWarning,
    ) {
        self.observe(Received::StallWarning { code: warning.code }).await;
    }

    async fn on_friends_list(
        &self,
        friend_ids: Vec<i64>,
    ) {
        self.observe(Received::FriendsList(friend_ids)).await;
    }

    async fn on_favorite(
        &self,
        source: User,
        target: User,
        status: Status,
    ) {
        self.observe(Received::Favorite {
            source: source.id,
            target: target.id,
            status: status.id,
        })
        .await;
    }

    async fn on_unfavorite(
        &self,
        source: User,
        target: User,
        status: Status,
    ) {
        self.observe(Received::Unfavorite {
            source: source.id,
            target: target.id,
            status: status.id,
        })
        .await;
    }

    async fn on_follow(
        &self,
        source: User,
        target: User,
    ) {
        self.observe(Received::Follow {
            source: source.id,
            target: target.id,
        })
        .await;
    }

    async fn on_unfollow(
        &self,
        source: User,
        target: User,
    ) {
        self.observe(Received::Unfollow {
            source: source.id,
            target: target.id,
        })
        .await;
    }

    async fn on_block(
        &self,
        source: User,
        target: User,
    ) {
        self.observe(Received::Block {
            source: source.id,
            target: target.id,
        })
        .await;
    }

    async fn on_unblock(
        &self,
        source: User,
        target: User,
    ) {
        self.observe(Received::Unblock {
            source: source.id,
            target: target.id,
        })
        .await;
    }

    async fn on_user_list_created(
        &self,
        owner: User,
        list: UserList,
    ) {
        self.observe(Received::UserListCreated {
            owner: owner.id,
            list: list.id,
        })
        .await;
    }

    async fn on_user_list_updated(
        &self,
        owner: User,
        list: UserList,
    ) {
        self.observe(Received::UserListUpdated {
            owner: owner.id,
            list: list.id,
        })
        .await;
    }

    async fn on_user_list_destroyed(
        &self,
        owner: User,
        list: UserList,
    ) {
        self.observe(Received::UserListDestroyed {
            owner: owner.id,
            list: list.id,
        })
        .await;
    }

    async fn on_user_list_member_added(
        &self,
        member: User,
        owner: User,
        list: UserList,
    ) {
        self.observe(Received::UserListMemberAdded {
            member: member.id,
            owner: owner.id,
            list: list.id,
        })
        .await;
    }

    async fn on_user_list_member_removed(
        &self,
        member: User,
        owner: User,
        list: UserList,
    ) {
        self.observe(Received::UserListMemberRemoved {
            member: member.id,
            owner: owner.id,
            list: list.id,
        })
        .await;
    }

    async fn on_user_list_subscribed(
        &self,
        subscriber: User,
        owner: User,
        list: UserList,
    ) {
        self.observe(Received::UserListSubscribed {
            subscriber: subscriber.id,
            owner: owner.id,
            list: list.id,
        })
        .await;
    }

    async fn on_user_list_unsubscribed(
        &self,
        subscriber: User,
        owner: User,
        list: UserList,
    ) {
        self.observe(Received::UserListUnsubscribed {
            subscriber: subscriber.id,
            owner: owner.id,
            list: list.id,
        })
        .await;
    }

    async fn on_user_profile_update(
        &self,
        user: User,
    ) {
        self.observe(Received::UserProfileUpdate { user: user.id }).await;
    }

    async fn on_exception(
        &self,
        error: &StreamError,
    ) {
        self.observe(Received::Exception(error.to_string())).await;
    }
}
