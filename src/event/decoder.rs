use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use super::EventKind;
use super::RawEvent;
use super::StreamEvent;
use crate::model::DirectMessage;
use crate::model::StallWarning;
use crate::model::Status;
use crate::model::StatusDeletionNotice;
use crate::model::User;
use crate::model::UserList;
use crate::DecodeError;

/// Extracts the typed payload a classified event's callback requires.
///
/// Returns `Ok(None)` for [`EventKind::Unrecognized`]: those objects are
/// dropped without dispatch, which is the forward-compatibility contract for
/// unknown upstream event kinds. A recognized kind with a missing or
/// malformed required field fails with [`DecodeError`]; the reader loop
/// reports that through the listener's catch-all instead of unwinding.
pub fn decode(
    kind: EventKind,
    raw: &RawEvent,
) -> std::result::Result<Option<StreamEvent>, DecodeError> {
    let event = match kind {
        EventKind::Unrecognized => {
            trace!("dropping unrecognized event: {}", raw.raw_json());
            return Ok(None);
        }
        EventKind::Status => StreamEvent::Status(entity(&raw.to_value(), "status", ".")?),
        EventKind::StatusDeletion => {
            let delete = field(raw, "status_deletion", "delete")?;
            let status = nested(delete, "status_deletion", "status")?;
            let notice: StatusDeletionNotice = entity(status, "status_deletion", "status")?;
            StreamEvent::StatusDeletion(notice)
        }
        EventKind::DirectMessageDeletion => {
            let delete = field(raw, "direct_message_deletion", "delete")?;
            let dm = nested(delete, "direct_message_deletion", "direct_message")?;
            StreamEvent::DirectMessageDeletion {
                message_id: id(dm, "direct_message_deletion", "id")?,
                user_id: id(dm, "direct_message_deletion", "user_id")?,
            }
        }
        EventKind::DirectMessage => {
            let dm = field(raw, "direct_message", "direct_message")?;
            StreamEvent::DirectMessage(entity::<DirectMessage>(dm, "direct_message", "direct_message")?)
        }
        EventKind::TrackLimitation => {
            let limit = field(raw, "track_limitation", "limit")?;
            let track = nested(limit, "track_limitation", "track")?;
            let limited_statuses = track
                .as_u64()
                .ok_or(DecodeError::InvalidId {
                    kind: "track_limitation",
                    field: "track",
                })?;
            StreamEvent::TrackLimitation { limited_statuses }
        }
        EventKind::ScrubGeo => {
            let scrub = field(raw, "scrub_geo", "scrub_geo")?;
            StreamEvent::ScrubGeo {
                user_id: id(scrub, "scrub_geo", "user_id")?,
                up_to_status_id: id(scrub, "scrub_geo", "up_to_status_id")?,
            }
        }
        EventKind::StallWarning => {
            let warning = field(raw, "stall_warning", "warning")?;
            StreamEvent::StallWarning(entity::<StallWarning>(warning, "stall_warning", "warning")?)
        }
        EventKind::FriendsList => {
            let friends = field(raw, "friends_list", "friends")?;
            StreamEvent::FriendsList(entity::<Vec<i64>>(friends, "friends_list", "friends")?)
        }
        EventKind::Favorite => {
            let (source, target) = interaction(raw, "favorite")?;
            let status = target_object::<Status>(raw, "favorite")?;
            StreamEvent::Favorite { source, target, status }
        }
        EventKind::Unfavorite => {
            let (source, target) = interaction(raw, "unfavorite")?;
            let status = target_object::<Status>(raw, "unfavorite")?;
            StreamEvent::Unfavorite { source, target, status }
        }
        EventKind::Follow => {
            let (source, target) = interaction(raw, "follow")?;
            StreamEvent::Follow { source, target }
        }
        EventKind::Unfollow => {
            let (source, target) = interaction(raw, "unfollow")?;
            StreamEvent::Unfollow { source, target }
        }
        EventKind::Block => {
            let (source, target) = interaction(raw, "block")?;
            StreamEvent::Block { source, target }
        }
        EventKind::Unblock => {
            let (source, target) = interaction(raw, "unblock")?;
            StreamEvent::Unblock { source, target }
        }
        EventKind::UserListCreated => {
            let (owner, _) = interaction(raw, "user_list_created")?;
            let list = target_object::<UserList>(raw, "user_list_created")?;
            StreamEvent::UserListCreated { owner, list }
        }
        EventKind::UserListUpdated => {
            let (owner, _) = interaction(raw, "user_list_updated")?;
            let list = target_object::<UserList>(raw, "user_list_updated")?;
            StreamEvent::UserListUpdated { owner, list }
        }
        EventKind::UserListDestroyed => {
            let (owner, _) = interaction(raw, "user_list_destroyed")?;
            let list = target_object::<UserList>(raw, "user_list_destroyed")?;
            StreamEvent::UserListDestroyed { owner, list }
        }
        EventKind::UserListMemberAdded => {
            // The acting side (`source`) owns the list; the affected member
            // arrives as `target`.
            let (owner, member) = interaction(raw, "user_list_member_added")?;
            let list = target_object::<UserList>(raw, "user_list_member_added")?;
            StreamEvent::UserListMemberAdded { member, owner, list }
        }
        EventKind::UserListMemberRemoved => {
            let (owner, member) = interaction(raw, "user_list_member_removed")?;
            let list = target_object::<UserList>(raw, "user_list_member_removed")?;
            StreamEvent::UserListMemberRemoved { member, owner, list }
        }
        EventKind::UserListSubscribed => {
            // Subscriptions act on someone else's list: the subscriber is the
            // acting side, the list owner arrives as `target`.
            let (subscriber, owner) = interaction(raw, "user_list_subscribed")?;
            let list = target_object::<UserList>(raw, "user_list_subscribed")?;
            StreamEvent::UserListSubscribed { subscriber, owner, list }
        }
        EventKind::UserListUnsubscribed => {
            let (subscriber, owner) = interaction(raw, "user_list_unsubscribed")?;
            let list = target_object::<UserList>(raw, "user_list_unsubscribed")?;
            StreamEvent::UserListUnsubscribed { subscriber, owner, list }
        }
        EventKind::UserProfileUpdate => {
            let source = field(raw, "user_profile_update", "source")?;
            StreamEvent::UserProfileUpdate(entity::<User>(source, "user_profile_update", "source")?)
        }
    };
    Ok(Some(event))
}

fn field<'a>(
    raw: &'a RawEvent,
    kind: &'static str,
    key: &'static str,
) -> std::result::Result<&'a Value, DecodeError> {
    raw.get(key).ok_or(DecodeError::MissingField { kind, field: key })
}

fn nested<'a>(
    value: &'a Value,
    kind: &'static str,
    key: &'static str,
) -> std::result::Result<&'a Value, DecodeError> {
    value.get(key).ok_or(DecodeError::MissingField { kind, field: key })
}

fn id(
    value: &Value,
    kind: &'static str,
    key: &'static str,
) -> std::result::Result<i64, DecodeError> {
    let field = nested(value, kind, key)?;
    field.as_i64().ok_or(DecodeError::InvalidId { kind, field: key })
}

fn entity<T: DeserializeOwned>(
    value: &Value,
    kind: &'static str,
    key: &'static str,
) -> std::result::Result<T, DecodeError> {
    serde_json::from_value(value.clone()).map_err(|source| DecodeError::InvalidEntity {
        kind,
        field: key,
        source,
    })
}

/// Decodes the `source`/`target` user pair every `event`-keyed object
/// carries.
fn interaction(
    raw: &RawEvent,
    kind: &'static str,
) -> std::result::Result<(User, User), DecodeError> {
    let source = entity::<User>(field(raw, kind, "source")?, kind, "source")?;
    let target = entity::<User>(field(raw, kind, "target")?, kind, "target")?;
    Ok((source, target))
}

fn target_object<T: DeserializeOwned>(
    raw: &RawEvent,
    kind: &'static str,
) -> std::result::Result<T, DecodeError> {
    entity(field(raw, kind, "target_object")?, kind, "target_object")
}
