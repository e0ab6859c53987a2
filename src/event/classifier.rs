use serde_json::Value;

use super::EventKind;
use super::RawEvent;

/// Determines which event kind a raw object represents.
///
/// Pure and total: every syntactically valid JSON object yields exactly one
/// [`EventKind`], with [`EventKind::Unrecognized`] as the fallback. Signature
/// probes run in a fixed priority order so that objects matching more than
/// one signature resolve deterministically:
///
/// 1. `delete` (deletion notices are structurally minimal and must win over
///    the generic status signature)
/// 2. `limit`
/// 3. `warning`
/// 4. `scrub_geo`
/// 5. `friends`
/// 6. `direct_message`
/// 7. `event` (routed through the upstream event-name string)
/// 8. `text` + `user` (a status)
///
/// Unknown top-level keys are ignored rather than failing the parse.
pub fn classify(raw: &RawEvent) -> EventKind {
    if let Some(delete) = raw.get("delete") {
        if delete.get("status").is_some() {
            return EventKind::StatusDeletion;
        }
        if delete.get("direct_message").is_some() {
            return EventKind::DirectMessageDeletion;
        }
        return EventKind::Unrecognized;
    }
    if raw.has("limit") {
        return EventKind::TrackLimitation;
    }
    if raw.has("warning") {
        return EventKind::StallWarning;
    }
    if raw.has("scrub_geo") {
        return EventKind::ScrubGeo;
    }
    if raw.has("friends") {
        return EventKind::FriendsList;
    }
    if raw.has("direct_message") {
        return EventKind::DirectMessage;
    }
    if let Some(Value::String(name)) = raw.get("event") {
        return classify_event_name(name);
    }
    if raw.has("text") && raw.has("user") {
        return EventKind::Status;
    }
    EventKind::Unrecognized
}

/// Maps the `event` field's name string to a kind. Unknown names are
/// [`EventKind::Unrecognized`] so that new interaction kinds pass through
/// silently.
fn classify_event_name(name: &str) -> EventKind {
    match name {
        "favorite" => EventKind::Favorite,
        "unfavorite" => EventKind::Unfavorite,
        "follow" => EventKind::Follow,
        "unfollow" => EventKind::Unfollow,
        "block" => EventKind::Block,
        "unblock" => EventKind::Unblock,
        "user_update" => EventKind::UserProfileUpdate,
        "list_created" => EventKind::UserListCreated,
        "list_updated" => EventKind::UserListUpdated,
        "list_destroyed" => EventKind::UserListDestroyed,
        "list_member_added" => EventKind::UserListMemberAdded,
        "list_member_removed" => EventKind::UserListMemberRemoved,
        "list_user_subscribed" => EventKind::UserListSubscribed,
        "list_user_unsubscribed" => EventKind::UserListUnsubscribed,
        _ => EventKind::Unrecognized,
    }
}
