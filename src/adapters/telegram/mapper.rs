//! Map Grammers types to domain values.
//!
//! Classification itself lives in the domain; this only extracts the raw flags and ids.

use crate::domain::{PeerHandle, RawDialog};
use grammers_client::peer::Peer;
use grammers_client::tl;

/// `(megagroup, broadcast)` flags of a dialog peer.
///
/// * `Peer::Group` → megagroup when backed by a channel.
/// * `Peer::Channel` → broadcast.
/// * `Peer::User` → neither.
pub fn peer_flags(peer: &Peer) -> (bool, bool) {
    match peer {
        Peer::User(_) => (false, false),
        Peer::Group(g) => (g.is_megagroup(), false),
        Peer::Channel(_) => (false, true),
    }
}

/// Handle for a channel-space or basic-chat input peer. Users and self yield `None`.
pub fn handle_from_input_peer(input: &tl::enums::InputPeer) -> Option<PeerHandle> {
    match input {
        tl::enums::InputPeer::Channel(c) => Some(PeerHandle::Channel {
            channel_id: c.channel_id,
            access_hash: c.access_hash,
        }),
        tl::enums::InputPeer::Chat(c) => Some(PeerHandle::BasicChat { chat_id: c.chat_id }),
        _ => None,
    }
}

/// Build the raw dialog. Without a group/channel handle there is no id to leave by.
pub fn raw_dialog(
    name: &str,
    megagroup: bool,
    broadcast: bool,
    handle: Option<PeerHandle>,
) -> Option<RawDialog> {
    let handle = handle?;
    let basic_chat_id = match handle {
        PeerHandle::BasicChat { chat_id } => Some(chat_id),
        PeerHandle::Channel { .. } => None,
    };
    Some(RawDialog {
        id: handle.id(),
        name: name.to_string(),
        megagroup,
        basic_chat_id,
        broadcast,
    })
}

/// Raw request that leaves the entity behind `handle`.
pub enum LeaveRequest {
    Channel(tl::functions::channels::LeaveChannel),
    BasicChat(tl::functions::messages::DeleteChatUser),
}

pub fn leave_request(handle: &PeerHandle) -> LeaveRequest {
    match *handle {
        PeerHandle::Channel {
            channel_id,
            access_hash,
        } => LeaveRequest::Channel(tl::functions::channels::LeaveChannel {
            channel: tl::enums::InputChannel::Channel(tl::types::InputChannel {
                channel_id,
                access_hash,
            }),
        }),
        PeerHandle::BasicChat { chat_id } => {
            LeaveRequest::BasicChat(tl::functions::messages::DeleteChatUser {
                revoke_history: false,
                chat_id,
                user_id: tl::enums::InputUser::UserSelf,
            })
        }
    }
}
