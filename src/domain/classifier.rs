//! Dialog classifier. Maps a raw dialog into group / supergroup / channel.

use crate::domain::{Entity, EntityKind, RawDialog};

/// Classify a dialog. First match wins: megagroup, basic chat, broadcast.
///
/// Returns `None` for anything else (one-to-one conversations, bots, ...).
pub fn classify(dialog: &RawDialog) -> Option<EntityKind> {
    if dialog.megagroup {
        Some(EntityKind::Supergroup)
    } else if dialog.basic_chat_id.is_some() {
        Some(EntityKind::Group)
    } else if dialog.broadcast {
        Some(EntityKind::Channel)
    } else {
        None
    }
}

/// Classify a dialog list, silently dropping what is not a group or channel.
/// Input order is preserved.
pub fn classify_all(dialogs: impl IntoIterator<Item = RawDialog>) -> Vec<Entity> {
    dialogs
        .into_iter()
        .filter_map(|d| {
            let kind = classify(&d)?;
            Some(Entity {
                id: d.id,
                name: d.name,
                kind,
            })
        })
        .collect()
}
