//! Media key injection for track navigation.
//!
//! The control server exposes no skip/previous endpoint, so those
//! operations are implemented the way the desktop clients expect: by
//! injecting a media key press at the OS level. `enigo` selects the
//! platform-specific key identifier; no network call is involved.

use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use crate::error::Result;

/// Media keys the player reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MediaKey {
    NextTrack,
    PreviousTrack,
}

/// Injects a single media key press.
///
/// # Errors
///
/// Returns error if the input backend is unavailable (for example, no
/// display server) or the key press could not be injected.
pub fn send(key: MediaKey) -> Result<()> {
    let key = match key {
        MediaKey::NextTrack => Key::MediaNextTrack,
        MediaKey::PreviousTrack => Key::MediaPrevTrack,
    };
    trace!("injecting media key: {key:?}");

    let mut enigo = Enigo::new(&Settings::default())?;
    enigo.key(key, Direction::Click)?;

    Ok(())
}
