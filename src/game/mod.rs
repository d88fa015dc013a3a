//! Game content served to the engine

pub mod background;
pub mod menu;
pub mod room;

pub use background::Background;
pub use menu::{MenuInstruction, MenuScript};
pub use room::{Layer, ObjectMap, RoomLayout};

/// Everything the game answers with. Fixed for the life of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameContent {
    pub menu: MenuScript,
    pub room: RoomLayout,
    /// `None` answers `fill_objects` with an empty line
    pub objects: Option<ObjectMap>,
    pub background: Background,
}

impl GameContent {
    /// Response line for `fill_objects`
    pub fn objects_line(&self) -> String {
        self.objects.as_ref().map(ObjectMap::encode).unwrap_or_default()
    }
}
