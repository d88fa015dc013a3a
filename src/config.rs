//! Configuration management for the Herald game process

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GameProtocolError, GameResult};
use crate::game::room::check_dimensions;
use crate::game::{Background, GameContent, Layer, MenuInstruction, MenuScript, ObjectMap, RoomLayout};

/// Main configuration for the game process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    /// Command loop policies
    pub session: SessionConfig,
    /// Room served by `build_room` and `fill_objects`
    pub room: RoomConfig,
    /// Menu served by `build_menu`
    pub menu: MenuConfig,
    /// Background served by `set_background`
    pub background: Background,
}

/// What the loop does after a line that is not a supported command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCommandPolicy {
    #[default]
    Stop,
    Continue,
}

/// What the loop does when a command's arguments fail to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedInputPolicy {
    #[default]
    Stop,
    Skip,
}

/// Command loop configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub unknown_command: UnknownCommandPolicy,
    pub malformed_input: MalformedInputPolicy,
}

/// Room geometry and layers. Missing layers fall back to the demo room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textures: Option<Vec<Vec<i32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<Vec<i32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<Vec<i32>>>,
    /// Answer `fill_objects` with an object map instead of an empty line
    pub fill_objects: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Vec<i32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_flags: Option<Vec<Vec<i32>>>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            textures: None,
            frames: None,
            flags: None,
            fill_objects: true,
            actions: None,
            object_flags: None,
        }
    }
}

impl RoomConfig {
    /// Build the room layout from the configured or default layers
    pub fn layout(&self) -> GameResult<RoomLayout> {
        let demo = RoomLayout::demo(self.width, self.height)?;
        let layer = |rows: &Option<Vec<Vec<i32>>>, fallback: Layer| match rows {
            Some(rows) => Layer::from_rows(rows, self.width, self.height),
            None => Ok(fallback),
        };

        RoomLayout::new(
            layer(&self.textures, demo.textures.clone())?,
            layer(&self.frames, demo.frames.clone())?,
            layer(&self.flags, demo.flags.clone())?,
        )
    }

    pub fn object_map(&self, room: &RoomLayout) -> GameResult<Option<ObjectMap>> {
        if !self.fill_objects {
            return Ok(None);
        }

        let empty = ObjectMap::empty_for(room);
        let actions = match &self.actions {
            Some(rows) => Layer::from_rows(rows, room.width, room.height)?,
            None => empty.actions,
        };
        let flags = match &self.object_flags {
            Some(rows) => Layer::from_rows(rows, room.width, room.height)?,
            None => empty.flags,
        };

        ObjectMap::new(actions, flags).map(Some)
    }
}

/// Menu screen contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Image loaded as texture 0 and used as the menu background
    pub background_image: String,
    /// Colour of texture 1, components in `[0, 1]`
    pub overlay_color: [f32; 4],
    /// Polygon drawn with texture 1
    pub polygon: Vec<[i32; 2]>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            background_image: "background.png".to_string(),
            overlay_color: [1.0, 1.0, 1.0, 0.5],
            polygon: vec![[20, 20], [70, 20], [70, 70], [20, 70]],
        }
    }
}

impl MenuConfig {
    pub fn script(&self) -> MenuScript {
        MenuScript::new(vec![
            MenuInstruction::LoadImageTexture {
                path: self.background_image.clone(),
            },
            MenuInstruction::DeclColorTexture {
                rgba: self.overlay_color,
            },
            MenuInstruction::AddPolygonObject {
                texture: 1,
                vertices: self.polygon.clone(),
            },
            MenuInstruction::SetBackground { texture: 0 },
        ])
    }
}

fn config_error(message: impl Into<String>, field: &str) -> GameProtocolError {
    GameProtocolError::Configuration {
        message: message.into(),
        field: field.to_string(),
    }
}

impl HeraldConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e), "config_file"))?;

        let config: HeraldConfig = toml::from_str(&content)
            .map_err(|e| config_error(format!("Failed to parse config file: {}", e), "config_format"))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let content = self.to_toml()?;

        fs::write(path, content)
            .map_err(|e| config_error(format!("Failed to write config file: {}", e), "config_write"))?;

        Ok(())
    }

    pub fn to_toml(&self) -> GameResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> GameResult<()> {
        check_dimensions(self.room.width, self.room.height)
            .map_err(|e| config_error(e.to_string(), "room.size"))?;

        let room = self
            .room
            .layout()
            .map_err(|e| config_error(e.to_string(), "room.layers"))?;
        self.room
            .object_map(&room)
            .map_err(|e| config_error(e.to_string(), "room.objects"))?;

        if self.menu.background_image.is_empty() {
            return Err(config_error("Menu background image must be set", "menu.background_image"));
        }

        if self.menu.background_image.contains('\'') || self.menu.background_image.contains('\n') {
            return Err(config_error(
                "Menu background image path cannot contain quotes or newlines",
                "menu.background_image",
            ));
        }

        if self.menu.overlay_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(config_error("Overlay colour components must be within [0, 1]", "menu.overlay_color"));
        }

        if self.menu.polygon.len() < 3 {
            return Err(config_error("Menu polygon needs at least 3 vertices", "menu.polygon"));
        }

        if self.background.animation < -1 || self.background.frame_offset < -1 {
            return Err(config_error("Background values must be -1 or greater", "background"));
        }

        Ok(())
    }

    /// Build the content served for the lifetime of a session
    pub fn content(&self) -> GameResult<GameContent> {
        let room = self.room.layout()?;
        let objects = self.room.object_map(&room)?;

        Ok(GameContent {
            menu: self.menu.script(),
            room,
            objects,
            background: self.background,
        })
    }

    /// The classic 10x10 demo room, with an animated background and a
    /// loop that keeps going past unknown commands
    pub fn classic() -> Self {
        let room = RoomLayout::classic();
        Self {
            session: SessionConfig {
                unknown_command: UnknownCommandPolicy::Continue,
                malformed_input: MalformedInputPolicy::Stop,
            },
            room: RoomConfig {
                width: room.width,
                height: room.height,
                textures: Some(room.textures.rows()),
                ..RoomConfig::default()
            },
            menu: MenuConfig::default(),
            background: Background {
                animation: 20,
                frame_offset: 0,
            },
        }
    }
}
