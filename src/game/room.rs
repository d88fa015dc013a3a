//! Room layouts and object maps
//!
//! A room is a grid of tiles described by parallel integer layers. On the wire
//! a room is a single line: width, height, then each layer flattened row by
//! row, all separated by single spaces.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{GameProtocolError, GameResult};

/// Texture id for a tile with nothing drawn on it
pub const EMPTY_TEXTURE: i32 = -1;

/// Largest number of tiles a room may have
pub const MAX_ROOM_TILES: usize = 1 << 20;

/// Row-major integer matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    width: usize,
    height: usize,
    cells: Vec<i32>,
}

impl Layer {
    pub fn filled(width: usize, height: usize, value: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Build a layer from rows, checking it is exactly `width × height`
    pub fn from_rows(rows: &[Vec<i32>], width: usize, height: usize) -> GameResult<Self> {
        if rows.len() != height {
            return Err(GameProtocolError::invalid_layout(format!(
                "expected {} rows, found {}",
                height,
                rows.len()
            )));
        }

        let mut cells = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GameProtocolError::invalid_layout(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            cells.extend_from_slice(row);
        }

        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<i32> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: i32) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
        }
    }

    pub fn rows(&self) -> Vec<Vec<i32>> {
        self.cells.chunks(self.width.max(1)).map(<[i32]>::to_vec).collect()
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }
}

/// Check a room size and return its tile count
pub fn check_dimensions(width: usize, height: usize) -> GameResult<usize> {
    if width == 0 || height == 0 {
        return Err(GameProtocolError::invalid_layout(format!(
            "room must be at least 1x1, got {}x{}",
            width, height
        )));
    }

    match width.checked_mul(height) {
        Some(tiles) if tiles <= MAX_ROOM_TILES => Ok(tiles),
        _ => Err(GameProtocolError::invalid_layout(format!(
            "room of {}x{} exceeds {} tiles",
            width, height, MAX_ROOM_TILES
        ))),
    }
}

fn check_layer(name: &str, layer: &Layer, width: usize, height: usize) -> GameResult<()> {
    if layer.width != width || layer.height != height {
        return Err(GameProtocolError::invalid_layout(format!(
            "{} layer is {}x{}, room is {}x{}",
            name, layer.width, layer.height, width, height
        )));
    }
    Ok(())
}

fn encode_layers(width: usize, height: usize, layers: &[&Layer]) -> String {
    let mut tokens = Vec::with_capacity(2 + layers.len() * width * height);
    tokens.push(width.to_string());
    tokens.push(height.to_string());
    for layer in layers {
        tokens.extend(layer.cells.iter().map(i32::to_string));
    }
    tokens.join(" ")
}

/// Parse `W H` followed by exactly `count` layers of `W·H` integers
fn parse_layers(line: &str, count: usize) -> GameResult<(usize, usize, Vec<Layer>)> {
    let mut tokens = line.split_whitespace();

    let mut dimension = |name: &'static str| -> GameResult<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| GameProtocolError::invalid_layout(format!("missing {}", name)))?;
        token
            .parse::<usize>()
            .map_err(|_| GameProtocolError::malformed("dimension", token))
    };
    let width = dimension("width")?;
    let height = dimension("height")?;
    let per_layer = check_dimensions(width, height)?;
    let expected = per_layer
        .checked_mul(count)
        .ok_or_else(|| GameProtocolError::invalid_layout("room too large"))?;

    let values = tokens
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| GameProtocolError::malformed("integer", token))
        })
        .collect::<GameResult<Vec<i32>>>()?;

    if values.len() != expected {
        return Err(GameProtocolError::invalid_layout(format!(
            "expected {} cell values for {} layers of {}x{}, found {}",
            expected,
            count,
            width,
            height,
            values.len()
        )));
    }

    let layers = values
        .chunks(per_layer)
        .map(|cells| Layer {
            width,
            height,
            cells: cells.to_vec(),
        })
        .collect();

    Ok((width, height, layers))
}

/// Texture, frame and flag layers of one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomLayout {
    pub width: usize,
    pub height: usize,
    pub textures: Layer,
    pub frames: Layer,
    pub flags: Layer,
}

impl RoomLayout {
    pub fn new(textures: Layer, frames: Layer, flags: Layer) -> GameResult<Self> {
        let (width, height) = (textures.width, textures.height);
        check_dimensions(width, height)?;
        check_layer("frames", &frames, width, height)?;
        check_layer("flags", &flags, width, height)?;

        Ok(Self {
            width,
            height,
            textures,
            frames,
            flags,
        })
    }

    /// An empty room with a single platform along the bottom row
    pub fn demo(width: usize, height: usize) -> GameResult<Self> {
        check_dimensions(width, height)?;

        let mut textures = Layer::filled(width, height, EMPTY_TEXTURE);
        let floor = height - 1;
        for x in 0..width {
            let tile = if x == 0 {
                0
            } else if x == width - 1 {
                2
            } else {
                1
            };
            textures.set(x, floor, tile);
        }

        Self::new(
            textures,
            Layer::filled(width, height, 0),
            Layer::filled(width, height, 0),
        )
    }

    /// The classic 10x10 demo room: a broken floor with one decoration
    pub fn classic() -> Self {
        let mut textures = Layer::filled(10, 10, EMPTY_TEXTURE);
        textures.set(0, 8, 34);
        for (x, tile) in [0, 1, 1, 1, 1, 1, 2, EMPTY_TEXTURE, 0, 1].into_iter().enumerate() {
            textures.set(x, 9, tile);
        }

        Self {
            width: 10,
            height: 10,
            textures,
            frames: Layer::filled(10, 10, 0),
            flags: Layer::filled(10, 10, 0),
        }
    }

    /// Encode as the single `build_room` response line
    pub fn encode(&self) -> String {
        encode_layers(
            self.width,
            self.height,
            &[&self.textures, &self.frames, &self.flags],
        )
    }
}

impl FromStr for RoomLayout {
    type Err = GameProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (_, _, layers) = parse_layers(line, 3)?;
        let [textures, frames, flags]: [Layer; 3] = layers
            .try_into()
            .map_err(|_| GameProtocolError::invalid_layout("expected 3 layers"))?;
        Self::new(textures, frames, flags)
    }
}

/// Action and flag layers placing objects in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMap {
    pub width: usize,
    pub height: usize,
    pub actions: Layer,
    pub flags: Layer,
}

impl ObjectMap {
    pub fn new(actions: Layer, flags: Layer) -> GameResult<Self> {
        let (width, height) = (actions.width, actions.height);
        check_dimensions(width, height)?;
        check_layer("flags", &flags, width, height)?;

        Ok(Self {
            width,
            height,
            actions,
            flags,
        })
    }

    /// An object map with no actions, sized to the room
    pub fn empty_for(room: &RoomLayout) -> Self {
        Self {
            width: room.width,
            height: room.height,
            actions: Layer::filled(room.width, room.height, 0),
            flags: Layer::filled(room.width, room.height, 0),
        }
    }

    pub fn encode(&self) -> String {
        encode_layers(self.width, self.height, &[&self.actions, &self.flags])
    }
}

impl FromStr for ObjectMap {
    type Err = GameProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (_, _, layers) = parse_layers(line, 2)?;
        let [actions, flags]: [Layer; 2] = layers
            .try_into()
            .map_err(|_| GameProtocolError::invalid_layout("expected 2 layers"))?;
        Self::new(actions, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_room_token_count() {
        let room = RoomLayout::demo(5, 5).unwrap();
        let encoded = room.encode();
        let tokens: Vec<&str> = encoded.split(' ').collect();

        assert_eq!(tokens[0], "5");
        assert_eq!(tokens[1], "5");
        assert_eq!(tokens.len(), 2 + 75);
        assert!(tokens.iter().all(|t| t.parse::<i32>().is_ok()));
    }

    #[test]
    fn test_demo_room_platform() {
        let room = RoomLayout::demo(5, 3).unwrap();
        assert_eq!(room.textures.rows()[2], vec![0, 1, 1, 1, 2]);
        assert_eq!(room.textures.rows()[0], vec![EMPTY_TEXTURE; 5]);
        assert_eq!(room.textures.rows().len(), 3);
    }

    #[test]
    fn test_single_column_room() {
        let room = RoomLayout::demo(1, 1).unwrap();
        assert_eq!(room.encode(), "1 1 0 0 0");
    }

    #[test]
    fn test_zero_sized_room_rejected() {
        assert!(RoomLayout::demo(0, 5).is_err());
        assert!(RoomLayout::demo(5, 0).is_err());
    }

    #[test]
    fn test_classic_room() {
        let room = RoomLayout::classic();
        assert_eq!(room.textures.get(0, 8), Some(34));
        assert_eq!(room.textures.get(7, 9), Some(EMPTY_TEXTURE));
        assert_eq!(room.textures.get(6, 9), Some(2));
        assert_eq!(room.textures.get(10, 0), None);

        let encoded = room.encode();
        assert!(encoded.starts_with("10 10 -1 -1"));
        assert_eq!(encoded.split(' ').count(), 2 + 300);
    }

    #[test]
    fn test_oversized_room_rejected() {
        assert!(matches!(
            RoomLayout::demo(1 << 40, 1 << 40),
            Err(GameProtocolError::InvalidLayout { .. })
        ));
        assert!(RoomLayout::demo(MAX_ROOM_TILES + 1, 1).is_err());
        assert!(RoomLayout::demo(MAX_ROOM_TILES, 1).is_ok());
        assert!(format!("{} {} 0", usize::MAX, usize::MAX).parse::<RoomLayout>().is_err());
    }

    #[test]
    fn test_parse_room_line() {
        let room: RoomLayout = RoomLayout::classic().encode().parse().unwrap();
        assert_eq!(room, RoomLayout::classic());
    }

    #[test]
    fn test_parse_tolerates_trailing_space() {
        // Older demos printed a space after every value
        let room: RoomLayout = "1 1 5 0 0 ".parse().unwrap();
        assert_eq!(room.textures.get(0, 0), Some(5));
    }

    #[test]
    fn test_parse_rejects_wrong_count() {
        assert!("2 2 0 0 0".parse::<RoomLayout>().is_err());
        assert!("2 x".parse::<RoomLayout>().is_err());
        assert!("".parse::<RoomLayout>().is_err());
    }

    #[test]
    fn test_layer_from_rows_checks_shape() {
        assert!(Layer::from_rows(&[vec![1, 2], vec![3, 4]], 2, 2).is_ok());
        assert!(Layer::from_rows(&[vec![1, 2], vec![3]], 2, 2).is_err());
        assert!(Layer::from_rows(&[vec![1, 2]], 2, 2).is_err());
    }

    #[test]
    fn test_mismatched_layers_rejected() {
        let result = RoomLayout::new(
            Layer::filled(3, 3, -1),
            Layer::filled(3, 2, 0),
            Layer::filled(3, 3, 0),
        );
        assert!(matches!(result, Err(GameProtocolError::InvalidLayout { .. })));
    }

    #[test]
    fn test_object_map_encoding() {
        let room = RoomLayout::demo(2, 2).unwrap();
        let objects = ObjectMap::empty_for(&room);
        assert_eq!(objects.encode(), "2 2 0 0 0 0 0 0 0 0");
        assert_eq!(objects.encode().parse::<ObjectMap>().unwrap(), objects);
    }
}
