//! Menu construction script
//!
//! The engine builds the menu by running the instructions the game prints in
//! response to `build_menu`, up to the closing `finish` line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Line that ends a menu script
pub const FINISH: &str = "finish";

/// One menu setup instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MenuInstruction {
    /// Load an image file as the next texture id
    LoadImageTexture { path: String },
    /// Declare a solid colour as the next texture id
    DeclColorTexture { rgba: [f32; 4] },
    /// Add a polygon drawn with `texture`, vertices as (x, y) pairs
    AddPolygonObject { texture: i32, vertices: Vec<[i32; 2]> },
    SetBackground { texture: i32 },
}

/// Float formatting that always keeps a decimal point (`1.0`, `0.5`)
fn decimal(value: f32) -> String {
    format!("{:?}", value)
}

impl fmt::Display for MenuInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuInstruction::LoadImageTexture { path } => write!(f, "load_image_texture '{}'", path),
            MenuInstruction::DeclColorTexture { rgba } => write!(
                f,
                "decl_color_texture {} {} {} {}",
                decimal(rgba[0]),
                decimal(rgba[1]),
                decimal(rgba[2]),
                decimal(rgba[3])
            ),
            MenuInstruction::AddPolygonObject { texture, vertices } => {
                write!(f, "add_polygon_object {}", texture)?;
                for [x, y] in vertices {
                    write!(f, " {} {}", x, y)?;
                }
                Ok(())
            }
            MenuInstruction::SetBackground { texture } => write!(f, "set_background {}", texture),
        }
    }
}

/// Ordered menu instructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuScript {
    pub instructions: Vec<MenuInstruction>,
}

impl MenuScript {
    pub fn new(instructions: Vec<MenuInstruction>) -> Self {
        Self { instructions }
    }

    /// Response lines for `build_menu`, always ending with [`FINISH`]
    pub fn encode_lines(&self) -> Vec<String> {
        self.instructions
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(FINISH.to_string()))
            .collect()
    }
}

impl Default for MenuScript {
    /// Background image, a translucent white overlay texture, one square
    /// drawn with it, and the image set as the background
    fn default() -> Self {
        Self::new(vec![
            MenuInstruction::LoadImageTexture {
                path: "background.png".to_string(),
            },
            MenuInstruction::DeclColorTexture {
                rgba: [1.0, 1.0, 1.0, 0.5],
            },
            MenuInstruction::AddPolygonObject {
                texture: 1,
                vertices: vec![[20, 20], [70, 20], [70, 70], [20, 70]],
            },
            MenuInstruction::SetBackground { texture: 0 },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_lines() {
        let lines = MenuScript::default().encode_lines();
        assert_eq!(
            lines,
            vec![
                "load_image_texture 'background.png'",
                "decl_color_texture 1.0 1.0 1.0 0.5",
                "add_polygon_object 1 20 20 70 20 70 70 20 70",
                "set_background 0",
                "finish",
            ]
        );
    }

    #[test]
    fn test_empty_script_still_finishes() {
        let lines = MenuScript::new(Vec::new()).encode_lines();
        assert_eq!(lines, vec![FINISH.to_string()]);
    }
}
