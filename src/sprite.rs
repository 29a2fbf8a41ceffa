use base64::{engine::general_purpose, Engine as _};
use image::GenericImageView;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const KITTY_CHUNK: usize = 4096;

/// Kitty graphics `f=` value for PNG payloads.
pub const FORMAT_PNG: u32 = 100;
/// Kitty graphics `f=` value for raw RGBA payloads.
pub const FORMAT_RGBA: u32 = 32;

/// A decoded image, base64 encoded and ready to be sent to the terminal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    pub payload: String,
    pub width: u32,
    pub height: u32,
    pub format: u32,
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, ApiError> {
    let image = image::load_from_memory(bytes).map_err(|err| ApiError::Sprite(err.to_string()))?;
    let (width, height) = image.dimensions();
    if bytes.starts_with(PNG_MAGIC) {
        return Ok(SpriteData {
            payload: general_purpose::STANDARD.encode(bytes),
            width,
            height,
            format: FORMAT_PNG,
        });
    }

    // Anything that is not PNG goes over the wire as raw RGBA.
    let rgba = image.to_rgba8();
    Ok(SpriteData {
        payload: general_purpose::STANDARD.encode(rgba.as_raw()),
        width,
        height,
        format: FORMAT_RGBA,
    })
}

pub fn kitty_sequence(sprite: &SpriteData, cols: u16, rows: u16, id: u32) -> String {
    let mut sequences = String::new();
    let payload = sprite.payload.as_bytes();
    let total_chunks = payload.len().div_ceil(KITTY_CHUNK);

    for (index, chunk) in payload.chunks(KITTY_CHUNK).enumerate() {
        let more = if index + 1 < total_chunks { 1 } else { 0 };
        // base64 is plain ascii
        let chunk_str = String::from_utf8_lossy(chunk);
        if index == 0 {
            let mut params = format!(
                "f={},s={},v={},a=T,t=d,i={id}",
                sprite.format, sprite.width, sprite.height
            );
            if cols > 0 {
                params.push_str(&format!(",c={cols}"));
            }
            if rows > 0 {
                params.push_str(&format!(",r={rows}"));
            }
            params.push_str(&format!(",m={more}"));
            sequences.push_str(&format!("\x1b_G{params};{chunk_str}\x1b\\"));
        } else {
            sequences.push_str(&format!("\x1b_Gm={more};{chunk_str}\x1b\\"));
        }
    }
    sequences
}
