//! Binary world encoding for rollback
//!
//! Layout (little-endian):
//! - magic `BPIT` (4 bytes)
//! - format version (u16)
//! - completed ticks (u64)
//! - body count (u32)
//! - per body: pos.x, pos.y, vel.x, vel.y, acc.x, acc.y as f64 bit patterns
//!
//! Float bits are copied verbatim, so NaN payloads and signed zeros survive.

use super::PersistError;
use crate::sim::{Body, World};

const MAGIC: &[u8; 4] = b"BPIT";
const VERSION: u16 = 1;
const HEADER_LEN: usize = 4 + 2 + 8 + 4;
const BODY_LEN: usize = std::mem::size_of::<Body>();

/// Encode the full world state
pub fn encode_rollback(world: &World) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + world.len() * BODY_LEN);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&world.ticks().to_le_bytes());
    out.extend_from_slice(&(world.len() as u32).to_le_bytes());

    for body in world.bodies() {
        let fields: [f64; 6] = bytemuck::cast(*body);
        for field in fields {
            out.extend_from_slice(&field.to_bits().to_le_bytes());
        }
    }
    out
}

/// Decode a world produced by [`encode_rollback`]
pub fn decode_rollback(bytes: &[u8]) -> Result<World, PersistError> {
    if bytes.len() < HEADER_LEN {
        return Err(PersistError::Truncated {
            expected: HEADER_LEN,
            actual: bytes.len(),
        });
    }
    if &bytes[0..4] != MAGIC {
        return Err(PersistError::BadMagic);
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(PersistError::UnsupportedVersion(u32::from(version)));
    }

    let ticks = u64::from_le_bytes(read_array(&bytes[6..14]));
    let count = u32::from_le_bytes(read_array(&bytes[14..18])) as usize;

    let body_bytes = &bytes[HEADER_LEN..];
    let expected = count.saturating_mul(BODY_LEN);
    if body_bytes.len() < expected {
        return Err(PersistError::Truncated {
            expected: HEADER_LEN.saturating_add(expected),
            actual: bytes.len(),
        });
    }
    if body_bytes.len() > expected {
        return Err(PersistError::TrailingBytes(body_bytes.len() - expected));
    }

    let bodies = body_bytes
        .chunks_exact(BODY_LEN)
        .map(|chunk| {
            let mut fields = [0.0f64; 6];
            for (field, raw) in fields.iter_mut().zip(chunk.chunks_exact(8)) {
                *field = f64::from_bits(u64::from_le_bytes(read_array(raw)));
            }
            bytemuck::cast::<[f64; 6], Body>(fields)
        })
        .collect();

    Ok(World::from_parts(bodies, ticks))
}

/// BLAKE3 digest of the rollback encoding
pub fn state_digest(world: &World) -> blake3::Hash {
    blake3::hash(&encode_rollback(world))
}

/// Copy a slice of known length into an array
fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}
