//! Visited-set compression codec.
//!
//! A run can discover hundreds of cells, but the persistence collaborator
//! only stores one short string. Each coordinate is offset into a
//! non-negative window, packed into a single integer, rendered base-36,
//! and comma-joined. The encoding is canonical: input is consumed in
//! sorted (x, then y) order, so two equal sets always produce the same
//! bytes regardless of discovery order.
//!
//! # Supported range
//!
//! [`COORD_OFFSET`] and [`PACK_STRIDE`] bound the window to
//! `[-100, 99]` per axis. A dungeon wider than ~200 cells per axis needs
//! a wider offset and stride; both are named constants here, never inline
//! literals, precisely so that widening is a one-line change with an
//! obvious compatibility impact on previously persisted strings.

use std::collections::BTreeSet;

use crate::state::Position;

/// Offset added to each axis so packed values are non-negative.
pub const COORD_OFFSET: i32 = 100;

/// Multiplier combining the two offset axes into one integer. The
/// offset y value must stay below this stride for the packing to be
/// reversible.
pub const PACK_STRIDE: u32 = 1000;

/// Delimiter between packed cells. Not producible by base-36 digits.
const CELL_DELIMITER: char = ',';

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Coordinate outside the window the packing scheme supports.
    #[error("coordinate {position} outside supported window [{}, {})", -COORD_OFFSET, COORD_OFFSET)]
    CoordinateOutOfRange { position: Position },

    /// A token in a persisted string failed base-36 parsing.
    #[error("malformed history token {token:?}")]
    MalformedToken { token: String },

    /// A token parsed but unpacked to values outside the window.
    #[error("history token {token:?} unpacks outside the supported window")]
    PackedOutOfRange { token: String },
}

fn in_window(value: i32) -> bool {
    (-COORD_OFFSET..COORD_OFFSET).contains(&value)
}

/// True when both axes fall inside the window [`encode`] supports.
///
/// Session state checks this at insertion time so a visited set never
/// becomes unencodable after the fact.
pub fn supports(position: Position) -> bool {
    in_window(position.x) && in_window(position.y)
}

fn pack(position: Position) -> Result<u32, CodecError> {
    if !in_window(position.x) || !in_window(position.y) {
        return Err(CodecError::CoordinateOutOfRange { position });
    }
    let x = (position.x + COORD_OFFSET) as u32;
    let y = (position.y + COORD_OFFSET) as u32;
    Ok(x * PACK_STRIDE + y)
}

fn unpack(packed: u32, token: &str) -> Result<Position, CodecError> {
    let x = (packed / PACK_STRIDE) as i32 - COORD_OFFSET;
    let y = (packed % PACK_STRIDE) as i32 - COORD_OFFSET;
    if !in_window(x) || !in_window(y) {
        return Err(CodecError::PackedOutOfRange {
            token: token.to_owned(),
        });
    }
    Ok(Position::new(x, y))
}

fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let digit = value % 36;
        // from_digit cannot fail for a remainder below the radix
        digits.push(char::from_digit(digit, 36).unwrap_or('0'));
        value /= 36;
    }
    digits.iter().rev().collect()
}

/// Encodes a visited set into its canonical compressed form.
///
/// The empty set encodes to the empty string. Iteration over a
/// `BTreeSet<Position>` is already in canonical (x, then y) order, so no
/// sorting pass is needed.
///
/// # Errors
///
/// [`CodecError::CoordinateOutOfRange`] when any coordinate falls outside
/// the supported window; rejecting here keeps a silent packing collision
/// from corrupting persisted state.
pub fn encode(coords: &BTreeSet<Position>) -> Result<String, CodecError> {
    let mut tokens = Vec::with_capacity(coords.len());
    for &position in coords {
        tokens.push(to_base36(pack(position)?));
    }
    Ok(tokens.join(&CELL_DELIMITER.to_string()))
}

/// Decodes a compressed history back into the visited set.
///
/// The empty string decodes to the empty set.
///
/// # Errors
///
/// [`CodecError::MalformedToken`] or [`CodecError::PackedOutOfRange`] on
/// corrupt input. Callers holding session state treat either as a
/// recoverable corrupt-state condition and fall back to an empty set.
pub fn decode(s: &str) -> Result<BTreeSet<Position>, CodecError> {
    let mut coords = BTreeSet::new();
    if s.is_empty() {
        return Ok(coords);
    }
    for token in s.split(CELL_DELIMITER) {
        let packed = u32::from_str_radix(token, 36).map_err(|_| CodecError::MalformedToken {
            token: token.to_owned(),
        })?;
        coords.insert(unpack(packed, token)?);
    }
    Ok(coords)
}
