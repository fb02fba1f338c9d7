//! Duration-compressed input history with charge counters
//!
//! The history is a fixed ring of run-length encoded entries: a new entry is
//! appended only when the raw bitmask changes, otherwise the newest entry's
//! duration counts up. Transition queries (`duration == 1`) therefore work
//! the same no matter how many real ticks a state persisted.
//!
//! Charge counters are recomputed on every tick from the newest entry alone,
//! so [`InputHistory::tick`] is a pure function of (prior state, sample). A
//! rollback driver can replay a frame after a misprediction and get a
//! bit-identical buffer back.

use rushdown_core::{
    previous_index, wrap_index, InputSide, INPUT_ANY_BUTTON, INPUT_DOWN, INPUT_LEFT, INPUT_RIGHT,
    INPUT_UP,
};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::{Error, Result};

/// Number of entries in the history ring
pub const HISTORY_SIZE: usize = 64;

/// One run-length compressed input state
///
/// Serialized as five little-endian fields (u16, u16, i16, i16, u16),
/// 10 bytes per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Raw input bitmask for this state
    pub raw_input: u16,
    /// Consecutive ticks this exact bitmask has persisted (>= 1 once live)
    pub duration: u16,
    /// Held-direction counter, horizontal: negative while left, positive while right
    pub h_charge: i16,
    /// Held-direction counter, vertical: positive while up, negative while down
    pub v_charge: i16,
    /// Consecutive ticks any face button has been held
    pub b_charge: u16,
}

impl HistoryEntry {
    /// Whether this entry holds no input at all
    pub fn is_null(&self) -> bool {
        self.raw_input == 0
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.raw_input.to_le_bytes())?;
        writer.write_all(&self.duration.to_le_bytes())?;
        writer.write_all(&self.h_charge.to_le_bytes())?;
        writer.write_all(&self.v_charge.to_le_bytes())?;
        writer.write_all(&self.b_charge.to_le_bytes())?;
        Ok(())
    }

    fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Self {
            raw_input: read_u16(reader)?,
            duration: read_u16(reader)?,
            h_charge: read_i16(reader)?,
            v_charge: read_i16(reader)?,
            b_charge: read_u16(reader)?,
        })
    }
}

fn read_u16<R: Read>(reader: &mut R) -> std::io::Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_i16<R: Read>(reader: &mut R) -> std::io::Result<i16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(i16::from_le_bytes(buf))
}

fn read_i32<R: Read>(reader: &mut R) -> std::io::Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Per-entity ring buffer of duration-compressed input samples
///
/// Mutated exactly once per simulation tick via [`InputHistory::tick`],
/// queried any number of times afterwards. Owned by value so a rollback
/// driver can hold independent snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputHistory {
    entries: Vec<HistoryEntry>,
    current: usize,
    side: InputSide,
}

impl InputHistory {
    /// Create an empty history for an entity facing the given side
    pub fn new(side: InputSide) -> Self {
        Self {
            entries: vec![HistoryEntry::default(); HISTORY_SIZE],
            current: 0,
            side,
        }
    }

    /// The facing side used to mirror left/right queries
    pub fn side(&self) -> InputSide {
        self.side
    }

    /// Update the facing side (called on side switch, between ticks)
    pub fn set_side(&mut self, side: InputSide) {
        self.side = side;
    }

    /// Ring index of the newest entry
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The newest entry
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.current]
    }

    /// Entry at a ring index (wrapping)
    pub fn entry(&self, index: usize) -> &HistoryEntry {
        &self.entries[wrap_index(index as isize, HISTORY_SIZE)]
    }

    /// Record one simulation tick's raw input sample
    ///
    /// A repeated sample increments the newest entry's duration; a changed
    /// sample advances the cursor and starts a new entry at duration 1,
    /// carrying the previous entry's charge counters forward. Charges are
    /// then recomputed for this tick.
    pub fn tick(&mut self, raw_sample: u16) {
        if self.entries[self.current].raw_input != raw_sample {
            let previous = self.entries[self.current];
            self.current = wrap_index(self.current as isize + 1, HISTORY_SIZE);
            self.entries[self.current] = HistoryEntry {
                raw_input: raw_sample,
                duration: 0,
                h_charge: previous.h_charge,
                v_charge: previous.v_charge,
                b_charge: previous.b_charge,
            };
        }

        let entry = &mut self.entries[self.current];
        entry.duration = entry.duration.saturating_add(1);
        self.update_charges();
    }

    /// Recompute the newest entry's charge counters for the current tick
    ///
    /// A direction flip resets the counter to zero before counting, so the
    /// first tick after a flip has magnitude 1.
    fn update_charges(&mut self) {
        let entry = &mut self.entries[self.current];
        let raw = entry.raw_input;

        if raw & INPUT_LEFT != 0 {
            if entry.h_charge > 0 {
                entry.h_charge = 0;
            }
            entry.h_charge = entry.h_charge.saturating_sub(1);
        } else if raw & INPUT_RIGHT != 0 {
            if entry.h_charge < 0 {
                entry.h_charge = 0;
            }
            entry.h_charge = entry.h_charge.saturating_add(1);
        } else if entry.h_charge != 0 {
            entry.h_charge = 0;
        }

        if raw & INPUT_UP != 0 {
            if entry.v_charge < 0 {
                entry.v_charge = 0;
            }
            entry.v_charge = entry.v_charge.saturating_add(1);
        } else if raw & INPUT_DOWN != 0 {
            if entry.v_charge > 0 {
                entry.v_charge = 0;
            }
            entry.v_charge = entry.v_charge.saturating_sub(1);
        } else if entry.v_charge != 0 {
            entry.v_charge = 0;
        }

        if raw & INPUT_ANY_BUTTON != 0 {
            entry.b_charge = entry.b_charge.saturating_add(1);
        } else {
            entry.b_charge = 0;
        }
    }

    /// Whether the given bits are held at a ring index
    pub fn is_held(&self, index: usize, mask: u16) -> bool {
        self.entry(index).raw_input & mask != 0
    }

    /// Whether the given bits transitioned to pressed exactly at this entry's tick
    pub fn is_pressed(&self, index: usize, mask: u16) -> bool {
        let previous = previous_index(wrap_index(index as isize, HISTORY_SIZE), HISTORY_SIZE);
        self.entry(index).raw_input & mask != 0
            && self.entries[previous].raw_input & mask == 0
            && self.entry(index).duration == 1
    }

    /// Whether the given bits transitioned to released exactly at this entry's tick
    pub fn is_released(&self, index: usize, mask: u16) -> bool {
        let previous = previous_index(wrap_index(index as isize, HISTORY_SIZE), HISTORY_SIZE);
        self.entry(index).raw_input & mask == 0
            && self.entries[previous].raw_input & mask != 0
            && self.entry(index).duration == 1
    }

    /// Whether the given bits are released now but were held in the previous entry
    ///
    /// Unlike [`InputHistory::is_released`] there is no duration condition:
    /// any prior-entry release qualifies, which is the lenient form used for
    /// negative-edge inputs.
    pub fn was_held(&self, index: usize, mask: u16) -> bool {
        let previous = previous_index(wrap_index(index as isize, HISTORY_SIZE), HISTORY_SIZE);
        self.entry(index).raw_input & mask == 0 && self.entries[previous].raw_input & mask != 0
    }

    /// Whether the raw input at this entry differs from the previous entry
    pub fn inputs_differ(&self, index: usize) -> bool {
        let previous = previous_index(wrap_index(index as isize, HISTORY_SIZE), HISTORY_SIZE);
        self.entry(index).raw_input != self.entries[previous].raw_input
    }

    /// Whether any face button bit changed at this entry's tick
    pub fn face_buttons_changed(&self, index: usize) -> bool {
        let previous = previous_index(wrap_index(index as isize, HISTORY_SIZE), HISTORY_SIZE);
        let current = self.entry(index).raw_input & INPUT_ANY_BUTTON;
        let prior = self.entries[previous].raw_input & INPUT_ANY_BUTTON;
        current != prior && self.entry(index).duration <= 1
    }

    /// Whether the newest entry holds no input
    pub fn is_neutral(&self) -> bool {
        self.current().is_null()
    }

    /// Consecutive ticks any face button has been held as of the newest entry
    pub fn buffered_button_ticks(&self) -> u16 {
        self.current().b_charge
    }

    /// Write the rollback snapshot layout
    ///
    /// 64 fixed 10-byte entries, then cursor (i32) and side (i32), all
    /// little-endian.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for entry in &self.entries {
            entry.write_to(writer)?;
        }
        writer.write_all(&(self.current as i32).to_le_bytes())?;
        writer.write_all(&self.side.to_i32().to_le_bytes())?;
        Ok(())
    }

    /// Restore a history from its rollback snapshot layout
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut entries = Vec::with_capacity(HISTORY_SIZE);
        for _ in 0..HISTORY_SIZE {
            entries.push(HistoryEntry::read_from(reader)?);
        }
        let cursor = read_i32(reader)?;
        if cursor < 0 || cursor as usize >= HISTORY_SIZE {
            return Err(Error::CorruptCursor(cursor));
        }
        let side = InputSide::from_i32(read_i32(reader)?);
        Ok(Self {
            entries,
            current: cursor as usize,
            side,
        })
    }
}

impl Default for InputHistory {
    fn default() -> Self {
        Self::new(InputSide::Right)
    }
}
