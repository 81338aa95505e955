//! Key tags
//!
//! Every composite key starts with one tag byte naming its record
//! category. The numeric gaps are deliberate room for new categories;
//! ordering between categories is what makes the erase ranges in
//! [`super::erase_ranges_from`] contiguous.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KeyTag {
    FillStatus = 0x10,
    Block = 0x20,
    ReceivedBlock = 0x30,
    TableRow = 0x50,
    TableDelta = 0x60,
    TableIndex = 0x70,
    TableIndexRef = 0x80,
}

impl KeyTag {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x10 => Some(KeyTag::FillStatus),
            0x20 => Some(KeyTag::Block),
            0x30 => Some(KeyTag::ReceivedBlock),
            0x50 => Some(KeyTag::TableRow),
            0x60 => Some(KeyTag::TableDelta),
            0x70 => Some(KeyTag::TableIndex),
            0x80 => Some(KeyTag::TableIndexRef),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyTag::FillStatus => "fill_status",
            KeyTag::Block => "block",
            KeyTag::ReceivedBlock => "received_block",
            KeyTag::TableRow => "table_row",
            KeyTag::TableDelta => "table_delta",
            KeyTag::TableIndex => "table_index",
            KeyTag::TableIndexRef => "table_index_ref",
        }
    }
}

impl fmt::Display for KeyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
