use crate::error::Error;
use std::fmt;

pub const RAM_SIZE: usize = 256;

/// Write-once RAM image with its location cursor.
#[derive(Debug, Clone)]
pub struct Memory {
    ram: [u8; RAM_SIZE],
    used: [bool; RAM_SIZE],
    cursor: usize,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            ram: [0; RAM_SIZE],
            used: [false; RAM_SIZE],
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, forward or backward. Nothing is written.
    pub fn org(&mut self, addr: u8) {
        self.cursor = addr as usize;
    }

    /// Write at the cursor and advance it. Returns the address written.
    pub fn write(&mut self, byte: u8) -> Result<usize, Error> {
        let addr = self.cursor;
        if addr >= RAM_SIZE {
            return Err(Error::RamSpaceExceeded);
        }
        if self.used[addr] {
            return Err(Error::DuplicateRamWrite(addr as u8));
        }
        self.ram[addr] = byte;
        self.used[addr] = true;
        self.cursor += 1;
        Ok(addr)
    }

    /// Overwrite a byte reserved by an earlier `write`.
    pub fn patch(&mut self, addr: usize, byte: u8) {
        debug_assert!(self.used[addr], "patching unreserved address {addr:02X}");
        self.ram[addr] = byte;
    }

    pub fn get(&self, addr: usize) -> Option<u8> {
        match self.used.get(addr) {
            Some(true) => Some(self.ram[addr]),
            _ => None,
        }
    }

    pub fn ram(&self) -> &[u8; RAM_SIZE] {
        &self.ram
    }

    pub fn used(&self) -> &[bool; RAM_SIZE] {
        &self.used
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// 16 x 16 hex dump with a printable-ASCII column.
impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "     ")?;
        for col in 0..16 {
            write!(f, " {:>2X}", col)?;
        }
        writeln!(f)?;
        for (row, chunk) in self.ram.chunks(16).enumerate() {
            write!(f, "  {:02X} ", row * 16)?;
            for byte in chunk {
                write!(f, " {:02X}", byte)?;
            }
            write!(f, "   ")?;
            for &byte in chunk {
                let ch = if (0x21..=0x7E).contains(&byte) {
                    byte as char
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
