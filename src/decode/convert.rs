//! Internal module for widening narrow UNORM channels to 16 bits and back.
//!
//! Widening uses bit replication: the N-bit field is placed in the top N
//! bits of a 16-bit value and right-shifted copies of it are OR-ed into the
//! bits below. This maps 0 to 0 and the maximum N-bit value to `0xFFFF`
//! without any division.
//!
//! Narrowing simply keeps the top N bits, so `from_n16(n16(x)) == x` for
//! every N-bit `x`.

/// Functions for converting **FROM Unorm1** values.
pub(crate) mod n1 {
    #[inline(always)]
    pub fn n16(x: u16) -> u16 {
        debug_assert!(x <= 1);
        if x == 0 {
            0
        } else {
            u16::MAX
        }
    }
    #[inline(always)]
    pub fn from_n16(x: u16) -> u16 {
        x >> 15
    }
}

/// Functions for converting **FROM Unorm4** values.
pub(crate) mod n4 {
    #[inline(always)]
    pub fn n16(x: u16) -> u16 {
        debug_assert!(x <= 0xF);
        let mut v = x << 12;
        v |= v >> 4;
        v |= v >> 8;
        v
    }
    #[inline(always)]
    pub fn from_n16(x: u16) -> u16 {
        x >> 12
    }
}

/// Functions for converting **FROM Unorm5** values.
pub(crate) mod n5 {
    #[inline(always)]
    pub fn n16(x: u16) -> u16 {
        debug_assert!(x <= 0x1F);
        let v = x << 11;
        v | v >> 5 | v >> 10 | v >> 15
    }
    #[inline(always)]
    pub fn from_n16(x: u16) -> u16 {
        x >> 11
    }
}

/// Functions for converting **FROM Unorm6** values.
pub(crate) mod n6 {
    #[inline(always)]
    pub fn n16(x: u16) -> u16 {
        debug_assert!(x <= 0x3F);
        let v = x << 10;
        v | v >> 6 | v >> 12
    }
    #[inline(always)]
    pub fn from_n16(x: u16) -> u16 {
        x >> 10
    }
}

/// Functions for converting **FROM Unorm8** values.
pub(crate) mod n8 {
    #[inline(always)]
    pub fn n16(x: u8) -> u16 {
        let v = x as u16;
        v | v << 8
    }
    #[inline(always)]
    pub fn from_n16(x: u16) -> u8 {
        (x >> 8) as u8
    }
}
