//! Unix-style permission bits as reported by file metadata

use std::fmt;
use std::ops::BitOr;

/// The twelve permission bits of a file mode.
///
/// Ordered most-significant first: setuid, setgid, sticky, then read/write/execute
/// for user, group and other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionBits(u32);

impl PermissionBits {
    pub const SETUID: Self = Self(0o4000);
    pub const SETGID: Self = Self(0o2000);
    pub const STICKY: Self = Self(0o1000);
    pub const USER_READ: Self = Self(0o400);
    pub const USER_WRITE: Self = Self(0o200);
    pub const USER_EXECUTE: Self = Self(0o100);
    pub const GROUP_READ: Self = Self(0o040);
    pub const GROUP_WRITE: Self = Self(0o020);
    pub const GROUP_EXECUTE: Self = Self(0o010);
    pub const OTHER_READ: Self = Self(0o004);
    pub const OTHER_WRITE: Self = Self(0o002);
    pub const OTHER_EXECUTE: Self = Self(0o001);

    /// Any of the three read bits.
    pub const ANY_READ: Self =
        Self(Self::USER_READ.0 | Self::GROUP_READ.0 | Self::OTHER_READ.0);

    const MASK: u32 = 0o7777;

    /// Builds the bit set from a raw `st_mode`, discarding the file type bits.
    pub const fn from_mode(mode: u32) -> Self {
        Self(mode & Self::MASK)
    }

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if at least one bit of `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_readable(self) -> bool {
        self.intersects(Self::ANY_READ)
    }
}

impl BitOr for PermissionBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for PermissionBits {
    /// Renders as `ls` does, e.g. `-rwsr-xr-x`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |bit: Self, c: char| if self.contains(bit) { c } else { '-' };
        let special = |exec: Self, bit: Self, set: char, unset: char| {
            match (self.contains(exec), self.contains(bit)) {
                (true, true) => set,
                (false, true) => unset,
                (true, false) => 'x',
                (false, false) => '-',
            }
        };

        let rendered: String = [
            '-',
            flag(Self::USER_READ, 'r'),
            flag(Self::USER_WRITE, 'w'),
            special(Self::USER_EXECUTE, Self::SETUID, 's', 'S'),
            flag(Self::GROUP_READ, 'r'),
            flag(Self::GROUP_WRITE, 'w'),
            special(Self::GROUP_EXECUTE, Self::SETGID, 's', 'S'),
            flag(Self::OTHER_READ, 'r'),
            flag(Self::OTHER_WRITE, 'w'),
            special(Self::OTHER_EXECUTE, Self::STICKY, 't', 'T'),
        ]
        .iter()
        .collect();

        f.write_str(&rendered)
    }
}
