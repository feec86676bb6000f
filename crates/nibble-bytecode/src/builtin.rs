//! Reserved function ids.
//!
//! Ids below [`ENTRY_ID`] are native functions. They are never bound by the
//! program itself unless it defines them explicitly, which shadows the native.

/// Names interned at the start of every symbol table, in id order.
pub const RESERVED_NAMES: [&str; 4] = ["top", "say", "hlt", ENTRY_NAME];

/// Name of the function bound to the whole program at run start.
pub const ENTRY_NAME: &str = "_entry";

/// Id of [`ENTRY_NAME`].
pub const ENTRY_ID: i64 = 3;

/// Native function dispatched by id when no body is bound.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Builtin {
    /// Print the top of stack without popping it.
    Top = 0,
    /// Print the bytes above the topmost zero, then drop them and the zero.
    Say = 1,
    /// End the run.
    Halt = 2,
}

impl Builtin {
    pub const ALL: [Builtin; 3] = [Self::Top, Self::Say, Self::Halt];

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Self::Top),
            1 => Some(Self::Say),
            2 => Some(Self::Halt),
            _ => None,
        }
    }

    #[inline]
    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        RESERVED_NAMES[self as usize]
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
