//! Instruction opcodes (4-bit).

/// One instruction per nibble. The discriminant is the nibble value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    /// Decode the literal that follows and push it.
    Literal = 0x0,
    Add = 0x1,
    Sub = 0x2,
    Mul = 0x3,
    /// `i >= 0`: push a copy of the value `i` below the top.
    /// `i < 0`: pop a value and store it `-i` slots below the new top.
    Index = 0x4,
    /// Pop into the register.
    Load = 0x5,
    /// Push the register.
    Push = 0x6,
    Drop = 0x7,
    Swap = 0x8,
    /// Pop a function id; the body runs up to the next top-level `Define`.
    Define = 0x9,
    Call = 0xA,
    Return = 0xB,
    /// Pop; skip past the matching `CloseA` if zero.
    OpenA = 0xC,
    /// Loop back to the matching `OpenA` while the register is non-zero.
    CloseA = 0xD,
    /// Pop; skip past the matching `CloseB` if less than or equal to zero.
    OpenB = 0xE,
    /// Loop back to the matching `OpenB` while the register is non-zero.
    CloseB = 0xF,
}

impl Opcode {
    /// Decode a nibble. Only the low four bits are considered.
    pub fn from_nibble(n: u8) -> Self {
        match n & 0xF {
            0x0 => Self::Literal,
            0x1 => Self::Add,
            0x2 => Self::Sub,
            0x3 => Self::Mul,
            0x4 => Self::Index,
            0x5 => Self::Load,
            0x6 => Self::Push,
            0x7 => Self::Drop,
            0x8 => Self::Swap,
            0x9 => Self::Define,
            0xA => Self::Call,
            0xB => Self::Return,
            0xC => Self::OpenA,
            0xD => Self::CloseA,
            0xE => Self::OpenB,
            _ => Self::CloseB,
        }
    }

    #[inline]
    pub fn nibble(self) -> u8 {
        self as u8
    }

    /// Source operator for this opcode. Literals have no operator; `#` stands in.
    pub fn symbol(self) -> char {
        match self {
            Self::Literal => '#',
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Index => '$',
            Self::Load => '=',
            Self::Push => '?',
            Self::Drop => '!',
            Self::Swap => ',',
            Self::Define => ':',
            Self::Call => '.',
            Self::Return => '@',
            Self::OpenA => '[',
            Self::CloseA => ']',
            Self::OpenB => '<',
            Self::CloseB => '>',
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Literal => "lit",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Index => "index",
            Self::Load => "load",
            Self::Push => "push",
            Self::Drop => "drop",
            Self::Swap => "swap",
            Self::Define => "define",
            Self::Call => "call",
            Self::Return => "return",
            Self::OpenA => "open_a",
            Self::CloseA => "close_a",
            Self::OpenB => "open_b",
            Self::CloseB => "close_b",
        }
    }

    /// The other half of a bracket pair.
    pub fn bracket_partner(self) -> Option<Self> {
        match self {
            Self::OpenA => Some(Self::CloseA),
            Self::CloseA => Some(Self::OpenA),
            Self::OpenB => Some(Self::CloseB),
            Self::CloseB => Some(Self::OpenB),
            _ => None,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
