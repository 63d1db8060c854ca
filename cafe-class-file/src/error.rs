use thiserror::Error;

/// A failed constant pool lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The index is zero or past the end of the pool.
    #[error("constant pool index {index} is out of range (pool length {len})")]
    OutOfRange { index: usize, len: usize },

    /// The index names the slot reserved after a `Long` or `Double`.
    #[error("constant pool index {0} is the unusable slot after a wide constant")]
    Unusable(usize),

    /// The entry exists but has a different kind than the caller asked for.
    #[error("constant pool index {index} is a {found}, expected {expected}")]
    UnexpectedKind {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// A `Utf8` entry holds bytes that are not valid modified UTF-8.
    #[error("constant pool index {0} is not valid modified UTF-8")]
    InvalidModifiedUtf8(usize),
}

/// The kind of failure behind a [`DecodeError`].
#[derive(Error, Debug)]
pub enum DecodeErrorKind {
    /// The input does not start with `0xCAFEBABE`.
    #[error("malformed header: bad magic number {0:#010x}")]
    MalformedHeader(u32),

    /// The input ended while `requested` more bytes were needed.
    #[error("truncated input: {requested} byte(s) requested past the end")]
    TruncatedInput { requested: usize },

    #[error("unknown constant pool tag {0}")]
    UnknownConstantTag(u8),

    #[error("unknown attribute `{0}`")]
    UnknownAttributeName(String),

    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),

    #[error("unknown element value tag {0:?}")]
    UnknownElementValueTag(char),

    /// An attribute decoder consumed a different number of bytes than the
    /// attribute header declared.
    #[error("attribute `{name}` declares {declared} byte(s) but {consumed} were consumed")]
    AttributeLengthMismatch {
        name: String,
        declared: u32,
        consumed: u64,
    },

    /// Frame types 128 to 246 are reserved.
    #[error("unknown stack map frame type {0}")]
    UnknownStackMapFrameType(u8),

    #[error("unknown verification type {0}")]
    UnknownVerificationType(u8),

    /// A `newarray` operand outside `T_BOOLEAN..=T_LONG`.
    #[error("unknown newarray element type {0}")]
    UnknownArrayType(u8),

    /// A constant pool lookup made during decoding failed.
    #[error(transparent)]
    ConstantPool(#[from] PoolError),

    /// Attributes were read without a constant pool to resolve their names.
    #[error("attributes cannot be decoded without a constant pool")]
    MissingConstantPool,

    /// The last instruction of a method body ran past `code_length`.
    #[error("instructions overran the declared code length {declared} (decoded up to {decoded})")]
    CodeLengthMismatch { declared: u32, decoded: u64 },

    /// A wide constant declared in the last slot would leave no room for
    /// its reserved second slot.
    #[error("wide constant at index {index} overflows the declared pool count {count}")]
    ConstantPoolOverflow { index: usize, count: usize },

    /// Element values or attributes nest deeper than the decoder allows.
    #[error("structures nested deeper than {limit} level(s)")]
    NestingTooDeep { limit: usize },

    #[error("{0} trailing byte(s) after the class file")]
    TrailingBytes(usize),

    /// The underlying reader failed for a reason other than end of input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An error raised while decoding a class file, with the absolute byte
/// offset of the read that failed.
#[derive(Error, Debug)]
#[error("{kind} (at byte offset {offset})")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
