//! Named bit ranges of a MIPS32 instruction word.
//!
//! A [`BitField`] is an immutable `(hi, lo)` descriptor. The catalog below names
//! every field the decode tree, the execution units, and the disassembler read,
//! plus the FCSR sub-fields. Fields are `const`; an invalid range fails at compile
//! time through the assertion in [`BitField::new`].

/// Inclusive bit range `[hi:lo]` with a diagnostic name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitField {
    name: &'static str,
    hi: u32,
    lo: u32,
}

impl BitField {
    /// Creates a field covering bits `hi` down to `lo`, inclusive.
    ///
    /// # Panics
    ///
    /// Panics (at compile time for `const` items) if `hi < lo` or `hi > 31`.
    pub const fn new(name: &'static str, hi: u32, lo: u32) -> Self {
        assert!(hi >= lo && hi < 32, "bit field out of range");
        Self { name, hi, lo }
    }

    /// Field name as written in the encoding tables.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Most significant bit.
    pub const fn hi(&self) -> u32 {
        self.hi
    }

    /// Least significant bit.
    pub const fn lo(&self) -> u32 {
        self.lo
    }

    /// Field width in bits.
    pub const fn width(&self) -> u32 {
        self.hi - self.lo + 1
    }

    /// Right-aligned mask of `width()` ones.
    #[inline(always)]
    pub const fn mask(&self) -> u32 {
        u32::MAX >> (31 - (self.hi - self.lo))
    }

    /// Extracts the field from `word`, right-aligned.
    #[inline(always)]
    pub const fn extract(&self, word: u32) -> u32 {
        (word >> self.lo) & self.mask()
    }

    /// Returns `word` with this field replaced by `value` (truncated to the field width).
    #[inline]
    pub const fn insert(&self, word: u32, value: u32) -> u32 {
        (word & !(self.mask() << self.lo)) | ((value & self.mask()) << self.lo)
    }
}

// ── Primary opcode ────────────────────────────────────────
/// Primary opcode.
pub const OPCODE: BitField = BitField::new("OPCODE", 31, 26);
/// Opcode table row.
pub const OPCODE_HI: BitField = BitField::new("OPCODE_HI", 31, 29);
/// Opcode table column.
pub const OPCODE_LO: BitField = BitField::new("OPCODE_LO", 28, 26);

// ── Register specifiers ───────────────────────────────────
/// Source register.
pub const RS: BitField = BitField::new("RS", 25, 21);
/// Top bit of `RS`; splits COP1/COP0 register moves from format operations.
pub const RS_MSB: BitField = BitField::new("RS_MSB", 25, 25);
/// `RS` table row.
pub const RS_HI: BitField = BitField::new("RS_HI", 25, 24);
/// `RS` table column.
pub const RS_LO: BitField = BitField::new("RS_LO", 23, 21);
/// Upper four bits of `RS`; must be zero for `srl`/`rotr`.
pub const RS_SRL: BitField = BitField::new("RS_SRL", 25, 22);
/// `rs` and `rt` together.
pub const RS_RT: BitField = BitField::new("RS_RT", 25, 16);
/// `rs`, `rt`, and the immediate together.
pub const RS_RT_INTIMM: BitField = BitField::new("RS_RT_INTIMM", 25, 0);
/// Target register.
pub const RT: BitField = BitField::new("RT", 20, 16);
/// `RT` table row.
pub const RT_HI: BitField = BitField::new("RT_HI", 20, 19);
/// `RT` table column.
pub const RT_LO: BitField = BitField::new("RT_LO", 18, 16);
/// `rt` and `rd` together.
pub const RT_RD: BitField = BitField::new("RT_RD", 20, 11);
/// Destination register.
pub const RD: BitField = BitField::new("RD", 15, 11);
/// `RD` table row.
pub const RD_HI: BitField = BitField::new("RD_HI", 15, 14);
/// `RD` table column.
pub const RD_LO: BitField = BitField::new("RD_LO", 13, 11);

// ── REGIMM ────────────────────────────────────────────────
/// REGIMM sub-opcode (in the `rt` slot).
pub const REGIMM: BitField = BitField::new("REGIMM", 20, 16);
/// REGIMM table row.
pub const REGIMM_HI: BitField = BitField::new("REGIMM_HI", 20, 19);
/// REGIMM table column.
pub const REGIMM_LO: BitField = BitField::new("REGIMM_LO", 18, 16);

// ── Function field ────────────────────────────────────────
/// Function code.
pub const FUNC: BitField = BitField::new("FUNC", 5, 0);
/// Function table row.
pub const FUNC_HI: BitField = BitField::new("FUNC_HI", 5, 3);
/// Function table column.
pub const FUNC_LO: BitField = BitField::new("FUNC_LO", 2, 0);

// ── Shifts ────────────────────────────────────────────────
/// Shift amount.
pub const SA: BitField = BitField::new("SA", 10, 6);
/// Upper four bits of `SA`; must be zero for `srlv`/`rotrv`.
pub const SA_HI: BitField = BitField::new("SA_HI", 10, 7);
/// Rotate select for `srl` (bit 21).
pub const SRL: BitField = BitField::new("SRL", 21, 21);
/// Rotate select for `srlv` (bit 6).
pub const SRLV: BitField = BitField::new("SRLV", 6, 6);

// ── Immediates and targets ────────────────────────────────
/// 16-bit immediate.
pub const INTIMM: BitField = BitField::new("INTIMM", 15, 0);
/// Sign bit of the 16-bit immediate.
pub const INTIMM_SIGN: BitField = BitField::new("INTIMM_SIGN", 15, 15);
/// Branch and memory displacement.
pub const OFFSET: BitField = BitField::new("OFFSET", 15, 0);
/// Jump target (word index within the 256MB region).
pub const JMPTARG: BitField = BitField::new("JMPTARG", 25, 0);
/// `jr`/`jalr` hint.
pub const HINT: BitField = BitField::new("HINT", 10, 6);
/// `syscall`/`break` code.
pub const SYSCALL_CODE: BitField = BitField::new("SYSCALL_CODE", 25, 6);
/// Register-form trap code.
pub const TRAP_CODE: BitField = BitField::new("TRAP_CODE", 15, 6);
/// Cache or prefetch operation (in the `rt` slot).
pub const CACHE_OP: BitField = BitField::new("CACHE_OP", 20, 16);

// ── SPECIAL3 ──────────────────────────────────────────────
/// `ext`/`ins` most significant bit (or size minus one).
pub const MSB: BitField = BitField::new("MSB", 15, 11);
/// `ext`/`ins` least significant bit.
pub const LSB: BitField = BitField::new("LSB", 10, 6);
/// BSHFL sub-opcode (in the `sa` slot).
pub const BSHFL: BitField = BitField::new("BSHFL", 10, 6);
/// BSHFL table row.
pub const BSHFL_HI: BitField = BitField::new("BSHFL_HI", 10, 9);
/// BSHFL table column.
pub const BSHFL_LO: BitField = BitField::new("BSHFL_LO", 8, 6);

// ── Coprocessor 0 ─────────────────────────────────────────
/// Coprocessor operation bit (set for TLB and exception-return ops).
pub const CO: BitField = BitField::new("CO", 25, 25);
/// CP0 register select.
pub const SEL: BitField = BitField::new("SEL", 2, 0);
/// `di`/`ei` select (bit 5).
pub const SC: BitField = BitField::new("SC", 5, 5);

// ── Coprocessor 1 ─────────────────────────────────────────
/// Operand format (`s`, `d`, `w`, `l`, `ps`).
pub const FMT: BitField = BitField::new("FMT", 25, 21);
/// Source float register.
pub const FS: BitField = BitField::new("FS", 15, 11);
/// Target float register.
pub const FT: BitField = BitField::new("FT", 20, 16);
/// Destination float register.
pub const FD: BitField = BitField::new("FD", 10, 6);
/// Extra source for COP1X fused operations.
pub const FR: BitField = BitField::new("FR", 25, 21);
/// COP1X operand format.
pub const FMT3: BitField = BitField::new("FMT3", 2, 0);
/// Compare condition (`unordered`, `equal`, `less`, `signalling`).
pub const COND: BitField = BitField::new("COND", 3, 0);
/// Compare function class (must be `0b11`).
pub const FC: BitField = BitField::new("FC", 5, 4);
/// Condition code written by compares.
pub const CC: BitField = BitField::new("CC", 10, 8);
/// Condition code tested by `bc1*` and `movf`/`movt`.
pub const BRANCH_CC: BitField = BitField::new("BRANCH_CC", 20, 18);
/// Nullify-delay-slot (likely) bit of `bc1*`.
pub const ND: BitField = BitField::new("ND", 17, 17);
/// True/false select of `bc1*` and `movf`/`movt`.
pub const TF: BitField = BitField::new("TF", 16, 16);
/// `movf`/`movt` select in the integer MOVCI encoding.
pub const MOVCI: BitField = BitField::new("MOVCI", 16, 16);

// ── FCSR layout ───────────────────────────────────────────
/// Rounding mode.
pub const FCSR_RM: BitField = BitField::new("FCSR_RM", 1, 0);
/// Sticky exception flags.
pub const FCSR_FLAGS: BitField = BitField::new("FCSR_FLAGS", 6, 2);
/// Exception enables.
pub const FCSR_ENABLES: BitField = BitField::new("FCSR_ENABLES", 11, 7);
/// Exception cause.
pub const FCSR_CAUSE: BitField = BitField::new("FCSR_CAUSE", 17, 12);
/// Condition code 0.
pub const FCSR_CC0: BitField = BitField::new("FCSR_CC0", 23, 23);
/// Flush-to-zero.
pub const FCSR_FS: BitField = BitField::new("FCSR_FS", 24, 24);
/// Condition codes 1-7.
pub const FCSR_CC1_7: BitField = BitField::new("FCSR_CC1_7", 31, 25);

// ── Whole word ────────────────────────────────────────────
/// The entire instruction word.
pub const WORD: BitField = BitField::new("WORD", 31, 0);

/// Every declared instruction-word and FCSR field.
pub const ALL: &[BitField] = &[
    OPCODE,
    OPCODE_HI,
    OPCODE_LO,
    RS,
    RS_MSB,
    RS_HI,
    RS_LO,
    RS_SRL,
    RS_RT,
    RS_RT_INTIMM,
    RT,
    RT_HI,
    RT_LO,
    RT_RD,
    RD,
    RD_HI,
    RD_LO,
    REGIMM,
    REGIMM_HI,
    REGIMM_LO,
    FUNC,
    FUNC_HI,
    FUNC_LO,
    SA,
    SA_HI,
    SRL,
    SRLV,
    INTIMM,
    INTIMM_SIGN,
    OFFSET,
    JMPTARG,
    HINT,
    SYSCALL_CODE,
    TRAP_CODE,
    CACHE_OP,
    MSB,
    LSB,
    BSHFL,
    BSHFL_HI,
    BSHFL_LO,
    CO,
    SEL,
    SC,
    FMT,
    FS,
    FT,
    FD,
    FR,
    FMT3,
    COND,
    FC,
    CC,
    BRANCH_CC,
    ND,
    TF,
    MOVCI,
    FCSR_RM,
    FCSR_FLAGS,
    FCSR_ENABLES,
    FCSR_CAUSE,
    FCSR_CC0,
    FCSR_FS,
    FCSR_CC1_7,
    WORD,
];

/// Looks up a field by name.
pub fn by_name(name: &str) -> Option<BitField> {
    ALL.iter().copied().find(|f| f.name == name)
}

/// Sign-extends the low `bits` bits of `value` to 32 bits.
///
/// # Arguments
///
/// * `value` - The value to extend.
/// * `bits` - The number of valid bits in `value` (1-32).
#[inline(always)]
pub const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}
