//! MIPS32 instruction-set core.
//!
//! This crate implements the ISA layer of a cycle-level multicore MIPS32
//! simulator with the following:
//! 1. **ISA:** Named bit fields, a total decode tree, and static instruction records.
//! 2. **Decode Cache:** PC-keyed memoisation of decoded instructions.
//! 3. **Core:** Integer, float, and misc register files with a speculative checkpoint.
//! 4. **Execution:** Delay-slot aware semantics for every decoded instruction.
//! 5. **Memory:** The `Memory` trait and a sparse page-mapped implementation.
//!
//! Pipeline timing, caches, and OS emulation live in the host simulator, which
//! talks to this crate through [`Thread`](core::thread::Thread) and
//! [`Memory`](soc::traits::Memory).

/// Common types and constants (errors, registers, access types).
pub mod common;
/// Core configuration (decoder policy, overflow handling).
pub mod config;
/// Register files, execution units, threads, and dynamic instructions.
pub mod core;
/// Instruction set (bit fields, decode, instructions, ABI, disassembly).
pub mod isa;
/// Memory trait and sparse memory.
pub mod soc;
/// Decoder statistics.
pub mod stats;

/// Root configuration type; use `IsaConfig::default()` or deserialize from JSON.
pub use crate::config::IsaConfig;
/// Reference thread; one register file over one memory.
pub use crate::core::Hart;
/// Decoder with its PC-keyed cache.
pub use crate::isa::decode::Decoder;
/// Sparse page-mapped memory.
pub use crate::soc::Ram;
