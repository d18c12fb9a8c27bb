//! `mockall` doubles for the core's external traits.


/// Mock `SyscallHandler`.
pub mod syscall;
