use mipsim_core::common::{RegisterFile, SimResult};
use mipsim_core::core::thread::SyscallHandler;
use mipsim_core::soc::traits::Memory;
use mockall::mock;

mock! {
    pub Syscalls {}
    impl SyscallHandler for Syscalls {
        fn handle(
            &mut self,
            number: u32,
            regs: &mut RegisterFile,
            memory: &mut dyn Memory,
        ) -> SimResult<()>;
    }
}
