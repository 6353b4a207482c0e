//! Per-frame execution state, parametric in `Flavor` so the same
//! `FrameState<F>` shape serves both concrete execution (a byte-vector
//! `Memory`, a `u64` gas counter) and symbolic execution (a `Buf`-backed
//! `Memory`, a unit gas counter).

use crate::expr::{Buf, ContractCode, EAddr, EWord};
use crate::gas::Flavor;

/// A frame's memory: a plain byte vector when concrete, a `Buf` expression
/// when symbolic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Memory {
    Concrete(Vec<u8>),
    Symbolic(Buf),
}

impl Memory {
    pub fn empty_concrete() -> Self {
        Memory::Concrete(Vec::new())
    }

    pub fn empty_symbolic() -> Self {
        Memory::Symbolic(Buf::ConcreteBuf(Vec::new()))
    }

    pub fn len(&self) -> usize {
        match self {
            Memory::Concrete(bytes) => bytes.len(),
            Memory::Symbolic(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The state of one call/create frame: the executing contract, its
/// program counter, operand stack, memory, and the call inputs (caller,
/// value, calldata) it was entered with.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState<F: Flavor> {
    pub contract: EAddr,
    pub code_contract: EAddr,
    pub code: ContractCode,
    pub pc: i32,
    pub stack: Vec<EWord>,
    pub memory: Memory,
    pub memory_size: u64,
    pub calldata: Buf,
    pub callvalue: EWord,
    pub caller: EAddr,
    pub gas: F::Gas,
    pub returndata: Buf,
    pub is_static: bool,
}

impl<F: Flavor> FrameState<F> {
    pub fn new(
        contract: EAddr,
        code: ContractCode,
        calldata: Buf,
        callvalue: EWord,
        caller: EAddr,
        gas: F::Gas,
        is_static: bool,
    ) -> Self {
        FrameState {
            code_contract: contract.clone(),
            contract,
            code,
            pc: 0,
            stack: Vec::new(),
            memory: Memory::empty_concrete(),
            memory_size: 0,
            calldata,
            callvalue,
            caller,
            gas,
            returndata: Buf::ConcreteBuf(Vec::new()),
            is_static,
        }
    }
}

/// A saved caller frame on the call/create stack, paired with the
/// substate/storage snapshot needed to restore it on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<F: Flavor> {
    pub state: FrameState<F>,
    pub call_reversion: Vec<(EAddr, crate::expr::Storage)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::Concrete;
    use crate::numeric::{Addr, W256};

    #[test]
    fn new_frame_starts_at_pc_zero_with_empty_stack() {
        let f: FrameState<Concrete> = FrameState::new(
            EAddr::LitAddr(Addr::ZERO),
            ContractCode::Unknown(Box::new(EAddr::LitAddr(Addr::ZERO))),
            Buf::ConcreteBuf(vec![]),
            EWord::Lit(W256::ZERO),
            EAddr::LitAddr(Addr::ZERO),
            1000,
            false,
        );
        assert_eq!(f.pc, 0);
        assert!(f.stack.is_empty());
        assert!(f.memory.is_empty());
    }
}
