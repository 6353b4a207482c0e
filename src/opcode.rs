//! The opcode table: a sum type over all EVM opcodes, generic in the
//! representation of `PUSH`'s immediate. Decoding bytes into `Op` values and
//! interpreting them is external to this crate (the disassembler and
//! `exec1` loop are out of scope); this module only owns the shape.

use std::fmt;

/// One EVM instruction. `A` is the `PUSH` immediate representation —
/// `Vec<u8>` for decoded bytecode, a symbolic `Byte` sequence for a
/// partially-abstract contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenericOp<A> {
    OpStop,
    OpAdd,
    OpMul,
    OpSub,
    OpDiv,
    OpSDiv,
    OpMod,
    OpSMod,
    OpAddMod,
    OpMulMod,
    OpExp,
    OpSignExtend,
    OpLT,
    OpGT,
    OpSLT,
    OpSGT,
    OpEq,
    OpIsZero,
    OpAnd,
    OpOr,
    OpXor,
    OpNot,
    OpByte,
    OpSHL,
    OpSHR,
    OpSAR,
    OpSha3,
    OpAddress,
    OpBalance,
    OpOrigin,
    OpCaller,
    OpCallValue,
    OpCallDataLoad,
    OpCallDataSize,
    OpCallDataCopy,
    OpCodeSize,
    OpCodeCopy,
    OpGasPrice,
    OpExtCodeSize,
    OpExtCodeCopy,
    OpReturnDataSize,
    OpReturnDataCopy,
    OpExtCodeHash,
    OpBlockHash,
    OpCoinbase,
    OpTimestamp,
    OpNumber,
    OpPrevRandao,
    OpGasLimit,
    OpChainId,
    OpSelfBalance,
    OpBaseFee,
    OpPop,
    OpMLoad,
    OpMStore,
    OpMStore8,
    OpSLoad,
    OpSStore,
    OpJump,
    OpJumpI,
    OpPC,
    OpMSize,
    OpGas,
    OpJumpDest,
    OpTLoad,
    OpTStore,
    OpMCopy,
    /// `PUSHn`, carrying the immediate in representation `A`.
    OpPush(A),
    /// `DUPn`, `n` in `1..=16`.
    OpDup(u8),
    /// `SWAPn`, `n` in `1..=16`.
    OpSwap(u8),
    /// `LOGn`, `n` in `0..=4`.
    OpLog(u8),
    OpCreate,
    OpCall,
    OpCallCode,
    OpReturn,
    OpDelegateCall,
    OpCreate2,
    OpStaticCall,
    OpRevert,
    OpInvalid,
    OpSelfDestruct,
    /// Any byte not assigned a meaning by the active fork.
    OpUnknown(u8),
}

impl<A> fmt::Display for GenericOp<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericOp::OpPush(_) => write!(f, "PUSH"),
            GenericOp::OpDup(n) => write!(f, "DUP{n}"),
            GenericOp::OpSwap(n) => write!(f, "SWAP{n}"),
            GenericOp::OpLog(n) => write!(f, "LOG{n}"),
            GenericOp::OpUnknown(b) => write!(f, "UNKNOWN(0x{b:02x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// The decoded form used once bytecode has been disassembled: `PUSH`
/// carries its literal immediate bytes.
pub type Op = GenericOp<Vec<u8>>;
