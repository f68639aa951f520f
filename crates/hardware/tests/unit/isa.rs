//! Instruction set tests: binary codec and assembler.

use pretty_assertions::assert_eq;
use rstest::rstest;

use pipesim_core::Instruction;
use pipesim_core::common::AsmError;
use pipesim_core::isa::{Format, Op, assemble, decode, encode};

use crate::common::{add, beq, jump, load, mul, store, sub};

// ══════════════════════════════════════════════════════════
// 1. Operation table
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Op::Add, 0x00, Some(Format::R))]
#[case(Op::Sub, 0x01, Some(Format::R))]
#[case(Op::Mul, 0x02, Some(Format::R))]
#[case(Op::Load, 0x03, Some(Format::I))]
#[case(Op::Store, 0x04, Some(Format::S))]
#[case(Op::Beq, 0x05, Some(Format::B))]
#[case(Op::Jump, 0x06, Some(Format::J))]
fn op_table_is_stable(#[case] op: Op, #[case] opcode: u8, #[case] format: Option<Format>) {
    assert_eq!(op.opcode(), opcode);
    assert_eq!(op.format(), format);
    assert_eq!(Op::from_opcode(opcode), Some(op));
}

#[test]
fn unassigned_opcodes_resolve_to_nothing() {
    for opcode in 0x07..=0x3F {
        assert_eq!(Op::from_opcode(opcode), None);
    }
}

// ══════════════════════════════════════════════════════════
// 2. Encoding
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(add(1, 2, 3), 0x0043_0800)]
#[case(sub(4, 5, 6), 0x04A6_2000)]
#[case(mul(7, 8, 9), 0x0909_3800)]
#[case(load(10, 100), 0x0C0A_0064)]
#[case(store(11, 200), 0x1160_00C8)]
#[case(beq(12, 13, 5), 0x158D_0005)]
#[case(jump(10), 0x1800_000A)]
fn encodings_match_the_field_layout(#[case] instruction: Instruction, #[case] word: u32) {
    assert_eq!(encode(&instruction), word);
}

#[rstest]
#[case(add(1, 2, 3))]
#[case(sub(31, 30, 29))]
#[case(mul(7, 8, 9))]
#[case(load(10, 100))]
#[case(load(1, -4))]
#[case(store(11, 200))]
#[case(store(2, -1000))]
#[case(beq(12, 13, 5))]
#[case(beq(1, 2, -3))]
#[case(jump(10))]
#[case(jump(-1))]
#[case(Instruction::Nop)]
fn decode_inverts_encode(#[case] instruction: Instruction) {
    assert_eq!(decode(encode(&instruction)), instruction);
}

// ══════════════════════════════════════════════════════════
// 3. Decoding edge cases
// ══════════════════════════════════════════════════════════

#[test]
fn unknown_opcode_decodes_to_nop() {
    assert_eq!(decode(0x1C00_0000), Instruction::Nop); // opcode 0x07
    assert_eq!(decode(0xFFFF_FFFF), Instruction::Nop); // opcode 0x3F
}

#[test]
fn r_form_ignores_the_funct_field() {
    assert_eq!(decode(0x0043_0FFF), add(1, 2, 3));
}

#[test]
fn immediates_are_sign_extended() {
    // LOAD with a 16-bit immediate of 0x8000 reads back as -32768.
    let word = encode(&load(1, 0)) | 0x8000;
    assert_eq!(decode(word), load(1, -32768));
}

// ══════════════════════════════════════════════════════════
// 4. Assembler
// ══════════════════════════════════════════════════════════

#[test]
fn assembles_a_program_with_comments_and_blanks() -> Result<(), AsmError> {
    let source = "
        # setup
        ADD R1, R2, R3

        load R4, 100
        STORE R1,200
        BEQ R1, R4, 5
        JUMP 0
    ";
    let program = assemble(source)?;
    assert_eq!(
        program,
        vec![
            add(1, 2, 3),
            load(4, 100),
            store(1, 200),
            beq(1, 4, 5),
            jump(0),
        ]
    );
    Ok(())
}

#[test]
fn reports_the_offending_line() {
    let source = "# header\nADD R1, R2, R3\nFROB R1";
    assert_eq!(
        assemble(source),
        Err(AsmError::UnknownMnemonic {
            line: 3,
            mnemonic: String::from("FROB"),
        })
    );
}

#[rstest]
#[case("ADD R1, R2", AsmError::OperandCount { line: 1, mnemonic: String::from("ADD"), expected: 3, found: 2 })]
#[case("LOAD Rx, 5", AsmError::BadRegister { line: 1, token: String::from("Rx") })]
#[case("ADD R32, R1, R2", AsmError::BadRegister { line: 1, token: String::from("R32") })]
#[case("LOAD R1, abc", AsmError::BadInteger { line: 1, token: String::from("abc") })]
#[case("JUMP 1, 2", AsmError::OperandCount { line: 1, mnemonic: String::from("JUMP"), expected: 1, found: 2 })]
fn rejects_malformed_lines(#[case] source: &str, #[case] expected: AsmError) {
    assert_eq!(assemble(source), Err(expected));
}

#[rstest]
#[case(add(1, 2, 3))]
#[case(sub(4, 5, 6))]
#[case(mul(7, 8, 9))]
#[case(load(10, 100))]
#[case(store(11, 200))]
#[case(beq(12, 13, 5))]
#[case(jump(10))]
fn display_output_reassembles(#[case] instruction: Instruction) -> Result<(), AsmError> {
    let program = assemble(&instruction.to_string())?;
    assert_eq!(program, vec![instruction]);
    Ok(())
}
