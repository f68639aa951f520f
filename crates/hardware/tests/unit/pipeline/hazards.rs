//! Hazard detection and forwarding unit tests.
//!
//! Both queries are pure functions over latch values, so every case here
//! builds its latches by hand and checks the answer in isolation.

use pipesim_core::core::pipeline::hazards::{
    Forward, apply_forwarding, forward_select, need_stall_load_use,
};
use pipesim_core::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};

use crate::common::{add, beq, load, store, sub};

/// IF/ID holding the given instruction.
fn fetched(instruction: pipesim_core::Instruction) -> IfId {
    IfId {
        valid: true,
        instruction,
        pc: 0,
    }
}

/// ID/EX holding the given instruction with latched operand values.
fn decoded(instruction: pipesim_core::Instruction, rs1_value: i64, rs2_value: i64) -> IdEx {
    IdEx {
        valid: true,
        instruction,
        rs1_value,
        rs2_value,
        immediate: 0,
    }
}

/// EX/MEM holding the given instruction and ALU result.
fn executed(instruction: pipesim_core::Instruction, alu_result: i64) -> ExMem {
    ExMem {
        valid: true,
        instruction,
        alu_result,
        rs2_value: 0,
    }
}

/// MEM/WB holding the given instruction and final result.
fn retired(instruction: pipesim_core::Instruction, result: i64) -> MemWb {
    MemWb {
        valid: true,
        instruction,
        result,
    }
}

// ══════════════════════════════════════════════════════════
// 1. Load-use stall detection
// ══════════════════════════════════════════════════════════

#[test]
fn stall_when_load_rd_matches_rs1() {
    let if_id = fetched(add(9, 8, 10));
    let id_ex = decoded(load(8, 100), 0, 0);
    assert!(need_stall_load_use(&if_id, &id_ex));
}

#[test]
fn stall_when_load_rd_matches_rs2() {
    let if_id = fetched(add(9, 10, 8));
    let id_ex = decoded(load(8, 100), 0, 0);
    assert!(need_stall_load_use(&if_id, &id_ex));
}

#[test]
fn stall_when_branch_consumes_load() {
    let if_id = fetched(beq(8, 1, 5));
    let id_ex = decoded(load(8, 100), 0, 0);
    assert!(need_stall_load_use(&if_id, &id_ex));
}

#[test]
fn no_stall_when_producer_is_not_a_load() {
    let if_id = fetched(add(9, 8, 10));
    let id_ex = decoded(add(8, 1, 2), 0, 0);
    assert!(!need_stall_load_use(&if_id, &id_ex));
}

#[test]
fn no_stall_without_register_overlap() {
    let if_id = fetched(add(9, 6, 7));
    let id_ex = decoded(load(8, 100), 0, 0);
    assert!(!need_stall_load_use(&if_id, &id_ex));
}

#[test]
fn no_stall_when_load_targets_r0() {
    // A load into R0 has no observable effect, so its consumer reads zero
    // from the register file either way.
    let if_id = fetched(add(9, 0, 10));
    let id_ex = decoded(load(0, 100), 0, 0);
    assert!(!need_stall_load_use(&if_id, &id_ex));
}

#[test]
fn no_stall_for_store_after_load() {
    // A store's data register is read at the memory stage, after the load
    // has written back; it is not a declared source.
    let if_id = fetched(store(8, 100));
    let id_ex = decoded(load(8, 100), 0, 0);
    assert!(!need_stall_load_use(&if_id, &id_ex));
}

#[test]
fn no_stall_when_latches_are_bubbles() {
    assert!(!need_stall_load_use(&IfId::default(), &IdEx::default()));
    assert!(!need_stall_load_use(
        &IfId::default(),
        &decoded(load(8, 100), 0, 0)
    ));
    assert!(!need_stall_load_use(
        &fetched(add(9, 8, 10)),
        &IdEx::default()
    ));
}

// ══════════════════════════════════════════════════════════
// 2. Forwarding selection
// ══════════════════════════════════════════════════════════

#[test]
fn selects_ex_mem_for_matching_source() {
    let id_ex = decoded(add(4, 1, 5), 0, 0);
    let ex_mem = executed(add(1, 2, 3), 30);
    let (rs1, rs2) = forward_select(&id_ex, &ex_mem, &MemWb::default());
    assert_eq!(rs1, Forward::ExMem);
    assert_eq!(rs2, Forward::None);
}

#[test]
fn selects_mem_wb_when_ex_mem_does_not_match() {
    let id_ex = decoded(sub(6, 4, 1), 0, 0);
    let ex_mem = executed(add(4, 1, 5), 35);
    let mem_wb = retired(add(1, 2, 3), 30);
    let (rs1, rs2) = forward_select(&id_ex, &ex_mem, &mem_wb);
    assert_eq!(rs1, Forward::ExMem);
    assert_eq!(rs2, Forward::MemWb);
}

#[test]
fn ex_mem_wins_when_both_stages_write_the_source() {
    // Two writes to R1 in flight: EX/MEM holds the fresher one.
    let id_ex = decoded(add(4, 1, 5), 0, 0);
    let ex_mem = executed(add(1, 2, 3), 50);
    let mem_wb = retired(add(1, 6, 7), 30);
    let (rs1, _) = forward_select(&id_ex, &ex_mem, &mem_wb);
    assert_eq!(rs1, Forward::ExMem);
}

#[test]
fn never_forwards_from_r0() {
    let id_ex = decoded(add(4, 0, 5), 0, 0);
    let ex_mem = executed(add(0, 2, 3), 30);
    let mem_wb = retired(load(0, 100), 25);
    let (rs1, rs2) = forward_select(&id_ex, &ex_mem, &mem_wb);
    assert_eq!(rs1, Forward::None);
    assert_eq!(rs2, Forward::None);
}

#[test]
fn stores_and_branches_are_not_forwarding_sources() {
    let id_ex = decoded(add(4, 1, 2), 0, 0);
    let ex_mem = executed(store(1, 100), 100);
    let mem_wb = retired(beq(1, 2, 5), 1);
    let (rs1, rs2) = forward_select(&id_ex, &ex_mem, &mem_wb);
    assert_eq!(rs1, Forward::None);
    assert_eq!(rs2, Forward::None);
}

#[test]
fn no_selection_for_an_invalid_consumer() {
    let ex_mem = executed(add(1, 2, 3), 30);
    let (rs1, rs2) = forward_select(&IdEx::default(), &ex_mem, &MemWb::default());
    assert_eq!(rs1, Forward::None);
    assert_eq!(rs2, Forward::None);
}

// ══════════════════════════════════════════════════════════
// 3. Applying forwarding
// ══════════════════════════════════════════════════════════

#[test]
fn substitutes_both_operands() {
    let id_ex = decoded(sub(6, 4, 1), 1111, 2222);
    let ex_mem = executed(add(4, 1, 5), 35);
    let mem_wb = retired(add(1, 2, 3), 30);
    assert_eq!(apply_forwarding(&id_ex, &ex_mem, &mem_wb), (35, 30));
}

#[test]
fn keeps_latched_values_without_a_match() {
    let id_ex = decoded(add(4, 6, 7), 11, 22);
    let ex_mem = executed(add(1, 2, 3), 30);
    assert_eq!(apply_forwarding(&id_ex, &ex_mem, &MemWb::default()), (11, 22));
}

#[test]
fn suppresses_ex_mem_forward_from_a_load() {
    // The load's real result does not exist until after its memory stage.
    // The stall rule keeps consumers out of this position, so the guard
    // falling back to the latched value is purely defensive.
    let id_ex = decoded(add(9, 8, 10), 7, 15);
    let ex_mem = executed(load(8, 100), 100);
    assert_eq!(apply_forwarding(&id_ex, &ex_mem, &MemWb::default()), (7, 15));
}

#[test]
fn forwards_load_data_from_mem_wb() {
    let id_ex = decoded(add(9, 8, 10), 0, 15);
    let mem_wb = retired(load(8, 100), 25);
    assert_eq!(
        apply_forwarding(&id_ex, &ExMem::default(), &mem_wb),
        (25, 15)
    );
}
