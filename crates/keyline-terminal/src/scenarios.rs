//! End-to-end behaviour of the command layer through the registry and
//! dispatcher, the way a host drives them.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::command::{CommandArg, CommandBlock, CommandFlags, FixedCommand, LongCommand};
use crate::editor::Session;
use crate::help::render_help;
use crate::registry::CommandRegistry;
use keyline_types::error::{KeylineError, Result};
use keyline_types::key;

/// Counts invocations through the caller context, checking the argument
/// shape of a plain fixed command.
fn counting_handler(_out: &mut dyn fmt::Write, arg: &CommandArg<'_>) -> Result<()> {
    assert_eq!(arg.key, b'@');
    assert!(arg.param.is_none());
    assert!(arg.complete);
    let count = arg
        .context::<Cell<u32>>()
        .ok_or_else(|| KeylineError::Command("missing context".into()))?;
    count.set(count.get() + 1);
    Ok(())
}

fn noop(_: &mut dyn fmt::Write, _: &CommandArg<'_>) -> Result<()> {
    Ok(())
}

fn test_block() -> CommandBlock {
    CommandBlock::new(vec![FixedCommand::new(
        b'@',
        CommandFlags::NONE,
        "Test command",
        counting_handler,
    )])
}

#[test]
fn fixed_command_dispatch() {
    let mut reg = CommandRegistry::new();
    let block = test_block();
    reg.register_commands(&block).unwrap();

    let calls = Cell::new(0u32);
    let mut slot: Option<Session> = None;
    let mut out = String::new();
    let dispatcher = reg.dispatcher();

    // A different key only prints help.
    dispatcher
        .process(Some(&mut slot), b'h', &mut out, Some(&calls))
        .unwrap();
    assert_eq!(calls.get(), 0);
    assert!(!out.is_empty());

    dispatcher
        .process(Some(&mut slot), b'@', &mut out, Some(&calls))
        .unwrap();
    assert_eq!(calls.get(), 1);
    assert!(slot.is_none());

    reg.unregister_commands(&block);
    assert!(reg.find_command(b'@').is_none());
}

#[test]
fn double_registration_leaves_count_unchanged() {
    let mut reg = CommandRegistry::new();
    let block = test_block();
    reg.register_commands(&block).unwrap();
    let before = reg.command_count();

    let err = reg.register_commands(&block).unwrap_err();
    assert!(matches!(err, KeylineError::AlreadyRegistered(_)));
    assert_eq!(reg.command_count(), before);
}

#[test]
fn unregistered_block_keys_resolve_to_nothing() {
    let mut reg = CommandRegistry::new();
    let keys = [b'a', b'b', b'+', b'-'];
    let block = CommandBlock::new(
        keys.iter()
            .map(|&k| {
                FixedCommand::new(k, CommandFlags::NONE, "x", |_, _| Ok(()))
            })
            .collect(),
    );
    reg.register_commands(&block).unwrap();
    reg.unregister_commands(&block);
    for k in keys {
        assert!(reg.find_command(k).is_none());
    }
}

#[test]
fn every_unbound_key_prints_help() {
    let mut reg = CommandRegistry::new();
    reg.register_commands(&test_block()).unwrap();
    let dispatcher = reg.dispatcher();

    for k in 1..=u8::MAX {
        if k == b'@' || k == b'.' {
            continue;
        }
        let mut slot = None;
        let mut out = String::new();
        dispatcher.process(Some(&mut slot), k, &mut out, None).unwrap();
        assert!(out.contains("--- Help ---"), "key {k:#04x}");
        assert!(slot.is_none());
    }
}

#[test]
fn parameter_entry_reports_once() {
    let params: Rc<RefCell<Vec<(String, bool)>>> = Rc::default();
    let seen = Rc::clone(&params);
    let mut reg = CommandRegistry::new();
    reg.register_commands(&CommandBlock::new(vec![FixedCommand::new(
        b'k',
        CommandFlags::PARAM,
        "Keypad",
        move |_out, arg| {
            seen.borrow_mut()
                .push((arg.param.unwrap_or_default().to_string(), arg.complete));
            Ok(())
        },
    )]))
    .unwrap();

    let dispatcher = reg.dispatcher();
    let mut slot = None;
    let mut out = String::new();
    for k in [b'k', b'1', b'2', b'3', key::ENTER] {
        dispatcher.process(Some(&mut slot), k, &mut out, None).unwrap();
    }
    assert_eq!(*params.borrow(), vec![("123".to_string(), true)]);
    assert!(slot.is_none());
}

#[test]
fn escape_at_any_point_invokes_nothing() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);
    let mut reg = CommandRegistry::new();
    reg.register_commands(&CommandBlock::new(vec![FixedCommand::new(
        b'k',
        CommandFlags::PARAM,
        "Keypad",
        move |_, _| {
            counter.set(counter.get() + 1);
            Ok(())
        },
    )]))
    .unwrap();
    let dispatcher = reg.dispatcher();
    let typed = b"k12345";

    for cut in 1..=typed.len() {
        let mut slot = None;
        let mut out = String::new();
        for &k in &typed[..cut] {
            dispatcher.process(Some(&mut slot), k, &mut out, None).unwrap();
        }
        dispatcher
            .process(Some(&mut slot), key::ESC, &mut out, None)
            .unwrap();
        assert!(slot.is_none());
    }
    assert_eq!(calls.get(), 0);
}

fn long_registry(calls: &Rc<Cell<u32>>) -> (CommandRegistry, [LongCommand; 1]) {
    let counter = Rc::clone(calls);
    let entries = [LongCommand::new(
        "test",
        CommandFlags::NONE,
        "Test Command",
        move |_, arg| {
            assert_eq!(arg.name, Some("test"));
            assert_eq!(arg.param, Some("123"));
            counter.set(counter.get() + 1);
            Ok(())
        },
    )];
    let mut reg = CommandRegistry::new();
    assert!(reg.find_long_command("test").is_none());
    reg.register_long_commands(&entries).unwrap();
    (reg, entries)
}

#[test]
fn long_line_runs_handler() {
    let calls = Rc::new(Cell::new(0u32));
    let (mut reg, entries) = long_registry(&calls);
    assert!(reg.find_long_command("test").is_some());

    let mut out = String::new();
    reg.dispatcher()
        .process_long_line("test 123", &mut out, None)
        .unwrap();
    assert_eq!(calls.get(), 1);

    reg.unregister_long_commands(&entries);
    assert!(reg.find_long_command("test").is_none());
}

#[test]
fn long_line_unknown_name_is_reported() {
    let calls = Rc::new(Cell::new(0u32));
    let (reg, _entries) = long_registry(&calls);
    let mut out = String::new();
    reg.dispatcher()
        .process_long_line("bogus", &mut out, None)
        .unwrap();
    assert_eq!(out, "command not found (bogus)\n");
    assert_eq!(calls.get(), 0);
}

#[test]
fn long_names_differing_in_case_collide() {
    let mut reg = CommandRegistry::new();
    reg.register_long_commands(&[LongCommand::new("Test", CommandFlags::NONE, "", noop)])
        .unwrap();
    let err = reg
        .register_long_commands(&[LongCommand::new("test", CommandFlags::NONE, "", noop)])
        .unwrap_err();
    assert!(matches!(err, KeylineError::AlreadyRegistered(_)));
}

#[test]
fn long_register_unregister_round_trip() {
    let names = ["answer", "dial", "hangup", "mute", "reginfo"];
    let entries: Vec<LongCommand> = names
        .iter()
        .map(|n| LongCommand::new(*n, CommandFlags::NONE, "desc", noop))
        .collect();

    let mut reg = CommandRegistry::new();
    reg.register_long_commands(&entries).unwrap();
    assert_eq!(reg.long_count(), names.len());
    reg.unregister_long_commands(&entries);

    for name in names {
        assert!(reg.find_long_command(name).is_none());
    }
    let help = render_help(&reg).unwrap();
    assert!(help.contains("Long commands: (0)"));
}

#[test]
fn typed_long_command_through_editor() {
    let calls = Rc::new(Cell::new(0u32));
    let (reg, _entries) = long_registry(&calls);
    let dispatcher = reg.dispatcher();
    let mut slot = None;
    let mut out = String::new();
    for &k in b".tesx\x7ft 123\n" {
        dispatcher.process(Some(&mut slot), k, &mut out, None).unwrap();
    }
    assert_eq!(calls.get(), 1);
    assert!(slot.is_none());
}

#[test]
fn failed_registration_teardown_keeps_earlier_owner() {
    let mut reg = CommandRegistry::new();
    let first = [LongCommand::new("hold", CommandFlags::NONE, "First hold", noop)];
    reg.register_long_commands(&first).unwrap();

    let second = [
        LongCommand::new("answer", CommandFlags::NONE, "Answer", noop),
        LongCommand::new("HOLD", CommandFlags::NONE, "Second hold", noop),
    ];
    let err = reg.register_long_commands(&second).unwrap_err();
    assert!(matches!(err, KeylineError::AlreadyRegistered(_)));
    reg.unregister_long_commands(&second);

    let hold = reg.find_long_command("hold").unwrap();
    assert_eq!(hold.description(), "First hold");
    assert!(reg.find_long_command("answer").is_none());
}
