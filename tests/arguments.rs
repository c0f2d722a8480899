//
// Part of colander
// Copyright (c) 2026 The Colander Developers
// License: MIT
//

//! The argument-list utilities that the per-identifier schemas are built
//! from, exercised directly on a throwaway command.

use colander::*;

use pretty_assertions::assert_eq;

fn span(start: usize, end: usize) -> Span
{
	Span::new(start, end)
}

fn codes(script: &Script) -> Vec<u16>
{
	script.diagnostics().iter().map(|x| x.code).collect()
}

fn code_of(script: &Script, id: NodeId) -> Option<u16>
{
	script.error(id).map(|x| x.code())
}

fn holder(script: &mut Script) -> NodeId
{
	let root = script.root();
	script.add_command(root, "keep", span(0, 100))
}

#[test]
fn find_tag_flags_duplicates()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let first = script.add_tag(keep, ":copy", span(5, 10));
	let second = script.add_tag(keep, ":copy", span(11, 16));

	let found = script.find_tag(keep, ":copy");

	assert_eq!(found, Some(first));
	assert_eq!(code_of(&script, first), Some(302));
	assert_eq!(code_of(&script, second), Some(302));
	assert!(script.parsed(first));
	assert!(!script.parsed(second));
}

#[test]
fn argument_following_tag_takes_the_follower()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let tag = script.add_tag(keep, ":days", span(5, 10));
	let number = script.add_number(keep, 7, span(11, 12));

	let follower = script.argument_following_tag(keep, ":days");

	assert_eq!(follower, Some(number));
	assert!(script.parsed(tag));
	assert!(script.parsed(number));
	assert_eq!(codes(&script), Vec::<u16>::new());
}

#[test]
fn tag_as_last_argument()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let tag = script.add_tag(keep, ":days", span(5, 10));

	let follower = script.argument_following_tag(keep, ":days");

	assert_eq!(follower, None);
	assert_eq!(code_of(&script, tag), Some(303));
}

#[test]
fn tag_used_twice()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let first = script.add_tag(keep, ":days", span(5, 10));
	let second = script.add_tag(keep, ":days", span(11, 16));
	script.add_number(keep, 7, span(17, 18));

	let follower = script.argument_following_tag(keep, ":days");

	// The argument right after the first occurrence is the follower,
	// even though it is the duplicated tag itself.
	assert_eq!(follower, Some(second));
	assert_eq!(code_of(&script, first), Some(301));
	assert_eq!(code_of(&script, second), Some(301));
}

#[test]
fn take_tagged_string_returns_the_value()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	script.add_tag(keep, ":subject", span(5, 13));
	script.add_string(keep, "hi", span(14, 18));

	assert_eq!(script.take_tagged_string(keep, ":subject"), "hi");
	assert_eq!(script.take_tagged_string(keep, ":handle"), "");
}

#[test]
fn take_tagged_number_checks_the_shape()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	script.add_tag(keep, ":days", span(5, 10));
	let value = script.add_string(keep, "x", span(11, 14));

	assert_eq!(script.take_tagged_number(keep, ":days"), 0);
	assert_eq!(code_of(&script, value), Some(201));
}

#[test]
fn allow_one_tag_cites_the_first()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let over = script.add_tag(keep, ":over", span(5, 10));
	let under = script.add_tag(keep, ":under", span(11, 17));

	script.allow_one_tag(keep, &[":over", ":under"]);

	assert_eq!(code_of(&script, over), Some(310));
	assert_eq!(code_of(&script, under), Some(311));
	let messages: Vec<String> = script
		.diagnostics()
		.iter()
		.map(|x| x.message.clone())
		.collect();
	assert_eq!(messages, vec![
		"Mutually exclusive tags used".to_string(),
		"Tag :over conflicts with :under".to_string(),
	]);
}

#[test]
fn numbered_arguments_are_taken_by_position()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	script.add_string(keep, "a", span(5, 8));
	script.add_number(keep, 5, span(9, 10));
	script.add_strings(keep, &["b", "c"], span(11, 21));

	script.number_remaining_arguments(keep);

	assert_eq!(script.take_string(keep, 1), "a");
	assert_eq!(script.take_number(keep, 2), 5);
	assert_eq!(script.take_string_list(keep, 3),
		vec!["b".to_string(), "c".to_string()]);
	assert_eq!(codes(&script), Vec::<u16>::new());

	assert_eq!(script.take_string(keep, 4), "");
	assert_eq!(code_of(&script, script.argument_list(keep)), Some(401));
}

#[test]
fn numbering_snapshots_only_unparsed_arguments()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let a = script.add_string(keep, "a", span(5, 8));
	let b = script.add_string(keep, "b", span(9, 12));

	script.number_remaining_arguments(keep);
	assert_eq!(script.numbering(script.argument_list(keep)),
		&[a, b][..]);
	assert_eq!(script.take_string(keep, 1), "a");

	// The snapshot is reassigned, not appended to.
	script.number_remaining_arguments(keep);
	assert_eq!(script.numbering(script.argument_list(keep)), &[b][..]);
	assert_eq!(script.take_string(keep, 1), "b");
}

#[test]
fn take_argument_indexes_without_consuming()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	script.add_string(keep, "a", span(5, 8));
	let b = script.add_string(keep, "b", span(9, 12));
	script.add_string(keep, "c", span(13, 16));

	script.number_remaining_arguments(keep);

	assert_eq!(script.take_argument(keep, 2), Some(b));
	assert!(!script.parsed(b));
	assert_eq!(script.take_argument(keep, 5), None);
	assert_eq!(codes(&script), Vec::<u16>::new());
}

#[test]
fn unparsed_arguments_are_flagged_by_shape()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let tag = script.add_tag(keep, ":x", span(5, 7));
	let number = script.add_number(keep, 5, span(8, 9));
	let string = script.add_string(keep, "s", span(10, 13));

	script.flag_unparsed_as_bad(keep);

	assert_eq!(code_of(&script, tag), Some(300));
	assert_eq!(code_of(&script, number), Some(410));
	assert_eq!(code_of(&script, string), Some(411));
}

#[test]
fn the_sweep_skips_parsed_and_errored_arguments()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let copy = script.add_tag(keep, ":copy", span(5, 10));
	let first = script.add_tag(keep, ":y", span(11, 13));
	let second = script.add_tag(keep, ":y", span(14, 16));

	let _ = script.find_tag(keep, ":copy");
	let _ = script.find_tag(keep, ":y");
	script.flag_unparsed_as_bad(keep);

	assert_eq!(script.error(copy), None);
	// The duplicate keeps its duplication error instead of gaining a
	// misleading "unknown tag" one.
	assert_eq!(code_of(&script, first), Some(302));
	assert_eq!(code_of(&script, second), Some(302));
}

#[test]
fn doubly_valued_argument_is_diagnosed()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let argument = script.add_string(keep, "s", span(5, 8));
	script.set_number(argument, 3);

	analyze(&mut script);

	assert_eq!(code_of(&script, argument), Some(240));
	assert_eq!(codes(&script), vec![240]);
}

#[test]
fn shape_assertions()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	let tag = script.add_tag(keep, ":x", span(5, 7));
	let number = script.add_number(keep, 5, span(8, 9));
	let single = script.add_string(keep, "s", span(10, 13));
	let pair = script.add_strings(keep, &["a", "b"], span(14, 24));
	let empty = script.add_strings(keep, &[], span(25, 27));

	script.assert_number(tag);
	assert_eq!(code_of(&script, tag), Some(200));
	script.assert_string(number);
	assert_eq!(code_of(&script, number), Some(211));
	script.assert_string(pair);
	assert_eq!(code_of(&script, pair), Some(213));
	script.assert_string_list(empty);
	assert_eq!(code_of(&script, empty), Some(222));
	script.assert_tag(single);
	assert_eq!(code_of(&script, single), Some(231));

	// A one-element string list is a single string; no new error.
	script.clear_error(single);
	script.assert_string(single);
	assert_eq!(script.error(single), None);
}

#[test]
fn tag_error_falls_back_to_the_list()
{
	let mut script = Script::new();
	let keep = holder(&mut script);

	script.tag_error(keep, ":nope", Error::DaysOutOfRange);

	assert_eq!(code_of(&script, script.argument_list(keep)), Some(520));
}

#[test]
fn tag_error_prefers_the_follower()
{
	let mut script = Script::new();
	let keep = holder(&mut script);
	script.add_tag(keep, ":days", span(5, 10));
	let number = script.add_number(keep, 999, span(11, 14));

	script.tag_error(keep, ":days", Error::DaysOutOfRange);

	assert_eq!(code_of(&script, number), Some(520));
}
