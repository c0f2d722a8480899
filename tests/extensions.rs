//
// Part of colander
// Copyright (c) 2026 The Colander Developers
// License: MIT
//

//! require/ihave bookkeeping: which extensions become visible where, and
//! what ends up in the needed-extension tracker.

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

#[test]
fn the_supported_extension_list_is_sorted()
{
	let expected = vec![
		"body",
		"comparator-i;ascii-casemap",
		"comparator-i;ascii-numeric",
		"comparator-i;octet",
		"copy",
		"date",
		"ereject",
		"envelope",
		"fileinto",
		"ihave",
		"imap4flags",
		"reject",
		"relational",
		"subaddress",
		"vacation",
	];
	assert_eq!(extensions::supported(), expected);
	let mut sorted = extensions::supported();
	sorted.sort();
	assert_eq!(extensions::supported(), sorted);
}

#[test]
fn undeclared_extensions_are_reported_as_needed()
{
	// fileinto "Spam"; without any require
	let mut script = Script::new();
	let root = script.root();
	let fileinto = script.add_command(root, "fileinto", span(0, 16));
	script.add_string(fileinto, "Spam", span(9, 15));

	analyze(&mut script);

	assert_eq!(codes(&script), Vec::<u16>::new());
	assert!(script.needed_extensions().contains("fileinto"));
}

#[test]
fn copy_and_flags_tags_imply_their_extensions()
{
	let mut script = Script::new();
	let root = script.root();
	let fileinto = script.add_command(root, "fileinto", span(0, 40));
	script.add_tag(fileinto, ":copy", span(9, 14));
	script.add_tag(fileinto, ":flags", span(15, 21));
	script.add_strings(fileinto, &["\\Seen"], span(22, 31));
	script.add_string(fileinto, "Spam", span(32, 38));

	analyze(&mut script);

	assert_eq!(codes(&script), Vec::<u16>::new());
	assert!(script.needed_extensions().contains("fileinto"));
	assert!(script.needed_extensions().contains("copy"));
	assert!(script.needed_extensions().contains("imap4flags"));
}

#[test]
fn require_grants_the_supported_subset()
{
	// require ["fileinto", "nosuchext"]; fileinto "Spam";
	let mut script = Script::new();
	let root = script.root();
	let require = script.add_command(root, "require", span(0, 34));
	script.add_strings(require, &["fileinto", "nosuchext"], span(8, 33));
	let fileinto = script.add_command(root, "fileinto", span(35, 51));
	script.add_string(fileinto, "Spam", span(44, 50));

	analyze(&mut script);

	assert_eq!(codes(&script), vec![600]);
	assert!(script.is_visible(root, "fileinto"));
	assert!(!script.is_visible(root, "nosuchext"));
	assert!(script.needed_extensions().is_empty());
}

#[test]
fn require_must_come_first()
{
	let mut script = Script::new();
	let root = script.root();
	script.add_command(root, "keep", span(0, 5));
	let require = script.add_command(root, "require", span(6, 27));
	script.add_strings(require, &["fileinto"], span(14, 26));

	analyze(&mut script);

	assert_eq!(codes(&script), vec![112]);
	assert!(!script.is_visible(root, "fileinto"));
}

#[test]
fn require_after_require_is_still_permitted()
{
	let mut script = Script::new();
	let root = script.root();
	let first = script.add_command(root, "require", span(0, 21));
	script.add_strings(first, &["fileinto"], span(8, 20));
	let second = script.add_command(root, "require", span(22, 40));
	script.add_strings(second, &["copy"], span(30, 39));

	analyze(&mut script);

	assert_eq!(codes(&script), Vec::<u16>::new());
	assert!(script.is_visible(root, "fileinto"));
	assert!(script.is_visible(root, "copy"));
}

#[test]
fn ihave_grants_extensions_locally()
{
	// if ihave ["date"] { keep; }
	let mut script = Script::new();
	let root = script.root();
	let iff = script.add_command(root, "if", span(0, 30));
	let ihave = script.add_test(iff, "ihave", span(3, 17));
	script.add_strings(ihave, &["date"], span(9, 17));
	let block = script.add_block(iff, span(18, 30));
	script.add_command(block, "keep", span(20, 25));

	analyze(&mut script);

	assert_eq!(codes(&script), Vec::<u16>::new());
	assert!(!script.ihave_failed(ihave));
	assert!(script.is_visible(block, "date"));
	assert!(!script.is_visible(root, "date"));
	assert!(script.needed_extensions().contains("ihave"));
	assert!(!script.needed_extensions().contains("date"));
}

#[test]
fn ihave_with_any_unsupported_extension_fails()
{
	let mut script = Script::new();
	let root = script.root();
	let iff = script.add_command(root, "if", span(0, 40));
	let ihave = script.add_test(iff, "ihave", span(3, 30));
	script.add_strings(ihave, &["date", "frobnicate"], span(9, 30));
	let block = script.add_block(iff, span(31, 40));
	script.add_command(block, "keep", span(33, 38));

	analyze(&mut script);

	assert!(script.ihave_failed(ihave));
	assert!(script.ihave_failed(block));
	assert!(!script.is_visible(block, "date"));
}

#[test]
fn ihave_with_a_bad_argument_does_not_suppress()
{
	let mut script = Script::new();
	let root = script.root();
	let iff = script.add_command(root, "if", span(0, 30));
	let ihave = script.add_test(iff, "ihave", span(3, 12));
	let number = script.add_number(ihave, 3, span(9, 10));
	let block = script.add_block(iff, span(13, 30));
	script.add_command(block, "keep", span(15, 20));

	analyze(&mut script);

	assert_eq!(script.error(number).map(|x| x.code()), Some(221));
	assert!(!script.ihave_failed(ihave));
	assert!(!script.ihave_failed(block));
}

#[test]
fn allof_unions_granted_extensions()
{
	// if allof(ihave ["date"], ihave ["body"]) { keep; }
	let mut script = Script::new();
	let root = script.root();
	let iff = script.add_command(root, "if", span(0, 50));
	let allof = script.add_test(iff, "allof", span(3, 40));
	let date = script.add_test(allof, "ihave", span(9, 23));
	script.add_strings(date, &["date"], span(15, 23));
	let body = script.add_test(allof, "ihave", span(24, 38));
	script.add_strings(body, &["body"], span(30, 38));
	let block = script.add_block(iff, span(41, 50));
	script.add_command(block, "keep", span(43, 48));

	analyze(&mut script);

	assert_eq!(codes(&script), Vec::<u16>::new());
	assert!(script.is_visible(block, "date"));
	assert!(script.is_visible(block, "body"));
}

#[test]
fn anyof_inherits_a_failed_ihave()
{
	let mut script = Script::new();
	let root = script.root();
	let iff = script.add_command(root, "if", span(0, 50));
	let anyof = script.add_test(iff, "anyof", span(3, 30));
	let ihave = script.add_test(anyof, "ihave", span(9, 29));
	script.add_strings(ihave, &["frobnicate"], span(15, 29));
	let block = script.add_block(iff, span(31, 50));
	script.add_command(block, "frobnicate", span(33, 48));

	analyze(&mut script);

	assert!(script.ihave_failed(anyof));
	assert!(script.ihave_failed(block));
	assert_eq!(codes(&script), vec![101]);
}

#[test]
fn the_implicit_comparator_is_required()
{
	let mut script = Script::new();
	let root = script.root();
	let iff = script.add_command(root, "if", span(0, 40));
	let header = script.add_test(iff, "header", span(3, 30));
	script.add_strings(header, &["Subject"], span(10, 21));
	script.add_string(header, "x", span(22, 25));
	let block = script.add_block(iff, span(31, 40));
	script.add_command(block, "keep", span(33, 38));

	analyze(&mut script);

	assert!(script
		.needed_extensions()
		.contains("comparator-i;ascii-casemap"));
}

#[test]
fn a_named_comparator_is_required()
{
	let mut script = Script::new();
	let root = script.root();
	let iff = script.add_command(root, "if", span(0, 60));
	let header = script.add_test(iff, "header", span(3, 50));
	script.add_tag(header, ":comparator", span(10, 21));
	script.add_string(header, "i;octet", span(22, 31));
	script.add_strings(header, &["Subject"], span(32, 43));
	script.add_string(header, "x", span(44, 47));
	let block = script.add_block(iff, span(51, 60));
	script.add_command(block, "keep", span(53, 58));

	analyze(&mut script);

	assert_eq!(codes(&script), Vec::<u16>::new());
	assert_eq!(script.comparator(header), Some(collation::Collation::Octet));
	assert!(script.needed_extensions().contains("comparator-i;octet"));
	assert!(!script
		.needed_extensions()
		.contains("comparator-i;ascii-casemap"));
}

#[test]
fn a_declared_comparator_is_not_needed()
{
	let mut script = Script::new();
	let root = script.root();
	let require = script.add_command(root, "require", span(0, 38));
	script.add_strings(require, &["comparator-i;octet"], span(8, 37));
	let iff = script.add_command(root, "if", span(39, 99));
	let header = script.add_test(iff, "header", span(42, 89));
	script.add_tag(header, ":comparator", span(49, 60));
	script.add_string(header, "i;octet", span(61, 70));
	script.add_strings(header, &["Subject"], span(71, 82));
	script.add_string(header, "x", span(83, 86));
	let block = script.add_block(iff, span(90, 99));
	script.add_command(block, "keep", span(92, 97));

	analyze(&mut script);

	assert_eq!(codes(&script), Vec::<u16>::new());
	assert!(script.needed_extensions().is_empty());
}

#[test]
fn an_unknown_comparator_is_an_error()
{
	let mut script = Script::new();
	let root = script.root();
	let iff = script.add_command(root, "if", span(0, 60));
	let header = script.add_test(iff, "header", span(3, 50));
	script.add_tag(header, ":comparator", span(10, 21));
	let name = script.add_string(header, "i;bogus", span(22, 31));
	script.add_strings(header, &["Subject"], span(32, 43));
	script.add_string(header, "x", span(44, 47));
	let block = script.add_block(iff, span(51, 60));
	script.add_command(block, "keep", span(53, 58));

	analyze(&mut script);

	assert_eq!(script.error(name).map(|x| x.code()), Some(560));
	assert_eq!(script.comparator(header), None);
}

#[test]
fn extension_grants_deduplicate_against_ancestors()
{
	let mut script = Script::new();
	let root = script.root();
	script.add_extensions(root, &["date".to_string()]);
	script.add_extensions(root, &["date".to_string()]);

	assert_eq!(script.added_extensions(root), &["date".to_string()][..]);
}
