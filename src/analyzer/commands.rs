//
// Part of colander
// Copyright (c) 2026 The Colander Developers
// License: MIT
//

//! Second-phase parsing of commands: checks that the identifier is
//! supported and that the arguments fit it. The `previous` identifier is
//! threaded through each block to verify if/elsif/else chaining.

use crate::address;
use crate::common::{NodeId, Script};
use crate::error::Error;
use crate::extensions;
use crate::mailbox;
use crate::mime;
use crate::notify;

pub(crate) fn parse(script: &mut Script, command: NodeId, previous: &str)
{
	let arguments = script.argument_list(command);
	script.flag_doubly_valued(arguments);

	let identifier = script.identifier(command).to_string();

	let mut has_test = false;
	let mut has_block = false;

	match identifier.as_str()
	{
		"" => script.set_error(command, Error::CommandNameEmpty),
		"if" =>
		{
			has_test = true;
			has_block = true;
		}
		"elsif" =>
		{
			has_test = true;
			has_block = true;
			if previous != "if" && previous != "elsif"
			{
				script.set_error(command, Error::ElsifWithoutIf);
			}
		}
		"else" =>
		{
			has_block = true;
			if previous != "if" && previous != "elsif"
			{
				script.set_error(command, Error::ElseWithoutIf);
			}
		}
		"require" => parse_require(script, command, arguments),
		"stop" | "keep" | "discard" => (),
		"reject" =>
		{
			script.require(command, "reject");
			// reject without a reason is acceptable
			if !script.arguments(arguments).is_empty()
			{
				script.number_remaining_arguments(arguments);
				let _ = script.take_string(arguments, 1);
			}
		}
		"ereject" =>
		{
			script.require(command, "reject");
			script.number_remaining_arguments(arguments);
			let _ = script.take_string(arguments, 1);
		}
		"fileinto" => parse_fileinto(script, command, arguments),
		"redirect" =>
		{
			let _ = script.find_tag(arguments, ":copy");
			script.number_remaining_arguments(arguments);
			let s = script.take_string(arguments, 1);
			if address::assert_single(&s).is_err()
			{
				script.set_error(command, Error::ExpectedAddress { got: s });
			}
		}
		"vacation" => parse_vacation(script, command, arguments),
		"setflag" | "addflag" | "removeflag" =>
		{
			script.number_remaining_arguments(arguments);
			let _ = script.take_string_list(arguments, 1);
		}
		"notify" => parse_notify(script, command, arguments),
		_ =>
		{
			script.set_error(command, Error::CommandUnknown {
				name: identifier.clone(),
			});
			// The schema is unknowable, so consume the arguments rather
			// than let the residual sweep pile shape errors onto them.
			for argument in script.arguments(arguments).to_vec()
			{
				script.set_parsed(argument, true);
			}
		}
	}

	script.flag_unparsed_as_bad(arguments);

	let tests: Vec<NodeId> = script.tests(arguments).to_vec();
	if has_test
	{
		if tests.len() != 1
		{
			script.set_error(command, Error::RequiresOneTest {
				name: identifier.clone(),
			});
		}
		for &test in &tests
		{
			super::tests::parse(script, test);
			if has_block
			{
				if let Some(block) = script.block(command)
				{
					// The block inherits the suppression scope or the
					// extensions granted by an ihave condition.
					if script.ihave_failed(test)
					{
						script.set_ihave_failed(block);
					}
					else
					{
						let granted = script.added_extensions(test).to_vec();
						script.add_extensions(block, &granted);
					}
				}
			}
		}
	}
	else if !tests.is_empty()
	{
		for &test in &tests
		{
			script.set_error(test, Error::DoesNotUseTests {
				name: identifier.clone(),
			});
		}
	}

	if has_block
	{
		match script.block(command)
		{
			None =>
			{
				script.set_error(command, Error::RequiresBlock {
					name: identifier.clone(),
				});
			}
			Some(block) =>
			{
				let commands: Vec<NodeId> = script.commands(block).to_vec();
				let mut prev = String::new();
				for c in commands
				{
					parse(script, c, &prev);
					prev = script.identifier(c).to_string();
				}
			}
		}
	}
	else if let Some(block) = script.block(command)
	{
		// Flagged, and not descended into.
		script.set_error(block, Error::DoesNotUseBlock {
			name: identifier.clone(),
		});
	}
}

fn parse_require(script: &mut Script, command: NodeId, arguments: NodeId)
{
	script.number_remaining_arguments(arguments);
	let entries = script.take_string_list(arguments, 1);
	let mut supported = Vec::new();
	let mut unsupported = Vec::new();
	for entry in entries
	{
		if extensions::is_supported(&entry)
		{
			supported.push(entry);
		}
		else
		{
			unsupported.push(entry);
		}
	}
	if !script.require_permitted(command)
	{
		script.set_error(command, Error::RequireNotPermitted);
	}
	if !unsupported.is_empty()
	{
		script.set_error(command, Error::UnsupportedExtensions {
			names: unsupported,
		});
	}
	if script.require_permitted(command)
	{
		// The supported subset is granted even if other entries failed.
		if let Some(parent) = script.parent(command)
		{
			script.add_extensions(parent, &supported);
		}
	}
}

fn parse_fileinto(script: &mut Script, command: NodeId, arguments: NodeId)
{
	script.require(command, "fileinto");
	if script.find_tag(arguments, ":copy").is_some()
	{
		script.require(command, "copy");
	}
	if script.find_tag(arguments, ":flags").is_some()
	{
		script.require(command, "imap4flags");
		let _ = script.take_tagged_string_list(arguments, ":flags");
	}
	script.number_remaining_arguments(arguments);
	let mailbox = script.take_string(arguments, 1);
	let prefixed = format!("/{}", mailbox);
	if !mailbox::valid_name(&mailbox) && !mailbox::valid_name(&prefixed)
	{
		script.set_error(command, Error::InvalidMailboxName {
			name: mailbox,
		});
	}
	else if let Some(rest) = mailbox.strip_prefix("INBOX.")
	{
		// A script that wants to reference a mailbox called INBOX.x
		// must use lower case (inbox.x).
		let suggestion =
			rest.split('.').collect::<Vec<&str>>().join("/");
		script.set_error(command, Error::CyrusMailboxSyntax {
			name: mailbox,
			suggestion,
		});
	}
}

fn parse_vacation(script: &mut Script, command: NodeId, arguments: NodeId)
{
	// vacation [":days" number] [":subject" string]
	//          [":from" string] [":addresses" string-list]
	//          [":mime"] [":handle" string] <reason: string>

	script.require(command, "vacation");

	let mut days = 7;
	if script.find_tag(arguments, ":days").is_some()
	{
		days = script.take_tagged_number(arguments, ":days");
	}
	if !(1..=365).contains(&days)
	{
		script.tag_error(arguments, ":days", Error::DaysOutOfRange);
	}

	// Any subject is acceptable.
	let _ = script.take_tagged_string(arguments, ":subject");

	if script.find_tag(arguments, ":from").is_some()
	{
		let from = script.take_tagged_string(arguments, ":from");
		parse_as_address(script, arguments, &from, ":from");
	}

	if script.find_tag(arguments, ":addresses").is_some()
	{
		let addresses =
			script.take_tagged_string_list(arguments, ":addresses");
		for address in &addresses
		{
			parse_as_address(script, arguments, address, ":addresses");
		}
	}

	let mime_reason = script.find_tag(arguments, ":mime").is_some();

	let _ = script.take_tagged_string(arguments, ":handle");

	script.number_remaining_arguments(arguments);
	let reason = script.take_string(arguments, 1);
	if mime_reason
	{
		if !reason.is_ascii()
		{
			// so says the RFC
			script.set_error(command, Error::MimeNotAscii);
		}
		match mime::parse(&reason)
		{
			Err(error) =>
			{
				script.set_error(command, Error::MimeParse {
					message: error.to_string(),
				});
			}
			Ok(entity) =>
			{
				for field in &entity.fields
				{
					if !field.name.starts_with("Content-")
					{
						script.set_error(command,
							Error::HeaderFieldNotPermitted {
								name: field.name.clone(),
							});
					}
				}
				if entity.text.is_empty()
				{
					script.set_error(command, Error::EmptyVacationReply);
				}
			}
		}
	}
	else if reason.is_empty()
	{
		script.set_error(command, Error::EmptyVacationText);
	}
}

fn parse_notify(script: &mut Script, command: NodeId, arguments: NodeId)
{
	script.require(command, "enotify");

	let mut from = String::new();
	if script.find_tag(arguments, ":from").is_some()
	{
		from = script.take_tagged_string(arguments, ":from");
	}

	let mut importance = "2".to_string();
	if script.find_tag(arguments, ":importance").is_some()
	{
		importance = script.take_tagged_string(arguments, ":importance");
	}
	if !matches!(importance.chars().next(), Some('1'..='3'))
	{
		script.tag_error(arguments, ":importance",
			Error::ImportanceOutOfRange);
	}

	if script.find_tag(arguments, ":options").is_some()
	{
		let _ = script.take_tagged_string_list(arguments, ":options");
	}

	let mut message = String::new();
	if script.find_tag(arguments, ":message").is_some()
	{
		message = script.take_tagged_string(arguments, ":message");
	}

	script.number_remaining_arguments(arguments);
	let url = script.take_string(arguments, 1);
	let url_argument = script.take_argument(arguments, 1);

	match notify::Method::parse(&url)
	{
		Err(error) =>
		{
			let error = Error::BadNotifyMethod {
				message: error.to_string(),
			};
			match url_argument
			{
				Some(argument) => script.set_error(argument, error),
				None => script.set_error(command, error),
			}
		}
		Ok(method) =>
		{
			if script.find_tag(arguments, ":from").is_some()
			{
				if let Err(error) = method.check_from(&from)
				{
					script.tag_error(arguments, ":from", Error::BadAddress {
						message: error.to_string(),
					});
				}
			}
			if script.find_tag(arguments, ":message").is_some()
			{
				if let Err(error) = method.check_message(&message)
				{
					script.tag_error(arguments, ":message",
						Error::BadNotifyMethod {
							message: error.to_string(),
						});
				}
			}
		}
	}
}

fn parse_as_address(script: &mut Script, arguments: NodeId, s: &str,
	tag: &str)
{
	if let Err(error) = address::assert_single(s)
	{
		script.tag_error(arguments, tag, Error::BadAddress {
			message: error.to_string(),
		});
	}
}
