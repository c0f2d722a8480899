//
// Part of colander
// Copyright (c) 2026 The Colander Developers
// License: MIT
//

//! Argument consumption: the shape assertions and the argument-list
//! utilities that the per-identifier validators are built from. Every
//! operation here takes the command, test or arguments production and
//! resolves it to the argument list.

use crate::common::{ArgumentValue, NodeId, Script};
use crate::error::Error;

/// Shape assertions on a single argument.
impl Script
{
	/// Records an error if this argument isn't a number.
	pub fn assert_number(&mut self, argument: NodeId)
	{
		let error = match self.value(argument)
		{
			ArgumentValue::Tag(_) => Some(Error::ExpectedNumberGotTag),
			ArgumentValue::Strings(_) => Some(Error::ExpectedNumberGotStrings),
			ArgumentValue::Number(_) | ArgumentValue::None => None,
		};
		if let Some(error) = error
		{
			self.set_error(argument, error);
		}
	}

	/// Records an error if this argument isn't a single string, i.e. a
	/// one-element string list.
	pub fn assert_string(&mut self, argument: NodeId)
	{
		let error = match self.value(argument)
		{
			ArgumentValue::Tag(_) => Some(Error::ExpectedStringGotTag),
			ArgumentValue::Number(_) => Some(Error::ExpectedStringGotNumber),
			ArgumentValue::None => Some(Error::ExpectedSingleString),
			ArgumentValue::Strings(strings) if strings.is_empty() =>
			{
				Some(Error::ExpectedSingleString)
			}
			ArgumentValue::Strings(strings) if strings.len() > 1 =>
			{
				Some(Error::ExpectedSingleStringGotList)
			}
			ArgumentValue::Strings(_) => None,
		};
		if let Some(error) = error
		{
			self.set_error(argument, error);
		}
	}

	/// Records an error if this argument isn't a non-empty string list.
	pub fn assert_string_list(&mut self, argument: NodeId)
	{
		let error = match self.value(argument)
		{
			ArgumentValue::Tag(_) => Some(Error::ExpectedStringListGotTag),
			ArgumentValue::Number(_) =>
			{
				Some(Error::ExpectedStringListGotNumber)
			}
			ArgumentValue::None => Some(Error::ExpectedStringList),
			ArgumentValue::Strings(strings) if strings.is_empty() =>
			{
				Some(Error::ExpectedStringList)
			}
			ArgumentValue::Strings(_) => None,
		};
		if let Some(error) = error
		{
			self.set_error(argument, error);
		}
	}

	/// Records an error if this argument isn't a tag.
	pub fn assert_tag(&mut self, argument: NodeId)
	{
		let error = match self.value(argument)
		{
			ArgumentValue::Number(_) => Some(Error::ExpectedTagGotNumber),
			ArgumentValue::Strings(_) => Some(Error::ExpectedTagGotStrings),
			ArgumentValue::Tag(_) | ArgumentValue::None => None,
		};
		if let Some(error) = error
		{
			self.set_error(argument, error);
		}
	}
}

/// Argument-list utilities.
impl Script
{
	fn has_tag(&self, argument: NodeId, tag: &str) -> bool
	{
		self.tag(argument).map_or(false, |t| t == tag)
	}

	/// Finds the argument tagged `tag` and marks it parsed. If the tag
	/// occurs more than once, all occurrences are flagged as bad and the
	/// first is returned.
	pub fn find_tag(&mut self, owner: NodeId, tag: &str) -> Option<NodeId>
	{
		let list = self.argument_list(owner);
		let arguments = self.arguments(list).to_vec();
		let mut first = None;
		for argument in arguments
		{
			if !self.has_tag(argument, tag)
			{
				continue;
			}
			match first
			{
				None => first = Some(argument),
				Some(f) =>
				{
					self.set_error(f, Error::TagOccursTwice {
						tag: tag.to_string(),
					});
					self.set_error(argument, Error::TagOccursTwice {
						tag: tag.to_string(),
					});
				}
			}
		}
		if let Some(f) = first
		{
			self.set_parsed(f, true);
		}
		first
	}

	/// Makes sure that `tag` occurs either zero or one times, and
	/// returns the argument following it, marking both parsed. Records
	/// an error if the tag occurs more than once or occurs as the last
	/// argument.
	pub fn argument_following_tag(&mut self, owner: NodeId, tag: &str)
	-> Option<NodeId>
	{
		let list = self.argument_list(owner);
		let arguments = self.arguments(list).to_vec();
		let mut first: Option<NodeId> = None;
		let mut result: Option<NodeId> = None;
		for (index, &argument) in arguments.iter().enumerate()
		{
			if self.has_tag(argument, tag)
			{
				match first
				{
					None =>
					{
						first = Some(argument);
						self.set_parsed(argument, true);
					}
					Some(f) =>
					{
						self.set_error(f, Error::TagUsedTwice {
							tag: tag.to_string(),
						});
						self.set_error(argument, Error::TagUsedTwice {
							tag: tag.to_string(),
						});
					}
				}
			}
			if let Some(f) = first
			{
				if result.is_none()
				{
					match arguments.get(index + 1)
					{
						Some(&follower) =>
						{
							result = Some(follower);
							self.set_parsed(follower, true);
						}
						None =>
						{
							self.set_error(f, Error::TagNotFollowed {
								tag: tag.to_string(),
							});
						}
					}
				}
			}
		}
		result
	}

	/// Looks for `tag` and returns the value of the following string, or
	/// an empty string if the tag doesn't occur. Records an error if
	/// anything looks wrong.
	pub fn take_tagged_string(&mut self, owner: NodeId, tag: &str) -> String
	{
		let argument = match self.argument_following_tag(owner, tag)
		{
			Some(a) => a,
			None => return String::new(),
		};
		self.assert_string(argument);
		self.strings(argument)
			.and_then(|strings| strings.first())
			.cloned()
			.unwrap_or_default()
	}

	/// Looks for `tag` and returns the value of the following string
	/// list, or an empty list if the tag doesn't occur.
	pub fn take_tagged_string_list(&mut self, owner: NodeId, tag: &str)
	-> Vec<String>
	{
		let argument = match self.argument_following_tag(owner, tag)
		{
			Some(a) => a,
			None => return Vec::new(),
		};
		self.assert_string_list(argument);
		self.strings(argument).map(|s| s.to_vec()).unwrap_or_default()
	}

	/// Looks for `tag` and returns the value of the following number, or
	/// 0 if the tag doesn't occur.
	pub fn take_tagged_number(&mut self, owner: NodeId, tag: &str) -> u64
	{
		let argument = match self.argument_following_tag(owner, tag)
		{
			Some(a) => a,
			None => return 0,
		};
		self.assert_number(argument);
		self.number(argument).unwrap_or(0)
	}

	/// Asserts that at most one of `tags` occurs. If two or more do, the
	/// first is flagged and each subsequent one cites the first.
	pub fn allow_one_tag(&mut self, owner: NodeId, tags: &[&str])
	{
		let list = self.argument_list(owner);
		let found: Vec<NodeId> = self
			.arguments(list)
			.iter()
			.copied()
			.filter(|&a| {
				self.tag(a).map_or(false, |t| tags.contains(&t))
			})
			.collect();
		if found.len() < 2
		{
			return;
		}
		let first_tag = self.tag(found[0]).unwrap_or("").to_string();
		self.set_error(found[0], Error::MutuallyExclusiveTags);
		for &argument in &found[1..]
		{
			let second = self.tag(argument).unwrap_or("").to_string();
			self.set_error(argument, Error::TagConflict {
				first: first_tag.clone(),
				second,
			});
		}
	}

	/// Snapshots the still-unparsed arguments into the numbering
	/// sequence, which `take_string_list`, `take_string` and
	/// `take_number` index from 1. A later call replaces the snapshot.
	/// This does not mark any argument as parsed.
	pub fn number_remaining_arguments(&mut self, owner: NodeId)
	{
		let list = self.argument_list(owner);
		let numbered: Vec<NodeId> = self
			.arguments(list)
			.iter()
			.copied()
			.filter(|&a| !self.parsed(a))
			.collect();
		self.set_numbering(list, numbered);
	}

	/// Returns numbered argument `n` without asserting anything or
	/// marking it parsed. The first argument is numbered 1.
	pub fn take_argument(&mut self, owner: NodeId, n: usize) -> Option<NodeId>
	{
		let list = self.argument_list(owner);
		n.checked_sub(1)
			.and_then(|index| self.numbering(list).get(index))
			.copied()
	}

	/// Takes numbered argument `n` as a string list, or records an error
	/// on the argument list if there is no such argument.
	pub fn take_string_list(&mut self, owner: NodeId, n: usize) -> Vec<String>
	{
		let list = self.argument_list(owner);
		let argument = match self.take_argument(list, n)
		{
			Some(a) => a,
			None =>
			{
				self.set_error(list, Error::MissingStringListArgument);
				return Vec::new();
			}
		};
		self.assert_string_list(argument);
		self.set_parsed(argument, true);
		self.strings(argument).map(|s| s.to_vec()).unwrap_or_default()
	}

	/// Takes numbered argument `n` as a single string, or records an
	/// error on the argument list if there is no such argument.
	pub fn take_string(&mut self, owner: NodeId, n: usize) -> String
	{
		let list = self.argument_list(owner);
		let argument = match self.take_argument(list, n)
		{
			Some(a) => a,
			None =>
			{
				self.set_error(list, Error::MissingStringArgument);
				return String::new();
			}
		};
		self.assert_string(argument);
		self.set_parsed(argument, true);
		self.strings(argument)
			.and_then(|strings| strings.first())
			.cloned()
			.unwrap_or_default()
	}

	/// Takes numbered argument `n` as a number, or records an error on
	/// the argument list if there is no such argument.
	pub fn take_number(&mut self, owner: NodeId, n: usize) -> u64
	{
		let list = self.argument_list(owner);
		let argument = match self.take_argument(list, n)
		{
			Some(a) => a,
			None =>
			{
				self.set_error(list, Error::MissingNumberArgument);
				return 0;
			}
		};
		self.assert_number(argument);
		self.set_parsed(argument, true);
		self.number(argument).unwrap_or(0)
	}

	/// Marks every still-unparsed argument as an error tailored to its
	/// value shape. Arguments that already carry a diagnostic keep it.
	pub fn flag_unparsed_as_bad(&mut self, owner: NodeId)
	{
		let list = self.argument_list(owner);
		let arguments = self.arguments(list).to_vec();
		for argument in arguments
		{
			if self.parsed(argument) || self.error(argument).is_some()
			{
				continue;
			}
			let error = match self.value(argument)
			{
				ArgumentValue::Number(_) => Error::StrayNumber,
				ArgumentValue::Strings(_) => Error::StrayString,
				ArgumentValue::Tag(tag) => Error::UnknownTag {
					tag: tag.clone(),
				},
				ArgumentValue::None => Error::StrayArgument,
			};
			self.set_error(argument, error);
		}
	}

	/// Flags arguments on which more than one value setter fired.
	pub(crate) fn flag_doubly_valued(&mut self, owner: NodeId)
	{
		let list = self.argument_list(owner);
		let arguments = self.arguments(list).to_vec();
		for argument in arguments
		{
			if self.shapes(argument).len() > 1
			{
				self.set_error(argument, Error::ArgumentSeveralValues);
			}
		}
	}

	/// Records `error` on the argument following `tag`, falling back to
	/// the tag itself, falling back to the argument list.
	pub fn tag_error(&mut self, owner: NodeId, tag: &str, error: Error)
	{
		let list = self.argument_list(owner);
		let target = self
			.argument_following_tag(list, tag)
			.or_else(|| self.find_tag(list, tag));
		match target
		{
			Some(argument) => self.set_error(argument, error),
			None => self.set_error(list, error),
		}
	}
}
