//
// Part of colander
// Copyright (c) 2026 The Colander Developers
// License: MIT
//

//! The semantic pass generates errors as data: each diagnostic is
//! attached to the production that caused it, and the pass never aborts,
//! so a single run yields the maximal diagnostic set.

use crate::common::Span;

use ariadne::{Label, Report, ReportKind};

/// A single diagnostic. The numeric code is stable; the rendered message
/// is not part of the stable interface.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{
	// Structural errors.
	CommandNameEmpty,
	CommandUnknown
	{
		name: String
	},
	TestUnknown
	{
		name: String
	},
	ElsifWithoutIf,
	ElseWithoutIf,
	RequireNotPermitted,
	RequiresOneTest
	{
		name: String
	},
	DoesNotUseTests
	{
		name: String
	},
	RequiresBlock
	{
		name: String
	},
	DoesNotUseBlock
	{
		name: String
	},
	AcceptsOnlyTestList
	{
		name: String
	},
	NotAcceptsOnlyTest,
	NotNeedsOneTest,
	NeedsSubsidiaryTest,

	// Argument-shape errors.
	ExpectedNumberGotTag,
	ExpectedNumberGotStrings,
	ExpectedStringGotTag,
	ExpectedStringGotNumber,
	ExpectedSingleString,
	ExpectedSingleStringGotList,
	ExpectedStringListGotTag,
	ExpectedStringListGotNumber,
	ExpectedStringList,
	ExpectedTagGotNumber,
	ExpectedTagGotStrings,
	ArgumentSeveralValues,

	// Tagged-option errors.
	UnknownTag
	{
		tag: String
	},
	TagUsedTwice
	{
		tag: String
	},
	TagOccursTwice
	{
		tag: String
	},
	TagNotFollowed
	{
		tag: String
	},
	MutuallyExclusiveTags,
	TagConflict
	{
		first: String,
		second: String,
	},

	// Positional and stray-argument errors.
	MissingStringListArgument,
	MissingStringArgument,
	MissingNumberArgument,
	MissingHeaderList,
	StrayNumber,
	StrayString,
	StrayArgument,

	// Semantic errors.
	InvalidMailboxName
	{
		name: String
	},
	CyrusMailboxSyntax
	{
		name: String,
		suggestion: String,
	},
	ExpectedAddress
	{
		got: String
	},
	BadAddress
	{
		message: String
	},
	DaysOutOfRange,
	ImportanceOutOfRange,
	MimeNotAscii,
	MimeParse
	{
		message: String
	},
	HeaderFieldNotPermitted
	{
		name: String
	},
	EmptyVacationReply,
	EmptyVacationText,
	UnsupportedEnvelopePart
	{
		part: String
	},
	EmptyHeaderFieldName,
	IllegalHeaderFieldCharacter
	{
		character: u32,
		name: String,
	},
	NotAnAddressField
	{
		name: String
	},
	OnlyOneDateField,
	UnknownComparator
	{
		name: String
	},
	UnknownRelationalOperator
	{
		name: String
	},
	NoUrls,
	BadNotifyMethod
	{
		message: String
	},

	// Extension errors.
	UnsupportedExtensions
	{
		names: Vec<String>
	},
}

impl Error
{
	pub fn code(&self) -> u16
	{
		match self
		{
			Error::CommandNameEmpty => 100,
			Error::CommandUnknown { .. } => 101,
			Error::TestUnknown { .. } => 102,
			Error::ElsifWithoutIf => 110,
			Error::ElseWithoutIf => 111,
			Error::RequireNotPermitted => 112,
			Error::RequiresOneTest { .. } => 120,
			Error::DoesNotUseTests { .. } => 121,
			Error::RequiresBlock { .. } => 122,
			Error::DoesNotUseBlock { .. } => 123,
			Error::AcceptsOnlyTestList { .. } => 124,
			Error::NotAcceptsOnlyTest => 125,
			Error::NotNeedsOneTest => 126,
			Error::NeedsSubsidiaryTest => 127,
			Error::ExpectedNumberGotTag => 200,
			Error::ExpectedNumberGotStrings => 201,
			Error::ExpectedStringGotTag => 210,
			Error::ExpectedStringGotNumber => 211,
			Error::ExpectedSingleString => 212,
			Error::ExpectedSingleStringGotList => 213,
			Error::ExpectedStringListGotTag => 220,
			Error::ExpectedStringListGotNumber => 221,
			Error::ExpectedStringList => 222,
			Error::ExpectedTagGotNumber => 230,
			Error::ExpectedTagGotStrings => 231,
			Error::ArgumentSeveralValues => 240,
			Error::UnknownTag { .. } => 300,
			Error::TagUsedTwice { .. } => 301,
			Error::TagOccursTwice { .. } => 302,
			Error::TagNotFollowed { .. } => 303,
			Error::MutuallyExclusiveTags => 310,
			Error::TagConflict { .. } => 311,
			Error::MissingStringListArgument => 400,
			Error::MissingStringArgument => 401,
			Error::MissingNumberArgument => 402,
			Error::MissingHeaderList => 403,
			Error::StrayNumber => 410,
			Error::StrayString => 411,
			Error::StrayArgument => 412,
			Error::InvalidMailboxName { .. } => 500,
			Error::CyrusMailboxSyntax { .. } => 501,
			Error::ExpectedAddress { .. } => 510,
			Error::BadAddress { .. } => 511,
			Error::DaysOutOfRange => 520,
			Error::ImportanceOutOfRange => 521,
			Error::MimeNotAscii => 530,
			Error::MimeParse { .. } => 531,
			Error::HeaderFieldNotPermitted { .. } => 533,
			Error::EmptyVacationReply => 534,
			Error::EmptyVacationText => 535,
			Error::UnsupportedEnvelopePart { .. } => 540,
			Error::EmptyHeaderFieldName => 550,
			Error::IllegalHeaderFieldCharacter { .. } => 551,
			Error::NotAnAddressField { .. } => 552,
			Error::OnlyOneDateField => 553,
			Error::UnknownComparator { .. } => 560,
			Error::UnknownRelationalOperator { .. } => 561,
			Error::NoUrls => 570,
			Error::BadNotifyMethod { .. } => 571,
			Error::UnsupportedExtensions { .. } => 600,
		}
	}

	/// Builds an annotated report against the script source, which can be
	/// printed with `eprint` or written to any `ariadne` cache.
	pub fn report(&self, source_name: &str, span: Span)
	-> Report<'static, (String, std::ops::Range<usize>)>
	{
		Report::build(ReportKind::Error, source_name.to_string(), span.start)
			.with_code(format!("E{}", self.code()))
			.with_message(self.to_string())
			.with_label(
				Label::new((source_name.to_string(), span.range()))
					.with_message(self.to_string())
					.with_color(PRIMARY),
			)
			.finish()
	}
}

const PRIMARY: ariadne::Color = ariadne::Color::Yellow;

impl std::fmt::Display for Error
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self
		{
			Error::CommandNameEmpty => write!(f, "Command name is empty"),
			Error::CommandUnknown { name } =>
			{
				write!(f, "Command unknown: {}", name)
			}
			Error::TestUnknown { name } => write!(f, "Unknown test: {}", name),
			Error::ElsifWithoutIf =>
			{
				write!(f, "elsif is only permitted after if/elsif")
			}
			Error::ElseWithoutIf =>
			{
				write!(f, "else is only permitted after if/elsif")
			}
			Error::RequireNotPermitted =>
			{
				write!(f, "require is only permitted as the first command")
			}
			Error::RequiresOneTest { name } =>
			{
				write!(f, "Command {} requires one test", name)
			}
			Error::DoesNotUseTests { name } =>
			{
				write!(f, "Command {} does not use tests", name)
			}
			Error::RequiresBlock { name } =>
			{
				write!(f, "Command {} requires a subsidiary {{..}} block",
					name)
			}
			Error::DoesNotUseBlock { name } =>
			{
				write!(f,
					"Command {} does not use a subsidiary command block",
					name)
			}
			Error::AcceptsOnlyTestList { name } =>
			{
				write!(f,
					"Test '{}' does not accept arguments, \
					 only a list of tests",
					name)
			}
			Error::NotAcceptsOnlyTest =>
			{
				write!(f, "Test 'not' does not accept arguments, only a test")
			}
			Error::NotNeedsOneTest =>
			{
				write!(f, "Test 'not' needs exactly one subsidiary test")
			}
			Error::NeedsSubsidiaryTest =>
			{
				write!(f, "Need at least one subsidiary test")
			}
			Error::ExpectedNumberGotTag =>
			{
				write!(f, "Expected a number here, not a tag")
			}
			Error::ExpectedNumberGotStrings =>
			{
				write!(f,
					"Expected a number here, not a string or string list")
			}
			Error::ExpectedStringGotTag =>
			{
				write!(f, "Expected a string here, not a tag")
			}
			Error::ExpectedStringGotNumber =>
			{
				write!(f, "Expected a string here, not a number")
			}
			Error::ExpectedSingleString =>
			{
				write!(f, "Expected a single string here")
			}
			Error::ExpectedSingleStringGotList =>
			{
				write!(f, "Expected a single string here, not a string list")
			}
			Error::ExpectedStringListGotTag =>
			{
				write!(f, "Expected a string list here, not a tag")
			}
			Error::ExpectedStringListGotNumber =>
			{
				write!(f, "Expected a string list here, not a number")
			}
			Error::ExpectedStringList =>
			{
				write!(f, "Expected a string list here")
			}
			Error::ExpectedTagGotNumber =>
			{
				write!(f, "Expected a tag here, not a number")
			}
			Error::ExpectedTagGotStrings =>
			{
				write!(f, "Expected a tag here, not a string or string list")
			}
			Error::ArgumentSeveralValues =>
			{
				write!(f, "Argument has more than one value")
			}
			Error::UnknownTag { tag } => write!(f, "Unknown tag: {}", tag),
			Error::TagUsedTwice { tag } =>
			{
				write!(f, "Tag used twice: {}", tag)
			}
			Error::TagOccursTwice { tag } =>
			{
				write!(f, "Tag occurs twice: {}", tag)
			}
			Error::TagNotFollowed { tag } =>
			{
				write!(f, "Tag not followed by argument: {}", tag)
			}
			Error::MutuallyExclusiveTags =>
			{
				write!(f, "Mutually exclusive tags used")
			}
			Error::TagConflict { first, second } =>
			{
				write!(f, "Tag {} conflicts with {}", first, second)
			}
			Error::MissingStringListArgument =>
			{
				write!(f, "Missing string/list argument")
			}
			Error::MissingStringArgument =>
			{
				write!(f, "Missing string argument")
			}
			Error::MissingNumberArgument =>
			{
				write!(f, "Missing numeric argument")
			}
			Error::MissingHeaderList =>
			{
				write!(f, "Missing header field list")
			}
			Error::StrayNumber => write!(f, "Why is this number here?"),
			Error::StrayString => write!(f, "Why is this string/list here?"),
			Error::StrayArgument => write!(f, "Argument has no value"),
			Error::InvalidMailboxName { name } =>
			{
				write!(f, "Expected mailbox name, but got: {}", name)
			}
			Error::CyrusMailboxSyntax { name, suggestion } =>
			{
				write!(f,
					"\"{}\" is Cyrus syntax; write \"{}\" instead",
					name, suggestion)
			}
			Error::ExpectedAddress { got } =>
			{
				write!(f,
					"Expected one normal address (local@domain), \
					 but got: {}",
					got)
			}
			Error::BadAddress { message } => write!(f, "{}", message),
			Error::DaysOutOfRange => write!(f, "Number must be 1..365"),
			Error::ImportanceOutOfRange =>
			{
				write!(f, "Importance must be 1, 2 or 3")
			}
			Error::MimeNotAscii =>
			{
				write!(f,
					":mime bodies must be all-ASCII, \
					 8-bit text is not permitted")
			}
			Error::MimeParse { message } =>
			{
				write!(f, "While parsing MIME header: {}", message)
			}
			Error::HeaderFieldNotPermitted { name } =>
			{
				write!(f, "Header field not permitted: {}", name)
			}
			Error::EmptyVacationReply =>
			{
				write!(f, "Vacation reply does not contain any text")
			}
			Error::EmptyVacationText =>
			{
				write!(f, "Empty vacation text does not make sense")
			}
			Error::UnsupportedEnvelopePart { part } =>
			{
				write!(f, "Unsupported envelope part: {}", part)
			}
			Error::EmptyHeaderFieldName =>
			{
				write!(f, "Empty header field names are not allowed")
			}
			Error::IllegalHeaderFieldCharacter { character, name } =>
			{
				write!(f,
					"Illegal character (ASCII {}) \
					 seen in header field name: {}",
					character, name)
			}
			Error::NotAnAddressField { name } =>
			{
				write!(f, "Not an address field: {}", name)
			}
			Error::OnlyOneDateField =>
			{
				write!(f, "Only one date field may be specified")
			}
			Error::UnknownComparator { name } =>
			{
				write!(f, "Unknown comparator: {}", name)
			}
			Error::UnknownRelationalOperator { name } =>
			{
				write!(f, "Unknown relational operator: {}", name)
			}
			Error::NoUrls => write!(f, "No URLs"),
			Error::BadNotifyMethod { message } => write!(f, "{}", message),
			Error::UnsupportedExtensions { names } =>
			{
				let quoted: Vec<String> = names
					.iter()
					.map(|x| format!("\"{}\"", x))
					.collect();
				write!(f,
					"Each string must be a supported sieve extension. \
					 These are not: {}",
					quoted.join(", "))
			}
		}
	}
}
