//
// Part of colander
// Copyright (c) 2026 The Colander Developers
// License: MIT
//

//! The production tree that the first-pass parser hands to the semantic
//! analyzer: a `Script` arena of commands, tests, arguments and blocks,
//! each remembering where in the source it came from so that errors can
//! be reported well.

use std::collections::BTreeSet;

use enumset::{EnumSet, EnumSetType};

use crate::error::Error;

/// A half-open byte range into the script source.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Span
{
	pub start: usize,
	pub end: usize,
}

impl Span
{
	pub fn new(start: usize, end: usize) -> Span
	{
		Span { start, end }
	}

	pub fn range(&self) -> std::ops::Range<usize>
	{
		self.start..self.end
	}
}

/// Index of a production in its `Script` arena.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Which of the three value setters have fired on an argument.
#[derive(EnumSetType, Debug)]
pub enum ValueShape
{
	Tag,
	Number,
	Strings,
}

/// The value carried by an argument production. The parser should set
/// exactly one shape; the analyzer diagnoses arguments where several
/// setters fired.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue
{
	None,
	Tag(String),
	Number(u64),
	Strings(Vec<String>),
}

/// How a test compares values, per RFC 5228 and the relational extension.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType
{
	Is,
	Contains,
	Matches,
	Value,
	Count,
}

/// The relational operator of a `:value` or `:count` match.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOperator
{
	None,
	Gt,
	Ge,
	Lt,
	Le,
	Eq,
	Ne,
}

/// Which part of an address a test inspects, per RFC 5228 and the
/// subaddress extension.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressPart
{
	NoAddressPart,
	Localpart,
	Domain,
	User,
	Detail,
	All,
}

/// Which representation of the message body a `body` test matches.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMatchType
{
	Rfc822,
	Text,
	SpecifiedTypes,
}

/// The facts that the semantic pass deduces about a test.
#[derive(Debug, Clone)]
struct TestAnalysis
{
	match_type: MatchType,
	match_operator: MatchOperator,
	address_part: AddressPart,
	comparator: Option<crate::collation::Collation>,
	body_match_type: BodyMatchType,
	headers: Option<Vec<String>>,
	envelope_parts: Option<Vec<String>>,
	keys: Option<Vec<String>>,
	content_types: Option<Vec<String>>,
	date_part: String,
	zone: String,
	size_over: bool,
	size_limit: u64,
}

impl Default for TestAnalysis
{
	fn default() -> TestAnalysis
	{
		TestAnalysis {
			match_type: MatchType::Is,
			match_operator: MatchOperator::None,
			address_part: AddressPart::NoAddressPart,
			comparator: None,
			body_match_type: BodyMatchType::Text,
			headers: None,
			envelope_parts: None,
			keys: None,
			content_types: None,
			date_part: String::new(),
			zone: String::new(),
			size_over: false,
			size_limit: 0,
		}
	}
}

#[derive(Debug)]
enum NodeKind
{
	Script
	{
		commands: Vec<NodeId>
	},
	Block
	{
		commands: Vec<NodeId>
	},
	Command
	{
		identifier: String,
		arguments: NodeId,
		block: Option<NodeId>,
		require_permitted: bool,
	},
	Test
	{
		identifier: String,
		arguments: NodeId,
		analysis: TestAnalysis,
	},
	Arguments
	{
		arguments: Vec<NodeId>,
		tests: Vec<NodeId>,
		numbered: Vec<NodeId>,
	},
	Argument
	{
		value: ArgumentValue,
		shapes: EnumSet<ValueShape>,
		parsed: bool,
	},
}

#[derive(Debug)]
struct Node
{
	parent: Option<NodeId>,
	span: Span,
	name: &'static str,
	error: Option<Error>,
	ihave_failed: bool,
	added_extensions: Vec<String>,
	kind: NodeKind,
}

/// A serializable summary of one diagnostic, for external tooling.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic
{
	pub code: u16,
	pub message: String,
	pub span: Span,
}

/// The production tree of a parsed Sieve script, plus the diagnostic
/// collector and the needed-extension tracker that the semantic pass
/// fills in.
#[must_use]
#[derive(Debug)]
pub struct Script
{
	nodes: Vec<Node>,
	bad: Vec<NodeId>,
	needed_extensions: BTreeSet<String>,
}

const ROOT: NodeId = NodeId(0);

impl Script
{
	pub fn new() -> Script
	{
		let root = Node {
			parent: None,
			span: Span::new(0, 0),
			name: "script",
			error: None,
			ihave_failed: false,
			added_extensions: Vec::new(),
			kind: NodeKind::Script {
				commands: Vec::new(),
			},
		};
		Script {
			nodes: vec![root],
			bad: Vec::new(),
			needed_extensions: BTreeSet::new(),
		}
	}

	pub fn root(&self) -> NodeId
	{
		ROOT
	}

	fn node(&self, id: NodeId) -> &Node
	{
		&self.nodes[id.0 as usize]
	}

	fn node_mut(&mut self, id: NodeId) -> &mut Node
	{
		&mut self.nodes[id.0 as usize]
	}

	fn attach(&mut self, parent: NodeId, span: Span, name: &'static str,
		kind: NodeKind) -> NodeId
	{
		let id = NodeId(self.nodes.len() as u32);
		self.nodes.push(Node {
			parent: Some(parent),
			span,
			name,
			error: None,
			ihave_failed: false,
			added_extensions: Vec::new(),
			kind,
		});
		id
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId>
	{
		self.node(id).parent
	}

	pub fn span(&self, id: NodeId) -> Span
	{
		self.node(id).span
	}

	pub fn name(&self, id: NodeId) -> &'static str
	{
		self.node(id).name
	}

	/// Records that the production `id` suffers from `error`. A write
	/// lands if the production has no error yet, or if no production on
	/// the path to the root (including this one) has had an ihave test
	/// fail: under a failed ihave guard, errors are frozen at their first
	/// value, while fresh errors may still be recorded where there was
	/// previously none.
	pub fn set_error(&mut self, id: NodeId, error: Error)
	{
		if self.node(id).error.is_none() || !self.ihave_failed_above(id)
		{
			self.node_mut(id).error = Some(error);
		}
		if self.node(id).error.is_some() && !self.bad.contains(&id)
		{
			self.bad.push(id);
		}
	}

	/// Retracts a tentative diagnostic. Always permitted.
	pub fn clear_error(&mut self, id: NodeId)
	{
		self.node_mut(id).error = None;
	}

	pub fn error(&self, id: NodeId) -> Option<&Error>
	{
		self.node(id).error.as_ref()
	}

	fn ihave_failed_above(&self, id: NodeId) -> bool
	{
		let mut current = Some(id);
		while let Some(p) = current
		{
			if self.node(p).ihave_failed
			{
				return true;
			}
			current = self.node(p).parent;
		}
		false
	}

	/// Records that an ihave test under this production will fail when
	/// executed, so the production or a child might contain unknown
	/// extensions.
	pub fn set_ihave_failed(&mut self, id: NodeId)
	{
		self.node_mut(id).ihave_failed = true;
	}

	pub fn ihave_failed(&self, id: NodeId) -> bool
	{
		self.node(id).ihave_failed
	}

	/// Returns true if `extension` is listed by this production or any
	/// ancestor.
	pub fn is_visible(&self, id: NodeId, extension: &str) -> bool
	{
		let mut current = Some(id);
		while let Some(p) = current
		{
			if self
				.node(p)
				.added_extensions
				.iter()
				.any(|x| x == extension)
			{
				return true;
			}
			current = self.node(p).parent;
		}
		false
	}

	/// Records that the script depends on `extension` at this point. If
	/// some ancestor already declares it the call is a no-op; otherwise
	/// the requirement lands in the needed-extension tracker.
	pub fn require(&mut self, id: NodeId, extension: &str)
	{
		if self.is_visible(id, extension)
		{
			return;
		}
		self.needed_extensions.insert(extension.to_string());
	}

	/// Records that `list` is available in this production and its
	/// children, skipping names already visible here.
	pub fn add_extensions(&mut self, id: NodeId, list: &[String])
	{
		let fresh: Vec<String> = list
			.iter()
			.filter(|x| !self.is_visible(id, x))
			.cloned()
			.collect();
		self.node_mut(id).added_extensions.extend(fresh);
	}

	pub fn added_extensions(&self, id: NodeId) -> &[String]
	{
		&self.node(id).added_extensions
	}

	pub fn needed_extensions(&self) -> &BTreeSet<String>
	{
		&self.needed_extensions
	}

	/// The productions that carry an error, in source order.
	pub fn bad_productions(&self) -> Vec<NodeId>
	{
		let mut bad: Vec<NodeId> = self
			.bad
			.iter()
			.copied()
			.filter(|&id| self.node(id).error.is_some())
			.collect();
		bad.sort_by_key(|&id| self.node(id).span.start);
		bad
	}

	/// Serializable summaries of all diagnostics, in source order.
	pub fn diagnostics(&self) -> Vec<Diagnostic>
	{
		self.bad_productions()
			.into_iter()
			.filter_map(|id| {
				let node = self.node(id);
				node.error.as_ref().map(|error| Diagnostic {
					code: error.code(),
					message: error.to_string(),
					span: node.span,
				})
			})
			.collect()
	}
}

/// Tree construction. The first-pass parser (or a test) builds the tree
/// through these; the semantic pass never adds nodes.
impl Script
{
	/// Appends a command to the script root or to a block. The
	/// identifier is kept lower-cased. At the script root, `require` is
	/// permitted for as long as only require commands precede.
	pub fn add_command(&mut self, parent: NodeId, identifier: &str,
		span: Span) -> NodeId
	{
		let require_permitted = match &self.node(parent).kind
		{
			NodeKind::Script { commands } => commands
				.iter()
				.all(|&c| self.identifier(c) == "require"),
			NodeKind::Block { .. } => false,
			_ => unreachable!("commands belong to the script or a block"),
		};
		let arguments = self.attach(parent, span, "arguments",
			NodeKind::Arguments {
				arguments: Vec::new(),
				tests: Vec::new(),
				numbered: Vec::new(),
			});
		let command = self.attach(parent, span, "command",
			NodeKind::Command {
				identifier: identifier.to_lowercase(),
				arguments,
				block: None,
				require_permitted,
			});
		self.node_mut(arguments).parent = Some(command);
		match &mut self.node_mut(parent).kind
		{
			NodeKind::Script { commands } => commands.push(command),
			NodeKind::Block { commands } => commands.push(command),
			_ => unreachable!(),
		}
		command
	}

	/// Appends a test to a command (the condition of `if`/`elsif`) or to
	/// another test (`allof`, `anyof`, `not`).
	pub fn add_test(&mut self, parent: NodeId, identifier: &str,
		span: Span) -> NodeId
	{
		let list = self.argument_list(parent);
		let arguments = self.attach(list, span, "arguments",
			NodeKind::Arguments {
				arguments: Vec::new(),
				tests: Vec::new(),
				numbered: Vec::new(),
			});
		let test = self.attach(list, span, "test",
			NodeKind::Test {
				identifier: identifier.to_lowercase(),
				arguments,
				analysis: TestAnalysis::default(),
			});
		self.node_mut(arguments).parent = Some(test);
		match &mut self.node_mut(list).kind
		{
			NodeKind::Arguments { tests, .. } => tests.push(test),
			_ => unreachable!(),
		}
		test
	}

	/// Attaches the subsidiary `{...}` block of a command.
	pub fn add_block(&mut self, command: NodeId, span: Span) -> NodeId
	{
		let block = self.attach(command, span, "block",
			NodeKind::Block {
				commands: Vec::new(),
			});
		match &mut self.node_mut(command).kind
		{
			NodeKind::Command { block: b, .. } => *b = Some(block),
			_ => unreachable!("blocks belong to commands"),
		}
		block
	}

	fn add_argument(&mut self, owner: NodeId, span: Span) -> NodeId
	{
		let list = self.argument_list(owner);
		let argument = self.attach(list, span, "argument",
			NodeKind::Argument {
				value: ArgumentValue::None,
				shapes: EnumSet::new(),
				parsed: false,
			});
		match &mut self.node_mut(list).kind
		{
			NodeKind::Arguments { arguments, .. } => arguments.push(argument),
			_ => unreachable!(),
		}
		argument
	}

	pub fn add_tag(&mut self, owner: NodeId, tag: &str, span: Span) -> NodeId
	{
		let argument = self.add_argument(owner, span);
		self.set_tag(argument, tag);
		argument
	}

	pub fn add_number(&mut self, owner: NodeId, number: u64,
		span: Span) -> NodeId
	{
		let argument = self.add_argument(owner, span);
		self.set_number(argument, number);
		argument
	}

	pub fn add_string(&mut self, owner: NodeId, string: &str,
		span: Span) -> NodeId
	{
		let argument = self.add_argument(owner, span);
		self.set_strings(argument, vec![string.to_string()]);
		argument
	}

	pub fn add_strings(&mut self, owner: NodeId, strings: &[&str],
		span: Span) -> NodeId
	{
		let argument = self.add_argument(owner, span);
		self.set_strings(argument,
			strings.iter().map(|x| x.to_string()).collect());
		argument
	}

	pub fn set_tag(&mut self, argument: NodeId, tag: &str)
	{
		match &mut self.node_mut(argument).kind
		{
			NodeKind::Argument { value, shapes, .. } =>
			{
				*value = ArgumentValue::Tag(tag.to_string());
				shapes.insert(ValueShape::Tag);
			}
			_ => unreachable!("not an argument"),
		}
	}

	pub fn set_number(&mut self, argument: NodeId, number: u64)
	{
		match &mut self.node_mut(argument).kind
		{
			NodeKind::Argument { value, shapes, .. } =>
			{
				*value = ArgumentValue::Number(number);
				shapes.insert(ValueShape::Number);
			}
			_ => unreachable!("not an argument"),
		}
	}

	pub fn set_strings(&mut self, argument: NodeId, strings: Vec<String>)
	{
		match &mut self.node_mut(argument).kind
		{
			NodeKind::Argument { value, shapes, .. } =>
			{
				*value = ArgumentValue::Strings(strings);
				shapes.insert(ValueShape::Strings);
			}
			_ => unreachable!("not an argument"),
		}
	}

	pub fn set_require_permitted(&mut self, command: NodeId, permitted: bool)
	{
		match &mut self.node_mut(command).kind
		{
			NodeKind::Command {
				require_permitted, ..
			} => *require_permitted = permitted,
			_ => unreachable!("not a command"),
		}
	}
}

/// Read access for the semantic pass and for callers inspecting the
/// analyzed tree.
impl Script
{
	pub fn identifier(&self, id: NodeId) -> &str
	{
		match &self.node(id).kind
		{
			NodeKind::Command { identifier, .. } => identifier,
			NodeKind::Test { identifier, .. } => identifier,
			_ => "",
		}
	}

	pub fn commands(&self, id: NodeId) -> &[NodeId]
	{
		match &self.node(id).kind
		{
			NodeKind::Script { commands } => commands,
			NodeKind::Block { commands } => commands,
			_ => &[],
		}
	}

	pub fn block(&self, command: NodeId) -> Option<NodeId>
	{
		match &self.node(command).kind
		{
			NodeKind::Command { block, .. } => *block,
			_ => None,
		}
	}

	pub fn require_permitted(&self, command: NodeId) -> bool
	{
		match &self.node(command).kind
		{
			NodeKind::Command {
				require_permitted, ..
			} => *require_permitted,
			_ => false,
		}
	}

	/// The arguments production of a command or test (or `id` itself if
	/// it already is one).
	pub fn argument_list(&self, id: NodeId) -> NodeId
	{
		match &self.node(id).kind
		{
			NodeKind::Command { arguments, .. } => *arguments,
			NodeKind::Test { arguments, .. } => *arguments,
			NodeKind::Arguments { .. } => id,
			_ => unreachable!("production has no arguments"),
		}
	}

	pub fn arguments(&self, list: NodeId) -> &[NodeId]
	{
		match &self.node(list).kind
		{
			NodeKind::Arguments { arguments, .. } => arguments,
			_ => &[],
		}
	}

	pub fn tests(&self, list: NodeId) -> &[NodeId]
	{
		match &self.node(list).kind
		{
			NodeKind::Arguments { tests, .. } => tests,
			_ => &[],
		}
	}

	/// The numbering sequence last snapshotted by
	/// `number_remaining_arguments`.
	pub fn numbering(&self, list: NodeId) -> &[NodeId]
	{
		match &self.node(list).kind
		{
			NodeKind::Arguments { numbered, .. } => numbered,
			_ => &[],
		}
	}

	pub(crate) fn set_numbering(&mut self, list: NodeId, numbered: Vec<NodeId>)
	{
		match &mut self.node_mut(list).kind
		{
			NodeKind::Arguments { numbered: n, .. } => *n = numbered,
			_ => unreachable!(),
		}
	}

	pub fn value(&self, argument: NodeId) -> &ArgumentValue
	{
		const NONE: &ArgumentValue = &ArgumentValue::None;
		match &self.node(argument).kind
		{
			NodeKind::Argument { value, .. } => value,
			_ => NONE,
		}
	}

	pub fn shapes(&self, argument: NodeId) -> EnumSet<ValueShape>
	{
		match &self.node(argument).kind
		{
			NodeKind::Argument { shapes, .. } => *shapes,
			_ => EnumSet::new(),
		}
	}

	pub fn tag(&self, argument: NodeId) -> Option<&str>
	{
		match self.value(argument)
		{
			ArgumentValue::Tag(tag) => Some(tag),
			_ => None,
		}
	}

	pub fn number(&self, argument: NodeId) -> Option<u64>
	{
		match self.value(argument)
		{
			ArgumentValue::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub fn strings(&self, argument: NodeId) -> Option<&[String]>
	{
		match self.value(argument)
		{
			ArgumentValue::Strings(strings) => Some(strings),
			_ => None,
		}
	}

	pub(crate) fn set_string(&mut self, argument: NodeId, index: usize,
		string: String)
	{
		match &mut self.node_mut(argument).kind
		{
			NodeKind::Argument {
				value: ArgumentValue::Strings(strings),
				..
			} if index < strings.len() => strings[index] = string,
			_ => (),
		}
	}

	pub fn parsed(&self, argument: NodeId) -> bool
	{
		match &self.node(argument).kind
		{
			NodeKind::Argument { parsed, .. } => *parsed,
			_ => false,
		}
	}

	pub fn set_parsed(&mut self, argument: NodeId, p: bool)
	{
		match &mut self.node_mut(argument).kind
		{
			NodeKind::Argument { parsed, .. } => *parsed = p,
			_ => (),
		}
	}

	/// Clears parse-progress state so that running the analyzer twice
	/// over the same tree yields the same diagnostics.
	pub(crate) fn reset_parse_progress(&mut self)
	{
		for node in self.nodes.iter_mut()
		{
			match &mut node.kind
			{
				NodeKind::Argument { parsed, .. } => *parsed = false,
				NodeKind::Arguments { numbered, .. } => numbered.clear(),
				_ => (),
			}
		}
	}
}

/// The analysis results stored on tests.
impl Script
{
	fn analysis(&self, test: NodeId) -> &TestAnalysis
	{
		match &self.node(test).kind
		{
			NodeKind::Test { analysis, .. } => analysis,
			_ => unreachable!("not a test"),
		}
	}

	fn analysis_mut(&mut self, test: NodeId) -> &mut TestAnalysis
	{
		match &mut self.node_mut(test).kind
		{
			NodeKind::Test { analysis, .. } => analysis,
			_ => unreachable!("not a test"),
		}
	}

	pub fn match_type(&self, test: NodeId) -> MatchType
	{
		self.analysis(test).match_type
	}

	pub fn match_operator(&self, test: NodeId) -> MatchOperator
	{
		self.analysis(test).match_operator
	}

	pub fn address_part(&self, test: NodeId) -> AddressPart
	{
		self.analysis(test).address_part
	}

	pub fn comparator(&self, test: NodeId)
	-> Option<crate::collation::Collation>
	{
		self.analysis(test).comparator
	}

	pub fn body_match_type(&self, test: NodeId) -> BodyMatchType
	{
		self.analysis(test).body_match_type
	}

	pub fn headers(&self, test: NodeId) -> Option<&[String]>
	{
		self.analysis(test).headers.as_deref()
	}

	pub fn envelope_parts(&self, test: NodeId) -> Option<&[String]>
	{
		self.analysis(test).envelope_parts.as_deref()
	}

	pub fn keys(&self, test: NodeId) -> Option<&[String]>
	{
		self.analysis(test).keys.as_deref()
	}

	pub fn content_types(&self, test: NodeId) -> Option<&[String]>
	{
		self.analysis(test).content_types.as_deref()
	}

	pub fn date_part(&self, test: NodeId) -> &str
	{
		&self.analysis(test).date_part
	}

	pub fn date_zone(&self, test: NodeId) -> &str
	{
		&self.analysis(test).zone
	}

	pub fn size_over_limit(&self, test: NodeId) -> bool
	{
		self.analysis(test).size_over
	}

	pub fn size_limit(&self, test: NodeId) -> u64
	{
		self.analysis(test).size_limit
	}

	pub(crate) fn set_match_type(&mut self, test: NodeId, x: MatchType)
	{
		self.analysis_mut(test).match_type = x;
	}

	pub(crate) fn set_match_operator(&mut self, test: NodeId,
		x: MatchOperator)
	{
		self.analysis_mut(test).match_operator = x;
	}

	pub(crate) fn set_address_part(&mut self, test: NodeId, x: AddressPart)
	{
		self.analysis_mut(test).address_part = x;
	}

	pub(crate) fn set_comparator(&mut self, test: NodeId,
		x: crate::collation::Collation)
	{
		self.analysis_mut(test).comparator = Some(x);
	}

	pub(crate) fn set_body_match_type(&mut self, test: NodeId,
		x: BodyMatchType)
	{
		self.analysis_mut(test).body_match_type = x;
	}

	pub(crate) fn set_headers(&mut self, test: NodeId, x: Vec<String>)
	{
		self.analysis_mut(test).headers = Some(x);
	}

	pub(crate) fn set_envelope_parts(&mut self, test: NodeId, x: Vec<String>)
	{
		self.analysis_mut(test).envelope_parts = Some(x);
	}

	pub(crate) fn set_keys(&mut self, test: NodeId, x: Vec<String>)
	{
		self.analysis_mut(test).keys = Some(x);
	}

	pub(crate) fn set_content_types(&mut self, test: NodeId, x: Vec<String>)
	{
		self.analysis_mut(test).content_types = Some(x);
	}

	pub(crate) fn set_date_part(&mut self, test: NodeId, x: String)
	{
		self.analysis_mut(test).date_part = x;
	}

	pub(crate) fn set_date_zone(&mut self, test: NodeId, x: String)
	{
		self.analysis_mut(test).zone = x;
	}

	pub(crate) fn set_size(&mut self, test: NodeId, over: bool, limit: u64)
	{
		let analysis = self.analysis_mut(test);
		analysis.size_over = over;
		analysis.size_limit = limit;
	}
}

impl Default for Script
{
	fn default() -> Script
	{
		Script::new()
	}
}
