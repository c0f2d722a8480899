/**/

//! The second pass over a parsed script: verifying that each command and
//! test is well-formed, that tagged options are consistent, that every
//! feature used is declared via require, and that each diagnostic lands
//! on the production that caused it. The pass never aborts; it walks the
//! whole tree and records errors as data.

mod arguments;
mod commands;

use crate::common::Script;

/// Runs the semantic pass over the whole script.
pub fn analyze(script: &mut Script)
{
	script.reset_parse_progress();
	let root = script.root();
	let top: Vec<_> = script.commands(root).to_vec();
	let mut previous = String::new();
	for command in top
	{
		commands::parse(script, command, &previous);
		previous = script.identifier(command).to_string();
	}
}
