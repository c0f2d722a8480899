/**/

//! A minimal MIME entity parser, just enough to validate the reason of
//! `vacation :mime`: header fields up to the first blank line, then the
//! body text.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error
{
	#[error("header line has no colon: {line:?}")]
	MissingColon
	{
		line: String
	},
	#[error("invalid header field name: {name:?}")]
	InvalidFieldName
	{
		name: String
	},
	#[error("continuation line before any header field")]
	StrayContinuation,
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field
{
	pub name: String,
	pub value: String,
}

/// A parsed MIME entity: the header fields and the undecoded body text.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity
{
	pub fields: Vec<Field>,
	pub text: String,
}

/// Parses `s` as a MIME entity. Lines up to the first blank line are
/// header fields (with folding per RFC 5322); the rest is the body.
pub fn parse(s: &str) -> Result<Entity, Error>
{
	let s = s.replace("\r\n", "\n");
	let (header, text) = match s.split_once("\n\n")
	{
		Some((header, text)) => (header, text.to_string()),
		None => (s.as_str(), String::new()),
	};

	let mut fields: Vec<Field> = Vec::new();
	for line in header.lines()
	{
		if line.starts_with(' ') || line.starts_with('\t')
		{
			// Folded continuation of the previous field.
			match fields.last_mut()
			{
				Some(field) =>
				{
					field.value.push(' ');
					field.value.push_str(line.trim());
				}
				None => return Err(Error::StrayContinuation),
			}
			continue;
		}
		let (name, value) = match line.split_once(':')
		{
			Some(x) => x,
			None =>
			{
				return Err(Error::MissingColon {
					line: line.to_string(),
				})
			}
		};
		if !crate::header::valid_field_name(name)
		{
			return Err(Error::InvalidFieldName {
				name: name.to_string(),
			});
		}
		fields.push(Field {
			name: crate::header::header_cased(name),
			value: value.trim().to_string(),
		});
	}

	Ok(Entity { fields, text })
}
