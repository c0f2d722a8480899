/**/

//! The address capability used by `redirect`, `vacation` and the notify
//! analyses: asserting that a string encodes exactly one
//! `local@domain` address. A display name and angle brackets are
//! permitted; address groups and source routes are not.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error
{
	#[error("empty address")]
	Empty,
	#[error("expected a single address, not a list")]
	MultipleAddresses,
	#[error("address does not contain @")]
	MissingAtSign,
	#[error("empty localpart")]
	EmptyLocalpart,
	#[error("empty domain")]
	EmptyDomain,
	#[error("illegal character in localpart: {character:?}")]
	IllegalLocalpartCharacter
	{
		character: char
	},
	#[error("illegal character in domain: {character:?}")]
	IllegalDomainCharacter
	{
		character: char
	},
	#[error("empty label in domain")]
	EmptyDomainLabel,
	#[error("unbalanced angle brackets")]
	UnbalancedAngleBrackets,
}

/// Asserts that `s` encodes exactly one `local@domain` address.
pub fn assert_single(s: &str) -> Result<(), Error>
{
	let s = s.trim();
	if s.is_empty()
	{
		return Err(Error::Empty);
	}

	// A display name may precede an angle-bracketed addr-spec.
	let spec = match (s.find('<'), s.rfind('>'))
	{
		(Some(open), Some(close)) if open < close =>
		{
			if s[(close + 1)..].trim().is_empty()
			{
				&s[(open + 1)..close]
			}
			else
			{
				return Err(Error::MultipleAddresses);
			}
		}
		(None, None) => s,
		(_, _) => return Err(Error::UnbalancedAngleBrackets),
	};

	if spec.contains(',') || spec.contains(';')
	{
		return Err(Error::MultipleAddresses);
	}

	let (localpart, domain) = match spec.rsplit_once('@')
	{
		Some(x) => x,
		None => return Err(Error::MissingAtSign),
	};
	if localpart.is_empty()
	{
		return Err(Error::EmptyLocalpart);
	}
	if domain.is_empty()
	{
		return Err(Error::EmptyDomain);
	}

	if let Some(character) =
		localpart.chars().find(|&c| !is_localpart_char(c))
	{
		return Err(Error::IllegalLocalpartCharacter { character });
	}

	for label in domain.split('.')
	{
		if label.is_empty()
		{
			return Err(Error::EmptyDomainLabel);
		}
		if let Some(character) = label.chars().find(|&c| !is_domain_char(c))
		{
			return Err(Error::IllegalDomainCharacter { character });
		}
	}

	Ok(())
}

// RFC 5322 atext plus the dot of dot-atom.
fn is_localpart_char(c: char) -> bool
{
	c.is_ascii_alphanumeric()
		|| matches!(c,
			'!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '/'
			| '=' | '?' | '^' | '_' | '`' | '{' | '|' | '}' | '~' | '.')
}

fn is_domain_char(c: char) -> bool
{
	c.is_ascii_alphanumeric() || c == '-'
}
