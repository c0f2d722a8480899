/**/

//! The collation registry: the comparators a script may name with
//! `:comparator`, per RFC 4790.

/// A supported comparator.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collation
{
	AsciiCasemap,
	AsciiNumeric,
	Octet,
}

impl Collation
{
	/// Looks up a collation by its registered name.
	pub fn lookup(name: &str) -> Option<Collation>
	{
		match name
		{
			"i;ascii-casemap" => Some(Collation::AsciiCasemap),
			"i;ascii-numeric" => Some(Collation::AsciiNumeric),
			"i;octet" => Some(Collation::Octet),
			_ => None,
		}
	}

	pub fn name(self) -> &'static str
	{
		match self
		{
			Collation::AsciiCasemap => "i;ascii-casemap",
			Collation::AsciiNumeric => "i;ascii-numeric",
			Collation::Octet => "i;octet",
		}
	}

	/// The registered names, sorted.
	pub fn supported() -> &'static [&'static str]
	{
		&["i;ascii-casemap", "i;ascii-numeric", "i;octet"]
	}
}
