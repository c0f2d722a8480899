/**/

//! The set of sieve extensions this implementation supports.
//!
//! BODY is from RFC 5173, COPY from RFC 3894, DATE from RFC 5260,
//! EREJECT from RFC 5429, IHAVE from RFC 5463, RELATIONAL from RFC 5231,
//! SUBADDRESS from RFC 5233, VACATION from RFC 5230 and IMAP4FLAGS from
//! RFC 5232. RFC 5260 also defines INDEX, which is not implemented.

use crate::collation::Collation;

/// Returns all supported sieve extensions, sorted by name.
pub fn supported() -> Vec<String>
{
	let mut list = vec!["body".to_string()];
	for name in Collation::supported()
	{
		list.push(format!("comparator-{}", name));
	}
	for name in [
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
	]
	{
		list.push(name.to_string());
	}
	list
}

pub fn is_supported(name: &str) -> bool
{
	supported().iter().any(|x| x == name)
}
