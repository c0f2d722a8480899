/**/

//! The notify-method factory used by the `enotify` analyses. The only
//! supported method is `mailto:`.

use thiserror::Error;

use crate::address;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error
{
	#[error("notification method is not a URL")]
	NotAUrl,
	#[error("unsupported notification method: {scheme}")]
	UnsupportedScheme
	{
		scheme: String
	},
	#[error("invalid mailto address: {0}")]
	InvalidMailto(address::Error),
	#[error("invalid from address: {0}")]
	InvalidFrom(address::Error),
}

/// A notification method named by a script.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method
{
	Mailto
	{
		address: String
	},
}

impl Method
{
	/// Instantiates the method a notify URL names.
	pub fn parse(url: &str) -> Result<Method, Error>
	{
		let (scheme, rest) = match url.split_once(':')
		{
			Some(x) => x,
			None => return Err(Error::NotAUrl),
		};
		match scheme.to_ascii_lowercase().as_str()
		{
			"mailto" =>
			{
				// Strip any URI header list, e.g. mailto:x@y?subject=z.
				let address = match rest.split_once('?')
				{
					Some((address, _headers)) => address,
					None => rest,
				};
				address::assert_single(address)
					.map_err(Error::InvalidMailto)?;
				Ok(Method::Mailto {
					address: address.to_string(),
				})
			}
			other => Err(Error::UnsupportedScheme {
				scheme: other.to_string(),
			}),
		}
	}

	/// Checks a `:from` value against this method.
	pub fn check_from(&self, from: &str) -> Result<(), Error>
	{
		match self
		{
			Method::Mailto { .. } =>
			{
				address::assert_single(from).map_err(Error::InvalidFrom)
			}
		}
	}

	/// Checks a `:message` value against this method. Any string is
	/// acceptable for mailto.
	pub fn check_message(&self, _message: &str) -> Result<(), Error>
	{
		match self
		{
			Method::Mailto { .. } => Ok(()),
		}
	}
}
