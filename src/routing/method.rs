//! HTTP method bitmask.
//!
//! # Responsibilities
//! - Represent GET/POST/PUT/DELETE/CLI as OR-combinable flags
//! - Containment test used by the dispatcher's method filter
//! - Parse method names from requests and config files
//!
//! # Design Decisions
//! - Valid masks are non-zero subsets of `ANY`; everything else is rejected
//!   with `InvalidMethod` at configuration time
//! - `CLI` is a first-class method so command-line requests route like HTTP

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{RouterError, RouterResult};

/// One or more request methods packed into a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Method(u8);

const NAMES: [(&str, Method); 5] = [
    ("GET", Method::GET),
    ("POST", Method::POST),
    ("PUT", Method::PUT),
    ("DELETE", Method::DELETE),
    ("CLI", Method::CLI),
];

impl Method {
    /// Empty mask. Never valid on a stored route.
    pub const NONE: Method = Method(0);
    pub const GET: Method = Method(0b00001);
    pub const POST: Method = Method(0b00010);
    pub const PUT: Method = Method(0b00100);
    pub const DELETE: Method = Method(0b01000);
    pub const CLI: Method = Method(0b10000);
    /// Every known method.
    pub const ANY: Method = Method(0b11111);

    /// Build a mask from raw bits, rejecting zero and unknown bits.
    pub fn from_bits(bits: u8) -> RouterResult<Self> {
        if bits == 0 || bits & !Self::ANY.0 != 0 {
            return Err(RouterError::InvalidMethod(bits));
        }
        Ok(Self(bits))
    }

    /// Parse a single method name (case-insensitive). `ANY` is accepted.
    pub fn from_name(name: &str) -> RouterResult<Self> {
        let upper = name.trim().to_ascii_uppercase();
        if upper == "ANY" {
            return Ok(Self::ANY);
        }
        NAMES
            .iter()
            .find(|(n, _)| *n == upper)
            .map(|(_, m)| *m)
            .ok_or_else(|| RouterError::UnknownMethod(name.to_string()))
    }

    /// Combine a list of method names into one mask.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> RouterResult<Self> {
        let mut mask = Self::NONE;
        for name in names {
            mask |= Self::from_name(name.as_ref())?;
        }
        Self::from_bits(mask.0)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is also set in `self`.
    pub const fn contains(self, other: Method) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the individual flags set in this mask.
    pub fn names(self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(_, m)| self.contains(*m))
            .map(|(n, _)| *n)
            .collect()
    }
}

impl BitOr for Method {
    type Output = Method;

    fn bitor(self, rhs: Method) -> Method {
        Method(self.0 | rhs.0)
    }
}

impl BitOrAssign for Method {
    fn bitor_assign(&mut self, rhs: Method) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Method {
    type Output = Method;

    fn bitand(self, rhs: Method) -> Method {
        Method(self.0 & rhs.0)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ANY {
            return f.write_str("ANY");
        }
        if self.is_empty() {
            return f.write_str("NONE");
        }
        f.write_str(&self.names().join("|"))
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({self})")
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names: Vec<&str> = s.split('|').collect();
        Self::from_names(&names)
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Conversion into a validated method mask.
///
/// Accepted by [`Route::configure`](crate::routing::route::Route::configure) so
/// that raw bitmasks and names are validated at configuration time.
pub trait IntoMethod {
    fn into_method(self) -> RouterResult<Method>;
}

impl IntoMethod for Method {
    fn into_method(self) -> RouterResult<Method> {
        Method::from_bits(self.0)
    }
}

impl IntoMethod for u8 {
    fn into_method(self) -> RouterResult<Method> {
        Method::from_bits(self)
    }
}

impl IntoMethod for &str {
    fn into_method(self) -> RouterResult<Method> {
        self.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_values() {
        assert_eq!(Method::GET.bits(), 1);
        assert_eq!(Method::POST.bits(), 2);
        assert_eq!(Method::PUT.bits(), 4);
        assert_eq!(Method::DELETE.bits(), 8);
        assert_eq!(Method::CLI.bits(), 16);
        assert_eq!(Method::ANY.bits(), 31);
        assert_eq!(
            Method::GET | Method::POST | Method::PUT | Method::DELETE | Method::CLI,
            Method::ANY
        );
    }

    #[test]
    fn test_contains() {
        let mask = Method::GET | Method::POST;
        assert!(mask.contains(Method::GET));
        assert!(mask.contains(Method::POST));
        assert!(!mask.contains(Method::PUT));
        assert!(!mask.contains(Method::DELETE));
        assert!(!mask.contains(Method::CLI));
        assert!(Method::ANY.contains(Method::CLI));
    }

    #[test]
    fn test_from_bits_rejects_invalid() {
        assert!(matches!(Method::from_bits(0), Err(RouterError::InvalidMethod(0))));
        assert!(matches!(Method::from_bits(32), Err(RouterError::InvalidMethod(32))));
        assert!(Method::from_bits(123).is_err());
        assert_eq!(Method::from_bits(3).unwrap(), Method::GET | Method::POST);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Method::from_name("get").unwrap(), Method::GET);
        assert_eq!(Method::from_name(" Cli ").unwrap(), Method::CLI);
        assert_eq!(Method::from_name("any").unwrap(), Method::ANY);
        assert!(matches!(
            Method::from_name("PATCH"),
            Err(RouterError::UnknownMethod(_))
        ));
        assert_eq!("GET|PUT".parse::<Method>().unwrap(), Method::GET | Method::PUT);
        assert!(Method::from_names::<&str>(&[]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!((Method::POST | Method::DELETE).to_string(), "POST|DELETE");
        assert_eq!(Method::ANY.to_string(), "ANY");
        assert_eq!(Method::NONE.to_string(), "NONE");
    }
}
