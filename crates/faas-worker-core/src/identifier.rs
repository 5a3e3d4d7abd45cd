//! Dotted handler identifiers.
//!
//! A [`HandlerPath`] names a handler as `<module.path>.<symbol>`. The text is
//! split on the *last* `.` only, so the module path may itself contain dots.

use std::fmt;
use std::str::FromStr;

use crate::error::ResolveCause;

/// Identifier used when `HANDLER_FUNCTION` is not set.
pub const DEFAULT_HANDLER: &str = "function.handler.handle";

const SEPARATOR: char = '.';

/// A parsed handler identifier: module path plus symbol name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerPath {
    module: String,
    symbol: String,
}

impl HandlerPath {
    /// Parses `<module.path>.<symbol>`.
    ///
    /// Returns [`ResolveCause::Malformed`] when there is no separator or when
    /// either side of the last separator is empty.
    pub fn parse(identifier: &str) -> Result<Self, ResolveCause> {
        let (module, symbol) = identifier
            .rsplit_once(SEPARATOR)
            .ok_or(ResolveCause::Malformed)?;
        if module.is_empty() || symbol.is_empty() {
            return Err(ResolveCause::Malformed);
        }
        Ok(HandlerPath {
            module: module.to_string(),
            symbol: symbol.to_string(),
        })
    }

    /// The lookup path, everything before the last separator.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The symbol name, everything after the last separator.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl FromStr for HandlerPath {
    type Err = ResolveCause;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandlerPath::parse(s)
    }
}

impl fmt::Display for HandlerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.module, SEPARATOR, self.symbol)
    }
}
