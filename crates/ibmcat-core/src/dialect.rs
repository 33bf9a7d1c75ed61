//! Identifier quoting conventions

/// Quotes identifiers that are spliced into SQL text.
///
/// Catalog lookups bind names as parameters; quoting is only needed where a
/// name has to appear as an identifier, such as the target of a probe query.
pub trait IdentifierQuoting: Send + Sync {
    fn quote_identifier(&self, ident: &str) -> String;
}

/// Delimited identifiers using a single quote character on both sides.
///
/// Embedded quote characters are doubled. An identifier that is already a
/// well-formed delimited identifier (wrapped in the quote character, inner
/// quotes doubled) is returned unchanged; anything else is escaped whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedQuoting {
    pub quote: char,
    /// Fold to upper case before quoting (for catalogs that store names upper-cased)
    pub uppercase: bool,
}

impl DelimitedQuoting {
    pub const fn new(quote: char) -> Self {
        Self {
            quote,
            uppercase: false,
        }
    }

    pub const fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    /// Wrapped in the quote character with every inner quote doubled
    fn is_quoted(&self, ident: &str) -> bool {
        let q = self.quote;
        let Some(inner) = ident.strip_prefix(q).and_then(|s| s.strip_suffix(q)) else {
            return false;
        };

        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == q && chars.next() != Some(q) {
                return false;
            }
        }
        true
    }
}

impl Default for DelimitedQuoting {
    fn default() -> Self {
        Self::new('"')
    }
}

impl IdentifierQuoting for DelimitedQuoting {
    fn quote_identifier(&self, ident: &str) -> String {
        if self.is_quoted(ident) {
            return ident.to_string();
        }
        let folded = if self.uppercase {
            ident.to_uppercase()
        } else {
            ident.to_string()
        };
        let q = self.quote;
        let escaped = folded.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }
}
