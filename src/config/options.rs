//! Enumerated option values accepted by the conversion service

use crate::error::ConfigError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An option whose value must come from a fixed list
pub trait OptionValue: FromStr<Err = ConfigError> + Copy + fmt::Display {
    /// Configuration key this value belongs to
    const FIELD: &'static str;
}

/// Declares a closed set of option values with their wire names.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $field:literal {
            $($(#[$vmeta:meta])* $variant:ident = $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl OptionValue for $name {
            const FIELD: &'static str = $field;
        }

        impl $name {
            /// Every accepted value, in documentation order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name used by the conversion service
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(ConfigError::unsupported($field, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

option_enum! {
    /// How tracked changes in docx input are handled
    TrackChanges => "track-changes" {
        Accept = "accept",
        Reject = "reject",
        All = "all",
    }
}

option_enum! {
    /// Text wrapping mode for the output
    Wrap => "wrap" {
        Auto = "auto",
        Preserve = "preserve",
        None = "none",
    }
}

option_enum! {
    /// Syntax highlighting style for code blocks
    HighlightStyle => "highlight-style" {
        Pygments = "pygments",
        Kate = "kate",
        Monochrome = "monochrome",
        BreezeDark = "breezeDark",
        Espresso = "espresso",
        Zenburn = "zenburn",
        Haddock = "haddock",
        Tango = "tango",
    }
}

option_enum! {
    /// Where footnotes and reference links are placed
    ReferenceLocation => "reference-location" {
        Document = "document",
        Section = "section",
        Block = "block",
    }
}

option_enum! {
    /// Which division top-level headings become
    TopLevelDivision => "top-level-division" {
        Default = "default",
        Part = "part",
        Chapter = "chapter",
        Section = "section",
    }
}

option_enum! {
    /// How math is rendered in HTML output
    HtmlMathMethod => "html-math-method" {
        Plain = "plain",
        Webtex = "webtex",
        Gladtex = "gladtex",
        Mathml = "mathml",
        Mathjax = "mathjax",
        Katex = "katex",
    }
}

option_enum! {
    /// How email links are obfuscated in HTML output
    EmailObfuscation => "email-obfuscation" {
        None = "none",
        References = "references",
        Javascript = "javascript",
    }
}

option_enum! {
    /// Which notebook cell outputs are kept
    IpynbOutput => "ipynb-output" {
        Best = "best",
        All = "all",
        None = "none",
    }
}

option_enum! {
    /// Citation processing method
    CiteMethod => "cite-method" {
        Citeproc = "citeproc",
        Natbib = "natbib",
        Biblatex = "biblatex",
    }
}
