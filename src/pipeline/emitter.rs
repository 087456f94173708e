//! Text emission for generated Python fragments.
//!
//! Every component writes through a [`TextEmitter`] so that indentation and
//! line termination follow one convention across the whole script. Values
//! coming from configuration forms are never spliced in raw: identifiers go
//! through [`python::identifier`] and text through [`python::string_literal`].

use serde::{Deserialize, Serialize};

/// Indentation and newline conventions of the generated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStyle {
    /// One unit of indentation, repeated per nesting level.
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Line terminator appended to every emitted line.
    #[serde(default = "default_newline")]
    pub newline: String,
}

fn default_indent() -> String {
    "    ".to_string()
}

fn default_newline() -> String {
    "\n".to_string()
}

impl Default for ScriptStyle {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            newline: default_newline(),
        }
    }
}

impl ScriptStyle {
    /// Check that the style yields text Python can parse: a non-empty indent
    /// unit of spaces or tabs, and a `\n` or `\r\n` line terminator.
    pub fn validate(&self) -> Result<(), String> {
        if self.indent.is_empty() {
            return Err("indent must not be empty".to_string());
        }
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(format!(
                "indent {:?} may only contain spaces or tabs",
                self.indent
            ));
        }
        if self.newline != "\n" && self.newline != "\r\n" {
            return Err(format!(
                "newline {:?} must be \"\\n\" or \"\\r\\n\"",
                self.newline
            ));
        }
        Ok(())
    }
}

/// A self-contained piece of script text emitted by one node.
///
/// Non-empty fragments always end with the style's line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    text: String,
}

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Line-oriented writer that applies a [`ScriptStyle`].
pub struct TextEmitter<'a> {
    style: &'a ScriptStyle,
    level: usize,
    buf: String,
}

impl<'a> TextEmitter<'a> {
    /// Start a fragment at the given base nesting level.
    pub fn new(style: &'a ScriptStyle, level: usize) -> Self {
        Self {
            style,
            level,
            buf: String::new(),
        }
    }

    /// Current nesting level.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Write one indented, terminated line.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        for _ in 0..self.level {
            self.buf.push_str(&self.style.indent);
        }
        self.buf.push_str(text.as_ref());
        self.buf.push_str(&self.style.newline);
        self
    }

    /// Write a `# ` comment line at the current level.
    pub fn comment(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            self.line("#")
        } else {
            self.line(format!("# {text}"))
        }
    }

    /// Write an empty line. Blank lines carry no indentation.
    pub fn blank(&mut self) -> &mut Self {
        self.buf.push_str(&self.style.newline);
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Write `header` then `body` one level deeper.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(header);
        self.indent();
        body(self);
        self.dedent();
        self
    }

    pub fn finish(self) -> Fragment {
        Fragment { text: self.buf }
    }
}

/// Python literal and identifier helpers.
pub mod python {
    /// Python 3 reserved words that cannot be used as names.
    pub const KEYWORDS: &[&str] = &[
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
        "return", "try", "while", "with", "yield",
    ];

    fn is_simple_identifier(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) && !KEYWORDS.contains(&s)
    }

    /// Check that `s` is a (possibly dotted) Python name, e.g. `params.job`.
    pub fn is_identifier(s: &str) -> bool {
        !s.is_empty() && s.split('.').all(is_simple_identifier)
    }

    /// Return `s` unchanged if it is a safe name to interpolate.
    pub fn identifier(s: &str) -> Result<&str, String> {
        if is_identifier(s) {
            Ok(s)
        } else {
            Err(format!("'{s}' is not a valid Python identifier"))
        }
    }

    /// Quote `s` as a single-quoted Python string literal.
    pub fn string_literal(s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('\'');
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
                c => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    /// Render a finite float so Python reads it back as a float.
    pub fn float_literal(v: f64) -> Result<String, String> {
        if v.is_finite() {
            Ok(format!("{v:?}"))
        } else {
            Err(format!("{v} is not a finite number"))
        }
    }
}
