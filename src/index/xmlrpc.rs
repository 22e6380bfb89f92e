//! Minimal XML-RPC codec.
//!
//! Covers what the package index speaks: method calls with scalar, array
//! and struct parameters, and responses carrying either a single value or
//! a fault. Attributes, namespaces and DTDs are ignored.

use std::fmt::Write as _;
use thiserror::Error;

/// An XML-RPC value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `<string>` or an untyped value.
    String(String),
    /// `<int>`, `<i4>` or `<i8>`.
    Int(i64),
    /// `<boolean>`.
    Boolean(bool),
    /// `<double>`.
    Double(f64),
    /// `<nil/>`.
    Nil,
    /// `<array>`.
    Array(Vec<Value>),
    /// `<struct>`, members in document order.
    Struct(Vec<(String, Value)>),
}

impl Value {
    /// Build a struct from `(name, value)` pairs.
    pub fn structure<I, K>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::Struct(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Get the text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer of an int value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the items of an array value.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get a struct member by name.
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Struct(members) => members.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Whether this is a `nil` value.
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// XML-RPC decoding failure.
#[derive(Debug, Error, PartialEq)]
pub enum XmlRpcError {
    /// The server answered with a `<fault>`.
    #[error("fault {code}: {message}")]
    Fault { code: i64, message: String },

    /// The document is not a well-formed XML-RPC response.
    #[error("malformed XML-RPC response: {0}")]
    Malformed(String),
}

fn malformed(message: impl Into<String>) -> XmlRpcError {
    XmlRpcError::Malformed(message.into())
}

/// Encode a `<methodCall>` document.
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut out = String::from("<?xml version='1.0'?>\n<methodCall>\n");
    let _ = writeln!(out, "<methodName>{}</methodName>", escape(method));
    out.push_str("<params>\n");
    for param in params {
        out.push_str("<param>\n");
        write_value(&mut out, param);
        out.push_str("</param>\n");
    }
    out.push_str("</params>\n</methodCall>\n");
    out
}

fn write_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::String(s) => {
            let _ = write!(out, "<string>{}</string>", escape(s));
        }
        Value::Int(i) => {
            let _ = write!(out, "<int>{}</int>", i);
        }
        Value::Boolean(b) => {
            let _ = write!(out, "<boolean>{}</boolean>", u8::from(*b));
        }
        Value::Double(d) => {
            let _ = write!(out, "<double>{}</double>", d);
        }
        Value::Nil => out.push_str("<nil/>"),
        Value::Array(items) => {
            out.push_str("<array><data>\n");
            for item in items {
                write_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Struct(members) => {
            out.push_str("<struct>\n");
            for (name, member) in members {
                let _ = writeln!(out, "<member>\n<name>{}</name>", escape(name));
                write_value(out, member);
                out.push_str("</member>\n");
            }
            out.push_str("</struct>");
        }
    }
    out.push_str("</value>\n");
}

/// Escape text for element content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Resolve entity and character references.
pub fn unescape(text: &str) -> Result<String, XmlRpcError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find(';')
            .ok_or_else(|| malformed("unterminated entity reference"))?;
        let entity = &after[..end];

        let resolved = match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = if let Some(hex) = entity.strip_prefix("#x") {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse().ok()
                } else {
                    None
                };
                code.and_then(char::from_u32)
                    .ok_or_else(|| malformed(format!("unknown entity '&{};'", entity)))?
            }
        };

        out.push(resolved);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Decode a `<methodResponse>` document into its single result value.
///
/// A `<fault>` response becomes [`XmlRpcError::Fault`].
pub fn decode_response(xml: &str) -> Result<Value, XmlRpcError> {
    let mut parser = Parser::new(tokenize(xml)?);
    parser.expect_open("methodResponse")?;

    parser.skip_whitespace();
    let value = match parser.next() {
        Some(Token::Open(name)) if name == "params" => {
            parser.expect_open("param")?;
            let value = parser.parse_value()?;
            parser.expect_close("param")?;
            parser.expect_close("params")?;
            value
        }
        Some(Token::Open(name)) if name == "fault" => {
            let fault = parser.parse_value()?;
            parser.expect_close("fault")?;
            return Err(XmlRpcError::Fault {
                code: fault.member("faultCode").and_then(Value::as_i64).unwrap_or(0),
                message: fault
                    .member("faultString")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        other => {
            return Err(malformed(format!(
                "expected <params> or <fault>, found {}",
                describe(other.as_ref())
            )))
        }
    };

    parser.expect_close("methodResponse")?;
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open(String),
    Close(String),
    Empty(String),
    Text(String),
}

fn describe(token: Option<&Token>) -> String {
    match token {
        Some(Token::Open(name)) => format!("<{}>", name),
        Some(Token::Close(name)) => format!("</{}>", name),
        Some(Token::Empty(name)) => format!("<{}/>", name),
        Some(Token::Text(text)) => format!("text '{}'", text.trim()),
        None => "end of document".to_string(),
    }
}

fn tag_name(inner: &str) -> String {
    inner.split_whitespace().next().unwrap_or_default().to_string()
}

fn push_text(tokens: &mut Vec<Token>, text: String) {
    if let Some(Token::Text(last)) = tokens.last_mut() {
        last.push_str(&text);
    } else {
        tokens.push(Token::Text(text));
    }
}

fn skip_past<'a>(rest: &'a str, terminator: &str, what: &str) -> Result<(&'a str, &'a str), XmlRpcError> {
    let end = rest
        .find(terminator)
        .ok_or_else(|| malformed(format!("unterminated {}", what)))?;
    Ok((&rest[..end], &rest[end + terminator.len()..]))
}

/// Skip a `<!...>` declaration, including a bracketed internal subset.
fn skip_declaration(rest: &str) -> Result<&str, XmlRpcError> {
    let subset_start = rest.find('[');
    let end = rest.find('>');
    match (subset_start, end) {
        (Some(open), Some(close)) if open < close => {
            let after_subset = skip_past(&rest[open + 1..], "]", "internal subset")?.1;
            Ok(skip_past(after_subset, ">", "declaration")?.1)
        }
        _ => Ok(skip_past(rest, ">", "declaration")?.1),
    }
}

fn tokenize(xml: &str) -> Result<Vec<Token>, XmlRpcError> {
    let mut tokens = Vec::new();
    let mut rest = xml;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<?") {
            rest = skip_past(after, "?>", "processing instruction")?.1;
        } else if let Some(after) = rest.strip_prefix("<!--") {
            rest = skip_past(after, "-->", "comment")?.1;
        } else if let Some(after) = rest.strip_prefix("<![CDATA[") {
            let (data, remaining) = skip_past(after, "]]>", "CDATA section")?;
            push_text(&mut tokens, data.to_string());
            rest = remaining;
        } else if let Some(after) = rest.strip_prefix("<!") {
            rest = skip_declaration(after)?;
        } else if let Some(after) = rest.strip_prefix('<') {
            let (inner, remaining) = skip_past(after, ">", "tag")?;
            let token = if let Some(name) = inner.strip_prefix('/') {
                Token::Close(tag_name(name))
            } else if let Some(body) = inner.strip_suffix('/') {
                Token::Empty(tag_name(body))
            } else {
                Token::Open(tag_name(inner))
            };
            tokens.push(token);
            rest = remaining;
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            push_text(&mut tokens, unescape(&rest[..end])?);
            rest = &rest[end..];
        }
    }

    Ok(tokens)
}

/// Deepest `<value>` nesting accepted before a response is rejected.
const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn skip_whitespace(&mut self) {
        while let Some(Token::Text(text)) = self.peek() {
            if !text.trim().is_empty() {
                break;
            }
            self.pos += 1;
        }
    }

    fn expect_open(&mut self, name: &str) -> Result<(), XmlRpcError> {
        self.skip_whitespace();
        match self.next() {
            Some(Token::Open(found)) if found == name => Ok(()),
            other => Err(malformed(format!(
                "expected <{}>, found {}",
                name,
                describe(other.as_ref())
            ))),
        }
    }

    fn expect_close(&mut self, name: &str) -> Result<(), XmlRpcError> {
        self.skip_whitespace();
        match self.next() {
            Some(Token::Close(found)) if found == name => Ok(()),
            other => Err(malformed(format!(
                "expected </{}>, found {}",
                name,
                describe(other.as_ref())
            ))),
        }
    }

    /// Read the text content of an element whose open tag was consumed.
    fn text_until_close(&mut self, name: &str) -> Result<String, XmlRpcError> {
        match self.next() {
            Some(Token::Close(found)) if found == name => Ok(String::new()),
            Some(Token::Text(text)) => {
                self.expect_close(name)?;
                Ok(text)
            }
            other => Err(malformed(format!(
                "expected text in <{}>, found {}",
                name,
                describe(other.as_ref())
            ))),
        }
    }

    fn parse_value(&mut self) -> Result<Value, XmlRpcError> {
        if self.depth >= MAX_DEPTH {
            return Err(malformed(format!(
                "values nested deeper than {} levels",
                MAX_DEPTH
            )));
        }
        self.depth += 1;
        let value = self.parse_nested_value();
        self.depth -= 1;
        value
    }

    fn parse_nested_value(&mut self) -> Result<Value, XmlRpcError> {
        self.skip_whitespace();
        match self.next() {
            Some(Token::Empty(name)) if name == "value" => return Ok(Value::String(String::new())),
            Some(Token::Open(name)) if name == "value" => {}
            other => {
                return Err(malformed(format!(
                    "expected <value>, found {}",
                    describe(other.as_ref())
                )))
            }
        }

        let value = match self.next() {
            Some(Token::Close(name)) if name == "value" => return Ok(Value::String(String::new())),
            Some(Token::Text(text)) => {
                let typed_follows =
                    text.trim().is_empty() && matches!(self.peek(), Some(Token::Open(_) | Token::Empty(_)));
                if !typed_follows {
                    self.expect_close("value")?;
                    return Ok(Value::String(text));
                }
                match self.next() {
                    Some(Token::Open(kind)) => self.parse_typed(&kind)?,
                    Some(Token::Empty(kind)) => empty_typed(&kind)?,
                    other => {
                        return Err(malformed(format!(
                            "expected a typed value, found {}",
                            describe(other.as_ref())
                        )))
                    }
                }
            }
            Some(Token::Open(kind)) => self.parse_typed(&kind)?,
            Some(Token::Empty(kind)) => empty_typed(&kind)?,
            other => {
                return Err(malformed(format!(
                    "unexpected {} in <value>",
                    describe(other.as_ref())
                )))
            }
        };

        self.expect_close("value")?;
        Ok(value)
    }

    fn parse_typed(&mut self, kind: &str) -> Result<Value, XmlRpcError> {
        match kind {
            "string" | "dateTime.iso8601" | "base64" => {
                Ok(Value::String(self.text_until_close(kind)?))
            }
            "int" | "i4" | "i8" => {
                let text = self.text_until_close(kind)?;
                text.trim()
                    .parse()
                    .map(Value::Int)
                    .map_err(|_| malformed(format!("invalid integer '{}'", text.trim())))
            }
            "boolean" => match self.text_until_close(kind)?.trim() {
                "1" => Ok(Value::Boolean(true)),
                "0" => Ok(Value::Boolean(false)),
                other => Err(malformed(format!("invalid boolean '{}'", other))),
            },
            "double" => {
                let text = self.text_until_close(kind)?;
                text.trim()
                    .parse()
                    .map(Value::Double)
                    .map_err(|_| malformed(format!("invalid double '{}'", text.trim())))
            }
            "nil" => {
                self.expect_close("nil")?;
                Ok(Value::Nil)
            }
            "array" => self.parse_array(),
            "struct" => self.parse_struct(),
            other => Err(malformed(format!("unsupported type <{}>", other))),
        }
    }

    fn parse_array(&mut self) -> Result<Value, XmlRpcError> {
        self.skip_whitespace();
        if matches!(self.peek(), Some(Token::Empty(name)) if name == "data") {
            self.pos += 1;
            self.expect_close("array")?;
            return Ok(Value::Array(Vec::new()));
        }

        self.expect_open("data")?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if matches!(self.peek(), Some(Token::Close(name)) if name == "data") {
                self.pos += 1;
                break;
            }
            items.push(self.parse_value()?);
        }
        self.expect_close("array")?;
        Ok(Value::Array(items))
    }

    fn parse_struct(&mut self) -> Result<Value, XmlRpcError> {
        let mut members = Vec::new();
        loop {
            self.skip_whitespace();
            if matches!(self.peek(), Some(Token::Close(name)) if name == "struct") {
                self.pos += 1;
                break;
            }
            self.expect_open("member")?;
            self.skip_whitespace();
            let name = if matches!(self.peek(), Some(Token::Empty(name)) if name == "name") {
                self.pos += 1;
                String::new()
            } else {
                self.expect_open("name")?;
                self.text_until_close("name")?
            };
            let value = self.parse_value()?;
            self.expect_close("member")?;
            members.push((name.trim().to_string(), value));
        }
        Ok(Value::Struct(members))
    }
}

fn empty_typed(kind: &str) -> Result<Value, XmlRpcError> {
    match kind {
        "nil" => Ok(Value::Nil),
        "string" => Ok(Value::String(String::new())),
        "array" => Ok(Value::Array(Vec::new())),
        "struct" => Ok(Value::Struct(Vec::new())),
        other => Err(malformed(format!("empty <{}/> has no value", other))),
    }
}
